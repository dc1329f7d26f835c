use catalog::{CatalogStore, JsonFileCatalog};
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/movies.json".to_string());

    println!("Loading catalog from {}...\n", path);

    let store = JsonFileCatalog::new(&path);
    let start = Instant::now();
    let entries = store.snapshot().expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let with_overview = entries.iter().filter(|e| !e.overview.is_empty()).count();
    let cast_members: usize = entries.iter().map(|e| e.cast.len()).sum();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", entries.len());
    println!("With overview: {}", with_overview);
    println!("Cast credits: {}", cast_members);
    println!("\nPerformance: {:.0} movies/second",
             entries.len() as f64 / elapsed.as_secs_f64());
}
