use anyhow::{Context, Result, anyhow};
use catalog::{CatalogEntry, CatalogStore, JsonFileCatalog, MovieId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::{DEFAULT_LIMIT, TfidfVectorizer, extract_features};
use server::{MovieRecommendation, Recommender};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Content-based movie recommendations from a catalog export
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Content-based movie recommender (TF-IDF over genres, overview and cast)", long_about = None)]
struct Cli {
    /// Path to the JSON catalog export
    #[arg(short, long, default_value = "data/movies.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies for a viewing history
    Recommend {
        /// Ids of movies already seen (repeat or comma-separate)
        #[arg(long, num_args = 0.., value_delimiter = ',')]
        seen: Vec<MovieId>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show a movie's feature document and its heaviest terms
    Inspect {
        /// Movie id
        #[arg(long)]
        id: MovieId,

        /// Number of terms to show
        #[arg(long, default_value = "10")]
        terms: usize,

        /// Print the catalog entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Number of seen movies per request
        #[arg(long, default_value = "5")]
        history: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let store = Arc::new(JsonFileCatalog::new(&cli.catalog));

    match cli.command {
        Commands::Recommend { seen, limit } => handle_recommend(store, &seen, limit)?,
        Commands::Search { title } => handle_search(store.as_ref(), &title)?,
        Commands::Inspect { id, terms, json } => handle_inspect(store.as_ref(), &id, terms, json)?,
        Commands::Benchmark {
            requests,
            concurrent,
            history,
        } => handle_benchmark(store, requests, concurrent, history).await?,
    }

    Ok(())
}

/// Read the catalog once, for commands that only look at entries
fn load_entries(store: &JsonFileCatalog) -> Result<Vec<CatalogEntry>> {
    let start = Instant::now();
    let entries = store
        .snapshot()
        .with_context(|| format!("Failed to load catalog {}", store.path().display()))?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        entries.len(),
        start.elapsed()
    );
    Ok(entries)
}

/// Handle the 'recommend' command
fn handle_recommend(store: Arc<JsonFileCatalog>, seen: &[MovieId], limit: usize) -> Result<()> {
    let recommender = Recommender::new(store).with_limit(limit);

    let start = Instant::now();
    let recommendations = recommender.get_recommendations(seen)?;
    println!(
        "{} Ranked catalog in {:?}",
        "✓".green(),
        start.elapsed()
    );

    print_recommendations(&recommendations);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(store: &JsonFileCatalog, title: &str) -> Result<()> {
    let entries = load_entries(store)?;
    let title_lower = title.to_lowercase();

    // (rank, entry): exact matches first, then substring matches
    let mut matches: Vec<(u8, &CatalogEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let entry_title = entry.display_title().to_lowercase();
            if entry_title == title_lower {
                Some((0, entry))
            } else if entry_title.contains(&title_lower) {
                Some((1, entry))
            } else {
                None
            }
        })
        .collect();
    matches.sort_by_key(|(rank, _)| *rank);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for (_, entry) in matches.iter().take(20) {
        println!(
            "{}: {} [{}]",
            entry.id.cyan(),
            entry.display_title(),
            entry.genres.join(", ")
        );
    }
    Ok(())
}

/// Handle the 'inspect' command
fn handle_inspect(store: &JsonFileCatalog, id: &str, terms: usize, json: bool) -> Result<()> {
    let entries = load_entries(store)?;
    let position = entries
        .iter()
        .position(|entry| entry.id == id)
        .ok_or_else(|| anyhow!("Movie {} not found", id))?;
    let entry = &entries[position];

    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    }

    let documents = extract_features(&entries);
    let space = TfidfVectorizer::new()
        .with_stop_words_english()
        .fit_transform(&documents)?;

    println!("{}", format!("Movie {}", entry.id).bold().blue());
    println!("{}Title: {}", "• ".green(), entry.display_title());
    println!("{}Genres: {}", "• ".green(), entry.genres.join(", "));
    println!("{}Cast: {}", "• ".green(), entry.cast.join(", "));
    println!("{}Document: {}", "• ".cyan(), documents[position].text.trim());
    println!(
        "{}Vocabulary: {} terms across {} movies",
        "• ".cyan(),
        space.vocabulary_size(),
        space.len()
    );

    println!("Top terms:");
    let top = space.top_terms(position, terms);
    if top.is_empty() {
        println!("  (no terms, this movie has no textual signal)");
    }
    for (term, weight) in top {
        println!("  - {:<20} {:.4}", term, weight);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    store: Arc<JsonFileCatalog>,
    requests: usize,
    concurrent: usize,
    history: usize,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be at least 1"));
    }

    let ids: Vec<MovieId> = load_entries(&store)?.into_iter().map(|e| e.id).collect();
    let recommender = Recommender::new(store);

    // Random histories drawn from the catalog
    let mut rng = rand::rng();
    let histories: Vec<Vec<MovieId>> = (0..requests)
        .map(|_| {
            rand::seq::index::sample(&mut rng, ids.len(), history.min(ids.len()))
                .into_iter()
                .map(|i| ids[i].clone())
                .collect()
        })
        .collect();

    // Run in waves of `concurrent` requests on the blocking pool
    let wall_start = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for wave in histories.chunks(concurrent.max(1)) {
        let mut handles = Vec::with_capacity(wave.len());
        for seen in wave {
            let recommender = recommender.clone();
            let seen = seen.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                recommender.recommend(&seen)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            }));
        }
        for handle in handles {
            timings.push(handle.await??);
        }
    }
    let wall_time = wall_start.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[MovieRecommendation]) {
    print!("{}", "Movie Recommendations:\n".bold().blue());
    if recommendations.is_empty() {
        println!("  (nothing left to recommend)");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        let score = rec
            .score
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}. {} ({}) [{}] - Score: {} [{:?}]",
            (i + 1).to_string().green(),
            rec.title,
            rec.movie_id,
            rec.genres.join(", "),
            score,
            rec.source
        );
    }
}
