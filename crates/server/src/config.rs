use serde::Deserialize;

/// Server configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// JSON export of the movie catalog, re-read on every request
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of movies per response
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

fn default_catalog_path() -> String {
    "data/movies.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_recommendation_limit() -> usize {
    pipeline::DEFAULT_LIMIT
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.catalog_path, "data/movies.json");
        assert_eq!(config.bind_addr(), "127.0.0.1:5001");
        assert_eq!(config.recommendation_limit, 10);
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("CATALOG_PATH".to_string(), "/srv/movies.json".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("RECOMMENDATION_LIMIT".to_string(), "5".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.catalog_path, "/srv/movies.json");
        assert_eq!(config.port, 8080);
        assert_eq!(config.recommendation_limit, 5);
    }

    #[test]
    fn test_invalid_port() {
        let vars = vec![("PORT".to_string(), "not-a-port".to_string())];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
