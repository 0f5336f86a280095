use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Candidate locations of the precomputed catalog bundle, tried in order
    #[serde(
        default = "default_bundle_paths",
        deserialize_with = "deserialize_path_list"
    )]
    pub catalog_bundle_paths: Vec<PathBuf>,

    /// Candidate locations of the JSON movie records, tried in order
    #[serde(
        default = "default_records_paths",
        deserialize_with = "deserialize_path_list"
    )]
    pub catalog_records_paths: Vec<PathBuf>,

    /// TMDB API key. Poster lookups are skipped entirely without one.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with a TMDB `poster_path` to build an image URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Timeout for each poster lookup attempt, in milliseconds
    #[serde(default = "default_poster_timeout_ms")]
    pub poster_timeout_ms: u64,

    /// Number of catalog entries shown as trending on the home page
    #[serde(default = "default_trending_count")]
    pub trending_count: usize,

    #[serde(default = "default_cors_allow_any")]
    pub cors_allow_any: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_bundle_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("movie_data.bin"),
        PathBuf::from("../movie_data.bin"),
    ]
}

fn default_records_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("filtered_credits.json"),
        PathBuf::from("../filtered_credits.json"),
    ]
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_timeout_ms() -> u64 {
    2000
}

fn default_trending_count() -> usize {
    5
}

fn default_cors_allow_any() -> bool {
    true
}

/// Parses a comma-separated list of paths, ignoring blank entries
fn deserialize_path_list<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(split_paths(&raw))
}

fn split_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_millis(self.poster_timeout_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
