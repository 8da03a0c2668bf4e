use std::{env, path::PathBuf, str::FromStr};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_COLORS_PATH: &str = "data/colors.csv";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration, read from `HUEPROBE_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    /// CSV reference table with `R`, `G`, `B` and `Color Name` columns
    pub colors_path: PathBuf,
    pub static_dir: PathBuf,
    /// Largest accepted image upload
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            colors_path: PathBuf::from(DEFAULT_COLORS_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);
        Self {
            bind_address: lookup("HUEPROBE_BIND").unwrap_or(defaults.bind_address),
            colors_path: path("HUEPROBE_COLORS", defaults.colors_path),
            static_dir: path("HUEPROBE_STATIC_DIR", defaults.static_dir),
            max_upload_bytes: parse_or(&lookup, "HUEPROBE_MAX_UPLOAD", defaults.max_upload_bytes),
        }
    }
}

fn parse_or<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
