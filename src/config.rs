//! Runtime configuration from environment variables.
//!
//! `HOST` (default 0.0.0.0), `PORT` (default 8080), `TEAMS_CSV` (roster loaded
//! at startup) and `TOURNAMENT_NAME`.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub teams_csv: Option<PathBuf>,
    pub tournament_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            teams_csv: None,
            tournament_name: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable or blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let port = match get("PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                log::warn!("Ignoring invalid PORT, using {}", defaults.port);
                defaults.port
            }
            None => defaults.port,
        };
        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            teams_csv: get("TEAMS_CSV").map(PathBuf::from),
            tournament_name: get("TOURNAMENT_NAME"),
        }
    }
}
