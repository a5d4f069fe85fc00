use std::env;
use std::path::PathBuf;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database file; `None` runs on a private in-memory database.
    pub database_path: Option<PathBuf>,
    /// Capacity of each service's request channel.
    pub channel_buffer: usize,
}

const DEFAULT_CHANNEL_BUFFER: usize = 32;

impl AppConfig {
    /// Reads `KUSINA_DB` and `KUSINA_CHANNEL_BUFFER`, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let database_path = env::var_os("KUSINA_DB").map(PathBuf::from);
        let channel_buffer = env::var("KUSINA_CHANNEL_BUFFER")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_CHANNEL_BUFFER);
        Self {
            database_path,
            channel_buffer,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}
