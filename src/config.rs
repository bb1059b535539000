use std::env;

/// Runtime knobs for the decoder. The core touches no database and opens no
/// socket, so there is no required var here, only a defaulted log filter.
#[derive(Clone, Debug)]
pub struct Config {
    /// `RUST_LOG`-style filter handed to the embedder's own subscriber setup.
    /// The library never initializes a subscriber itself.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_filter: env::var("LIVEODDS_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
        }
    }
}
