use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Deadline applied to every repository call. A request that outlives this
/// fails like any other network error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";
const ENV_BASE_URL: &str = "TASKLINE_API_URL";
const CONFIG_FILE_NAME: &str = "config.json";

/// Where the backend lives. Resolution order: environment variable,
/// `~/.taskline/config.json`, compiled-in default.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn load() -> Self {
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                return Self { base_url: url };
            }
        }
        Self::from_config_file().unwrap_or_default()
    }

    fn from_config_file() -> Option<Self> {
        let path = config_dir()?.join(CONFIG_FILE_NAME);
        let file = File::open(path).ok()?;
        serde_json::from_reader(BufReader::new(file)).ok()
    }
}

/// `~/.taskline`, shared by the config file and the log directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".taskline"))
}
