//! User configuration (`config.toml`).

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Fractional digits shown for non-integer values
    pub decimals: usize,
    /// Print formula diagnostics after the table
    pub show_issues: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "warn".to_string(),
            decimals: 2,
            show_issues: true,
        }
    }
}

const MAX_DECIMALS: usize = 12;

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "ledgergrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load configuration from `explicit` or the user config dir.
/// Problems are returned as warnings and the defaults are used instead.
pub fn load_config(explicit: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let path = explicit.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = path else {
        return (Config::default(), warnings);
    };
    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let mut config = match std::fs::read_to_string(&path) {
        Ok(content) => match parse_config(&content) {
            Ok(parsed) => parsed,
            Err(err) => {
                warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                Config::default()
            }
        },
        Err(err) => {
            warnings.push(format!("Failed to read {}: {}", path.display(), err));
            Config::default()
        }
    };

    if config.decimals > MAX_DECIMALS {
        warnings.push(format!(
            "decimals must be <= {}, using {}",
            MAX_DECIMALS, MAX_DECIMALS
        ));
        config.decimals = MAX_DECIMALS;
    }

    (config, warnings)
}

fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
