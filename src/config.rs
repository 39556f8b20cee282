use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for photo-postmortem.
///
/// Controls which readers the extractor chain uses, in what order, and how
/// results are reported.
///
/// # Loading
///
/// ```rust,no_run
/// use photo_postmortem::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.readers.fast.enabled = false; // always use the comprehensive reader
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reader toggles.
    pub readers: Readers,
    /// Order in which readers are tried (fallback chain).
    pub reader_order: Vec<String>,
    /// Output behavior.
    pub output: OutputConfig,
}

/// Configuration for the available readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Readers {
    pub fast: ReaderConfig,
    pub comprehensive: ReaderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    pub enabled: bool,
}

/// Output and behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// If `true`, print results as a JSON array instead of log lines.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            readers: Readers {
                fast: ReaderConfig { enabled: true },
                comprehensive: ReaderConfig { enabled: true },
            },
            reader_order: vec!["fast".to_string(), "comprehensive".to_string()],
            output: OutputConfig { json: false },
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Get the ordered list of enabled readers.
    pub fn enabled_readers(&self) -> Vec<String> {
        self.reader_order
            .iter()
            .filter(|name| match name.as_str() {
                "fast" => self.readers.fast.enabled,
                "comprehensive" => self.readers.comprehensive.enabled,
                other => {
                    log::warn!("Unknown reader \"{other}\" in reader_order, ignoring");
                    false
                }
            })
            .cloned()
            .collect()
    }
}
