use crate::app::keymap::KeyConfig;
use crate::theme::PaletteType;
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
/// One hour; anything slower would leave the log looking frozen.
pub const MAX_POLL_INTERVAL_MS: u64 = 3_600_000;

#[derive(Debug, Parser)]
#[command(name = "deskpilot", version, about = "Terminal control panel for the desktop automation backend")]
pub struct Cli {
    /// Path to a config file (defaults to ~/.config/deskpilot/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Command-log polling period in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Where to write the diagnostic log
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub history_limit: Option<usize>,
    pub palette: PaletteType,
    pub log_file: Option<PathBuf>,
    pub keys: KeyConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            history_limit: None,
            palette: PaletteType::CatppuccinMocha,
            log_file: None,
            keys: KeyConfig::default(),
        }
    }
}

impl PanelConfig {
    /// File config (if any) with CLI overrides applied on top.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match cli.config.as_deref() {
            Some(path) => Self::from_file(path)?,
            None => match get_config_dir() {
                Some(dir) if dir.join("config.toml").exists() => {
                    Self::from_file(&dir.join("config.toml"))?
                }
                _ => Self::default(),
            },
        };

        if let Some(url) = &cli.url {
            config.base_url = url.clone();
        }
        if let Some(ms) = cli.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(path) = &cli.log_file {
            config.log_file = Some(path.clone());
        }

        config.normalize()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            bail!("base_url must start with http:// or https://, got {:?}", self.base_url);
        }
        self.base_url = trimmed.to_string();

        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            bail!(
                "poll_interval_ms must be at most {MAX_POLL_INTERVAL_MS}, got {}",
                self.poll_interval_ms
            );
        }
        if self.history_limit == Some(0) {
            bail!("history_limit must be greater than zero when set");
        }
        Ok(())
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            get_config_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("deskpilot.log")
        })
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("deskpilot");
        path
    })
}
