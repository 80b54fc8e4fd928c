//! CLI configuration (`~/.mdlegal/config.toml`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::debug;

use mdlegal_core::pagination::MAX_PER_PAGE;
use mdlegal_core::service::DEFAULT_LATENCY_MS;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MDLEGAL_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Rows per page; unset uses each entity's own page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Simulated service latency for loads
    pub load_delay_ms: u64,
    /// Where the settings blobs live (default: ~/.mdlegal/settings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_dir: Option<PathBuf>,
    /// Default log level when RUST_LOG is not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            load_delay_ms: DEFAULT_LATENCY_MS,
            settings_dir: None,
            log_level: None,
        }
    }
}

/// Root directory for mdlegal state
fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mdlegal")
}

impl CliConfig {
    /// Config file path, honoring `MDLEGAL_CONFIG`
    pub fn config_path() -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => home_dir().join("config.toml"),
        }
    }

    /// Load from the default location; a missing file gives defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        if let Some(size) = config.page_size {
            if !(1..=MAX_PER_PAGE).contains(&size) {
                bail!(
                    "page_size must be between 1 and {} in {}, got {}",
                    MAX_PER_PAGE,
                    path.display(),
                    size
                );
            }
        }
        Ok(config)
    }

    /// Settings directory, resolved against the home default
    pub fn settings_dir(&self) -> PathBuf {
        self.settings_dir
            .clone()
            .unwrap_or_else(|| home_dir().join("settings"))
    }

    /// Service latency; `--no-delay` forces zero
    pub fn latency(&self, no_delay: bool) -> Duration {
        if no_delay {
            Duration::ZERO
        } else {
            Duration::from_millis(self.load_delay_ms)
        }
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init(InitArgs),
    /// Print the effective configuration as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = CliConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(&CliConfig::default())
        .context("Failed to serialize config to TOML")?;
    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!("✅ Created config at: {}", config_path.display());
    Ok(())
}

fn run_show() -> Result<()> {
    let config = CliConfig::load()?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    print!("{}", toml_str);
    println!("# settings_dir resolves to {}", config.settings_dir().display());
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", CliConfig::config_path().display());
    Ok(())
}
