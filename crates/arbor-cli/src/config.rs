//! Optional TOML configuration.
//!
//! Lookup order: `--config <path>`, then `$ARBOR_CONFIG`, then
//! `<config_dir>/arbor/config.toml`. Only the default location may be
//! absent; a path given explicitly must exist.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Traversal engine used by `arbor search`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Bfs,
    Dfs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `pretty`, `text` or `json`.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Directedness for graph files that do not state it.
    #[serde(default)]
    pub directed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub strategy: Engine,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("arbor/config.toml"))
}

/// Load the effective configuration.
pub fn load(flag: Option<&Path>) -> Result<Config> {
    let explicit = flag
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("ARBOR_CONFIG").map(PathBuf::from));

    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            load_file(&path)
        }
        None => match default_config_path() {
            Some(path) if path.exists() => load_file(&path),
            _ => Ok(Config::default()),
        },
    }
}

fn load_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn parse(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}
