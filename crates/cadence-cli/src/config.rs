//! CLI configuration paths
//!
//! Settings live in `~/.cadence/config.toml` and engine state in
//! `~/.cadence/state.json` unless overridden on the command line or through
//! `CADENCE_CONFIG` / `CADENCE_STATE`.

use anyhow::Context;
use std::path::{Path, PathBuf};

use cadence_common::CadenceConfig;

const APP_DIR: &str = ".cadence";

pub fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}

pub fn default_state_path() -> PathBuf {
    app_dir().join("state.json")
}

fn app_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

pub fn load(path: &Path) -> anyhow::Result<CadenceConfig> {
    CadenceConfig::load(path).with_context(|| format!("loading config from {}", path.display()))
}

/// Write the default configuration, refusing to clobber an existing file
pub fn init(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, CadenceConfig::default().to_toml()?)?;
    Ok(())
}
