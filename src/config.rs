// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Caixa", "caixa"));

const CONFIG_FILE: &str = "caixa.toml";
const ENV_PREFIX: &str = "CAIXA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub recent_limit: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 15,
            recent_limit: 5,
            log_level: "info".to_string(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join(CONFIG_FILE))
}

/// Defaults, then the TOML file (optional), then `CAIXA_*` variables.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(
            config::File::new(&path.to_string_lossy(), config::FileFormat::Toml).required(false),
        )
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .with_context(|| format!("Load config from {}", path.display()))?;
    let cfg: AppConfig = settings
        .try_deserialize()
        .with_context(|| format!("Parse config from {}", path.display()))?;
    Ok(cfg)
}

/// Resolves the file from `--config`, then layers `--base-url` and
/// `--log-level` on top.
pub fn load(m: &clap::ArgMatches) -> Result<AppConfig> {
    let path = match m.get_one::<String>("config") {
        Some(p) => PathBuf::from(p),
        None => default_config_path()?,
    };
    let mut cfg = load_from(&path)?;
    if let Some(url) = m.get_one::<String>("base-url") {
        cfg.base_url = url.trim().to_string();
    }
    if let Some(level) = m.get_one::<String>("log-level") {
        cfg.log_level = level.trim().to_string();
    }
    Ok(cfg)
}
