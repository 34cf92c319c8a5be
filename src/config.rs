// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Runner configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "cubitcmd.toml";

/// How to reach the Cubit executable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubitConfig {
    /// Cubit executable, resolved through `PATH` when it has no directory part
    pub cubit_path: PathBuf,
    /// Arguments placed before `-input <journal>`
    pub args: Vec<String>,
    /// Kill Cubit after this many seconds
    pub timeout_secs: Option<u64>,
    /// Start generated journals with a comment header
    pub journal_header: bool,
    /// Verbose output
    pub verbose: bool,
}

impl Default for CubitConfig {
    fn default() -> Self {
        Self {
            cubit_path: PathBuf::from("cubit"),
            args: vec![
                "-batch".to_string(),
                "-nographics".to_string(),
                "-nojournal".to_string(),
            ],
            timeout_secs: None,
            journal_header: true,
            verbose: false,
        }
    }
}

impl CubitConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: CubitConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `cubitcmd.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `CUBIT_PATH`, `CUBITCMD_TIMEOUT` and `CUBITCMD_VERBOSE`
    pub fn with_env_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("CUBIT_PATH") {
            self.cubit_path = PathBuf::from(path);
        }

        if let Some(timeout) = var("CUBITCMD_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = Some(secs),
                Err(err) => warn!(value = %timeout, %err, "ignoring invalid CUBITCMD_TIMEOUT"),
            }
        }

        if let Some(verbose) = var("CUBITCMD_VERBOSE") {
            self.verbose = verbose.parse().unwrap_or(false);
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
