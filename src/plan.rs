// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh plans: command sequences stored as TOML or JSON
//!
//! ```toml
//! name = "bracket"
//!
//! [[commands]]
//! op = "interval"
//! id = 3
//! intervals = 5
//!
//! [[commands]]
//! op = "sweep"
//! volume = 1
//! sources = [2, 3]
//! targets = 4
//! ```

use crate::command::{MeshCommand, ToCommands};
use crate::executor::{CommandExecutor, JournalWriter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// On-disk plan format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Toml,
    Json,
}

impl PlanFormat {
    /// `.json` files are JSON, everything else is TOML
    pub fn detect(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "json") {
            PlanFormat::Json
        } else {
            PlanFormat::Toml
        }
    }
}

/// An ordered list of formatter operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub commands: Vec<MeshCommand>,
}

impl MeshPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn push(&mut self, command: impl Into<MeshCommand>) -> &mut Self {
        self.commands.push(command.into());
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse TOML plan")
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Failed to parse JSON plan")
    }

    /// Load a plan, picking the format from the file extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file: {}", path.display()))?;

        let plan = match PlanFormat::detect(path) {
            PlanFormat::Json => Self::from_json_str(&source),
            PlanFormat::Toml => Self::from_toml_str(&source),
        };
        plan.with_context(|| format!("Invalid plan file: {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize plan as TOML")
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize plan as JSON")
    }

    /// Save the plan, picking the format from the file extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = match PlanFormat::detect(path) {
            PlanFormat::Json => self.to_json_string()?,
            PlanFormat::Toml => self.to_toml_string()?,
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write plan file: {}", path.display()))
    }

    /// All command lines in dispatch order
    pub fn journal(&self) -> Vec<String> {
        self.commands
            .iter()
            .flat_map(|command| command.to_commands())
            .collect()
    }

    /// Write the plan as a Cubit journal, returning the number of commands
    pub fn write_journal<W: Write>(&self, writer: W, header: bool) -> Result<usize> {
        let mut journal = JournalWriter::new(writer);
        if header {
            journal.header(self.name.as_deref())?;
        }
        if let Some(description) = &self.description {
            journal.comment(description)?;
        }
        for line in self.journal() {
            journal.execute(&line)?;
        }
        journal.flush()?;
        Ok(journal.written())
    }

    /// Plan name, falling back to the file stem
    pub fn display_name(&self, path: &Path) -> String {
        self.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
    }
}

/// Find `.toml` and `.json` plan files under `path`, sorted.
///
/// A file path is returned as-is.
pub fn discover_plans(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut plans = Vec::new();
    for entry in WalkDir::new(path).follow_links(true) {
        let entry =
            entry.with_context(|| format!("Failed to walk plan directory: {}", path.display()))?;
        let candidate = entry.path();
        let is_plan = candidate
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json");
        if entry.file_type().is_file() && is_plan {
            plans.push(candidate.to_path_buf());
        }
    }

    plans.sort();
    Ok(plans)
}
