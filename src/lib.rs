// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! cubitcmd
//!
//! Typed command builder for the Cubit meshing application. Every operation
//! formats Cubit command strings and hands them to a [`CommandExecutor`]:
//! an embedded session, a journal file, or Cubit itself in batch mode.
//!
//! ```
//! use cubitcmd::{CommandLog, Entity, Mesher};
//!
//! let mut mesher = Mesher::new(CommandLog::new());
//! mesher.set_interval(&Entity::curve(3), 5).unwrap();
//! mesher.create_sideset([Entity::surface(1), Entity::surface(2)], 10).unwrap();
//!
//! assert_eq!(
//!     mesher.executor().commands(),
//!     ["curve 3 interval 5", "curve 3 scheme equal", "sideset 10 surface 1 2"]
//! );
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod entity;
pub mod error;
pub mod executor;
pub mod mesher;
pub mod plan;
pub mod runner;

pub use command::{MeshCommand, ToCommands};
pub use config::CubitConfig;
pub use entity::{Body, Entity, EntityId, EntityType, IntoIds, OneOrMany};
pub use error::CommandError;
pub use executor::{CommandExecutor, CommandLog, JournalWriter};
pub use mesher::Mesher;
pub use plan::MeshPlan;
pub use runner::CubitBatch;

/// Load a plan file and return its command lines
pub fn journal_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Vec<String>> {
    Ok(MeshPlan::from_file(path)?.journal())
}
