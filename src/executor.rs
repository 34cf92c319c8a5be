// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command executors
//!
//! [`CommandExecutor`] is the single seam between the formatter and whatever
//! runs the commands: a live Cubit session, a journal file, or a test log.

use crate::error::{CommandError, Result};
use std::io::Write;

/// Entry point of an external Cubit command interpreter
pub trait CommandExecutor {
    /// Hand one command line to the interpreter.
    ///
    /// A rejection is returned as-is; callers do not retry.
    fn execute(&mut self, command: &str) -> Result<()>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &mut E {
    fn execute(&mut self, command: &str) -> Result<()> {
        (**self).execute(command)
    }
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for Box<E> {
    fn execute(&mut self, command: &str) -> Result<()> {
        (**self).execute(command)
    }
}

/// Records every command it receives
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Vec<String>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn into_commands(self) -> Vec<String> {
        self.commands
    }
}

impl CommandExecutor for CommandLog {
    fn execute(&mut self, command: &str) -> Result<()> {
        self.commands.push(command.to_string());
        Ok(())
    }
}

/// Writes commands to a Cubit journal, one per line.
///
/// Commands must be single lines: an embedded newline would be replayed as
/// two commands. Debug builds assert this.
pub struct JournalWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JournalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Write a `#` comment line for each line of `text`
    pub fn comment(&mut self, text: &str) -> Result<()> {
        for line in text.lines() {
            writeln!(self.writer, "# {}", line)?;
        }
        Ok(())
    }

    /// Standard header naming the generator and the time of generation
    pub fn header(&mut self, title: Option<&str>) -> Result<()> {
        self.comment(&format!(
            "Generated by cubitcmd v{} on {}",
            env!("CARGO_PKG_VERSION"),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ))?;
        if let Some(title) = title {
            self.comment(title)?;
        }
        Ok(())
    }

    /// Number of commands written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandExecutor for JournalWriter<W> {
    fn execute(&mut self, command: &str) -> Result<()> {
        debug_assert!(
            !command.contains(|c| c == '\n' || c == '\r'),
            "journal commands must be single-line: {command:?}"
        );
        writeln!(self.writer, "{}", command)?;
        self.written += 1;
        Ok(())
    }
}

/// Adapts a closure, e.g. a bridge into an embedded Cubit session
pub struct FnExecutor<F> {
    f: F,
}

impl<F> CommandExecutor for FnExecutor<F>
where
    F: FnMut(&str) -> Result<()>,
{
    fn execute(&mut self, command: &str) -> Result<()> {
        (self.f)(command)
    }
}

/// Build an executor from a closure
pub fn from_fn<F>(f: F) -> FnExecutor<F>
where
    F: FnMut(&str) -> std::result::Result<(), CommandError>,
{
    FnExecutor { f }
}
