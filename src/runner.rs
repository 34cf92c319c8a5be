// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch execution through the Cubit executable
//!
//! Commands are buffered, written to a temporary journal and replayed with
//! `cubit -batch -nographics -nojournal -input <journal>`. Cubit reports
//! problems as `ERROR:` lines in its output; the first one is mapped back to
//! the command echoed just before it.

use crate::config::CubitConfig;
use crate::error::{CommandError, Result};
use crate::executor::{CommandExecutor, JournalWriter};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome of a successful batch run
#[derive(Debug)]
pub struct BatchOutput {
    pub status: ExitStatus,
    pub output: String,
    pub commands: usize,
    pub duration: Duration,
}

/// Buffers commands and replays them through Cubit in batch mode
pub struct CubitBatch {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
    commands: Vec<String>,
}

impl CubitBatch {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: CubitConfig::default().args,
            timeout: None,
            commands: Vec::new(),
        }
    }

    pub fn from_config(config: &CubitConfig) -> Self {
        Self {
            program: config.cubit_path.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
            commands: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Commands waiting for the next [`run`](Self::run)
    pub fn pending(&self) -> &[String] {
        &self.commands
    }

    /// Check if the Cubit executable can be found
    pub fn is_available(&self) -> bool {
        resolve_program(&self.program).is_some()
    }

    /// Replay all pending commands in one Cubit process.
    ///
    /// The buffer is drained whether or not Cubit accepts the journal.
    pub fn run(&mut self) -> Result<BatchOutput> {
        let commands = std::mem::take(&mut self.commands);
        let start = Instant::now();

        let program = resolve_program(&self.program).ok_or_else(|| CommandError::Unavailable {
            path: self.program.clone(),
        })?;

        let mut journal = tempfile::Builder::new()
            .prefix("cubitcmd-")
            .suffix(".jou")
            .tempfile()?;
        {
            let mut writer = JournalWriter::new(journal.as_file_mut());
            for command in &commands {
                writer.execute(command)?;
            }
            writer.flush()?;
        }

        let mut capture = tempfile::tempfile()?;
        info!(
            program = %program.display(),
            journal = %journal.path().display(),
            commands = commands.len(),
            "running cubit batch"
        );

        let mut child = Command::new(&program)
            .args(&self.args)
            .arg("-input")
            .arg(journal.path())
            .stdin(Stdio::null())
            .stdout(Stdio::from(capture.try_clone()?))
            .stderr(Stdio::from(capture.try_clone()?))
            .spawn()
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => CommandError::Unavailable {
                    path: program.clone(),
                },
                _ => CommandError::Io(err),
            })?;

        let status = wait_with_timeout(&mut child, self.timeout)?;

        let mut output = String::new();
        capture.seek(SeekFrom::Start(0))?;
        capture.read_to_string(&mut output)?;
        debug!(%status, bytes = output.len(), "cubit finished");

        let journal_name = journal.path().display().to_string();
        if let Some(err) = find_rejection(&output, &commands, &journal_name) {
            warn!(%err, "cubit rejected a command");
            return Err(err);
        }

        if !status.success() {
            return Err(CommandError::Interpreter {
                status: status.to_string(),
                output,
            });
        }

        Ok(BatchOutput {
            status,
            output,
            commands: commands.len(),
            duration: start.elapsed(),
        })
    }
}

impl CommandExecutor for CubitBatch {
    fn execute(&mut self, command: &str) -> Result<()> {
        self.commands.push(command.to_string());
        Ok(())
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus> {
    let Some(timeout) = timeout else {
        return Ok(child.wait()?);
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() >= timeout {
            // kill may race with a natural exit
            let _ = child.kill();
            let _ = child.wait();
            return Err(CommandError::Timeout { limit: timeout });
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

/// Map the first `ERROR:` line back to the most recently echoed command
fn find_rejection(output: &str, commands: &[String], journal: &str) -> Option<CommandError> {
    let mut cursor = 0;
    let mut current: Option<&str> = None;

    for line in output.lines() {
        if let Some(message) = line.trim_start().strip_prefix("ERROR:") {
            // only the separator after the prefix is dropped
            let message = message.strip_prefix(' ').unwrap_or(message);
            return Some(CommandError::rejected(current.unwrap_or(journal), message));
        }
        let line = line.trim();
        if let Some(offset) = commands[cursor..]
            .iter()
            .position(|command| line.ends_with(command.as_str()))
        {
            current = Some(commands[cursor + offset].as_str());
            cursor += offset + 1;
        }
    }

    None
}

/// Locate the executable, searching `PATH` for bare names
fn resolve_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
