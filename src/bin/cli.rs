// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! cubitcmd CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cubitcmd::cli::{init_logging, Reporter};
use cubitcmd::plan::discover_plans;
use cubitcmd::{CubitBatch, CubitConfig, MeshPlan, Mesher};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "cubitcmd")]
#[command(about = "Turn mesh plans into Cubit journals and run them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./cubitcmd.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write Cubit journals for one plan or a directory of plans
    Journal {
        /// Plan file or directory of plans
        input: PathBuf,

        /// Output journal (single plan) or directory; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out the generated-by comment header
        #[arg(long)]
        no_header: bool,
    },

    /// Run a plan through the Cubit executable in batch mode
    Run {
        /// Plan file
        input: PathBuf,

        /// Cubit executable
        #[arg(long, value_name = "PATH")]
        cubit: Option<PathBuf>,

        /// Kill Cubit after this many seconds
        #[arg(short, long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Print the commands a plan expands to
    Show {
        /// Plan file
        input: PathBuf,

        /// Print the parsed plan as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    InitConfig {
        #[arg(default_value = cubitcmd::config::CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => CubitConfig::from_file(path)?,
        None => CubitConfig::load()?,
    };
    config.verbose |= cli.verbose;
    init_logging(config.verbose);

    match cli.command {
        Commands::Journal {
            input,
            output,
            no_header,
        } => journal_command(&input, output.as_deref(), !no_header && config.journal_header),
        Commands::Run {
            input,
            cubit,
            timeout,
        } => {
            if let Some(cubit) = cubit {
                config.cubit_path = cubit;
            }
            if timeout.is_some() {
                config.timeout_secs = timeout;
            }
            run_command(&input, &config)
        }
        Commands::Show { input, json } => show_command(&input, json),
        Commands::InitConfig { path, force } => init_config_command(&path, force),
        Commands::Version => {
            println!("cubitcmd v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn journal_command(input: &Path, output: Option<&Path>, header: bool) -> Result<()> {
    if !input.exists() {
        bail!("Input not found: {}", input.display());
    }

    if input.is_file() {
        let plan = MeshPlan::from_file(input)?;
        return match output {
            Some(path) => {
                let count = write_journal_file(&plan, path, header)?;
                Reporter::report_journal(input, path, count);
                Ok(())
            }
            None => {
                plan.write_journal(std::io::stdout().lock(), header)?;
                Ok(())
            }
        };
    }

    let plans = discover_plans(input)?;
    if plans.is_empty() {
        Reporter::report_warning(&format!("No plan files found in {}", input.display()));
        return Ok(());
    }

    let Some(out_dir) = output else {
        bail!("--output <DIR> is required when the input is a directory");
    };
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut failed = 0;
    for path in &plans {
        let target = out_dir.join(journal_name(input, path));
        let result = MeshPlan::from_file(path).and_then(|plan| {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            write_journal_file(&plan, &target, header)
        });
        match result {
            Ok(count) => Reporter::report_journal(path, &target, count),
            Err(err) => {
                failed += 1;
                Reporter::report_error(&format!("{:#}", err));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} plans failed", failed, plans.len());
    }
    Ok(())
}

/// Journal path for `plan`, mirroring its location below `root`
fn journal_name(root: &Path, plan: &Path) -> PathBuf {
    plan.strip_prefix(root)
        .unwrap_or(plan)
        .with_extension("jou")
}

fn write_journal_file(plan: &MeshPlan, path: &Path, header: bool) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create journal: {}", path.display()))?;
    plan.write_journal(std::io::BufWriter::new(file), header)
}

fn run_command(input: &Path, config: &CubitConfig) -> Result<()> {
    let plan = MeshPlan::from_file(input)?;
    let name = plan.display_name(input);

    let mut mesher = Mesher::new(CubitBatch::from_config(config));
    if !mesher.executor().is_available() {
        bail!(
            "Cubit executable not found: {} (set CUBIT_PATH or --cubit)",
            config.cubit_path.display()
        );
    }
    mesher.apply_plan(&plan)?;
    info!(plan = %name, commands = mesher.executor().pending().len(), "plan formatted");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?,
    );
    spinner.set_message(format!("Running {} through Cubit", name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = mesher.executor_mut().run();
    spinner.finish_and_clear();

    let output = result.with_context(|| format!("Cubit failed on plan {}", name))?;
    Reporter::report_run(&name, &output);
    if config.verbose {
        println!("{}", output.output);
    }
    Ok(())
}

fn show_command(input: &Path, json: bool) -> Result<()> {
    let plan = MeshPlan::from_file(input)?;
    if json {
        println!("{}", plan.to_json_string()?);
    } else {
        Reporter::report_plan(input, &plan);
    }
    Ok(())
}

fn init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    CubitConfig::default().save(path)?;
    Reporter::report_info(&format!("Wrote {}", path.display()));
    Ok(())
}
