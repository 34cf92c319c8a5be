// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::command::ToCommands;
use crate::plan::MeshPlan;
use crate::runner::BatchOutput;
use colored::*;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print every command of a plan, grouped by operation
    pub fn report_plan(path: &Path, plan: &MeshPlan) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {} {}",
            "Plan:".bold(),
            plan.display_name(path).cyan(),
            format!("({})", path.display()).bright_black()
        );
        if let Some(ref description) = plan.description {
            println!("  {}", description.bright_black());
        }
        println!("{}", "━".repeat(80).bright_black());

        for command in &plan.commands {
            let lines = command.to_commands();
            if lines.is_empty() {
                println!("  {:<20} {}", command.op().yellow(), "(no commands)".bright_black());
                continue;
            }
            for line in lines {
                println!("  {:<20} {}", command.op().yellow(), line);
            }
        }

        let summary = PlanSummary::from_plan(plan);
        println!(
            "\n  {} {}  {} {}  {} {}",
            "Operations:".bright_black(),
            summary.operations.to_string().cyan(),
            "Commands:".bright_black(),
            summary.commands.to_string().cyan(),
            "Entities:".bright_black(),
            summary.entities.to_string().cyan()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a journal written from a plan
    pub fn report_journal(input: &Path, output: &Path, commands: usize) {
        println!(
            "{} {} -> {} {}",
            "✅".green(),
            input.display().to_string().cyan(),
            output.display().to_string().cyan(),
            format!("({} commands)", commands).bright_black()
        );
    }

    /// Report a finished Cubit batch run
    pub fn report_run(name: &str, output: &BatchOutput) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Ran:".bold(), name.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Commands:".bright_black(),
            output.commands.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Exit:".bright_black(),
            output.status.to_string().green()
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(output.duration).yellow()
        );

        let warnings: Vec<&str> = output
            .output
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("WARNING:"))
            .collect();
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for warning in warnings {
                println!("  {}", warning.yellow());
            }
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

/// Counts shown under a plan listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub operations: usize,
    pub commands: usize,
    pub entities: usize,
}

impl PlanSummary {
    pub fn from_plan(plan: &MeshPlan) -> Self {
        let entities: HashSet<_> = plan
            .commands
            .iter()
            .flat_map(|command| command.entities())
            .collect();

        Self {
            operations: plan.commands.len(),
            commands: plan.journal().len(),
            entities: entities.len(),
        }
    }
}
