// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plan files through to journals and executors

use cubitcmd::executor::from_fn;
use cubitcmd::{CommandError, CommandLog, Entity, MeshPlan, Mesher};
use std::fs;
use tempfile::TempDir;

const PLATE_JSON: &str = r#"{
  "name": "plate",
  "commands": [
    { "op": "scheme", "id": 1, "scheme": "pave" },
    { "op": "block", "block": 1, "entity_type": "surface", "ids": 1 },
    { "op": "block_element_type", "blocks": [1], "element_type": "SHELL4" },
    { "op": "name", "kind": "block", "id": 1, "name": "plate" },
    { "op": "create_set", "kind": "nodeset", "id": 1, "entity_type": "curve", "ids": [4] },
    { "op": "mesh", "entity_type": "surface", "id": 1 },
    { "op": "scale_mesh", "factor": 0.001 }
  ]
}"#;

const PLATE_LINES: [&str; 7] = [
    "surface 1 scheme pave",
    "block 1 surface 1",
    "block 1 element type SHELL4",
    "block 1 name \"plate\"",
    "nodeset 1 curve 4",
    "mesh surface 1",
    "transform mesh output scale 0.001",
];

#[test]
fn json_plan_expands_to_journal_lines() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("plate.json");
    fs::write(&path, PLATE_JSON)?;

    let plan = MeshPlan::from_file(&path)?;
    assert_eq!(plan.journal(), PLATE_LINES);
    Ok(())
}

#[test]
fn journal_file_matches_mesher_dispatch() -> anyhow::Result<()> {
    let plan = MeshPlan::from_json_str(PLATE_JSON)?;

    let mut mesher = Mesher::new(CommandLog::new());
    mesher.apply_plan(&plan)?;

    let dir = TempDir::new()?;
    let journal = dir.path().join("plate.jou");
    plan.write_journal(fs::File::create(&journal)?, false)?;

    let written = fs::read_to_string(&journal)?;
    let written: Vec<&str> = written.lines().collect();
    assert_eq!(mesher.executor().commands(), written.as_slice());
    Ok(())
}

#[test]
fn header_lines_are_comments() -> anyhow::Result<()> {
    let plan = MeshPlan::from_json_str(PLATE_JSON)?;
    let mut buffer = Vec::new();
    let count = plan.write_journal(&mut buffer, true)?;
    assert_eq!(count, PLATE_LINES.len());

    let text = String::from_utf8(buffer)?;
    let commands: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(commands, PLATE_LINES);
    assert!(text.starts_with("# Generated by cubitcmd"));
    Ok(())
}

#[test]
fn plan_built_in_code_matches_api_calls() -> anyhow::Result<()> {
    use cubitcmd::command::{SetMembers, SweepScheme};

    let volume = Entity::volume(2);
    let mut plan = MeshPlan::new("sweep");
    plan.push(SweepScheme::new(&volume, &Entity::surface(5), &Entity::surface(6)))
        .push(SetMembers::sideset([Entity::surface(5)], 1));

    let mut direct = Mesher::new(CommandLog::new());
    direct.sweep_mesh(&volume, &Entity::surface(5), &Entity::surface(6))?;
    direct.create_sideset([Entity::surface(5)], 1)?;

    assert_eq!(plan.journal(), direct.executor().commands());

    let dir = TempDir::new()?;
    let path = dir.path().join("sweep.toml");
    plan.save(&path)?;
    assert_eq!(MeshPlan::from_file(&path)?.journal(), plan.journal());
    Ok(())
}

#[test]
fn rejection_stops_plan_and_is_unmodified() -> anyhow::Result<()> {
    let plan = MeshPlan::from_json_str(PLATE_JSON)?;
    let mut accepted = Vec::new();

    let executor = from_fn(|command: &str| {
        if command.contains("SHELL4") {
            return Err(CommandError::rejected(command, "unknown element type"));
        }
        accepted.push(command.to_string());
        Ok(())
    });
    let mut mesher = Mesher::new(executor);

    let err = mesher.apply_plan(&plan).unwrap_err();
    assert_eq!(
        err.to_string(),
        "command rejected: `block 1 element type SHELL4`: unknown element type"
    );
    drop(mesher);
    assert_eq!(accepted, ["surface 1 scheme pave", "block 1 surface 1"]);
    Ok(())
}

#[test]
fn malformed_plan_reports_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[commands]]\nop = \"mesh\"\n")?;

    let err = MeshPlan::from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.toml"));
    Ok(())
}
