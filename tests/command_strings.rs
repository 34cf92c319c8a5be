// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command string contract: every operation against a recording executor

use cubitcmd::command::{AutoSize, IntervalCount, MeshEntity, MeshScheme, SetMembers};
use cubitcmd::{CommandError, CommandLog, Entity, EntityType, Mesher};

fn record<F>(f: F) -> Vec<String>
where
    F: FnOnce(&mut Mesher<CommandLog>) -> Result<(), CommandError>,
{
    let mut mesher = Mesher::new(CommandLog::new());
    f(&mut mesher).expect("recording executor never rejects");
    mesher.into_inner().into_commands()
}

#[test]
fn interval_with_default_flags() {
    let lines = record(|m| m.set_interval(&Entity::curve(3), 5));
    assert_eq!(lines, vec!["curve 3 interval 5", "curve 3 scheme equal"]);
}

#[test]
fn sideset_from_two_surfaces() {
    let lines = record(|m| m.create_sideset([Entity::surface(1), Entity::surface(2)], 10));
    assert_eq!(lines, vec!["sideset 10 surface 1 2"]);
}

#[test]
fn scale_mesh_factor() {
    let lines = record(|m| m.scale_mesh(2.5));
    assert_eq!(lines, vec!["transform mesh output scale 2.5"]);
}

#[test]
fn optional_clauses_appear_exactly_once_when_set() {
    let curve = Entity::curve(6);
    for flag in [true, false] {
        let interval = record(|m| m.apply(IntervalCount::new(&curve, 4).equal(flag)));
        let equal_lines = interval.iter().filter(|l| l.ends_with("scheme equal")).count();
        assert_eq!(equal_lines, usize::from(flag));

        let size = record(|m| m.apply(AutoSize::new(&curve, 1.5).propagate(flag)));
        assert_eq!(size.len(), 1);
        assert_eq!(size[0].matches(" propagate").count(), usize::from(flag));
        assert!(!size[0].ends_with(' '));
    }
}

#[test]
fn id_lists_follow_input_order_without_dedup() {
    let faces = vec![
        Entity::surface(30),
        Entity::surface(4),
        Entity::surface(30),
        Entity::surface(12),
    ];

    let sideset = record(|m| m.create_sideset(&faces, 2));
    assert_eq!(sideset, vec!["sideset 2 surface 30 4 30 12"]);

    let sweep = record(|m| m.sweep_mesh(&Entity::volume(1), &faces, &faces[1]));
    assert_eq!(
        sweep,
        vec!["volume 1 scheme sweep source 30 4 30 12 target 4"]
    );

    let blocks = record(|m| m.assign_block(&faces, 7));
    assert_eq!(
        blocks,
        vec![
            "block 7 volume 30",
            "block 7 volume 4",
            "block 7 volume 30",
            "block 7 volume 12",
        ]
    );
}

#[test]
fn single_and_many_block_element_types() {
    let one = record(|m| m.set_block_element_type(3, "QUAD4"));
    let many = record(|m| m.set_block_element_type(vec![3, 1], "QUAD4"));
    assert_eq!(one, vec!["block 3 element type QUAD4"]);
    assert_eq!(many, vec!["block 3 1 element type QUAD4"]);
}

#[test]
fn defaults_per_operation() {
    let body = Entity::volume(9);
    let lines = record(|m| {
        m.set_auto_size(&body, 2.0)?;
        m.set_mesh_scheme(&body, "map")?;
        m.assign_block(&body, 1)?;
        m.create_nodeset([&body], 4)?;
        m.mesh(&body)
    });
    assert_eq!(
        lines,
        vec![
            "curve 9 size auto factor 2 propagate",
            "surface 9 scheme map",
            "block 1 volume 9",
            "nodeset 4 vertex 9",
            "mesh volume 9",
        ]
    );
}

#[test]
fn entity_type_overrides() {
    let body = Entity::volume(9);
    let lines = record(|m| {
        m.apply(MeshScheme::new(&body, "tetmesh").entity_type(EntityType::Volume))?;
        m.apply(SetMembers::nodeset([&body], 4).entity_type(EntityType::Volume))?;
        m.apply(MeshEntity::new(&Entity::surface(2)).entity_type(EntityType::Surface))
    });
    assert_eq!(
        lines,
        vec![
            "volume 9 scheme tetmesh",
            "nodeset 4 volume 9",
            "mesh surface 2",
        ]
    );
}

#[test]
fn names_are_quoted() {
    let lines = record(|m| {
        m.name_block(1, "Steel 316")?;
        m.name_sideset(2, "inlet")?;
        m.name_nodeset(3, "clamp")
    });
    assert_eq!(
        lines,
        vec![
            "block 1 name \"Steel 316\"",
            "sideset 2 name \"inlet\"",
            "nodeset 3 name \"clamp\"",
        ]
    );
}
