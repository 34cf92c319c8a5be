// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cubit command formatting
//!
//! Each operation is a small struct that knows how to spell itself as one or
//! more Cubit command lines. Constructors apply the usual defaults; builder
//! methods override them. [`MeshCommand`] wraps every operation so sequences
//! can be stored in plan files and dispatched uniformly.

use crate::entity::{join_ids, Body, Entity, EntityId, EntityType, IntoIds, OneOrMany};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversion into Cubit command lines, in dispatch order
pub trait ToCommands {
    fn to_commands(&self) -> Vec<String>;
}

/// Join non-empty parts with single spaces
fn command(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn default_true() -> bool {
    true
}

fn default_curve() -> EntityType {
    EntityType::Curve
}

fn default_surface() -> EntityType {
    EntityType::Surface
}

fn default_volume() -> EntityType {
    EntityType::Volume
}

/// `<type> <id> interval <n>`, optionally followed by `<type> <id> scheme equal`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalCount {
    #[serde(default = "default_curve")]
    pub entity_type: EntityType,
    pub id: EntityId,
    pub intervals: u32,
    #[serde(default = "default_true")]
    pub equal: bool,
}

impl IntervalCount {
    pub fn new(body: &impl Body, intervals: u32) -> Self {
        Self {
            entity_type: EntityType::Curve,
            id: body.id(),
            intervals,
            equal: true,
        }
    }

    pub fn equal(mut self, equal: bool) -> Self {
        self.equal = equal;
        self
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }
}

impl ToCommands for IntervalCount {
    fn to_commands(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} {} interval {}",
            self.entity_type, self.id, self.intervals
        )];
        if self.equal {
            lines.push(format!("{} {} scheme equal", self.entity_type, self.id));
        }
        lines
    }
}

/// `<type> <id> size auto factor <f>` with an optional ` propagate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoSize {
    #[serde(default = "default_curve")]
    pub entity_type: EntityType,
    pub id: EntityId,
    pub factor: f64,
    #[serde(default = "default_true")]
    pub propagate: bool,
}

impl AutoSize {
    pub fn new(body: &impl Body, factor: f64) -> Self {
        Self {
            entity_type: EntityType::Curve,
            id: body.id(),
            factor,
            propagate: true,
        }
    }

    pub fn propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }
}

impl ToCommands for AutoSize {
    fn to_commands(&self) -> Vec<String> {
        let mut line = format!(
            "{} {} size auto factor {}",
            self.entity_type, self.id, self.factor
        );
        if self.propagate {
            line.push_str(" propagate");
        }
        vec![line]
    }
}

/// `<type> <id> scheme <scheme>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshScheme {
    #[serde(default = "default_surface")]
    pub entity_type: EntityType,
    pub id: EntityId,
    pub scheme: String,
}

impl MeshScheme {
    pub fn new(body: &impl Body, scheme: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Surface,
            id: body.id(),
            scheme: scheme.into(),
        }
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }
}

impl ToCommands for MeshScheme {
    fn to_commands(&self) -> Vec<String> {
        vec![format!(
            "{} {} scheme {}",
            self.entity_type, self.id, self.scheme
        )]
    }
}

/// One `block <block> <type> <id>` line per entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAssignment {
    pub block: u32,
    #[serde(default = "default_volume")]
    pub entity_type: EntityType,
    pub ids: OneOrMany<EntityId>,
}

impl BlockAssignment {
    pub fn new(bodies: impl IntoIds, block: u32) -> Self {
        Self {
            block,
            entity_type: EntityType::Volume,
            ids: bodies.into_ids(),
        }
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }
}

impl ToCommands for BlockAssignment {
    fn to_commands(&self) -> Vec<String> {
        self.ids
            .iter()
            .map(|id| format!("block {} {} {}", self.block, self.entity_type, id))
            .collect()
    }
}

/// `block <ids> element type <type>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockElementType {
    pub blocks: OneOrMany<u32>,
    pub element_type: String,
}

impl BlockElementType {
    pub fn new(blocks: impl Into<OneOrMany<u32>>, element_type: impl Into<String>) -> Self {
        Self {
            blocks: blocks.into(),
            element_type: element_type.into(),
        }
    }
}

impl ToCommands for BlockElementType {
    fn to_commands(&self) -> Vec<String> {
        let blocks = join_ids(&self.blocks);
        vec![command(&[
            "block",
            &blocks,
            "element type",
            &self.element_type,
        ])]
    }
}

/// Named groupings kept by Cubit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Block,
    Sideset,
    Nodeset,
}

impl GroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Block => "block",
            GroupKind::Sideset => "sideset",
            GroupKind::Nodeset => "nodeset",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<kind> <id> name "<name>"`
///
/// The name is quoted verbatim; Cubit decides what it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupName {
    pub kind: GroupKind,
    pub id: u32,
    pub name: String,
}

impl GroupName {
    pub fn new(kind: GroupKind, id: u32, name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
        }
    }
}

// `name` is written verbatim and must not contain line breaks
impl ToCommands for GroupName {
    fn to_commands(&self) -> Vec<String> {
        vec![format!("{} {} name \"{}\"", self.kind, self.id, self.name)]
    }
}

/// Groupings that are created from a list of member entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySet {
    Sideset,
    Nodeset,
}

impl BoundarySet {
    /// Member type used when none is given
    pub fn default_entity_type(&self) -> EntityType {
        match self {
            BoundarySet::Sideset => EntityType::Surface,
            BoundarySet::Nodeset => EntityType::Vertex,
        }
    }

    pub fn group(&self) -> GroupKind {
        match self {
            BoundarySet::Sideset => GroupKind::Sideset,
            BoundarySet::Nodeset => GroupKind::Nodeset,
        }
    }
}

/// `<kind> <id> <type> <id1> <id2> ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMembers {
    pub kind: BoundarySet,
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    pub ids: Vec<EntityId>,
}

impl SetMembers {
    pub fn new<B: Body>(kind: BoundarySet, bodies: impl IntoIterator<Item = B>, id: u32) -> Self {
        Self {
            kind,
            id,
            entity_type: None,
            ids: bodies.into_iter().map(|body| body.id()).collect(),
        }
    }

    pub fn sideset<B: Body>(bodies: impl IntoIterator<Item = B>, id: u32) -> Self {
        Self::new(BoundarySet::Sideset, bodies, id)
    }

    pub fn nodeset<B: Body>(bodies: impl IntoIterator<Item = B>, id: u32) -> Self {
        Self::new(BoundarySet::Nodeset, bodies, id)
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// Member type actually written
    pub fn resolved_entity_type(&self) -> EntityType {
        self.entity_type
            .unwrap_or_else(|| self.kind.default_entity_type())
    }
}

impl ToCommands for SetMembers {
    fn to_commands(&self) -> Vec<String> {
        let id = self.id.to_string();
        let ids = join_ids(&self.ids);
        vec![command(&[
            self.kind.group().as_str(),
            &id,
            self.resolved_entity_type().as_str(),
            &ids,
        ])]
    }
}

/// `mesh <type> <id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshEntity {
    #[serde(default = "default_volume")]
    pub entity_type: EntityType,
    pub id: EntityId,
}

impl MeshEntity {
    pub fn new(body: &impl Body) -> Self {
        Self {
            entity_type: EntityType::Volume,
            id: body.id(),
        }
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }
}

impl ToCommands for MeshEntity {
    fn to_commands(&self) -> Vec<String> {
        vec![format!("mesh {} {}", self.entity_type, self.id)]
    }
}

/// `volume <id> scheme sweep source <ids> target <ids>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepScheme {
    pub volume: EntityId,
    pub sources: OneOrMany<EntityId>,
    pub targets: OneOrMany<EntityId>,
}

impl SweepScheme {
    pub fn new(volume: &impl Body, sources: impl IntoIds, targets: impl IntoIds) -> Self {
        Self {
            volume: volume.id(),
            sources: sources.into_ids(),
            targets: targets.into_ids(),
        }
    }
}

impl ToCommands for SweepScheme {
    fn to_commands(&self) -> Vec<String> {
        let volume = self.volume.to_string();
        let sources = join_ids(&self.sources);
        let targets = join_ids(&self.targets);
        vec![command(&[
            "volume",
            &volume,
            "scheme sweep source",
            &sources,
            "target",
            &targets,
        ])]
    }
}

/// `transform mesh output scale <factor>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleMesh {
    pub factor: f64,
}

impl ScaleMesh {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl ToCommands for ScaleMesh {
    fn to_commands(&self) -> Vec<String> {
        vec![format!("transform mesh output scale {}", self.factor)]
    }
}

/// Any formatter operation, tagged by `op` in plan files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MeshCommand {
    Interval(IntervalCount),
    AutoSize(AutoSize),
    Scheme(MeshScheme),
    Block(BlockAssignment),
    BlockElementType(BlockElementType),
    Name(GroupName),
    CreateSet(SetMembers),
    Mesh(MeshEntity),
    Sweep(SweepScheme),
    ScaleMesh(ScaleMesh),
}

impl MeshCommand {
    /// Short operation name, as written in plan files
    pub fn op(&self) -> &'static str {
        match self {
            MeshCommand::Interval(_) => "interval",
            MeshCommand::AutoSize(_) => "auto_size",
            MeshCommand::Scheme(_) => "scheme",
            MeshCommand::Block(_) => "block",
            MeshCommand::BlockElementType(_) => "block_element_type",
            MeshCommand::Name(_) => "name",
            MeshCommand::CreateSet(_) => "create_set",
            MeshCommand::Mesh(_) => "mesh",
            MeshCommand::Sweep(_) => "sweep",
            MeshCommand::ScaleMesh(_) => "scale_mesh",
        }
    }

    /// Entities the command refers to, typed as written; groups are not included
    pub fn entities(&self) -> Vec<Entity> {
        match self {
            MeshCommand::Interval(c) => vec![Entity::new(c.entity_type, c.id)],
            MeshCommand::AutoSize(c) => vec![Entity::new(c.entity_type, c.id)],
            MeshCommand::Scheme(c) => vec![Entity::new(c.entity_type, c.id)],
            MeshCommand::Block(c) => c
                .ids
                .iter()
                .map(|&id| Entity::new(c.entity_type, id))
                .collect(),
            MeshCommand::CreateSet(c) => {
                let entity_type = c.resolved_entity_type();
                c.ids.iter().map(|&id| Entity::new(entity_type, id)).collect()
            }
            MeshCommand::Mesh(c) => vec![Entity::new(c.entity_type, c.id)],
            MeshCommand::Sweep(c) => std::iter::once(Entity::volume(c.volume))
                .chain(c.sources.iter().map(|&id| Entity::surface(id)))
                .chain(c.targets.iter().map(|&id| Entity::surface(id)))
                .collect(),
            MeshCommand::BlockElementType(_) | MeshCommand::Name(_) | MeshCommand::ScaleMesh(_) => {
                Vec::new()
            }
        }
    }
}

impl ToCommands for MeshCommand {
    fn to_commands(&self) -> Vec<String> {
        match self {
            MeshCommand::Interval(c) => c.to_commands(),
            MeshCommand::AutoSize(c) => c.to_commands(),
            MeshCommand::Scheme(c) => c.to_commands(),
            MeshCommand::Block(c) => c.to_commands(),
            MeshCommand::BlockElementType(c) => c.to_commands(),
            MeshCommand::Name(c) => c.to_commands(),
            MeshCommand::CreateSet(c) => c.to_commands(),
            MeshCommand::Mesh(c) => c.to_commands(),
            MeshCommand::Sweep(c) => c.to_commands(),
            MeshCommand::ScaleMesh(c) => c.to_commands(),
        }
    }
}

macro_rules! into_mesh_command {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for MeshCommand {
                fn from(command: $ty) -> Self {
                    MeshCommand::$variant(command)
                }
            }
        )*
    };
}

into_mesh_command!(
    Interval(IntervalCount),
    AutoSize(AutoSize),
    Scheme(MeshScheme),
    Block(BlockAssignment),
    BlockElementType(BlockElementType),
    Name(GroupName),
    CreateSet(SetMembers),
    Mesh(MeshEntity),
    Sweep(SweepScheme),
    ScaleMesh(ScaleMesh),
);
