// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh control and meshing operations
//!
//! [`Mesher`] formats one operation per call and hands the resulting command
//! lines to its executor. Methods apply the customary defaults; use
//! [`Mesher::apply`] with a builder from [`crate::command`] to override them.

use crate::command::{
    AutoSize, BlockAssignment, BlockElementType, GroupKind, GroupName, IntervalCount, MeshCommand,
    MeshEntity, MeshScheme, ScaleMesh, SetMembers, SweepScheme, ToCommands,
};
use crate::entity::{Body, IntoIds, OneOrMany};
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::plan::MeshPlan;
use tracing::debug;

/// Formats operations and dispatches them to a [`CommandExecutor`]
pub struct Mesher<E: CommandExecutor> {
    executor: E,
}

impl<E: CommandExecutor> Mesher<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn into_inner(self) -> E {
        self.executor
    }

    /// Dispatch a prebuilt command, stopping at the first rejected line
    pub fn apply(&mut self, command: impl Into<MeshCommand>) -> Result<()> {
        let command = command.into();
        for line in command.to_commands() {
            debug!(op = command.op(), command = %line, "dispatch");
            self.executor.execute(&line)?;
        }
        Ok(())
    }

    /// Dispatch every command of a plan in order
    pub fn apply_plan(&mut self, plan: &MeshPlan) -> Result<()> {
        for command in &plan.commands {
            self.apply(command.clone())?;
        }
        Ok(())
    }

    /// `curve <id> interval <n>` followed by `curve <id> scheme equal`
    pub fn set_interval(&mut self, curve: &impl Body, intervals: u32) -> Result<()> {
        self.apply(IntervalCount::new(curve, intervals))
    }

    /// `curve <id> size auto factor <f> propagate`
    pub fn set_auto_size(&mut self, curve: &impl Body, factor: f64) -> Result<()> {
        self.apply(AutoSize::new(curve, factor))
    }

    /// `surface <id> scheme <scheme>`
    pub fn set_mesh_scheme(&mut self, surface: &impl Body, scheme: &str) -> Result<()> {
        self.apply(MeshScheme::new(surface, scheme))
    }

    /// One `block <block> volume <id>` per volume
    pub fn assign_block(&mut self, volumes: impl IntoIds, block: u32) -> Result<()> {
        self.apply(BlockAssignment::new(volumes, block))
    }

    pub fn set_block_element_type(
        &mut self,
        blocks: impl Into<OneOrMany<u32>>,
        element_type: &str,
    ) -> Result<()> {
        self.apply(BlockElementType::new(blocks, element_type))
    }

    pub fn name_block(&mut self, block: u32, name: &str) -> Result<()> {
        self.apply(GroupName::new(GroupKind::Block, block, name))
    }

    pub fn name_sideset(&mut self, sideset: u32, name: &str) -> Result<()> {
        self.apply(GroupName::new(GroupKind::Sideset, sideset, name))
    }

    pub fn name_nodeset(&mut self, nodeset: u32, name: &str) -> Result<()> {
        self.apply(GroupName::new(GroupKind::Nodeset, nodeset, name))
    }

    /// `sideset <id> surface <ids>`
    pub fn create_sideset<B: Body>(
        &mut self,
        surfaces: impl IntoIterator<Item = B>,
        sideset: u32,
    ) -> Result<()> {
        self.apply(SetMembers::sideset(surfaces, sideset))
    }

    /// `nodeset <id> vertex <ids>`
    pub fn create_nodeset<B: Body>(
        &mut self,
        vertices: impl IntoIterator<Item = B>,
        nodeset: u32,
    ) -> Result<()> {
        self.apply(SetMembers::nodeset(vertices, nodeset))
    }

    /// `mesh volume <id>`
    pub fn mesh(&mut self, volume: &impl Body) -> Result<()> {
        self.apply(MeshEntity::new(volume))
    }

    pub fn sweep_mesh(
        &mut self,
        volume: &impl Body,
        sources: impl IntoIds,
        targets: impl IntoIds,
    ) -> Result<()> {
        self.apply(SweepScheme::new(volume, sources, targets))
    }

    pub fn scale_mesh(&mut self, factor: f64) -> Result<()> {
        self.apply(ScaleMesh::new(factor))
    }
}
