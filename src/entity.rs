// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Entity handles referenced by id
//!
//! Geometry lives inside Cubit. This crate never creates or mutates it; it only
//! needs the integer id and the entity type to spell out commands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cubit entity id
pub type EntityId = u32;

/// Geometric entity types understood by the command formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Vertex,
    Curve,
    Surface,
    Volume,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Vertex => "vertex",
            EntityType::Curve => "curve",
            EntityType::Surface => "surface",
            EntityType::Volume => "volume",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vertex" => Ok(EntityType::Vertex),
            "curve" => Ok(EntityType::Curve),
            "surface" => Ok(EntityType::Surface),
            "volume" => Ok(EntityType::Volume),
            other => Err(format!("unknown entity type: {}", other)),
        }
    }
}

/// Opaque handle to an entity owned by Cubit
pub trait Body {
    fn id(&self) -> EntityId;

    fn entity_type(&self) -> EntityType;
}

impl<B: Body + ?Sized> Body for &B {
    fn id(&self) -> EntityId {
        (**self).id()
    }

    fn entity_type(&self) -> EntityType {
        (**self).entity_type()
    }
}

/// Plain `(type, id)` handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: EntityType,
    pub id: EntityId,
}

impl Entity {
    pub fn new(entity_type: EntityType, id: EntityId) -> Self {
        Self { entity_type, id }
    }

    pub fn vertex(id: EntityId) -> Self {
        Self::new(EntityType::Vertex, id)
    }

    pub fn curve(id: EntityId) -> Self {
        Self::new(EntityType::Curve, id)
    }

    pub fn surface(id: EntityId) -> Self {
        Self::new(EntityType::Surface, id)
    }

    pub fn volume(id: EntityId) -> Self {
        Self::new(EntityType::Volume, id)
    }
}

impl Body for Entity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn entity_type(&self) -> EntityType {
        self.entity_type
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entity_type, self.id)
    }
}

/// A parameter that accepts either one value or an ordered list of them.
///
/// Serialized untagged, so plan files may write `sources = 3` or
/// `sources = [3, 4]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> OneOrMany<U> {
        match self {
            OneOrMany::One(item) => OneOrMany::One(f(item)),
            OneOrMany::Many(items) => OneOrMany::Many(items.iter().map(f).collect()),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<B: Body> OneOrMany<B> {
    /// Ids in input order, duplicates kept
    pub fn ids(&self) -> OneOrMany<EntityId> {
        self.map(|body| body.id())
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        OneOrMany::One(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(items: [T; N]) -> Self {
        OneOrMany::Many(items.into())
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Conversion of one body or a sequence of bodies into an id list.
///
/// A single body becomes [`OneOrMany::One`]; slices, arrays and vectors become
/// [`OneOrMany::Many`] in input order.
pub trait IntoIds {
    fn into_ids(self) -> OneOrMany<EntityId>;
}

impl<B: Body> IntoIds for B {
    fn into_ids(self) -> OneOrMany<EntityId> {
        OneOrMany::One(self.id())
    }
}

impl<B: Body> IntoIds for Vec<B> {
    fn into_ids(self) -> OneOrMany<EntityId> {
        OneOrMany::Many(self.iter().map(Body::id).collect())
    }
}

impl<B: Body> IntoIds for &Vec<B> {
    fn into_ids(self) -> OneOrMany<EntityId> {
        self.as_slice().into_ids()
    }
}

impl<B: Body> IntoIds for &[B] {
    fn into_ids(self) -> OneOrMany<EntityId> {
        OneOrMany::Many(self.iter().map(Body::id).collect())
    }
}

impl<B: Body, const N: usize> IntoIds for [B; N] {
    fn into_ids(self) -> OneOrMany<EntityId> {
        OneOrMany::Many(self.iter().map(Body::id).collect())
    }
}

impl<B: Body, const N: usize> IntoIds for &[B; N] {
    fn into_ids(self) -> OneOrMany<EntityId> {
        self.as_slice().into_ids()
    }
}

impl<B: Body> IntoIds for OneOrMany<B> {
    fn into_ids(self) -> OneOrMany<EntityId> {
        self.ids()
    }
}

/// Space-joined id list, the form every Cubit id argument takes
pub fn join_ids<'a, I>(ids: I) -> String
where
    I: IntoIterator<Item = &'a EntityId>,
{
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_parse() {
        assert_eq!("Surface".parse::<EntityType>(), Ok(EntityType::Surface));
        assert_eq!("VERTEX".parse::<EntityType>(), Ok(EntityType::Vertex));
        assert!("hex".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::curve(3).to_string(), "curve 3");
        assert_eq!(Entity::volume(12).to_string(), "volume 12");
    }

    #[test]
    fn test_reference_is_body() {
        fn describe<B: Body>(body: B) -> (EntityType, EntityId) {
            (body.entity_type(), body.id())
        }

        let surface = Entity::surface(7);
        assert_eq!(describe(&surface), (EntityType::Surface, 7));
    }

    #[test]
    fn test_one_or_many_ids_keep_order_and_duplicates() {
        let single: OneOrMany<Entity> = Entity::surface(4).into();
        assert_eq!(single.ids(), OneOrMany::One(4));

        let many: OneOrMany<Entity> = vec![
            Entity::surface(9),
            Entity::surface(2),
            Entity::surface(9),
        ]
        .into();
        assert_eq!(many.ids().into_vec(), vec![9, 2, 9]);
    }

    #[test]
    fn test_into_ids_single_or_sequence() {
        let face = Entity::surface(2);
        let faces = vec![Entity::surface(5), Entity::surface(1)];

        assert_eq!(face.into_ids(), OneOrMany::One(2));
        assert_eq!((&face).into_ids(), OneOrMany::One(2));
        assert_eq!((&faces).into_ids(), OneOrMany::Many(vec![5, 1]));
        assert_eq!(faces.as_slice().into_ids(), OneOrMany::Many(vec![5, 1]));
        assert_eq!([&face, &face].into_ids(), OneOrMany::Many(vec![2, 2]));
        assert_eq!(faces.into_ids(), OneOrMany::Many(vec![5, 1]));
    }

    #[test]
    fn test_one_or_many_from_array() {
        let ids: OneOrMany<EntityId> = [5, 6].into();
        assert_eq!(ids.len(), 2);
        assert_eq!(join_ids(&ids), "5 6");
    }

    #[test]
    fn test_join_ids_empty() {
        let ids: OneOrMany<EntityId> = OneOrMany::Many(Vec::new());
        assert!(ids.is_empty());
        assert_eq!(join_ids(&ids), "");
    }

    #[test]
    fn test_one_or_many_untagged_serde() {
        let one: OneOrMany<EntityId> = serde_json::from_str("3").unwrap();
        let many: OneOrMany<EntityId> = serde_json::from_str("[3, 4]").unwrap();
        assert_eq!(one, OneOrMany::One(3));
        assert_eq!(many, OneOrMany::Many(vec![3, 4]));
    }
}
