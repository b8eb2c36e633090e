/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{ShapeId, Trait};
use std::collections::BTreeMap;

/// A map of traits keyed by their Shape ID.
///
/// Iteration is ordered by trait id so that serialized models are stable.
#[derive(Debug, Default)]
pub struct TraitMap {
    traits: BTreeMap<ShapeId, Box<dyn Trait>>,
}

impl TraitMap {
    /// Creates a new empty TraitMap.
    pub fn new() -> Self {
        Self {
            traits: BTreeMap::new(),
        }
    }

    /// Inserts a trait into the map, returning the trait it replaced.
    pub fn insert(&mut self, trait_obj: Box<dyn Trait>) -> Option<Box<dyn Trait>> {
        let id = trait_obj.trait_id().clone();
        self.traits.insert(id, trait_obj)
    }

    /// Gets a trait by its Shape ID.
    pub fn get(&self, id: &ShapeId) -> Option<&dyn Trait> {
        self.traits.get(id).map(|t| t.as_ref())
    }

    /// Gets a trait by its Shape ID and downcasts it to `T`.
    pub fn get_as<T: Trait>(&self, id: &ShapeId) -> Option<&T> {
        self.get(id).and_then(|t| t.downcast_ref::<T>())
    }

    /// Returns true if the map contains a trait with the given Shape ID.
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.traits.contains_key(id)
    }

    /// Returns an iterator over all traits.
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeId, &dyn Trait)> {
        self.traits.iter().map(|(s, t)| (s, t.as_ref()))
    }

    /// Returns the number of traits in the map.
    pub fn len(&self) -> usize {
        self.traits.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}
