/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{MemberShape, Node, Shape, ShapeId, TraitMap};
use std::collections::{BTreeMap, HashMap};

/// An assembled Smithy model.
#[derive(Debug, Default)]
pub struct Model {
    metadata: HashMap<String, Node>,
    shapes: BTreeMap<ShapeId, Shape>,
}

impl Model {
    pub(crate) fn new(metadata: HashMap<String, Node>, shapes: BTreeMap<ShapeId, Shape>) -> Self {
        Self { metadata, shapes }
    }

    /// Model metadata.
    pub fn metadata(&self) -> &HashMap<String, Node> {
        &self.metadata
    }

    /// Returns the shape with the given id. Member ids are not resolved; see [`Model::member`].
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    /// Returns the member identified by `namespace#Container$member`.
    pub fn member(&self, id: &ShapeId) -> Option<&MemberShape> {
        let name = id.member_name()?;
        self.shapes.get(&id.without_member())?.member(name)
    }

    /// Returns the traits of a shape or member.
    pub fn traits(&self, id: &ShapeId) -> Option<&TraitMap> {
        match id.member_name() {
            Some(_) => self.member(id).map(MemberShape::traits),
            None => self.shape(id).map(Shape::traits),
        }
    }

    /// Iterates shapes ordered by id.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Returns the ids of every shape and member that has the trait `trait_id`.
    pub fn ids_with_trait<'a>(&'a self, trait_id: &'a ShapeId) -> impl Iterator<Item = &'a ShapeId> {
        self.shapes.values().flat_map(move |shape| {
            let own = shape
                .traits()
                .contains(trait_id)
                .then(|| shape.id());
            own.into_iter().chain(
                shape
                    .members()
                    .filter(move |member| member.traits().contains(trait_id))
                    .map(MemberShape::id),
            )
        })
    }

    /// Returns the number of shapes, not counting members.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the model has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
