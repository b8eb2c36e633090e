/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use coalmine_model::{Node, ShapeId, Trait, TraitProvider};
use std::any::Any;

/// Shape ID of the `coalmine#avroDefault` trait.
pub static AVRO_DEFAULT_ID: ShapeId = ShapeId::from_static("coalmine#avroDefault");

/// Provides a default value for a shape or member.
///
/// The value is stored exactly as it was written in the model. Whether it is
/// assignable to the annotated shape is left to model validation.
///
/// # Examples
/// ```
/// use coalmine_model::{Node, Trait};
/// use coalmine_traits::AvroDefault;
///
/// let default = AvroDefault::new(Node::from(42));
/// assert_eq!(default.trait_id().as_str(), "coalmine#avroDefault");
/// assert_eq!(default.value(), &Node::from(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AvroDefault {
    value: Node,
}

impl AvroDefault {
    /// Creates the trait from an already resolved value.
    pub fn new(value: impl Into<Node>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The default value.
    pub fn value(&self) -> &Node {
        &self.value
    }

    /// Consumes the trait, returning the default value.
    pub fn into_value(self) -> Node {
        self.value
    }

    /// Rebuilds the node from the trait's typed state.
    ///
    /// # Panics
    /// Always. The node is captured at construction and never recomputed, so
    /// reaching this is a bug in the caller.
    pub fn create_node(&self) -> Node {
        panic!("the avroDefault node value is always captured at construction")
    }
}

impl Trait for AvroDefault {
    fn trait_id(&self) -> &ShapeId {
        &AVRO_DEFAULT_ID
    }

    fn value(&self) -> &Node {
        &self.value
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<AvroDefault> for Node {
    fn from(value: AvroDefault) -> Self {
        value.into_value()
    }
}

/// Creates [`AvroDefault`] traits while a model is loaded.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct AvroDefaultProvider;

impl AvroDefaultProvider {
    /// Creates a new provider.
    pub fn new() -> Self {
        Self
    }
}

impl TraitProvider for AvroDefaultProvider {
    fn trait_id(&self) -> &ShapeId {
        &AVRO_DEFAULT_ID
    }

    fn create_trait(&self, target: &ShapeId, value: Node) -> Box<dyn Trait> {
        tracing::debug!(shape = %target, value = %value, "creating avroDefault trait");
        Box::new(AvroDefault::new(value))
    }
}
