/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{Node, ShapeId};
use std::any::Any;
use std::fmt;

/// Trait representing a Smithy trait applied to a shape.
///
/// Traits provide additional metadata about shapes that affect validation,
/// code generation, and other behaviors. Every trait has a stable identifier
/// shared by all of its instances and an immutable node value that is fully
/// resolved when the trait is constructed.
pub trait Trait: Any + Send + Sync + fmt::Debug {
    /// Returns the Shape ID of this trait.
    fn trait_id(&self) -> &ShapeId;

    /// Returns the node value of this trait.
    fn value(&self) -> &Node;

    /// Returns this trait as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Trait + 'a {
    /// Downcasts this trait to a concrete trait type.
    pub fn downcast_ref<T: Trait>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Traits are equal when they share an id and their values are equal.
impl<'a, 'b> PartialEq<dyn Trait + 'b> for dyn Trait + 'a {
    fn eq(&self, other: &(dyn Trait + 'b)) -> bool {
        self.trait_id() == other.trait_id() && self.value() == other.value()
    }
}

/// A trait with no dedicated Rust type.
///
/// The model assembler creates these for prelude traits and, when allowed,
/// for traits that have no registered provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicTrait {
    id: ShapeId,
    value: Node,
}

impl DynamicTrait {
    /// Creates a new dynamic trait.
    pub fn new(id: ShapeId, value: Node) -> Self {
        Self { id, value }
    }
}

impl Trait for DynamicTrait {
    fn trait_id(&self) -> &ShapeId {
        &self.id
    }

    fn value(&self) -> &Node {
        &self.value
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod test {
    use super::{DynamicTrait, Trait};
    use crate::{Node, ShapeId};

    #[derive(Debug)]
    struct Sensitive {
        value: Node,
    }

    impl Trait for Sensitive {
        fn trait_id(&self) -> &ShapeId {
            static ID: ShapeId = ShapeId::from_static("smithy.api#sensitive");
            &ID
        }

        fn value(&self) -> &Node {
            &self.value
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn dyn_trait_equality_uses_id_and_value() {
        let typed: Box<dyn Trait> = Box::new(Sensitive {
            value: Node::empty_object(),
        });
        let dynamic: Box<dyn Trait> = Box::new(DynamicTrait::new(
            ShapeId::new("smithy.api#sensitive"),
            Node::empty_object(),
        ));
        let other_value: Box<dyn Trait> = Box::new(DynamicTrait::new(
            ShapeId::new("smithy.api#sensitive"),
            Node::Null,
        ));
        assert!(*typed == *dynamic);
        assert!(*typed != *other_value);
    }

    #[test]
    fn downcast() {
        let typed: Box<dyn Trait> = Box::new(Sensitive { value: Node::Null });
        assert!(typed.downcast_ref::<Sensitive>().is_some());
        assert!(typed.downcast_ref::<DynamicTrait>().is_none());
    }
}
