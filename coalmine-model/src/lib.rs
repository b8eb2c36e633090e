/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Smithy model types for coalmine.
//!
//! This crate provides shape ids, node values, the [`Trait`] contract, an explicit
//! [`TraitFactory`] registration table, and a [`ModelAssembler`] that loads Smithy IDL
//! and JSON AST sources into a [`Model`].

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
mod loader;
mod model;
mod node;
pub mod provider;
pub mod serialize;
mod shape;
mod shape_id;
mod trait_map;
mod trait_type;

/// Test helpers.
#[cfg(feature = "test-util")]
pub mod test_util;

pub use error::LoadError;
pub use loader::ModelAssembler;
pub use model::Model;
pub use node::{Node, NodeType, Number};
pub use provider::{TraitFactory, TraitFactoryBuilder, TraitProvider};
pub use shape::{MemberShape, Shape, ShapeType};
pub use shape_id::{ShapeId, ShapeIdError, PRELUDE_NAMESPACE};
pub use trait_map::TraitMap;
pub use trait_type::{DynamicTrait, Trait};
