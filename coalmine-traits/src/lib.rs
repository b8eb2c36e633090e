/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Custom Smithy traits used by coalmine.
//!
//! Traits are registered explicitly: [`register`] adds this crate's providers to a
//! [`TraitFactoryBuilder`], and [`trait_factory`] builds a factory holding only them.
//!
//! ```
//! use coalmine_model::{ModelAssembler, Node, ShapeId};
//! use coalmine_traits::{AvroDefault, AVRO_DEFAULT_ID};
//!
//! let model = ModelAssembler::new()
//!     .trait_factory(coalmine_traits::trait_factory())
//!     .add_idl(
//!         "person.smithy",
//!         r#"
//!         namespace com.example
//!
//!         structure Person {
//!             @coalmine#avroDefault(42)
//!             age: Integer
//!         }
//!         "#,
//!     )
//!     .assemble()
//!     .unwrap();
//! let age = model.member(&ShapeId::new("com.example#Person$age")).unwrap();
//! let avro_default = age.traits().get_as::<AvroDefault>(&AVRO_DEFAULT_ID).unwrap();
//! assert_eq!(avro_default.value(), &Node::from(42));
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod avro_default;

pub use avro_default::{AvroDefault, AvroDefaultProvider, AVRO_DEFAULT_ID};

use coalmine_model::{TraitFactory, TraitFactoryBuilder, TraitProvider};
use std::sync::Arc;

/// Every trait provider defined by this crate.
pub fn providers() -> Vec<Arc<dyn TraitProvider>> {
    vec![Arc::new(AvroDefaultProvider::new())]
}

/// Adds this crate's providers to `builder`.
pub fn register(mut builder: TraitFactoryBuilder) -> TraitFactoryBuilder {
    for provider in providers() {
        builder.push_provider(provider);
    }
    builder
}

/// A trait factory containing only this crate's providers.
pub fn trait_factory() -> TraitFactory {
    register(TraitFactory::builder()).build()
}
