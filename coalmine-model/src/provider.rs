/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Trait providers and the registration table the model assembler consults.

use crate::{DynamicTrait, Node, ShapeId, Trait};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Creates instances of one trait kind from parsed node values.
pub trait TraitProvider: Send + Sync + fmt::Debug {
    /// The id of the trait this provider creates.
    fn trait_id(&self) -> &ShapeId;

    /// Creates a trait for the shape or member `target` from its parsed `value`.
    ///
    /// Providers must not assume anything about `target` beyond its id; attaching
    /// the trait to the shape is the caller's job.
    fn create_trait(&self, target: &ShapeId, value: Node) -> Box<dyn Trait>;
}

/// An explicit table mapping trait ids to the providers that build them.
///
/// Cloning is cheap; the table is shared.
#[derive(Clone, Debug, Default)]
pub struct TraitFactory {
    providers: Arc<HashMap<ShapeId, Arc<dyn TraitProvider>>>,
}

impl TraitFactory {
    /// Returns a builder for `TraitFactory`.
    pub fn builder() -> TraitFactoryBuilder {
        TraitFactoryBuilder::default()
    }

    /// Returns the provider registered for `trait_id`.
    pub fn provider(&self, trait_id: &ShapeId) -> Option<&dyn TraitProvider> {
        self.providers.get(trait_id).map(|p| p.as_ref())
    }

    /// Returns true if a provider is registered for `trait_id`.
    pub fn contains(&self, trait_id: &ShapeId) -> bool {
        self.providers.contains_key(trait_id)
    }

    /// Returns the ids of every registered trait.
    pub fn trait_ids(&self) -> impl Iterator<Item = &ShapeId> {
        self.providers.keys()
    }

    /// Creates a trait using the provider registered for `trait_id`.
    ///
    /// Returns `None` if no provider is registered.
    pub fn create_trait(
        &self,
        trait_id: &ShapeId,
        target: &ShapeId,
        value: Node,
    ) -> Option<Box<dyn Trait>> {
        let provider = self.providers.get(trait_id)?;
        tracing::trace!(trait_id = %trait_id, shape = %target, "creating trait from provider");
        Some(provider.create_trait(target, value))
    }

    /// Creates a trait, falling back to a [`DynamicTrait`] if no provider is registered.
    pub fn create_trait_or_dynamic(
        &self,
        trait_id: &ShapeId,
        target: &ShapeId,
        value: Node,
    ) -> Box<dyn Trait> {
        match self.providers.get(trait_id) {
            Some(provider) => provider.create_trait(target, value),
            None => Box::new(DynamicTrait::new(trait_id.clone(), value)),
        }
    }
}

/// Builder for [`TraitFactory`].
#[derive(Debug, Default)]
pub struct TraitFactoryBuilder {
    providers: HashMap<ShapeId, Arc<dyn TraitProvider>>,
}

impl TraitFactoryBuilder {
    /// Registers a provider. A later registration for the same id replaces the earlier one.
    pub fn provider(mut self, provider: impl TraitProvider + 'static) -> Self {
        self.push_provider(Arc::new(provider));
        self
    }

    /// Registers a shared provider. A later registration for the same id replaces the earlier one.
    pub fn shared_provider(mut self, provider: Arc<dyn TraitProvider>) -> Self {
        self.push_provider(provider);
        self
    }

    /// Registers a shared provider in place.
    pub fn push_provider(&mut self, provider: Arc<dyn TraitProvider>) -> &mut Self {
        let id = provider.trait_id().clone();
        tracing::debug!(trait_id = %id, "registering trait provider");
        if self.providers.insert(id.clone(), provider).is_some() {
            tracing::warn!(trait_id = %id, "replaced an existing trait provider");
        }
        self
    }

    /// Builds the factory.
    pub fn build(self) -> TraitFactory {
        TraitFactory {
            providers: Arc::new(self.providers),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{TraitFactory, TraitProvider};
    use crate::{DynamicTrait, Node, ShapeId, Trait};

    #[derive(Debug)]
    struct Tagged {
        id: ShapeId,
        tag: &'static str,
    }

    impl TraitProvider for Tagged {
        fn trait_id(&self) -> &ShapeId {
            &self.id
        }

        fn create_trait(&self, _target: &ShapeId, value: Node) -> Box<dyn Trait> {
            let mut object = std::collections::HashMap::new();
            object.insert(self.tag.to_string(), value);
            Box::new(DynamicTrait::new(self.id.clone(), object.into()))
        }
    }

    fn tagged(tag: &'static str) -> Tagged {
        Tagged {
            id: ShapeId::new("test#tagged"),
            tag,
        }
    }

    #[test]
    fn unregistered_trait_has_no_provider() {
        let factory = TraitFactory::builder().build();
        let id = ShapeId::new("test#missing");
        assert!(factory
            .create_trait(&id, &ShapeId::new("test#Target"), Node::Null)
            .is_none());
        let dynamic = factory.create_trait_or_dynamic(&id, &ShapeId::new("test#Target"), Node::Null);
        assert_eq!(dynamic.trait_id(), &id);
        assert!(dynamic.downcast_ref::<DynamicTrait>().is_some());
    }

    #[test]
    fn registered_provider_is_used() {
        let factory = TraitFactory::builder().provider(tagged("first")).build();
        let id = ShapeId::new("test#tagged");
        assert!(factory.contains(&id));
        assert_eq!(factory.trait_ids().count(), 1);
        let created = factory
            .create_trait(&id, &ShapeId::new("test#Target"), Node::from(1))
            .unwrap();
        assert_eq!(
            created.value().as_object().unwrap().get("first"),
            Some(&Node::from(1))
        );
    }

    #[test]
    fn later_registration_wins() {
        let factory = TraitFactory::builder()
            .provider(tagged("first"))
            .provider(tagged("second"))
            .build();
        let created = factory
            .create_trait(
                &ShapeId::new("test#tagged"),
                &ShapeId::new("test#Target"),
                Node::Null,
            )
            .unwrap();
        assert!(created.value().as_object().unwrap().contains_key("second"));
    }
}
