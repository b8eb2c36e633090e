/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Assembles a [`Model`] from Smithy IDL and JSON AST sources.

mod idl;
mod json_ast;
mod lexer;

use crate::error::{LoadError, LoadErrorKind, Position};
use crate::{
    DynamicTrait, MemberShape, Model, Node, Shape, ShapeId, ShapeType, Trait, TraitFactory,
    TraitMap,
};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// A trait application as written in a source, before it is materialized.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedTrait {
    pub(crate) id: ShapeId,
    pub(crate) value: Node,
    pub(crate) position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedMember {
    pub(crate) name: String,
    pub(crate) target: ShapeId,
    pub(crate) traits: Vec<ParsedTrait>,
    pub(crate) position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedShape {
    pub(crate) id: ShapeId,
    pub(crate) shape_type: ShapeType,
    pub(crate) traits: Vec<ParsedTrait>,
    pub(crate) members: Vec<ParsedMember>,
    pub(crate) position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedApply {
    pub(crate) target: ShapeId,
    pub(crate) traits: Vec<ParsedTrait>,
    pub(crate) position: Option<Position>,
}

/// Everything one source contributes to a model.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ParsedSource {
    pub(crate) metadata: Vec<(String, Node)>,
    pub(crate) shapes: Vec<ParsedShape>,
    pub(crate) applies: Vec<ParsedApply>,
}

#[derive(Debug, Clone)]
enum SourceText {
    Idl(String),
    JsonAst(String),
    Path(PathBuf),
}

#[derive(Debug, Clone)]
struct Source {
    name: String,
    text: SourceText,
}

/// Loads model sources and assembles them into a [`Model`].
///
/// Traits are materialized through the configured [`TraitFactory`]. Traits in the
/// `smithy.api` prelude that have no provider become [`DynamicTrait`](crate::DynamicTrait)s.
/// Any other trait without a provider is an error unless
/// [`allow_unknown_traits`](ModelAssembler::allow_unknown_traits) is set.
///
/// # Examples
/// ```
/// use coalmine_model::{ModelAssembler, Node, ShapeId};
///
/// let model = ModelAssembler::new()
///     .add_idl(
///         "main.smithy",
///         r#"
///         $version: "2"
///         namespace com.example
///
///         structure Person {
///             @required
///             name: String
///         }
///         "#,
///     )
///     .assemble()
///     .unwrap();
/// let name = model.member(&ShapeId::new("com.example#Person$name")).unwrap();
/// assert_eq!(
///     name.traits().get(&ShapeId::new("smithy.api#required")).unwrap().value(),
///     &Node::empty_object()
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelAssembler {
    trait_factory: TraitFactory,
    allow_unknown_traits: bool,
    sources: Vec<Source>,
}

impl ModelAssembler {
    /// Creates an assembler with an empty trait factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trait factory used to materialize traits.
    pub fn trait_factory(mut self, trait_factory: TraitFactory) -> Self {
        self.trait_factory = trait_factory;
        self
    }

    /// When set, traits with no provider become dynamic traits instead of failing the load.
    pub fn allow_unknown_traits(mut self, allow: bool) -> Self {
        self.allow_unknown_traits = allow;
        self
    }

    /// Adds a source, choosing the format from its name: `.json` is JSON AST, anything else is IDL.
    pub fn add_source(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        if name.ends_with(".json") {
            self.add_json_ast(name, text)
        } else {
            self.add_idl(name, text)
        }
    }

    /// Adds a Smithy IDL source.
    pub fn add_idl(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.push(Source {
            name: name.into(),
            text: SourceText::Idl(text.into()),
        });
        self
    }

    /// Adds a JSON AST source.
    pub fn add_json_ast(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.push(Source {
            name: name.into(),
            text: SourceText::JsonAst(text.into()),
        });
        self
    }

    /// Adds a file. It is read when the model is assembled.
    pub fn add_path(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.sources.push(Source {
            name: path.display().to_string(),
            text: SourceText::Path(path.to_path_buf()),
        });
        self
    }

    /// Parses every source and assembles the model.
    pub fn assemble(&self) -> Result<Model, LoadError> {
        let mut builder = ModelBuilder {
            trait_factory: &self.trait_factory,
            allow_unknown_traits: self.allow_unknown_traits,
            metadata: HashMap::new(),
            shapes: BTreeMap::new(),
        };
        let mut parsed = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let contents = parse_source(source)?;
            tracing::debug!(
                source = %source.name,
                shapes = contents.shapes.len(),
                "parsed model source"
            );
            parsed.push((source.name.as_str(), contents));
        }
        // Shapes from every source must exist before any `apply` is resolved.
        let mut applies = Vec::new();
        for (name, contents) in parsed {
            for (key, value) in contents.metadata {
                builder.merge_metadata(name, key, value)?;
            }
            for shape in contents.shapes {
                builder.add_shape(name, shape)?;
            }
            applies.extend(contents.applies.into_iter().map(|apply| (name, apply)));
        }
        for (name, apply) in applies {
            builder.apply(name, apply)?;
        }
        tracing::debug!(shapes = builder.shapes.len(), "assembled model");
        Ok(Model::new(builder.metadata, builder.shapes))
    }
}

fn parse_source(source: &Source) -> Result<ParsedSource, LoadError> {
    match &source.text {
        SourceText::Idl(text) => idl::parse(&source.name, text),
        SourceText::JsonAst(text) => json_ast::parse(&source.name, text),
        SourceText::Path(path) => {
            tracing::trace!(path = %path.display(), "reading model file");
            let text = std::fs::read_to_string(path)
                .map_err(|err| LoadError::new(LoadErrorKind::Io(err), source.name.clone()))?;
            if path.extension().map_or(false, |ext| ext == "json") {
                json_ast::parse(&source.name, &text)
            } else {
                idl::parse(&source.name, &text)
            }
        }
    }
}

struct ModelBuilder<'a> {
    trait_factory: &'a TraitFactory,
    allow_unknown_traits: bool,
    metadata: HashMap<String, Node>,
    shapes: BTreeMap<ShapeId, Shape>,
}

impl ModelBuilder<'_> {
    fn merge_metadata(&mut self, source: &str, key: String, value: Node) -> Result<(), LoadError> {
        match self.metadata.get_mut(&key) {
            None => {
                self.metadata.insert(key, value);
            }
            Some(Node::Array(existing)) if matches!(value, Node::Array(_)) => {
                if let Node::Array(values) = value {
                    existing.extend(values);
                }
            }
            Some(existing) if *existing == value => {}
            Some(_) => {
                return Err(LoadError::new(
                    LoadErrorKind::ConflictingMetadata(key),
                    source,
                ))
            }
        }
        Ok(())
    }

    fn add_shape(&mut self, source: &str, parsed: ParsedShape) -> Result<(), LoadError> {
        if self.shapes.contains_key(&parsed.id) {
            return Err(at(
                LoadError::new(LoadErrorKind::DuplicateShape(parsed.id), source),
                parsed.position,
            ));
        }
        let mut shape = Shape::new(parsed.id.clone(), parsed.shape_type);
        for parsed_trait in parsed.traits {
            self.apply_trait(source, shape.traits_mut(), &parsed.id, parsed_trait)?;
        }
        for member in parsed.members {
            let member_id = parsed.id.with_member(&member.name);
            let mut member_shape = MemberShape::new(member_id.clone(), member.target);
            for parsed_trait in member.traits {
                self.apply_trait(source, member_shape.traits_mut(), &member_id, parsed_trait)?;
            }
            if shape.add_member(member_shape).is_some() {
                return Err(at(
                    LoadError::new(LoadErrorKind::DuplicateShape(member_id), source),
                    member.position,
                ));
            }
        }
        tracing::trace!(shape = %parsed.id, "added shape");
        self.shapes.insert(parsed.id, shape);
        Ok(())
    }

    fn apply(&mut self, source: &str, apply: ParsedApply) -> Result<(), LoadError> {
        let not_found = || {
            at(
                LoadError::new(LoadErrorKind::ApplyTargetNotFound(apply.target.clone()), source),
                apply.position,
            )
        };
        let container = apply.target.without_member();
        // Take the shape out so that trait creation can borrow the factory.
        let mut shape = self.shapes.remove(&container).ok_or_else(not_found)?;
        let result = match apply.target.member_name() {
            Some(member) => match shape.member_mut(member) {
                Some(member) => self.apply_all(source, member.traits_mut(), &apply),
                None => Err(not_found()),
            },
            None => self.apply_all(source, shape.traits_mut(), &apply),
        };
        self.shapes.insert(container, shape);
        result
    }

    fn apply_all(
        &self,
        source: &str,
        traits: &mut TraitMap,
        apply: &ParsedApply,
    ) -> Result<(), LoadError> {
        for parsed_trait in &apply.traits {
            self.apply_trait(source, traits, &apply.target, parsed_trait.clone())?;
        }
        Ok(())
    }

    fn apply_trait(
        &self,
        source: &str,
        traits: &mut TraitMap,
        target: &ShapeId,
        parsed: ParsedTrait,
    ) -> Result<(), LoadError> {
        if let Some(existing) = traits.get(&parsed.id) {
            if existing.value() == &parsed.value {
                return Ok(());
            }
            return Err(at(
                LoadError::new(
                    LoadErrorKind::ConflictingTrait {
                        trait_id: parsed.id,
                        target: target.clone(),
                    },
                    source,
                ),
                parsed.position,
            ));
        }
        let created: Box<dyn Trait> = if self.trait_factory.contains(&parsed.id) {
            self.trait_factory
                .create_trait_or_dynamic(&parsed.id, target, parsed.value)
        } else if parsed.id.is_prelude() || self.allow_unknown_traits {
            if !parsed.id.is_prelude() {
                tracing::debug!(trait_id = %parsed.id, shape = %target, "no provider for trait; using a dynamic trait");
            }
            Box::new(DynamicTrait::new(parsed.id, parsed.value))
        } else {
            return Err(at(
                LoadError::new(LoadErrorKind::UnknownTrait(parsed.id), source),
                parsed.position,
            ));
        };
        traits.insert(created);
        Ok(())
    }
}

fn at(err: LoadError, position: Option<Position>) -> LoadError {
    match position {
        Some(position) => err.at(position),
        None => err,
    }
}
