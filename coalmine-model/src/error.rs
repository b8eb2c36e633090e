/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Errors returned while assembling a model.

use crate::{ShapeId, ShapeIdError};
use std::borrow::Cow;
use std::fmt;

#[derive(Debug)]
pub(crate) enum LoadErrorKind {
    Io(std::io::Error),
    Syntax(Cow<'static, str>),
    Json(serde_json::Error),
    InvalidShapeId(ShapeIdError),
    UnknownTrait(ShapeId),
    ConflictingTrait { trait_id: ShapeId, target: ShapeId },
    DuplicateShape(ShapeId),
    ApplyTargetNotFound(ShapeId),
    ConflictingMetadata(String),
    UnsupportedShape(String),
}

/// Line and column of an error inside a source, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number.
    pub line: usize,
    /// Column number, counted in characters.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Error returned when a model source cannot be loaded.
#[derive(Debug)]
pub struct LoadError {
    kind: LoadErrorKind,
    source_name: String,
    position: Option<Position>,
}

impl LoadError {
    pub(crate) fn new(kind: LoadErrorKind, source_name: impl Into<String>) -> Self {
        Self {
            kind,
            source_name: source_name.into(),
            position: None,
        }
    }

    pub(crate) fn syntax(
        message: impl Into<Cow<'static, str>>,
        source_name: impl Into<String>,
        position: Position,
    ) -> Self {
        Self::new(LoadErrorKind::Syntax(message.into()), source_name).at(position)
    }

    pub(crate) fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// The name of the source that failed to load.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Where in the source the error occurred, if known.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns true if the error is a syntax error.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self.kind, LoadErrorKind::Syntax(_) | LoadErrorKind::Json(_))
    }

    /// Returns the trait id if the error reports an unknown trait.
    pub fn unknown_trait(&self) -> Option<&ShapeId> {
        match &self.kind {
            LoadErrorKind::UnknownTrait(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the trait id if the error reports conflicting applications of a trait.
    pub fn conflicting_trait(&self) -> Option<&ShapeId> {
        match &self.kind {
            LoadErrorKind::ConflictingTrait { trait_id, .. } => Some(trait_id),
            _ => None,
        }
    }

    /// Returns the shape id if the error reports a shape defined twice.
    pub fn duplicate_shape(&self) -> Option<&ShapeId> {
        match &self.kind {
            LoadErrorKind::DuplicateShape(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the target if the error reports an `apply` to a missing shape or member.
    pub fn apply_target_not_found(&self) -> Option<&ShapeId> {
        match &self.kind {
            LoadErrorKind::ApplyTargetNotFound(id) => Some(id),
            _ => None,
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use LoadErrorKind::*;
        match &self.kind {
            Io(source) => Some(source),
            Json(source) => Some(source),
            InvalidShapeId(source) => Some(source),
            Syntax(_)
            | UnknownTrait(_)
            | ConflictingTrait { .. }
            | DuplicateShape(_)
            | ApplyTargetNotFound(_)
            | ConflictingMetadata(_)
            | UnsupportedShape(_) => None,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LoadErrorKind::*;
        match self.position {
            Some(position) => write!(f, "{}:{position}: ", self.source_name)?,
            None => write!(f, "{}: ", self.source_name)?,
        }
        match &self.kind {
            Io(_) => write!(f, "failed to read model source"),
            Syntax(msg) => write!(f, "syntax error: {msg}"),
            Json(_) => write!(f, "invalid JSON AST"),
            InvalidShapeId(_) => write!(f, "invalid shape id"),
            UnknownTrait(id) => write!(
                f,
                "unable to resolve trait `{id}`; register a provider for it or allow unknown traits"
            ),
            ConflictingTrait { trait_id, target } => write!(
                f,
                "conflicting values for trait `{trait_id}` applied to `{target}`"
            ),
            DuplicateShape(id) => write!(f, "shape `{id}` is defined more than once"),
            ApplyTargetNotFound(id) => write!(f, "cannot apply traits to unknown shape `{id}`"),
            ConflictingMetadata(key) => write!(f, "conflicting values for metadata key `{key}`"),
            UnsupportedShape(keyword) => write!(f, "unsupported shape type `{keyword}`"),
        }
    }
}

impl From<ShapeIdError> for LoadErrorKind {
    fn from(err: ShapeIdError) -> Self {
        LoadErrorKind::InvalidShapeId(err)
    }
}
