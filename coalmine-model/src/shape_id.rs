/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Namespace of the Smithy prelude.
pub const PRELUDE_NAMESPACE: &str = "smithy.api";

/// A Smithy Shape ID.
///
/// Shape IDs uniquely identify shapes in a Smithy model.
/// Format: `namespace#shapeName` or `namespace#shapeName$memberName`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId {
    value: Cow<'static, str>,
}

impl ShapeId {
    /// Creates a new ShapeId from a string without validating it.
    ///
    /// Use [`ShapeId::parse`] for untrusted input.
    ///
    /// # Examples
    /// ```
    /// use coalmine_model::ShapeId;
    ///
    /// let shape_id = ShapeId::new("smithy.api#String");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Cow::Owned(value.into()),
        }
    }

    /// Creates a ShapeId from a static string. Usable in `static` items.
    pub const fn from_static(value: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }

    /// Parses and validates a ShapeId.
    ///
    /// # Examples
    /// ```
    /// use coalmine_model::ShapeId;
    ///
    /// let shape_id = ShapeId::parse("com.example#MyStruct$member").unwrap();
    /// assert_eq!(shape_id.member_name(), Some("member"));
    /// assert!(ShapeId::parse("com.example").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, ShapeIdError> {
        let (namespace, rest) = value
            .split_once('#')
            .ok_or_else(|| ShapeIdError::new(value, ShapeIdErrorKind::MissingNamespace))?;
        if namespace.is_empty() || !namespace.split('.').all(is_identifier) {
            return Err(ShapeIdError::new(value, ShapeIdErrorKind::InvalidNamespace));
        }
        let (name, member) = match rest.split_once('$') {
            Some((name, member)) => (name, Some(member)),
            None => (rest, None),
        };
        if !is_identifier(name) {
            return Err(ShapeIdError::new(value, ShapeIdErrorKind::InvalidName));
        }
        if let Some(member) = member {
            if !is_identifier(member) {
                return Err(ShapeIdError::new(value, ShapeIdErrorKind::InvalidMember));
            }
        }
        Ok(Self::new(value))
    }

    /// Builds a ShapeId from a namespace and a shape name.
    pub fn from_parts(namespace: &str, name: &str) -> Self {
        Self::new(format!("{namespace}#{name}"))
    }

    /// Returns the string representation of this ShapeId.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the namespace portion of the ShapeId.
    ///
    /// # Examples
    /// ```
    /// use coalmine_model::ShapeId;
    ///
    /// let shape_id = ShapeId::new("smithy.api#String");
    /// assert_eq!(shape_id.namespace(), Some("smithy.api"));
    /// ```
    pub fn namespace(&self) -> Option<&str> {
        self.value.split_once('#').map(|(ns, _)| ns)
    }

    /// Returns the shape name portion of the ShapeId.
    ///
    /// # Examples
    /// ```
    /// use coalmine_model::ShapeId;
    ///
    /// let shape_id = ShapeId::new("smithy.api#String");
    /// assert_eq!(shape_id.shape_name(), Some("String"));
    /// ```
    pub fn shape_name(&self) -> Option<&str> {
        self.value
            .split_once('#')
            .and_then(|(_, rest)| rest.split_once('$').map(|(name, _)| name).or(Some(rest)))
    }

    /// Returns the member name if this is a member shape ID.
    ///
    /// # Examples
    /// ```
    /// use coalmine_model::ShapeId;
    ///
    /// let shape_id = ShapeId::new("com.example#MyStruct$member");
    /// assert_eq!(shape_id.member_name(), Some("member"));
    /// ```
    pub fn member_name(&self) -> Option<&str> {
        self.value
            .split_once('#')
            .and_then(|(_, rest)| rest.split_once('$').map(|(_, member)| member))
    }

    /// Returns the id of `member` inside this shape.
    pub fn with_member(&self, member: &str) -> ShapeId {
        ShapeId::new(format!("{}${member}", self.without_member().as_str()))
    }

    /// Returns this id with any member part removed.
    pub fn without_member(&self) -> ShapeId {
        match self.value.split_once('$') {
            Some((container, _)) => ShapeId::new(container),
            None => self.clone(),
        }
    }

    /// Returns true if this id lives in the `smithy.api` prelude namespace.
    pub fn is_prelude(&self) -> bool {
        self.namespace() == Some(PRELUDE_NAMESPACE)
    }
}

pub(crate) fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && value.chars().any(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for ShapeId {
    type Err = ShapeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for ShapeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeIdErrorKind {
    MissingNamespace,
    InvalidNamespace,
    InvalidName,
    InvalidMember,
}

/// Error returned when a string is not a valid Shape ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeIdError {
    input: String,
    kind: ShapeIdErrorKind,
}

impl ShapeIdError {
    fn new(input: &str, kind: ShapeIdErrorKind) -> Self {
        Self {
            input: input.to_owned(),
            kind,
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ShapeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ShapeIdErrorKind::*;
        let reason = match self.kind {
            MissingNamespace => "missing `#` namespace separator",
            InvalidNamespace => "namespace is not a dot-separated list of identifiers",
            InvalidName => "shape name is not a valid identifier",
            InvalidMember => "member name is not a valid identifier",
        };
        write!(f, "invalid shape id `{}`: {reason}", self.input)
    }
}

impl std::error::Error for ShapeIdError {}
