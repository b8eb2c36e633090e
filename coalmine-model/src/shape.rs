/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{ShapeId, TraitMap};
use std::collections::BTreeMap;

/// Enumeration of Smithy shape types.
///
/// This represents the core shape types from the Smithy specification,
/// including simple types, aggregate types, and the special member type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ShapeType {
    // Simple types
    /// Boolean type
    Boolean,
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
    /// Arbitrary precision integer
    BigInteger,
    /// Arbitrary precision decimal
    BigDecimal,
    /// UTF-8 string
    String,
    /// Binary data
    Blob,
    /// Timestamp
    Timestamp,
    /// Document type
    Document,

    // Aggregate types
    /// List type
    List,
    /// Map type
    Map,
    /// Structure type
    Structure,
    /// Union type
    Union,

    // Member
    /// Member shape
    Member,
}

impl ShapeType {
    /// Returns true if this is a simple type.
    #[inline]
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::BigInteger
                | Self::BigDecimal
                | Self::String
                | Self::Blob
                | Self::Timestamp
                | Self::Document
        )
    }

    /// Returns true if this is an aggregate type.
    #[inline]
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::List | Self::Map | Self::Structure | Self::Union)
    }

    /// Returns true if this is a member type.
    #[inline]
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member)
    }

    /// Resolves an IDL / JSON AST type keyword such as `structure` or `bigInteger`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "integer" => Self::Integer,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "bigInteger" => Self::BigInteger,
            "bigDecimal" => Self::BigDecimal,
            "string" => Self::String,
            "blob" => Self::Blob,
            "timestamp" => Self::Timestamp,
            "document" => Self::Document,
            "list" => Self::List,
            "map" => Self::Map,
            "structure" => Self::Structure,
            "union" => Self::Union,
            "member" => Self::Member,
            _ => return None,
        })
    }

    /// Returns the IDL / JSON AST keyword of this type.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::BigInteger => "bigInteger",
            Self::BigDecimal => "bigDecimal",
            Self::String => "string",
            Self::Blob => "blob",
            Self::Timestamp => "timestamp",
            Self::Document => "document",
            Self::List => "list",
            Self::Map => "map",
            Self::Structure => "structure",
            Self::Union => "union",
            Self::Member => "member",
        }
    }
}

/// A member of an aggregate shape.
#[derive(Debug)]
pub struct MemberShape {
    id: ShapeId,
    target: ShapeId,
    traits: TraitMap,
}

impl MemberShape {
    /// Creates a member with no traits.
    pub fn new(id: ShapeId, target: ShapeId) -> Self {
        Self {
            id,
            target,
            traits: TraitMap::new(),
        }
    }

    /// The member id, `namespace#Container$member`.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The member name.
    pub fn name(&self) -> &str {
        self.id.member_name().unwrap_or_default()
    }

    /// The shape this member targets.
    pub fn target(&self) -> &ShapeId {
        &self.target
    }

    /// Traits applied to this member.
    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    /// Mutable access to the member's traits.
    pub fn traits_mut(&mut self) -> &mut TraitMap {
        &mut self.traits
    }
}

/// A shape in a model.
#[derive(Debug)]
pub struct Shape {
    id: ShapeId,
    shape_type: ShapeType,
    traits: TraitMap,
    members: BTreeMap<String, MemberShape>,
}

impl Shape {
    /// Creates a shape with no traits or members.
    pub fn new(id: ShapeId, shape_type: ShapeType) -> Self {
        Self {
            id,
            shape_type,
            traits: TraitMap::new(),
            members: BTreeMap::new(),
        }
    }

    /// The shape id.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The shape type.
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// Traits applied to this shape.
    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    /// Mutable access to the shape's traits.
    pub fn traits_mut(&mut self) -> &mut TraitMap {
        &mut self.traits
    }

    /// Returns the member named `name`.
    pub fn member(&self, name: &str) -> Option<&MemberShape> {
        self.members.get(name)
    }

    /// Mutable access to the member named `name`.
    pub fn member_mut(&mut self, name: &str) -> Option<&mut MemberShape> {
        self.members.get_mut(name)
    }

    /// Iterates members ordered by name.
    pub fn members(&self) -> impl Iterator<Item = &MemberShape> {
        self.members.values()
    }

    /// Adds `member` under its member name, returning any member it replaced.
    pub fn add_member(&mut self, member: MemberShape) -> Option<MemberShape> {
        let name = member.name().to_owned();
        self.members.insert(name, member)
    }
}
