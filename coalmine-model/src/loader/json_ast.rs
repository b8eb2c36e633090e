/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Reader for the Smithy JSON AST.

use super::{ParsedApply, ParsedMember, ParsedShape, ParsedSource, ParsedTrait};
use crate::error::{LoadError, LoadErrorKind};
use crate::{Node, ShapeId, ShapeType};
use serde_json::{Map, Value};

pub(super) fn parse(source_name: &str, text: &str) -> Result<ParsedSource, LoadError> {
    let root: Value = serde_json::from_str(text)
        .map_err(|err| LoadError::new(LoadErrorKind::Json(err), source_name))?;
    Reader { source_name }.root(root)
}

struct Reader<'a> {
    source_name: &'a str,
}

impl Reader<'_> {
    fn invalid(&self, message: String) -> LoadError {
        LoadError::new(LoadErrorKind::Syntax(message.into()), self.source_name)
    }

    fn object(&self, value: Value, context: &str) -> Result<Map<String, Value>, LoadError> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(self.invalid(format!(
                "{context} must be an object, found {}",
                Node::from(other).node_type()
            ))),
        }
    }

    fn shape_id(&self, raw: &str) -> Result<ShapeId, LoadError> {
        ShapeId::parse(raw).map_err(|err| LoadError::new(LoadErrorKind::from(err), self.source_name))
    }

    fn root(&self, root: Value) -> Result<ParsedSource, LoadError> {
        let mut root = self.object(root, "the model")?;
        match root.remove("smithy") {
            Some(Value::String(version)) => {
                tracing::trace!(version = %version, source = %self.source_name, "reading JSON AST");
            }
            Some(_) => return Err(self.invalid("`smithy` version must be a string".to_string())),
            None => return Err(self.invalid("missing `smithy` version".to_string())),
        }
        let mut output = ParsedSource::default();
        if let Some(metadata) = root.remove("metadata") {
            output.metadata = self
                .object(metadata, "`metadata`")?
                .into_iter()
                .map(|(key, value)| (key, Node::from(value)))
                .collect();
        }
        if let Some(shapes) = root.remove("shapes") {
            for (id, shape) in self.object(shapes, "`shapes`")? {
                let id = self.shape_id(&id)?;
                self.shape(&mut output, id, shape)?;
            }
        }
        Ok(output)
    }

    fn shape(&self, output: &mut ParsedSource, id: ShapeId, shape: Value) -> Result<(), LoadError> {
        let context = format!("shape `{id}`");
        let mut shape = self.object(shape, &context)?;
        let keyword = match shape.remove("type") {
            Some(Value::String(keyword)) => keyword,
            _ => return Err(self.invalid(format!("{context} is missing a string `type`"))),
        };
        let traits = self.traits(shape.remove("traits"))?;
        if keyword == "apply" {
            output.applies.push(ParsedApply {
                target: id,
                traits,
                position: None,
            });
            return Ok(());
        }
        let shape_type = match ShapeType::from_keyword(&keyword) {
            Some(ShapeType::Member) | None => {
                return Err(LoadError::new(
                    LoadErrorKind::UnsupportedShape(keyword),
                    self.source_name,
                ))
            }
            Some(shape_type) => shape_type,
        };
        let mut members = Vec::new();
        match shape_type {
            ShapeType::Structure | ShapeType::Union => {
                if let Some(defined) = shape.remove("members") {
                    for (name, member) in self.object(defined, &format!("{context} members"))? {
                        members.push(self.member(name, member)?);
                    }
                }
            }
            ShapeType::List => members.push(self.required_member(&mut shape, "member", &context)?),
            ShapeType::Map => {
                members.push(self.required_member(&mut shape, "key", &context)?);
                members.push(self.required_member(&mut shape, "value", &context)?);
            }
            _ => {}
        }
        output.shapes.push(ParsedShape {
            id,
            shape_type,
            traits,
            members,
            position: None,
        });
        Ok(())
    }

    fn required_member(
        &self,
        shape: &mut Map<String, Value>,
        name: &str,
        context: &str,
    ) -> Result<ParsedMember, LoadError> {
        let member = shape
            .remove(name)
            .ok_or_else(|| self.invalid(format!("{context} is missing `{name}`")))?;
        self.member(name.to_string(), member)
    }

    fn member(&self, name: String, member: Value) -> Result<ParsedMember, LoadError> {
        let mut member = self.object(member, &format!("member `{name}`"))?;
        let target = match member.remove("target") {
            Some(Value::String(target)) => self.shape_id(&target)?,
            _ => return Err(self.invalid(format!("member `{name}` is missing a string `target`"))),
        };
        Ok(ParsedMember {
            name,
            target,
            traits: self.traits(member.remove("traits"))?,
            position: None,
        })
    }

    fn traits(&self, traits: Option<Value>) -> Result<Vec<ParsedTrait>, LoadError> {
        let Some(traits) = traits else {
            return Ok(Vec::new());
        };
        self.object(traits, "`traits`")?
            .into_iter()
            .map(|(id, value)| -> Result<ParsedTrait, LoadError> {
                Ok(ParsedTrait {
                    id: self.shape_id(&id)?,
                    value: Node::from(value),
                    position: None,
                })
            })
            .collect()
    }
}
