/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Serializes a [`Model`] to the Smithy JSON AST.

use crate::{MemberShape, Model, ShapeType, TraitMap};
use serde_json::{Map, Value};

/// The JSON AST version written by [`to_json_ast`].
pub const JSON_AST_VERSION: &str = "2.0";

/// Renders `model` as a JSON AST document.
///
/// Every trait is written through [`Trait::value`](crate::Trait::value), so the
/// output can be read back with [`ModelAssembler`](crate::ModelAssembler).
pub fn to_json_ast(model: &Model) -> Value {
    let mut root = Map::new();
    root.insert("smithy".into(), Value::from(JSON_AST_VERSION));
    if !model.metadata().is_empty() {
        let metadata = model
            .metadata()
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value)))
            .collect();
        root.insert("metadata".into(), Value::Object(metadata));
    }
    let mut shapes = Map::new();
    for shape in model.shapes() {
        let mut entry = Map::new();
        entry.insert("type".into(), Value::from(shape.shape_type().keyword()));
        match shape.shape_type() {
            ShapeType::Structure | ShapeType::Union => {
                let members = shape
                    .members()
                    .map(|member| (member.name().to_owned(), member_value(member)))
                    .collect();
                entry.insert("members".into(), Value::Object(members));
            }
            _ => {
                for member in shape.members() {
                    entry.insert(member.name().to_owned(), member_value(member));
                }
            }
        }
        if let Some(traits) = traits_value(shape.traits()) {
            entry.insert("traits".into(), traits);
        }
        shapes.insert(shape.id().to_string(), Value::Object(entry));
    }
    root.insert("shapes".into(), Value::Object(shapes));
    Value::Object(root)
}

fn member_value(member: &MemberShape) -> Value {
    let mut entry = Map::new();
    entry.insert("target".into(), Value::from(member.target().as_str()));
    if let Some(traits) = traits_value(member.traits()) {
        entry.insert("traits".into(), traits);
    }
    Value::Object(entry)
}

fn traits_value(traits: &TraitMap) -> Option<Value> {
    if traits.is_empty() {
        return None;
    }
    Some(Value::Object(
        traits
            .iter()
            .map(|(id, t)| (id.to_string(), Value::from(t.value())))
            .collect(),
    ))
}

#[cfg(test)]
mod test {
    use super::to_json_ast;
    use crate::{ModelAssembler, ShapeId};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const IDL: &str = r#"
        metadata owner = "data"
        namespace com.example

        /// A list of names.
        list Names {
            @length(min: 1)
            member: String
        }

        structure Person {
            @required
            name: String
            age: Integer = 0
        }
    "#;

    #[test]
    fn writes_json_ast() {
        let model = ModelAssembler::new().add_idl("a.smithy", IDL).assemble().unwrap();
        assert_eq!(
            to_json_ast(&model),
            json!({
                "smithy": "2.0",
                "metadata": {"owner": "data"},
                "shapes": {
                    "com.example#Names": {
                        "type": "list",
                        "member": {
                            "target": "smithy.api#String",
                            "traits": {"smithy.api#length": {"min": 1}}
                        },
                        "traits": {"smithy.api#documentation": "A list of names."}
                    },
                    "com.example#Person": {
                        "type": "structure",
                        "members": {
                            "age": {
                                "target": "smithy.api#Integer",
                                "traits": {"smithy.api#default": 0}
                            },
                            "name": {
                                "target": "smithy.api#String",
                                "traits": {"smithy.api#required": {}}
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn serialized_model_loads_back() {
        let model = ModelAssembler::new().add_idl("a.smithy", IDL).assemble().unwrap();
        let ast = to_json_ast(&model).to_string();
        let reloaded = ModelAssembler::new()
            .add_json_ast("a.json", ast)
            .assemble()
            .unwrap();
        assert_eq!(to_json_ast(&reloaded), to_json_ast(&model));
        let age = ShapeId::new("com.example#Person$age");
        assert_eq!(
            reloaded.traits(&age).unwrap().len(),
            model.traits(&age).unwrap().len()
        );
    }
}
