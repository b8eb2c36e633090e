/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use coalmine_model::serialize::to_json_ast;
use coalmine_model::test_util::show_test_logs;
use coalmine_model::{DynamicTrait, ModelAssembler, Node, ShapeId};
use coalmine_traits::{AvroDefault, AVRO_DEFAULT_ID};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::PathBuf;

fn model_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("models")
        .join(name)
}

fn assembler() -> ModelAssembler {
    ModelAssembler::new().trait_factory(coalmine_traits::trait_factory())
}

#[test]
fn member_default_loads_as_avro_default() {
    let _logs = show_test_logs();
    let model = assembler()
        .add_path(model_path("avro-default.smithy"))
        .assemble()
        .unwrap();

    let age = model
        .member(&ShapeId::new("com.example#Person$age"))
        .unwrap();
    assert_eq!(age.traits().len(), 1);
    let (id, found) = age.traits().iter().next().unwrap();
    assert_eq!(id, &AVRO_DEFAULT_ID);
    assert_eq!(found.trait_id().as_str(), "coalmine#avroDefault");
    assert_eq!(found.value(), &Node::from(42));
    assert_eq!(
        found.downcast_ref::<AvroDefault>(),
        Some(&AvroDefault::new(42))
    );

    let aliases = model
        .traits(&ShapeId::new("com.example#Person$aliases"))
        .unwrap()
        .get_as::<AvroDefault>(&AVRO_DEFAULT_ID)
        .unwrap();
    assert_eq!(aliases.value(), &Node::from(vec![Node::from("unknown")]));

    let name = model
        .member(&ShapeId::new("com.example#Person$name"))
        .unwrap();
    assert!(!name.traits().contains(&AVRO_DEFAULT_ID));
}

#[test]
fn use_and_apply_statements_resolve_avro_default() {
    let _logs = show_test_logs();
    let model = assembler()
        .add_path(model_path("avro-default.smithy"))
        .add_path(model_path("avro-default-apply.smithy"))
        .assemble()
        .unwrap();

    let name = model
        .traits(&ShapeId::new("com.example#Person$name"))
        .unwrap();
    assert_eq!(
        name.get_as::<AvroDefault>(&AVRO_DEFAULT_ID),
        Some(&AvroDefault::new("anonymous"))
    );

    let mut address = HashMap::new();
    address.insert("street".to_string(), Node::from(""));
    address.insert("number".to_string(), Node::from(0));
    let found = model
        .shape(&ShapeId::new("com.example#Address"))
        .unwrap()
        .traits()
        .get_as::<AvroDefault>(&AVRO_DEFAULT_ID)
        .unwrap();
    assert_eq!(found.value(), &Node::Object(address));

    let annotated: Vec<_> = model
        .ids_with_trait(&AVRO_DEFAULT_ID)
        .map(ShapeId::as_str)
        .collect();
    assert_eq!(
        annotated,
        vec![
            "com.example#Address",
            "com.example#Person$age",
            "com.example#Person$aliases",
            "com.example#Person$name",
        ]
    );
}

#[test]
fn json_ast_loads_as_avro_default() {
    let model = assembler()
        .add_path(model_path("avro-default.json"))
        .assemble()
        .unwrap();
    let traits = model
        .traits(&ShapeId::new("com.example#Account$balance"))
        .unwrap();
    assert_eq!(traits.len(), 1);
    assert_eq!(
        traits.get_as::<AvroDefault>(&AVRO_DEFAULT_ID),
        Some(&AvroDefault::new(42))
    );

    let nickname = model
        .traits(&ShapeId::new("com.example#Account$nickname"))
        .unwrap()
        .get_as::<AvroDefault>(&AVRO_DEFAULT_ID)
        .unwrap();
    assert!(nickname.value().is_null());
}

#[test]
fn unregistered_avro_default_is_rejected() {
    let err = ModelAssembler::new()
        .add_path(model_path("avro-default.smithy"))
        .assemble()
        .unwrap_err();
    assert_eq!(err.unknown_trait(), Some(&AVRO_DEFAULT_ID));
    assert_eq!(err.position().map(|p| p.line), Some(10));
}

#[test]
fn unregistered_avro_default_can_load_dynamically() {
    let model = ModelAssembler::new()
        .allow_unknown_traits(true)
        .add_path(model_path("avro-default.smithy"))
        .assemble()
        .unwrap();
    let age = model
        .traits(&ShapeId::new("com.example#Person$age"))
        .unwrap()
        .get(&AVRO_DEFAULT_ID)
        .unwrap();
    assert!(age.downcast_ref::<AvroDefault>().is_none());
    assert_eq!(
        age.downcast_ref::<DynamicTrait>(),
        Some(&DynamicTrait::new(AVRO_DEFAULT_ID.clone(), Node::from(42)))
    );
}

#[test]
fn reapplying_avro_default() {
    let base = r#"
        namespace com.example
        structure Person {
            @coalmine#avroDefault(42)
            age: Integer
        }
    "#;

    assembler()
        .add_idl("base.smithy", base)
        .add_idl(
            "same.smithy",
            "namespace com.example\napply Person$age @coalmine#avroDefault(42)\n",
        )
        .assemble()
        .unwrap();

    let err = assembler()
        .add_idl("base.smithy", base)
        .add_idl(
            "different.smithy",
            "namespace com.example\napply Person$age @coalmine#avroDefault(7)\n",
        )
        .assemble()
        .unwrap_err();
    assert_eq!(err.conflicting_trait(), Some(&AVRO_DEFAULT_ID));
    assert_eq!(err.source_name(), "different.smithy");
}

#[test]
fn serialized_avro_default_loads_back() {
    let model = assembler()
        .add_path(model_path("avro-default.smithy"))
        .add_path(model_path("avro-default-apply.smithy"))
        .assemble()
        .unwrap();
    let ast = to_json_ast(&model);
    assert_eq!(
        ast["shapes"]["com.example#Person"]["members"]["age"]["traits"],
        serde_json::json!({"coalmine#avroDefault": 42})
    );

    let reloaded = assembler()
        .add_json_ast("model.json", ast.to_string())
        .assemble()
        .unwrap();
    assert_eq!(to_json_ast(&reloaded), ast);
    for id in model.ids_with_trait(&AVRO_DEFAULT_ID) {
        let before = model.traits(id).unwrap().get(&AVRO_DEFAULT_ID).unwrap();
        let after = reloaded.traits(id).unwrap().get(&AVRO_DEFAULT_ID).unwrap();
        assert!(*before == *after, "{id}");
    }
}
