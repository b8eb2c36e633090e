/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Parser for the subset of the Smithy IDL the assembler understands.

use super::lexer::{tokenize, Spanned, Token};
use super::{ParsedApply, ParsedMember, ParsedShape, ParsedSource, ParsedTrait};
use crate::error::{LoadError, LoadErrorKind, Position};
use crate::shape_id::{is_identifier, PRELUDE_NAMESPACE};
use crate::{Node, ShapeId, ShapeType};
use std::collections::{HashMap, HashSet};

const DOCUMENTATION: ShapeId = ShapeId::from_static("smithy.api#documentation");
const DEFAULT: ShapeId = ShapeId::from_static("smithy.api#default");

/// Names that resolve to `smithy.api` when they are neither imported nor defined locally.
const PRELUDE_SHAPES: &[&str] = &[
    // Types
    "Blob",
    "Boolean",
    "String",
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Float",
    "Double",
    "BigInteger",
    "BigDecimal",
    "Timestamp",
    "Document",
    "Unit",
    "PrimitiveBoolean",
    "PrimitiveByte",
    "PrimitiveShort",
    "PrimitiveInteger",
    "PrimitiveLong",
    "PrimitiveFloat",
    "PrimitiveDouble",
    // Traits
    "addedDefault",
    "box",
    "clientOptional",
    "default",
    "deprecated",
    "documentation",
    "enumValue",
    "error",
    "externalDocumentation",
    "idempotencyToken",
    "input",
    "internal",
    "jsonName",
    "length",
    "mediaType",
    "output",
    "pattern",
    "private",
    "range",
    "recommended",
    "required",
    "sensitive",
    "since",
    "sparse",
    "tags",
    "timestampFormat",
    "title",
    "trait",
    "uniqueItems",
    "unstable",
    "xmlAttribute",
    "xmlFlattened",
    "xmlName",
    "xmlNamespace",
];

const UNSUPPORTED_SHAPES: &[&str] = &[
    "enum",
    "intEnum",
    "service",
    "operation",
    "resource",
    "set",
];

pub(super) fn parse(source_name: &str, text: &str) -> Result<ParsedSource, LoadError> {
    let tokens = tokenize(source_name, text)?;
    let mut parser = Parser {
        source_name,
        tokens,
        index: 0,
        namespace: None,
        uses: HashMap::new(),
        output: ParsedSource::default(),
    };
    parser.statements()?;
    parser.resolve()
}

struct Parser<'a> {
    source_name: &'a str,
    tokens: Vec<Spanned>,
    index: usize,
    namespace: Option<String>,
    uses: HashMap<String, ShapeId>,
    output: ParsedSource,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        &self.peek_spanned().token
    }

    fn peek_spanned(&self) -> &Spanned {
        // The token list always ends with `Eof`, which is never consumed.
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn peek_second(&self) -> &Token {
        &self.tokens[(self.index + 1).min(self.tokens.len() - 1)].token
    }

    fn position(&self) -> Position {
        self.peek_spanned().position
    }

    fn next(&mut self) -> Spanned {
        let spanned = self.peek_spanned().clone();
        if spanned.token != Token::Eof {
            self.index += 1;
        }
        spanned
    }

    fn error(&self, message: impl Into<std::borrow::Cow<'static, str>>, position: Position) -> LoadError {
        LoadError::syntax(message, self.source_name, position)
    }

    fn unexpected(&self, expected: &str) -> LoadError {
        let spanned = self.peek_spanned();
        self.error(
            format!("expected {expected} but found {}", spanned.token.describe()),
            spanned.position,
        )
    }

    fn expect(&mut self, token: Token) -> Result<Position, LoadError> {
        if *self.peek() == token {
            Ok(self.next().position)
        } else {
            Err(self.unexpected(&token.describe()))
        }
    }

    fn ident(&mut self, expected: &str) -> Result<(String, Position), LoadError> {
        if let Token::Ident(value) = self.peek() {
            let value = value.clone();
            return Ok((value, self.next().position));
        }
        Err(self.unexpected(expected))
    }

    fn statements(&mut self) -> Result<(), LoadError> {
        loop {
            let docs = self.doc_comments();
            let position = self.position();
            match self.peek().clone() {
                Token::Eof => return Ok(()),
                Token::Control(name) => {
                    self.next();
                    self.expect(Token::Colon)?;
                    let value = self.node()?;
                    tracing::trace!(control = %name, value = %value, "control statement");
                }
                Token::Ident(keyword) if keyword == "metadata" => {
                    self.next();
                    let key = match self.next() {
                        Spanned {
                            token: Token::Ident(key) | Token::String(key),
                            ..
                        } => key,
                        other => {
                            return Err(self.error(
                                format!("expected metadata key but found {}", other.token.describe()),
                                other.position,
                            ))
                        }
                    };
                    self.expect(Token::Equals)?;
                    let value = self.node()?;
                    self.output.metadata.push((key, value));
                }
                Token::Ident(keyword) if keyword == "namespace" => {
                    self.next();
                    let (namespace, position) = self.ident("namespace")?;
                    if self.namespace.is_some() {
                        return Err(self.error("namespace is declared more than once", position));
                    }
                    if !namespace.split('.').all(is_identifier) {
                        return Err(self.error(format!("invalid namespace `{namespace}`"), position));
                    }
                    self.namespace = Some(namespace);
                }
                Token::Ident(keyword) if keyword == "use" => {
                    self.next();
                    let (raw, position) = self.ident("shape id")?;
                    let id = self.absolute(&raw, position)?;
                    let name = id.shape_name().unwrap_or_default().to_owned();
                    self.uses.insert(name, id);
                }
                Token::Ident(keyword) if keyword == "apply" => {
                    self.next();
                    let (target, target_position) = self.ident("shape id")?;
                    if *self.peek() != Token::At {
                        return Err(self.unexpected("trait"));
                    }
                    // Exactly one trait; any that follow belong to the next shape.
                    let applied = self.trait_application()?;
                    if !docs.is_empty() {
                        tracing::trace!(shape = %target, "ignoring documentation comments on apply");
                    }
                    self.output.applies.push(ParsedApply {
                        target: ShapeId::new(target),
                        traits: vec![applied],
                        position: Some(target_position),
                    });
                }
                Token::Ident(_) | Token::At => {
                    let mut traits = self.traits()?;
                    let mut lines = docs;
                    lines.extend(self.doc_comments());
                    traits.extend(documentation(lines, position));
                    self.shape(traits)?;
                }
                _ => return Err(self.unexpected("a statement")),
            }
        }
    }

    fn doc_comments(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Token::DocComment(line) = self.peek() {
            lines.push(line.clone());
            self.next();
        }
        lines
    }

    fn traits(&mut self) -> Result<Vec<ParsedTrait>, LoadError> {
        let mut traits = Vec::new();
        while *self.peek() == Token::At {
            traits.push(self.trait_application()?);
        }
        Ok(traits)
    }

    /// Parses one `@id`, `@id(node)`, or `@id(key: node, ...)`.
    fn trait_application(&mut self) -> Result<ParsedTrait, LoadError> {
        let position = self.expect(Token::At)?;
        let (name, _) = self.ident("trait name")?;
        let value = if *self.peek() == Token::LParen {
            self.next();
            self.trait_body()?
        } else {
            Node::empty_object()
        };
        Ok(ParsedTrait {
            id: ShapeId::new(name),
            value,
            position: Some(position),
        })
    }

    fn trait_body(&mut self) -> Result<Node, LoadError> {
        if *self.peek() == Token::RParen {
            self.next();
            return Ok(Node::empty_object());
        }
        let is_structured = matches!(self.peek(), Token::Ident(_) | Token::String(_))
            && *self.peek_second() == Token::Colon;
        let value = if is_structured {
            self.object_entries(Token::RParen)?
        } else {
            let value = self.node()?;
            self.expect(Token::RParen)?;
            value
        };
        Ok(value)
    }

    fn shape(&mut self, traits: Vec<ParsedTrait>) -> Result<(), LoadError> {
        let (keyword, keyword_position) = self.ident("shape statement")?;
        let shape_type = match ShapeType::from_keyword(&keyword) {
            Some(ShapeType::Member) | None if UNSUPPORTED_SHAPES.contains(&keyword.as_str()) => {
                return Err(LoadError::new(
                    LoadErrorKind::UnsupportedShape(keyword),
                    self.source_name,
                )
                .at(keyword_position));
            }
            Some(ShapeType::Member) | None => {
                return Err(self.error(
                    format!("expected a shape statement but found `{keyword}`"),
                    keyword_position,
                ))
            }
            Some(shape_type) => shape_type,
        };
        let namespace = self
            .namespace
            .clone()
            .ok_or_else(|| self.error("shapes must be preceded by a namespace", keyword_position))?;
        let (name, name_position) = self.ident("shape name")?;
        if !is_identifier(&name) {
            return Err(self.error(format!("invalid shape name `{name}`"), name_position));
        }
        let members = if shape_type.is_aggregate() {
            self.members(shape_type)?
        } else {
            Vec::new()
        };
        self.output.shapes.push(ParsedShape {
            id: ShapeId::from_parts(&namespace, &name),
            shape_type,
            traits,
            members,
            position: Some(keyword_position),
        });
        Ok(())
    }

    fn members(&mut self, shape_type: ShapeType) -> Result<Vec<ParsedMember>, LoadError> {
        self.expect(Token::LBrace)?;
        let mut members = Vec::new();
        loop {
            let mut docs = self.doc_comments();
            if *self.peek() == Token::RBrace {
                self.next();
                break;
            }
            let mut traits = self.traits()?;
            docs.extend(self.doc_comments());
            let (name, position) = self.ident("member name")?;
            if !is_identifier(&name) {
                return Err(self.error(format!("invalid member name `{name}`"), position));
            }
            let allowed = match shape_type {
                ShapeType::List => name == "member",
                ShapeType::Map => name == "key" || name == "value",
                _ => true,
            };
            if !allowed {
                return Err(self.error(
                    format!("`{name}` is not a valid member of a {}", shape_type.keyword()),
                    position,
                ));
            }
            self.expect(Token::Colon)?;
            let (target, _) = self.ident("member target")?;
            if *self.peek() == Token::Equals {
                let default_position = self.next().position;
                traits.push(ParsedTrait {
                    id: DEFAULT,
                    value: self.node()?,
                    position: Some(default_position),
                });
            }
            traits.extend(documentation(docs, position));
            members.push(ParsedMember {
                name,
                target: ShapeId::new(target),
                traits,
                position: Some(position),
            });
        }
        Ok(members)
    }

    fn node(&mut self) -> Result<Node, LoadError> {
        let Spanned { token, position } = self.next();
        match token {
            Token::String(value) => Ok(Node::String(value)),
            Token::Number(value) => Ok(Node::Number(value)),
            Token::Ident(value) => Ok(match value.as_str() {
                "true" => Node::Bool(true),
                "false" => Node::Bool(false),
                "null" => Node::Null,
                _ => Node::String(value),
            }),
            Token::LBracket => {
                let mut values = Vec::new();
                while *self.peek() != Token::RBracket {
                    if *self.peek() == Token::Eof {
                        return Err(self.unexpected("`]`"));
                    }
                    values.push(self.node()?);
                }
                self.next();
                Ok(Node::Array(values))
            }
            Token::LBrace => self.object_entries(Token::RBrace),
            other => Err(self.error(
                format!("expected a node value but found {}", other.describe()),
                position,
            )),
        }
    }

    /// Parses `key: value` pairs up to and including `close`.
    fn object_entries(&mut self, close: Token) -> Result<Node, LoadError> {
        let mut entries = HashMap::new();
        loop {
            if *self.peek() == close {
                self.next();
                return Ok(Node::Object(entries));
            }
            let key = match self.next() {
                Spanned {
                    token: Token::Ident(key) | Token::String(key),
                    ..
                } => key,
                other => {
                    return Err(self.error(
                        format!("expected object key but found {}", other.token.describe()),
                        other.position,
                    ))
                }
            };
            self.expect(Token::Colon)?;
            let value = self.node()?;
            entries.insert(key, value);
        }
    }

    fn absolute(&self, raw: &str, position: Position) -> Result<ShapeId, LoadError> {
        ShapeId::parse(raw)
            .map_err(|err| LoadError::new(LoadErrorKind::from(err), self.source_name).at(position))
    }

    /// Resolves relative names now that every shape in the source is known.
    fn resolve(self) -> Result<ParsedSource, LoadError> {
        let Parser {
            source_name,
            namespace,
            uses,
            mut output,
            ..
        } = self;
        let local: HashSet<String> = output
            .shapes
            .iter()
            .filter_map(|shape| shape.id.shape_name().map(str::to_owned))
            .collect();
        let resolver = Resolver {
            source_name,
            namespace: namespace.as_deref(),
            uses: &uses,
            local: &local,
        };
        for shape in &mut output.shapes {
            resolver.traits(&mut shape.traits)?;
            for member in &mut shape.members {
                member.target = resolver.resolve(member.target.as_str(), member.position)?;
                resolver.traits(&mut member.traits)?;
            }
        }
        for apply in &mut output.applies {
            apply.target = resolver.resolve(apply.target.as_str(), apply.position)?;
            resolver.traits(&mut apply.traits)?;
        }
        Ok(output)
    }
}

struct Resolver<'a> {
    source_name: &'a str,
    namespace: Option<&'a str>,
    uses: &'a HashMap<String, ShapeId>,
    local: &'a HashSet<String>,
}

impl Resolver<'_> {
    fn traits(&self, traits: &mut [ParsedTrait]) -> Result<(), LoadError> {
        for parsed in traits {
            parsed.id = self.resolve(parsed.id.as_str(), parsed.position)?;
        }
        Ok(())
    }

    fn resolve(&self, raw: &str, position: Option<Position>) -> Result<ShapeId, LoadError> {
        let fail = |err| {
            let err = LoadError::new(err, self.source_name);
            match position {
                Some(position) => err.at(position),
                None => err,
            }
        };
        if raw.contains('#') {
            return ShapeId::parse(raw).map_err(|err| fail(LoadErrorKind::from(err)));
        }
        let (name, member) = match raw.split_once('$') {
            Some((name, member)) => (name, Some(member)),
            None => (raw, None),
        };
        let container = if let Some(imported) = self.uses.get(name) {
            imported.clone()
        } else if self.local.contains(name) || !PRELUDE_SHAPES.contains(&name) {
            match self.namespace {
                Some(namespace) => ShapeId::from_parts(namespace, name),
                None => {
                    return Err(fail(LoadErrorKind::Syntax(
                        format!("cannot resolve relative shape id `{raw}` without a namespace").into(),
                    )))
                }
            }
        } else {
            ShapeId::from_parts(PRELUDE_NAMESPACE, name)
        };
        let resolved = match member {
            Some(member) => container.with_member(member),
            None => container,
        };
        ShapeId::parse(resolved.as_str()).map_err(|err| fail(LoadErrorKind::from(err)))
    }
}

fn documentation(lines: Vec<String>, position: Position) -> Option<ParsedTrait> {
    if lines.is_empty() {
        return None;
    }
    Some(ParsedTrait {
        id: DOCUMENTATION,
        value: Node::String(lines.join("\n")),
        position: Some(position),
    })
}

#[cfg(test)]
mod test {
    use super::parse;
    use crate::{Node, ShapeId, ShapeType};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn parses_structure_members_and_traits() {
        let source = parse(
            "test.smithy",
            r#"
            $version: "2"
            namespace com.example

            /// A person.
            @coalmine#avroDefault({name: "anon", tags: ["a", "b"]})
            structure Person {
                /// Full name.
                @required
                name: String

                age: Integer = 0
            }
            "#,
        )
        .unwrap();
        assert_eq!(source.shapes.len(), 1);
        let person = &source.shapes[0];
        assert_eq!(person.id, ShapeId::new("com.example#Person"));
        assert_eq!(person.shape_type, ShapeType::Structure);

        let ids: Vec<_> = person.traits.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["coalmine#avroDefault", "smithy.api#documentation"]);
        let mut expected = HashMap::new();
        expected.insert("name".to_string(), Node::from("anon"));
        expected.insert(
            "tags".to_string(),
            Node::from(vec![Node::from("a"), Node::from("b")]),
        );
        assert_eq!(person.traits[0].value, Node::Object(expected));
        assert_eq!(person.traits[1].value, Node::from("A person."));

        let name = &person.members[0];
        assert_eq!(name.name, "name");
        assert_eq!(name.target, ShapeId::new("smithy.api#String"));
        let ids: Vec<_> = name.traits.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["smithy.api#required", "smithy.api#documentation"]);

        let age = &person.members[1];
        assert_eq!(age.target, ShapeId::new("smithy.api#Integer"));
        assert_eq!(age.traits[0].id, ShapeId::new("smithy.api#default"));
        assert_eq!(age.traits[0].value, Node::from(0));
    }

    #[test]
    fn structured_trait_bodies() {
        let source = parse(
            "test.smithy",
            "namespace a\n@tags([\"x\"])\n@range(min: 1, max: 10)\n@deprecated()\ninteger Count",
        )
        .unwrap();
        let traits = &source.shapes[0].traits;
        assert_eq!(traits[0].value, Node::from(vec![Node::from("x")]));
        let range = traits[1].value.as_object().unwrap();
        assert_eq!(range.get("min"), Some(&Node::from(1)));
        assert_eq!(range.get("max"), Some(&Node::from(10)));
        assert_eq!(traits[2].value, Node::empty_object());
    }

    #[test]
    fn relative_names_resolve_through_uses_then_locals_then_prelude() {
        let source = parse(
            "test.smithy",
            r#"
            namespace com.example
            use coalmine#avroDefault
            use other.ns#Shared

            structure Holder {
                @avroDefault(42)
                local: Local
                shared: Shared
                text: String
                unknown: Missing
                nested: Holder$local
            }

            string Local
            "#,
        )
        .unwrap();
        let members = &source.shapes[0].members;
        let targets: Vec<_> = members.iter().map(|m| m.target.as_str()).collect();
        assert_eq!(
            targets,
            vec![
                "com.example#Local",
                "other.ns#Shared",
                "smithy.api#String",
                "com.example#Missing",
                "com.example#Holder$local",
            ]
        );
        assert_eq!(members[0].traits[0].id, ShapeId::new("coalmine#avroDefault"));
        assert_eq!(members[0].traits[0].value, Node::from(42));
    }

    #[test]
    fn lists_maps_and_apply() {
        let source = parse(
            "test.smithy",
            r#"
            namespace com.example
            list Names { member: String }
            map Counts { key: String, value: Long }
            /// Not attached to anything.
            apply Names @length(min: 1)
            "#,
        )
        .unwrap();
        assert_eq!(source.shapes[0].members[0].name, "member");
        let map_members: Vec<_> = source.shapes[1].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(map_members, vec!["key", "value"]);
        let apply = &source.applies[0];
        assert_eq!(apply.target, ShapeId::new("com.example#Names"));
        let ids: Vec<_> = apply.traits.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["smithy.api#length"]);
    }

    #[test]
    fn apply_takes_a_single_trait() {
        let source = parse(
            "test.smithy",
            r#"
            namespace com.example
            structure Person { name: String }
            apply Person$name @coalmine#avroDefault("anon")
            @coalmine#avroDefault(1)
            @sensitive
            structure Address { n: Integer }
            "#,
        )
        .unwrap();
        assert_eq!(source.applies.len(), 1);
        let apply = &source.applies[0];
        assert_eq!(apply.target, ShapeId::new("com.example#Person$name"));
        assert_eq!(apply.traits.len(), 1);
        assert_eq!(apply.traits[0].value, Node::from("anon"));

        let address = &source.shapes[1];
        assert_eq!(address.id, ShapeId::new("com.example#Address"));
        let ids: Vec<_> = address.traits.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["coalmine#avroDefault", "smithy.api#sensitive"]);
        assert_eq!(address.traits[0].value, Node::from(1));
    }

    #[test]
    fn metadata_statements() {
        let source = parse("test.smithy", "metadata \"owner\" = {team: \"data\", oncall: null}").unwrap();
        let (key, value) = &source.metadata[0];
        assert_eq!(key, "owner");
        assert_eq!(value.as_object().unwrap().get("oncall"), Some(&Node::Null));
    }

    #[test]
    fn syntax_errors() {
        let cases = [
            ("string Foo", "shapes must be preceded by a namespace"),
            ("namespace a\nstructure Foo { bar }", "expected `:` but found `}`"),
            ("namespace a\nlist Foo { item: String }", "`item` is not a valid member of a list"),
            ("namespace a\nwidget Foo", "expected a shape statement but found `widget`"),
            ("namespace a\n@foo(1", "expected `)` but found end of input"),
            ("namespace a\nnamespace b", "namespace is declared more than once"),
            ("namespace a\napply Foo", "expected trait but found end of input"),
        ];
        for (text, message) in cases {
            let err = parse("test.smithy", text).unwrap_err();
            assert!(err.is_syntax_error(), "{text}");
            assert!(err.to_string().contains(message), "{err} should contain {message}");
        }
    }

    #[test]
    fn unsupported_shapes_are_reported() {
        let err = parse("test.smithy", "namespace a\nservice Weather {}").unwrap_err();
        assert!(!err.is_syntax_error());
        assert_eq!(
            err.to_string(),
            "test.smithy:2:1: unsupported shape type `service`"
        );
    }

    #[test]
    fn invalid_absolute_ids_are_reported() {
        let err = parse("test.smithy", "namespace a\nuse nope#").unwrap_err();
        assert_eq!(err.position().unwrap().line, 2);
    }
}
