//! Schema tree to node arena compilation
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use super::error::{CompileError, CompileResult};
use super::node::{Additional, Node, NodeId, Rules, TypeSet};
use super::CompiledSchema;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// `$schema` values accepted for the draft-07 dialect
const DRAFT_07: &[&str] = &[
    "http://json-schema.org/draft-07/schema#",
    "http://json-schema.org/draft-07/schema",
    "https://json-schema.org/draft-07/schema#",
    "https://json-schema.org/draft-07/schema",
];

/// Keywords that never affect validation
const ANNOTATIONS: &[&str] = &[
    "$schema",
    "$id",
    "$comment",
    "title",
    "description",
    "default",
    "examples",
    "definitions",
    "$defs",
    "readOnly",
    "writeOnly",
];

/// Compile a schema tree into its fast form
pub fn compile(root: &Value) -> CompileResult<CompiledSchema> {
    check_dialect(root)?;

    let mut compiler = Compiler {
        root,
        nodes: Vec::new(),
        refs: HashMap::new(),
    };
    let root_id = compiler.reserve();
    compiler.refs.insert("#".to_string(), root_id);
    compiler.nodes[root_id] = compiler.build(root, "#")?;
    compiler.compile_definitions()?;

    Ok(CompiledSchema::new(compiler.nodes))
}

struct Compiler<'a> {
    root: &'a Value,
    nodes: Vec<Node>,
    refs: HashMap<String, NodeId>,
}

impl<'a> Compiler<'a> {
    fn reserve(&mut self) -> NodeId {
        self.nodes.push(Node::Never);
        self.nodes.len() - 1
    }

    fn subschema(&mut self, value: &Value, pointer: &str) -> CompileResult<NodeId> {
        let id = self.reserve();
        self.nodes[id] = self.build(value, pointer)?;
        Ok(id)
    }

    fn subschemas(&mut self, value: &Value, keyword: &str, pointer: &str) -> CompileResult<Vec<NodeId>> {
        let branches = value
            .as_array()
            .filter(|branches| !branches.is_empty())
            .ok_or_else(|| CompileError::invalid_keyword(keyword, pointer, "expected a non-empty array"))?;

        branches
            .iter()
            .enumerate()
            .map(|(i, branch)| self.subschema(branch, &format!("{}/{}", pointer, i)))
            .collect()
    }

    /// Compile unreferenced definitions too, so errors surface at load time
    fn compile_definitions(&mut self) -> CompileResult<()> {
        for section in ["definitions", "$defs"] {
            let Some(definitions) = self.root.get(section).and_then(Value::as_object) else {
                continue;
            };
            for name in definitions.keys() {
                let reference = format!("#/{}/{}", section, escape(name));
                self.reference(&reference, "#")?;
            }
        }
        Ok(())
    }

    fn reference(&mut self, reference: &str, pointer: &str) -> CompileResult<NodeId> {
        if let Some(&id) = self.refs.get(reference) {
            return Ok(id);
        }

        let target = self
            .resolve_local(reference)
            .ok_or_else(|| CompileError::UnresolvedReference {
                reference: reference.to_string(),
                pointer: pointer.to_string(),
            })?;

        // Registered before building so recursive definitions terminate
        let id = self.reserve();
        self.refs.insert(reference.to_string(), id);
        self.nodes[id] = self.build(target, reference)?;
        Ok(id)
    }

    fn resolve_local(&self, reference: &str) -> Option<&'a Value> {
        let mut segments = reference.strip_prefix("#/")?.split('/');
        let section = segments.next()?;
        let name = segments.next()?;
        if segments.next().is_some() || !matches!(section, "definitions" | "$defs") {
            return None;
        }
        self.root.get(section)?.get(unescape(name))
    }

    fn build(&mut self, value: &Value, pointer: &str) -> CompileResult<Node> {
        let map = match value {
            Value::Bool(true) => return Ok(Node::Always),
            Value::Bool(false) => return Ok(Node::Never),
            Value::Object(map) => map,
            _ => {
                return Err(CompileError::InvalidSchema {
                    pointer: pointer.to_string(),
                })
            }
        };

        // Draft-07 ignores every sibling of `$ref`
        if let Some(reference) = map.get("$ref") {
            let reference = reference
                .as_str()
                .ok_or_else(|| CompileError::invalid_keyword("$ref", pointer, "expected a string"))?;
            return self.reference(reference, pointer).map(Node::Ref);
        }

        let mut rules = Rules::default();
        for (keyword, value) in map {
            let at = format!("{}/{}", pointer, escape(keyword));
            match keyword.as_str() {
                "type" => rules.types = Some(parse_types(value, pointer)?),
                "enum" => {
                    let options = value
                        .as_array()
                        .ok_or_else(|| CompileError::invalid_keyword(keyword, pointer, "expected an array"))?;
                    rules.enumeration = Some(options.clone());
                }
                "const" => rules.constant = Some(value.clone()),
                "properties" => {
                    for (name, schema) in expect_object(value, keyword, pointer)? {
                        let id = self.subschema(schema, &format!("{}/{}", at, escape(name)))?;
                        rules.object.properties.insert(name.clone(), id);
                    }
                }
                "required" => rules.object.required = parse_strings(value, keyword, pointer)?,
                "additionalProperties" => {
                    rules.object.additional = match value {
                        Value::Bool(true) => Additional::Allowed,
                        Value::Bool(false) => Additional::Forbidden,
                        schema => Additional::Schema(self.subschema(schema, &at)?),
                    }
                }
                "minProperties" => rules.object.min_properties = Some(parse_count(value, keyword, pointer)?),
                "maxProperties" => rules.object.max_properties = Some(parse_count(value, keyword, pointer)?),
                "items" => {
                    if value.is_array() {
                        return Err(CompileError::UnsupportedKeyword {
                            keyword: "items (tuple form)".to_string(),
                            pointer: pointer.to_string(),
                        });
                    }
                    rules.array.items = Some(self.subschema(value, &at)?);
                }
                "minItems" => rules.array.min_items = Some(parse_count(value, keyword, pointer)?),
                "maxItems" => rules.array.max_items = Some(parse_count(value, keyword, pointer)?),
                "minLength" => rules.string.min_length = Some(parse_count(value, keyword, pointer)?),
                "maxLength" => rules.string.max_length = Some(parse_count(value, keyword, pointer)?),
                "pattern" => rules.string.pattern = Some(compile_pattern(value, pointer)?),
                "minimum" => rules.number.minimum = Some(parse_number(value, keyword, pointer)?),
                "maximum" => rules.number.maximum = Some(parse_number(value, keyword, pointer)?),
                "anyOf" => rules.any_of = self.subschemas(value, keyword, &at)?,
                "allOf" => rules.all_of = self.subschemas(value, keyword, &at)?,
                "oneOf" => rules.one_of = self.subschemas(value, keyword, &at)?,
                "not" => rules.not = Some(self.subschema(value, &at)?),
                annotation if ANNOTATIONS.contains(&annotation) => {}
                other => {
                    return Err(CompileError::UnsupportedKeyword {
                        keyword: other.to_string(),
                        pointer: pointer.to_string(),
                    })
                }
            }
        }

        Ok(Node::Rules(Box::new(rules)))
    }
}

fn check_dialect(root: &Value) -> CompileResult<()> {
    match root.get("$schema") {
        None => Ok(()),
        Some(Value::String(dialect)) if DRAFT_07.contains(&dialect.as_str()) => Ok(()),
        Some(Value::String(dialect)) => Err(CompileError::UnsupportedDialect {
            dialect: dialect.clone(),
        }),
        Some(_) => Err(CompileError::invalid_keyword("$schema", "#", "expected a string")),
    }
}

fn expect_object<'v>(value: &'v Value, keyword: &str, pointer: &str) -> CompileResult<&'v Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| CompileError::invalid_keyword(keyword, pointer, "expected an object"))
}

fn parse_types(value: &Value, pointer: &str) -> CompileResult<TypeSet> {
    let mut types = TypeSet::default();
    let names: Vec<&str> = match value {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names
            .iter()
            .map(|name| {
                name.as_str()
                    .ok_or_else(|| CompileError::invalid_keyword("type", pointer, "expected type names"))
            })
            .collect::<CompileResult<_>>()?,
        _ => return Err(CompileError::invalid_keyword("type", pointer, "expected a string or an array")),
    };

    for name in names {
        if !types.insert(name) {
            return Err(CompileError::invalid_keyword(
                "type",
                pointer,
                format!("unknown type '{}'", name),
            ));
        }
    }
    Ok(types)
}

fn parse_strings(value: &Value, keyword: &str, pointer: &str) -> CompileResult<Vec<String>> {
    value
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| CompileError::invalid_keyword(keyword, pointer, "expected an array of strings"))
}

fn parse_count(value: &Value, keyword: &str, pointer: &str) -> CompileResult<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| CompileError::invalid_keyword(keyword, pointer, "expected a non-negative integer"))
}

fn parse_number(value: &Value, keyword: &str, pointer: &str) -> CompileResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| CompileError::invalid_keyword(keyword, pointer, "expected a number"))
}

fn compile_pattern(value: &Value, pointer: &str) -> CompileResult<Regex> {
    let pattern = value
        .as_str()
        .ok_or_else(|| CompileError::invalid_keyword("pattern", pointer, "expected a string"))?;

    Regex::new(&translate_pattern(pattern)).map_err(|source| CompileError::InvalidPattern {
        pattern: pattern.to_string(),
        pointer: pointer.to_string(),
        source,
    })
}

/// ECMA-262 shorthand classes are ASCII-only; Rust's are Unicode-aware
pub(crate) fn translate_pattern(pattern: &str) -> String {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            translated.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => translated.push_str("[0-9]"),
            Some('D') => translated.push_str("[^0-9]"),
            Some('w') => translated.push_str("[A-Za-z0-9_]"),
            Some('W') => translated.push_str("[^A-Za-z0-9_]"),
            Some(other) => {
                translated.push('\\');
                translated.push(other);
            }
            None => translated.push('\\'),
        }
    }
    translated
}

fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
