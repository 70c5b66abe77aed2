//! Type-safe schema generation for Gemini structured outputs.
//!
//! Gemini's `responseSchema` accepts a subset of OpenAPI 3.0 rather than JSON
//! Schema: type names are upper-case (`OBJECT`, `STRING`, ...), nullability is a
//! `nullable` flag instead of a `["string", "null"]` type union, and `$ref` is
//! not followed. This module converts `schemars` output into that dialect.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use gemini_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Verdict {
//!     score: f64,
//!     reasons: Vec<String>,
//! }
//!
//! let schema = Verdict::gemini_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys carried over verbatim from a JSON Schema node.
const PASSTHROUGH_KEYS: &[&str] = &["description", "enum", "required"];

/// Trait for types that can be used as Gemini structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible `responseSchema` for this type.
    fn gemini_schema() -> Value {
        let schema = schema_for!(Self);
        let value = serde_json::to_value(schema).unwrap_or_default();
        let definitions = value.get("definitions").cloned().unwrap_or(Value::Null);
        convert(&value, &definitions)
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Convert one JSON Schema node (and its children) into Gemini's dialect.
fn convert(node: &Value, definitions: &Value) -> Value {
    let Value::Object(map) = node else {
        return node.clone();
    };

    if let Some(Value::String(ref_path)) = map.get("$ref") {
        let type_name = ref_path.trim_start_matches("#/definitions/");
        if let Some(def) = definitions.get(type_name) {
            return convert(def, definitions);
        }
    }

    // `Option<Struct>` comes out of schemars as anyOf [$ref, null]
    if let Some(Value::Array(variants)) = map.get("anyOf") {
        let non_null: Vec<&Value> = variants.iter().filter(|v| !is_null_schema(v)).collect();
        if non_null.len() == 1 {
            let mut inner = convert(non_null[0], definitions);
            if non_null.len() != variants.len() {
                if let Value::Object(inner_map) = &mut inner {
                    inner_map.insert("nullable".to_string(), Value::Bool(true));
                }
            }
            return inner;
        }
    }

    // Documented struct fields come out as allOf [$ref] plus a description
    if let Some(Value::Array(parts)) = map.get("allOf") {
        if let [only] = parts.as_slice() {
            let mut inner = convert(only, definitions);
            if let (Value::Object(inner_map), Some(description)) = (&mut inner, map.get("description")) {
                inner_map.insert("description".to_string(), description.clone());
            }
            return inner;
        }
    }

    let mut out = Map::new();

    match map.get("type") {
        Some(Value::String(t)) => {
            out.insert("type".to_string(), Value::String(t.to_uppercase()));
        }
        Some(Value::Array(types)) => {
            let mut nullable = false;
            for t in types.iter().filter_map(Value::as_str) {
                if t == "null" {
                    nullable = true;
                } else if !out.contains_key("type") {
                    out.insert("type".to_string(), Value::String(t.to_uppercase()));
                }
            }
            if nullable {
                out.insert("nullable".to_string(), Value::Bool(true));
            }
        }
        _ => {}
    }

    for key in PASSTHROUGH_KEYS {
        if let Some(v) = map.get(*key) {
            out.insert((*key).to_string(), v.clone());
        }
    }

    if let Some(Value::Object(props)) = map.get("properties") {
        let converted: Map<String, Value> = props
            .iter()
            .map(|(k, v)| (k.clone(), convert(v, definitions)))
            .collect();
        out.insert("properties".to_string(), Value::Object(converted));
    }

    if let Some(items) = map.get("items") {
        out.insert("items".to_string(), convert(items, definitions));
    }

    Value::Object(out)
}

fn is_null_schema(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
}
