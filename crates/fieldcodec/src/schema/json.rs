// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON rendering of schemas.
//!
//! Named types are written in full on first occurrence and by full name
//! afterwards, so recursive schemas render finitely.

use super::{Field, Name, Schema};
use crate::value::Value;
use serde_json::{json, Map, Value as Json};
use std::collections::HashSet;
use std::fmt;

impl Schema {
    /// Render as a JSON document.
    pub fn to_json(&self) -> Json {
        let mut seen = HashSet::new();
        render(self, &mut seen)
    }

    /// Compact single-line JSON, stable for equal schemas.
    pub fn canonical_form(&self) -> String {
        self.to_json().to_string()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

fn render(schema: &Schema, seen: &mut HashSet<String>) -> Json {
    match schema {
        Schema::Null => json!("null"),
        Schema::Boolean => json!("boolean"),
        Schema::Int => json!("int"),
        Schema::Long => json!("long"),
        Schema::Float => json!("float"),
        Schema::Double => json!("double"),
        Schema::Bytes => json!("bytes"),
        Schema::String => json!("string"),
        Schema::Decimal(d) => json!({
            "type": "bytes",
            "logicalType": "decimal",
            "precision": d.precision,
            "scale": d.scale,
        }),
        Schema::Fixed(fixed) => {
            if !seen.insert(fixed.name.fullname()) {
                return json!(fixed.name.fullname());
            }
            let mut obj = named("fixed", &fixed.name);
            obj.insert("size".into(), json!(fixed.size));
            if let Some(doc) = &fixed.doc {
                obj.insert("doc".into(), json!(doc));
            }
            Json::Object(obj)
        }
        Schema::Array(items) => json!({ "type": "array", "items": render(items, seen) }),
        Schema::Map(values) => json!({ "type": "map", "values": render(values, seen) }),
        Schema::Union(union) => Json::Array(
            union
                .variants()
                .iter()
                .map(|variant| render(variant, seen))
                .collect(),
        ),
        Schema::Record(record) => {
            if !seen.insert(record.name.fullname()) {
                return json!(record.name.fullname());
            }
            let mut obj = named("record", &record.name);
            if let Some(doc) = &record.doc {
                obj.insert("doc".into(), json!(doc));
            }
            let fields = record
                .fields()
                .iter()
                .map(|field| render_field(field, seen))
                .collect();
            obj.insert("fields".into(), Json::Array(fields));
            Json::Object(obj)
        }
        Schema::Ref(name) => json!(name.fullname()),
    }
}

fn named(kind: &str, name: &Name) -> Map<String, Json> {
    let mut obj = Map::new();
    obj.insert("type".into(), json!(kind));
    obj.insert("name".into(), json!(name.name));
    if let Some(ns) = &name.namespace {
        obj.insert("namespace".into(), json!(ns));
    }
    obj
}

fn render_field(field: &Field, seen: &mut HashSet<String>) -> Json {
    let mut obj = Map::new();
    obj.insert("name".into(), json!(field.name));
    obj.insert("type".into(), render(&field.schema, seen));
    if let Some(default) = &field.default {
        obj.insert("default".into(), value_to_json(default));
    }
    if let Some(doc) = &field.doc {
        obj.insert("doc".into(), json!(doc));
    }
    if !field.aliases.is_empty() {
        obj.insert("aliases".into(), json!(field.aliases));
    }
    Json::Object(obj)
}

/// JSON form of a default value. Bytes map each byte to one code point.
pub(crate) fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::Long(l) => json!(l),
        Value::Float(f) => serde_json::Number::from_f64(f64::from(*f)).map_or(Json::Null, Json::Number),
        Value::Double(d) => serde_json::Number::from_f64(*d).map_or(Json::Null, Json::Number),
        Value::Bytes(bytes) | Value::Fixed(_, bytes) => {
            json!(bytes.iter().map(|b| char::from(*b)).collect::<String>())
        }
        Value::String(s) => json!(s),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Map(entries) => Json::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Union(_, inner) => value_to_json(inner),
        Value::Record(record) => Json::Object(
            record
                .schema()
                .fields()
                .iter()
                .zip(record.values())
                .map(|(field, v)| (field.name.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DecimalSchema, FixedSchema, RecordSchema, UnionSchema};
    use std::sync::Arc;

    #[test]
    fn test_primitive_and_decimal() {
        assert_eq!(Schema::Long.to_string(), "\"long\"");
        let json = Schema::Decimal(DecimalSchema::new(10, 2)).to_json();
        assert_eq!(json["logicalType"], "decimal");
        assert_eq!(json["precision"], 10);
        assert_eq!(json["scale"], 2);
    }

    #[test]
    fn test_record_with_default_and_union() {
        let record = RecordSchema::new(
            Name::new("Point", Some("geo")),
            Some("A point".into()),
            vec![
                Field::new("x", Schema::Int),
                Field::new("y", Schema::Int).with_default(Value::Int(0)),
                Field::new("label", Schema::Union(UnionSchema::nullable(Schema::String)))
                    .with_default(Value::Null),
            ],
        );
        let json = Schema::Record(Arc::new(record)).to_json();
        assert_eq!(json["namespace"], "geo");
        assert_eq!(json["doc"], "A point");
        assert_eq!(json["fields"][1]["default"], 0);
        assert_eq!(json["fields"][2]["type"], json!(["null", "string"]));
        assert!(json["fields"][2]["default"].is_null());
    }

    #[test]
    fn test_repeated_named_type_by_reference() {
        let id = Schema::Fixed(FixedSchema::new(Name::new("Id", Some("geo")), 4));
        let record = RecordSchema::new(
            Name::new("Pair", Some("geo")),
            None,
            vec![Field::new("a", id.clone()), Field::new("b", id)],
        );
        let json = Schema::Record(Arc::new(record)).to_json();
        assert_eq!(json["fields"][0]["type"]["size"], 4);
        assert_eq!(json["fields"][1]["type"], "geo.Id");
    }
}
