// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for record schemas.

use super::{DecimalSchema, Field, FixedSchema, Name, RecordSchema, Schema, UnionSchema};
use crate::value::Value;
use std::sync::Arc;

/// Builder for hand-written record schemas.
#[derive(Debug)]
pub struct RecordSchemaBuilder {
    name: Name,
    doc: Option<String>,
    fields: Vec<Field>,
}

impl RecordSchemaBuilder {
    /// Create a builder from a dotted full name.
    pub fn new(fullname: &str) -> Self {
        Self {
            name: Name::parse(fullname),
            doc: None,
            fields: Vec::new(),
        }
    }

    /// Override the namespace.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.name = Name::new(self.name.name, Some(namespace));
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add a field.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(Field::new(name, schema));
        self
    }

    /// Add a field with a default value.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        schema: Schema,
        default: Value,
    ) -> Self {
        self.fields
            .push(Field::new(name, schema).with_default(default));
        self
    }

    /// Add a `[null, schema]` field defaulting to null.
    pub fn optional_field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let union = Schema::Union(UnionSchema::nullable(schema));
        self.fields
            .push(Field::new(name, union).with_default(Value::Null));
        self
    }

    /// Add a nested record field.
    pub fn nested_field(mut self, name: impl Into<String>, nested: Arc<RecordSchema>) -> Self {
        self.fields.push(Field::new(name, Schema::Record(nested)));
        self
    }

    /// Add a fixed-size field; the fixed type shares this record's namespace.
    pub fn fixed_field(mut self, name: impl Into<String>, fixed_name: &str, size: usize) -> Self {
        let fixed = FixedSchema::new(
            Name::new(fixed_name, self.name.namespace.as_deref()),
            size,
        );
        self.fields.push(Field::new(name, Schema::Fixed(fixed)));
        self
    }

    /// Add a decimal field.
    pub fn decimal_field(mut self, name: impl Into<String>, precision: usize, scale: u32) -> Self {
        let decimal = Schema::Decimal(DecimalSchema::new(precision, scale));
        self.fields.push(Field::new(name, decimal));
        self
    }

    /// Add a prepared field.
    pub fn push(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the record schema.
    pub fn build(self) -> RecordSchema {
        RecordSchema::new(self.name, self.doc, self.fields)
    }

    /// Build and wrap as a [`Schema::Record`].
    pub fn build_schema(self) -> Schema {
        Schema::Record(Arc::new(self.build()))
    }
}
