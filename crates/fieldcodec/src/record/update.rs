// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema updates and their derivation from field annotations.

use super::{FieldAnnotations, FieldMeta};
use crate::naming::FieldMapper;
use crate::schema::{FixedSchema, Name, Schema};

/// An externally given schema plus the naming convention it was written with.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFor {
    schema: Schema,
    mapper: FieldMapper,
}

impl SchemaFor {
    pub fn new(schema: Schema, mapper: FieldMapper) -> Self {
        Self { schema, mapper }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn mapper(&self) -> FieldMapper {
        self.mapper
    }

    /// Same naming convention, different schema.
    pub fn with_schema(&self, schema: Schema) -> Self {
        Self {
            schema,
            mapper: self.mapper,
        }
    }
}

/// How a codec's schema is determined.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaUpdate {
    /// Derive the schema from the type.
    NoUpdate,
    /// The given schema is authoritative.
    FullSchemaUpdate(SchemaFor),
    /// Derive the schema from the type, placing named types in this namespace.
    NamespaceUpdate(String),
}

/// Schema update implied by a field's own annotations.
///
/// A fixed-size annotation wins and yields a full update to a fixed schema
/// named after the field; otherwise a namespace annotation yields a namespace
/// update.
pub fn field_update(meta: &FieldMeta, enclosing: &Name, mapper: FieldMapper) -> SchemaUpdate {
    let flags = FieldAnnotations::extract(meta);
    if let Some(size) = flags.fixed_size {
        let namespace = flags
            .explicit_namespace
            .as_deref()
            .or(enclosing.namespace.as_deref());
        let name = Name::new(flags.resolved_name(meta, mapper), namespace);
        let fixed = Schema::Fixed(FixedSchema::new(name, size));
        return SchemaUpdate::FullSchemaUpdate(SchemaFor::new(fixed, mapper));
    }
    match flags.explicit_namespace {
        Some(namespace) => SchemaUpdate::NamespaceUpdate(namespace),
        None => SchemaUpdate::NoUpdate,
    }
}
