// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record field resolution.
//!
//! A record type describes itself through [`RecordMeta`] (normally generated
//! by `#[derive(Record)]`). For each declared field the resolvers in this
//! module produce a schema [`Field`](crate::schema::Field) together with a
//! field encoder or decoder, either by matching an externally supplied schema
//! (schema-first) or by deriving the schema from the field's own codec and
//! annotations (code-first). [`RecordCodec`] aggregates them into a codec for
//! the whole record.

mod annotations;
mod codec;
mod decoder;
mod encoder;
mod field_schema;
mod logical;
mod update;

pub use annotations::FieldAnnotations;
pub use codec::{RecordBuilder, RecordCodec};
pub use decoder::{FieldPosition, RecoverWithDefault, ResolvedFieldDecoder};
pub use encoder::ResolvedFieldEncoder;
pub use field_schema::{build_field, with_default};
pub use logical::coerce_logical;
pub use update::{field_update, SchemaFor, SchemaUpdate};

use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError};
use crate::schema::{RecordSchema, Schema};
use crate::value::GenericRecord;
use std::sync::Arc;

/// Static per-field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Write the field as a fixed-size byte sequence of this size.
    Fixed(usize),
    /// Schema name of the field (and of a synthesized fixed type).
    Name(String),
    /// Namespace for named types synthesized for the field.
    Namespace(String),
    /// Exclude the field from the external representation.
    Transient,
    /// Former name of the field.
    Alias(String),
}

/// Static metadata of one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared label.
    pub label: String,
    /// Declaration index.
    pub index: usize,
    pub doc: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl FieldMeta {
    pub fn new(label: impl Into<String>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
            doc: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Static metadata of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    pub name: String,
    pub namespace: Option<String>,
    pub doc: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldMeta>,
}

/// A record type whose fields can be resolved into codecs.
///
/// Implemented by `#[derive(Record)]`.
pub trait Record: Sized + Send + Sync + 'static {
    /// Resolved decoders, one per declared field.
    type Decoders: Send + Sync + 'static;

    fn meta() -> RecordMeta;

    /// Encoders for the serialized (non-transient) fields.
    fn encoders(
        builder: &mut RecordBuilder<'_, '_>,
    ) -> Result<Vec<ResolvedFieldEncoder<Self>>, ConfigError>;

    fn decoders(builder: &mut RecordBuilder<'_, '_>) -> Result<Self::Decoders, ConfigError>;

    /// Build a value from a decoded record.
    fn assemble(decoders: &Self::Decoders, record: &GenericRecord) -> Result<Self, DecodeError>;
}

/// Record schema imposed by a full update.
pub(crate) fn supplied_record(
    resolver: &Resolver<'_>,
    sf: &SchemaFor,
) -> Result<Arc<RecordSchema>, ConfigError> {
    match resolver.dereference(sf.schema())? {
        Schema::Record(record) => Ok(record),
        other => Err(ConfigError::SchemaMismatch {
            type_name: "record",
            schema: other.to_string(),
        }),
    }
}
