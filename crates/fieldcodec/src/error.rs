// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for codec construction, encoding and decoding.
//!
//! Two classes:
//!
//! - [`ConfigError`] is raised while codecs are being resolved. It aborts
//!   resolution of the whole record type; there is no partial record codec.
//! - [`DecodeError`] is raised per value. A field decoder recovers from it
//!   with the field's declared default unless [`DecodeError::is_fatal`].

use crate::value::Value;
use thiserror::Error;

/// Construction-time resolution errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field `{field}` of `{record}` has no counterpart in schema `{schema}`")]
    MissingField {
        record: String,
        field: String,
        schema: String,
    },

    #[error("type `{type_name}` cannot be resolved against schema {schema}")]
    SchemaMismatch {
        type_name: &'static str,
        schema: String,
    },

    #[error(
        "field `{field}` of `{record}`: resolved schema {resolved} disagrees with supplied schema {supplied}"
    )]
    FieldSchemaMismatch {
        record: String,
        field: String,
        resolved: String,
        supplied: String,
    },

    #[error("schema field `{field}` of `{record}` has no counterpart in the type and no default")]
    UnmappedSchemaField { record: String, field: String },

    #[error("unresolved named reference `{0}`")]
    UnresolvedReference(String),

    #[error("default of field `{field}` cannot be encoded: {source}")]
    InvalidDefault {
        field: String,
        #[source]
        source: EncodeError,
    },

    #[error(
        "transient field `{field}` of `{record}` has no default and its type cannot represent an absent value"
    )]
    NoFallback { record: String, field: String },

    #[error("record `{record}` has no field metadata at index {index}")]
    InvalidMetadata { record: String, index: usize },
}

impl ConfigError {
    /// Schema mismatch for the Rust type `T`.
    pub(crate) fn mismatch<T>(schema: &crate::schema::Schema) -> Self {
        Self::SchemaMismatch {
            type_name: std::any::type_name::<T>(),
            schema: schema.to_string(),
        }
    }
}

/// Value-time decoding errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no value at position {position} (record holds {len})")]
    MissingValue { position: usize, len: usize },

    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("codec for `{0}` used before its definition was resolved")]
    Unbound(String),
}

impl DecodeError {
    pub(crate) fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.kind(),
        }
    }

    /// Attach the name of the field being decoded.
    pub fn in_field(self, field: &str) -> Self {
        Self::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    /// Environment-level failures. These are never replaced by a default.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Unbound(_) => true,
            Self::Field { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Value-time encoding errors.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("decimal {value} does not fit precision {precision}")]
    PrecisionOverflow { value: String, precision: usize },

    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<EncodeError>,
    },

    #[error("codec for `{0}` used before its definition was resolved")]
    Unbound(String),
}

impl EncodeError {
    /// Attach the name of the field being encoded.
    pub fn in_field(self, field: &str) -> Self {
        Self::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}
