// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field decoder resolution and per-value field decoding.

use super::{
    build_field, coerce_logical, field_update, supplied_record, with_default,
    FieldAnnotations, FieldMeta, SchemaUpdate,
};
use crate::codec::{CodecRef, LogicalShape, WireType};
use crate::config::DecodeMode;
use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError};
use crate::schema::{Field, Name, Schema};
use crate::value::{GenericRecord, Value};
use log::{debug, trace};
use std::fmt;

/// Where a field's value sits in the records being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPosition {
    At(usize),
    /// Never present: the field is transient or has no schema counterpart.
    Absent,
}

/// "On error, substitute the default if there is one, else propagate."
///
/// Fatal errors always propagate.
pub trait RecoverWithDefault<T> {
    fn or_default_with(self, default: Option<fn() -> T>, field: &str) -> Result<T, DecodeError>;
}

impl<T> RecoverWithDefault<T> for Result<T, DecodeError> {
    fn or_default_with(self, default: Option<fn() -> T>, field: &str) -> Result<T, DecodeError> {
        match (self, default) {
            (Ok(value), _) => Ok(value),
            (Err(err), Some(default)) if !err.is_fatal() => {
                debug!(
                    "[ResolvedFieldDecoder::decode_field] '{}' recovered with default: {}",
                    field, err
                );
                Ok(default())
            }
            (Err(err), _) => Err(err),
        }
    }
}

/// Decoder of one declared field.
pub struct ResolvedFieldDecoder<T> {
    field: Option<Field>,
    codec: CodecRef<T>,
    name: String,
    aliases: Vec<String>,
    position: FieldPosition,
    default: Option<fn() -> T>,
    mode: DecodeMode,
}

impl<T: WireType> ResolvedFieldDecoder<T> {
    /// Resolve the decoder of one declared field.
    ///
    /// `declaration_index` is the field's index among the serialized fields
    /// of the record and becomes its position in code-first resolution.
    /// A transient field never gets a schema field, even when a supplied
    /// schema has one of the same name.
    pub fn resolve(
        resolver: &mut Resolver<'_>,
        declaration_index: usize,
        update: &SchemaUpdate,
        enclosing: &Name,
        meta: &FieldMeta,
        default: Option<fn() -> T>,
    ) -> Result<Self, ConfigError> {
        let annotations = FieldAnnotations::extract(meta);
        let mode = resolver.config().decode_mode;

        let decoder = match update {
            SchemaUpdate::FullSchemaUpdate(sf) if annotations.transient => {
                let mapper = sf.mapper();
                let codec = resolver.resolve::<T>(&field_update(meta, enclosing, mapper))?;
                let name = annotations.resolved_name(meta, mapper);
                Self::fallback_only(codec, name, default, mode, enclosing)?
            }
            SchemaUpdate::FullSchemaUpdate(sf) => {
                let record = supplied_record(resolver, sf)?;
                let name = annotations.resolved_name(meta, sf.mapper());
                let field = record
                    .field_or_alias(&name)
                    .or_else(|| annotations.aliases.iter().find_map(|a| record.field(a)))
                    .ok_or_else(|| ConfigError::MissingField {
                        record: enclosing.fullname(),
                        field: name.clone(),
                        schema: record.name.fullname(),
                    })?
                    .clone();
                let nested = SchemaUpdate::FullSchemaUpdate(sf.with_schema(field.schema.clone()));
                let codec = resolver.resolve::<T>(&nested)?;
                if !codec.schema().matches(&field.schema) {
                    return Err(ConfigError::FieldSchemaMismatch {
                        record: enclosing.fullname(),
                        field: name,
                        resolved: codec.schema().to_string(),
                        supplied: field.schema.to_string(),
                    });
                }
                Self {
                    name: field.name.clone(),
                    aliases: field.aliases.clone(),
                    position: FieldPosition::At(field.position),
                    field: Some(field),
                    codec,
                    default,
                    mode,
                }
            }
            SchemaUpdate::NoUpdate | SchemaUpdate::NamespaceUpdate(_) => {
                let mapper = resolver.config().field_mapper;
                let codec = resolver.resolve::<T>(&field_update(meta, enclosing, mapper))?;
                let name = annotations.resolved_name(meta, mapper);
                if annotations.transient {
                    Self::fallback_only(codec, name, default, mode, enclosing)?
                } else {
                    let (codec, schema_default) = match default {
                        Some(make) => {
                            let (codec, value) = with_default(codec, &make(), &name)?;
                            (codec, Some(value))
                        }
                        None => (codec, None),
                    };
                    let field = build_field(
                        meta,
                        &annotations,
                        codec.schema().clone(),
                        schema_default,
                        declaration_index,
                        mapper,
                    );
                    Self {
                        name,
                        aliases: annotations.aliases.clone(),
                        position: FieldPosition::At(declaration_index),
                        field: Some(field),
                        codec,
                        default,
                        mode,
                    }
                }
            }
        };

        trace!(
            "[ResolvedFieldDecoder::resolve] {}.{} -> {:?}",
            enclosing,
            meta.label,
            decoder.position
        );
        Ok(decoder)
    }

    /// Decoder for a field that is never read from the data.
    ///
    /// Without a default the field's type must decode "no value".
    fn fallback_only(
        codec: CodecRef<T>,
        name: String,
        default: Option<fn() -> T>,
        mode: DecodeMode,
        enclosing: &Name,
    ) -> Result<Self, ConfigError> {
        if default.is_none() && codec.decode(&Value::Null).is_err() {
            return Err(ConfigError::NoFallback {
                record: enclosing.fullname(),
                field: name,
            });
        }
        Ok(Self {
            field: None,
            codec,
            name,
            aliases: Vec::new(),
            position: FieldPosition::Absent,
            default,
            mode,
        })
    }
}

impl<T: WireType> ResolvedFieldDecoder<T> {
    /// Decode this field from a record.
    ///
    /// A field missing from the record yields its default, else the decoded
    /// "no value". A value that fails to decode is replaced by the default
    /// when there is one.
    pub fn decode_field(&self, record: &GenericRecord) -> Result<T, DecodeError> {
        let FieldPosition::At(position) = self.position else {
            return self.fallback();
        };

        let (located, read_at) = match self.mode {
            DecodeMode::Fast => (
                record
                    .get_at(position)
                    .map(|value| (value, record.schema().fields().get(position))),
                position,
            ),
            DecodeMode::Safe => {
                let schema = record.schema();
                let Some(field) = schema.field(&self.name).or_else(|| {
                    self.aliases.iter().find_map(|alias| schema.field(alias))
                }) else {
                    return self.fallback();
                };
                (
                    record.get_at(field.position).map(|value| (value, Some(field))),
                    field.position,
                )
            }
        };

        let Some((value, written)) = located else {
            return self.fallback().map_err(|err| {
                if err.is_fatal() {
                    err
                } else {
                    DecodeError::MissingValue {
                        position: read_at,
                        len: record.values().len(),
                    }
                    .in_field(&self.name)
                }
            });
        };

        let decoded = match T::LOGICAL_SHAPE {
            LogicalShape::Plain => self.codec.decode(value),
            LogicalShape::Decimal | LogicalShape::OptionalDecimal => {
                coerce_logical(&self.codec, value, written.map(|f| &f.schema))
            }
        };
        decoded
            .or_default_with(self.default, &self.name)
            .map_err(|err| err.in_field(&self.name))
    }

    fn fallback(&self) -> Result<T, DecodeError> {
        match self.default {
            Some(default) => Ok(default()),
            None => self
                .codec
                .decode(&Value::Null)
                .map_err(|err| err.in_field(&self.name)),
        }
    }
}

impl<T> ResolvedFieldDecoder<T> {
    /// Schema field, absent for transient fields.
    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn position(&self) -> FieldPosition {
        self.position
    }

    pub fn schema(&self) -> &Schema {
        self.codec.schema()
    }
}

impl<T> fmt::Debug for ResolvedFieldDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFieldDecoder")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("mode", &self.mode)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}
