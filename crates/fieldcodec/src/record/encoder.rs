// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field encoder resolution.

use super::{
    build_field, field_update, supplied_record, with_default, FieldAnnotations, FieldMeta,
    SchemaUpdate,
};
use crate::codec::WireType;
use crate::env::Resolver;
use crate::error::{ConfigError, EncodeError};
use crate::schema::{Field, Name};
use crate::value::Value;
use log::trace;
use std::fmt;

type Extract<R> = Box<dyn Fn(&R) -> Result<Value, EncodeError> + Send + Sync>;

/// A schema field paired with the function that encodes it from a record.
///
/// The field's schema and the encoder's output schema always agree.
pub struct ResolvedFieldEncoder<R> {
    field: Field,
    extract: Extract<R>,
}

impl<R: 'static> ResolvedFieldEncoder<R> {
    /// Resolve the encoder of one declared field.
    ///
    /// Under a full update the field is looked up by name in the supplied
    /// record schema and its codec is rebuilt against that field's schema;
    /// the supplied field is used as is. Otherwise the codec is derived from
    /// `T` and the field's own annotations, and the field is synthesized from
    /// the codec's schema at `position`.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve<T: WireType>(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
        enclosing: &Name,
        meta: &FieldMeta,
        get: fn(&R) -> &T,
        default: Option<fn() -> T>,
        position: usize,
    ) -> Result<Self, ConfigError> {
        let annotations = FieldAnnotations::extract(meta);

        let (field, codec) = match update {
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
                (field, codec)
            }
            SchemaUpdate::NoUpdate | SchemaUpdate::NamespaceUpdate(_) => {
                let mapper = resolver.config().field_mapper;
                let own = field_update(meta, enclosing, mapper);
                let codec = resolver.resolve::<T>(&own)?;
                let name = annotations.resolved_name(meta, mapper);
                let (codec, default) = match default {
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
                    default,
                    position,
                    mapper,
                );
                (field, codec)
            }
        };

        trace!(
            "[ResolvedFieldEncoder::resolve] {}.{} -> '{}' at {}",
            enclosing,
            meta.label,
            field.name,
            field.position
        );

        Ok(Self {
            field,
            extract: Box::new(move |record: &R| codec.encode(get(record))),
        })
    }
}

impl<R> ResolvedFieldEncoder<R> {
    /// Schema field written by this encoder.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Extract and encode this field from a record.
    pub fn encode(&self, record: &R) -> Result<Value, EncodeError> {
        (self.extract)(record).map_err(|e| e.in_field(&self.field.name))
    }
}

impl<R> fmt::Debug for ResolvedFieldEncoder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFieldEncoder")
            .field("field", &self.field.name)
            .field("position", &self.field.position)
            .finish()
    }
}
