// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Whole-record codec.

use super::{
    supplied_record, FieldAnnotations, FieldMeta, Record, RecordMeta, ResolvedFieldDecoder,
    ResolvedFieldEncoder, SchemaFor, SchemaUpdate,
};
use crate::codec::{Codec, CodecRef, WireType};
use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::schema::{Name, RecordSchema, Schema};
use crate::value::{GenericRecord, Value};
use log::{debug, trace};
use std::sync::Arc;

/// Resolution context handed to [`Record::encoders`] and
/// [`Record::decoders`]. Fields must be requested in declaration order.
pub struct RecordBuilder<'r, 'a> {
    resolver: &'r mut Resolver<'a>,
    meta: &'r RecordMeta,
    enclosing: Name,
    update: &'r SchemaUpdate,
    next_encoded: usize,
    next_decoded: usize,
    /// Values written for supplied fields matched by transient fields.
    transient_slots: Vec<(usize, Value)>,
}

impl<'r, 'a> RecordBuilder<'r, 'a> {
    fn new(
        resolver: &'r mut Resolver<'a>,
        meta: &'r RecordMeta,
        enclosing: Name,
        update: &'r SchemaUpdate,
    ) -> Self {
        Self {
            resolver,
            meta,
            enclosing,
            update,
            next_encoded: 0,
            next_decoded: 0,
            transient_slots: Vec::new(),
        }
    }

    fn field_meta(&self, index: usize) -> Result<&'r FieldMeta, ConfigError> {
        let meta: &'r RecordMeta = self.meta;
        meta.fields
            .get(index)
            .ok_or_else(|| ConfigError::InvalidMetadata {
                record: self.enclosing.fullname(),
                index,
            })
    }

    /// Encoder of the field declared at `index`; `None` if it is transient.
    pub fn encoder<R: Record, T: WireType>(
        &mut self,
        index: usize,
        get: fn(&R) -> &T,
        default: Option<fn() -> T>,
    ) -> Result<Option<ResolvedFieldEncoder<R>>, ConfigError> {
        let meta = self.field_meta(index)?;
        if FieldAnnotations::extract(meta).transient {
            if let SchemaUpdate::FullSchemaUpdate(sf) = self.update {
                if let Some(slot) = self.transient_slot(sf, meta, default)? {
                    self.transient_slots.push(slot);
                }
            }
            return Ok(None);
        }
        let position = self.next_encoded;
        self.next_encoded += 1;
        ResolvedFieldEncoder::resolve(
            self.resolver,
            self.update,
            &self.enclosing,
            meta,
            get,
            default,
            position,
        )
        .map(Some)
    }

    /// Value written for the supplied field a transient field matches: the
    /// field's schema default, else the declared default, else null.
    fn transient_slot<T: WireType>(
        &mut self,
        sf: &SchemaFor,
        meta: &FieldMeta,
        default: Option<fn() -> T>,
    ) -> Result<Option<(usize, Value)>, ConfigError> {
        let record = supplied_record(self.resolver, sf)?;
        let annotations = FieldAnnotations::extract(meta);
        let name = annotations.resolved_name(meta, sf.mapper());
        let Some(field) = record
            .field_or_alias(&name)
            .or_else(|| annotations.aliases.iter().find_map(|a| record.field(a)))
        else {
            return Ok(None);
        };

        let value = match (&field.default, default) {
            (Some(value), _) => value.clone(),
            (None, Some(make)) => {
                let nested = SchemaUpdate::FullSchemaUpdate(sf.with_schema(field.schema.clone()));
                let codec = self.resolver.resolve::<T>(&nested)?;
                let encoded = codec
                    .encode(&make())
                    .map_err(|source| ConfigError::InvalidDefault {
                        field: name.clone(),
                        source,
                    })?;
                match (encoded, self.resolver.dereference(&field.schema)?) {
                    (Value::Union(_, inner), schema) if !matches!(schema, Schema::Union(_)) => {
                        *inner
                    }
                    (encoded, _) => encoded,
                }
            }
            (None, None) => Value::Null,
        };
        trace!(
            "[RecordBuilder::transient_slot] {}.{} fills '{}' at {}",
            self.enclosing,
            meta.label,
            field.name,
            field.position
        );
        Ok(Some((field.position, value)))
    }

    /// Decoder of the field declared at `index`.
    pub fn decoder<T: WireType>(
        &mut self,
        index: usize,
        default: Option<fn() -> T>,
    ) -> Result<ResolvedFieldDecoder<T>, ConfigError> {
        let meta = self.field_meta(index)?;
        let decoder = ResolvedFieldDecoder::resolve(
            self.resolver,
            self.next_decoded,
            self.update,
            &self.enclosing,
            meta,
            default,
        )?;
        if decoder.field().is_some() {
            self.next_decoded += 1;
        }
        Ok(decoder)
    }
}

/// Codec for a [`Record`] type.
pub struct RecordCodec<R: Record> {
    schema: Schema,
    record_schema: Arc<RecordSchema>,
    encoders: Vec<ResolvedFieldEncoder<R>>,
    decoders: R::Decoders,
    /// Values written for schema fields the type does not cover.
    template: Vec<Value>,
}

impl<R: Record + WireType> RecordCodec<R> {
    /// Resolve the codec of `R` under `update`.
    ///
    /// The record is defined once per session and update, so a record that
    /// refers to itself terminates.
    pub fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<R>, ConfigError> {
        let meta = R::meta();
        let supplied = match update {
            SchemaUpdate::FullSchemaUpdate(sf) => Some(supplied_record(resolver, sf)?),
            SchemaUpdate::NoUpdate | SchemaUpdate::NamespaceUpdate(_) => None,
        };
        let name = match (&supplied, update) {
            (Some(record), _) => record.name.clone(),
            (None, SchemaUpdate::NamespaceUpdate(namespace)) => {
                Name::new(meta.name.as_str(), Some(namespace.as_str()))
            }
            (None, _) => Name::new(meta.name.as_str(), meta.namespace.as_deref()),
        };

        resolver.define::<R, _>(&name, update, |resolver| {
            let codec = Self::build(resolver, &meta, name.clone(), update, supplied)?;
            let codec: CodecRef<R> = Arc::new(codec);
            Ok(codec)
        })
    }

    fn build(
        resolver: &mut Resolver<'_>,
        meta: &RecordMeta,
        name: Name,
        update: &SchemaUpdate,
        supplied: Option<Arc<RecordSchema>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = RecordBuilder::new(resolver, meta, name.clone(), update);
        let encoders = R::encoders(&mut builder)?;
        let transient_slots = builder.transient_slots;
        let decoders = R::decoders(&mut RecordBuilder::new(
            resolver,
            meta,
            name.clone(),
            update,
        ))?;

        let record_schema = match supplied {
            Some(record) => record,
            None => Arc::new(RecordSchema::new(
                name,
                meta.doc.clone(),
                encoders.iter().map(|e| e.field().clone()).collect(),
            )),
        };

        let mut template = vec![Value::Null; record_schema.fields().len()];
        for field in record_schema.fields() {
            if encoders.iter().any(|e| e.field().position == field.position) {
                continue;
            }
            if let Some((_, value)) = transient_slots
                .iter()
                .find(|(position, _)| *position == field.position)
            {
                template[field.position] = value.clone();
                continue;
            }
            template[field.position] =
                field
                    .default
                    .clone()
                    .ok_or_else(|| ConfigError::UnmappedSchemaField {
                        record: record_schema.name.fullname(),
                        field: field.name.clone(),
                    })?;
        }

        debug!(
            "[RecordCodec::build] resolved '{}' with {} of {} declared fields serialized",
            record_schema.name,
            encoders.len(),
            meta.fields.len()
        );

        Ok(Self {
            schema: Schema::Record(record_schema.clone()),
            record_schema,
            encoders,
            decoders,
            template,
        })
    }
}

impl<R: Record> RecordCodec<R> {
    /// Record schema written by this codec.
    pub fn record_schema(&self) -> &Arc<RecordSchema> {
        &self.record_schema
    }

    /// Decode from a record value, independent of the outer [`Value`].
    pub fn decode_record(&self, record: &GenericRecord) -> Result<R, DecodeError> {
        R::assemble(&self.decoders, record)
    }
}

impl<R: Record> Codec<R> for RecordCodec<R> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &R) -> Result<Value, EncodeError> {
        let mut values = self.template.clone();
        for encoder in &self.encoders {
            let encoded = encoder.encode(value)?;
            if let Some(slot) = values.get_mut(encoder.field().position) {
                *slot = encoded;
            }
        }
        Ok(Value::Record(GenericRecord::from_values(
            self.record_schema.clone(),
            values,
        )))
    }

    fn decode(&self, value: &Value) -> Result<R, DecodeError> {
        match value {
            Value::Record(record) => self.decode_record(record),
            other => Err(DecodeError::mismatch("record", other)),
        }
    }
}
