// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decimal codec.

use super::{supplied_schema, Codec, CodecRef, LogicalShape, WireType};
use crate::decimal::Decimal;
use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::record::SchemaUpdate;
use crate::schema::{DecimalSchema, Schema};
use crate::value::Value;
use std::sync::Arc;

/// Codec for [`Decimal`] values under a fixed precision and scale.
pub struct DecimalCodec {
    schema: Schema,
    decimal: DecimalSchema,
}

impl DecimalCodec {
    pub fn new(decimal: DecimalSchema) -> Self {
        Self {
            schema: Schema::Decimal(decimal),
            decimal,
        }
    }

    pub fn decimal(&self) -> &DecimalSchema {
        &self.decimal
    }
}

impl Codec<Decimal> for DecimalCodec {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &Decimal) -> Result<Value, EncodeError> {
        let scaled = value.rescale(self.decimal.scale).ok_or_else(|| {
            EncodeError::InvalidValue(format!(
                "{} cannot be rescaled to scale {}",
                value, self.decimal.scale
            ))
        })?;
        if scaled.precision() > self.decimal.precision {
            return Err(EncodeError::PrecisionOverflow {
                value: scaled.to_string(),
                precision: self.decimal.precision,
            });
        }
        Ok(Value::Bytes(scaled.to_be_bytes()))
    }

    fn decode(&self, value: &Value) -> Result<Decimal, DecodeError> {
        let bytes = value
            .as_bytes()
            .ok_or_else(|| DecodeError::mismatch("decimal", value))?;
        Decimal::from_be_bytes(bytes, self.decimal.scale).ok_or_else(|| {
            DecodeError::InvalidData(format!("decimal of {} bytes is too wide", bytes.len()))
        })
    }
}

impl WireType for Decimal {
    const LOGICAL_SHAPE: LogicalShape = LogicalShape::Decimal;

    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError> {
        let decimal = match supplied_schema(resolver, update)? {
            Some(Schema::Decimal(decimal)) => decimal,
            Some(other) => return Err(ConfigError::mismatch::<Self>(&other)),
            None => DecimalSchema::default(),
        };
        Ok(Arc::new(DecimalCodec::new(decimal)))
    }

    fn decimal_codec(decimal: &DecimalSchema) -> Option<CodecRef<Self>> {
        let codec: CodecRef<Self> = Arc::new(DecimalCodec::new(*decimal));
        Some(codec)
    }
}
