// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codecs for scalar types, strings and byte sequences.

use super::{supplied_schema, Codec, CodecRef, WireType};
use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::record::SchemaUpdate;
use crate::schema::Schema;
use crate::value::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Scalar types with a single primitive schema.
pub trait Scalar: Sized + Send + Sync + 'static {
    const KIND: &'static str;

    fn schema() -> Schema;

    fn to_value(&self) -> Value;

    /// Read from a value, applying numeric promotions.
    fn from_value(value: &Value) -> Option<Self>;
}

impl Scalar for bool {
    const KIND: &'static str = "boolean";

    fn schema() -> Schema {
        Schema::Boolean
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Scalar for i32 {
    const KIND: &'static str = "int";

    fn schema() -> Schema {
        Schema::Int
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl Scalar for i64 {
    const KIND: &'static str = "long";

    fn schema() -> Schema {
        Schema::Long
    }

    fn to_value(&self) -> Value {
        Value::Long(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_long()
    }
}

impl Scalar for f32 {
    const KIND: &'static str = "float";

    fn schema() -> Schema {
        Schema::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v as f32),
            Value::Long(v) => Some(*v as f32),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl Scalar for f64 {
    const KIND: &'static str = "double";

    fn schema() -> Schema {
        Schema::Double
    }

    fn to_value(&self) -> Value {
        Value::Double(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(f64::from(*v)),
            Value::Long(v) => Some(*v as f64),
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }
}

/// Codec for a [`Scalar`] type.
pub struct ScalarCodec<T> {
    schema: Schema,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Scalar> ScalarCodec<T> {
    pub fn new() -> Self {
        Self {
            schema: T::schema(),
            _marker: PhantomData,
        }
    }
}

impl<T: Scalar> Default for ScalarCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Codec<T> for ScalarCodec<T> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &T) -> Result<Value, EncodeError> {
        Ok(value.to_value())
    }

    fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        T::from_value(value).ok_or_else(|| DecodeError::mismatch(T::KIND, value))
    }
}

macro_rules! impl_scalar_wire_type {
    ($($ty:ty),* $(,)?) => {$(
        impl WireType for $ty {
            fn resolve(
                resolver: &mut Resolver<'_>,
                update: &SchemaUpdate,
            ) -> Result<CodecRef<Self>, ConfigError> {
                if let Some(schema) = supplied_schema(resolver, update)? {
                    if schema != <$ty as Scalar>::schema() {
                        return Err(ConfigError::mismatch::<$ty>(&schema));
                    }
                }
                Ok(Arc::new(ScalarCodec::<$ty>::new()))
            }
        }
    )*};
}

impl_scalar_wire_type!(bool, i32, i64, f32, f64);

/// Codec for strings, written as `string` or as zero-padded `fixed`.
pub struct StringCodec {
    schema: Schema,
}

impl StringCodec {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }
}

impl Codec<String> for StringCodec {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &String) -> Result<Value, EncodeError> {
        match &self.schema {
            Schema::Fixed(fixed) => {
                let bytes = value.as_bytes();
                if bytes.len() > fixed.size {
                    return Err(EncodeError::InvalidValue(format!(
                        "string of {} bytes does not fit fixed({})",
                        bytes.len(),
                        fixed.size
                    )));
                }
                let mut padded = bytes.to_vec();
                padded.resize(fixed.size, 0);
                Ok(Value::Fixed(fixed.size, padded))
            }
            _ => Ok(Value::String(value.clone())),
        }
    }

    fn decode(&self, value: &Value) -> Result<String, DecodeError> {
        let bytes = match value {
            Value::String(s) => return Ok(s.clone()),
            Value::Bytes(b) => b.as_slice(),
            Value::Fixed(_, b) => {
                let end = b.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
                &b[..end]
            }
            other => return Err(DecodeError::mismatch("string", other)),
        };
        String::from_utf8(bytes.to_vec())
            .map_err(|e| DecodeError::InvalidData(format!("invalid UTF-8: {}", e)))
    }
}

impl WireType for String {
    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError> {
        let schema = match supplied_schema(resolver, update)? {
            Some(schema @ (Schema::String | Schema::Fixed(_))) => schema,
            Some(other) => return Err(ConfigError::mismatch::<Self>(&other)),
            None => Schema::String,
        };
        Ok(Arc::new(StringCodec::new(schema)))
    }
}

/// Raw byte sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

/// Codec for [`Bytes`], written as `bytes` or exact-size `fixed`.
pub struct BytesCodec {
    schema: Schema,
}

impl BytesCodec {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }
}

impl Codec<Bytes> for BytesCodec {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &Bytes) -> Result<Value, EncodeError> {
        match &self.schema {
            Schema::Fixed(fixed) if value.0.len() != fixed.size => {
                Err(EncodeError::InvalidValue(format!(
                    "{} bytes written to fixed({})",
                    value.0.len(),
                    fixed.size
                )))
            }
            Schema::Fixed(fixed) => Ok(Value::Fixed(fixed.size, value.0.clone())),
            _ => Ok(Value::Bytes(value.0.clone())),
        }
    }

    fn decode(&self, value: &Value) -> Result<Bytes, DecodeError> {
        match value {
            Value::Bytes(b) | Value::Fixed(_, b) => Ok(Bytes(b.clone())),
            Value::String(s) => Ok(Bytes(s.as_bytes().to_vec())),
            other => Err(DecodeError::mismatch("bytes", other)),
        }
    }
}

impl WireType for Bytes {
    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError> {
        let schema = match supplied_schema(resolver, update)? {
            Some(schema @ (Schema::Bytes | Schema::Fixed(_))) => schema,
            Some(other) => return Err(ConfigError::mismatch::<Self>(&other)),
            None => Schema::Bytes,
        };
        Ok(Arc::new(BytesCodec::new(schema)))
    }
}
