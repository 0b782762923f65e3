// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Optional values as 2-branch nullable unions.

use super::{Codec, CodecRef, LogicalShape, WireType};
use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::record::SchemaUpdate;
use crate::schema::{DecimalSchema, Schema, UnionSchema};
use crate::value::Value;
use std::sync::Arc;

/// Codec for `Option<T>` over a `[null, T]` or `[T, null]` union.
pub struct OptionCodec<T> {
    schema: Schema,
    null_index: u32,
    inner: CodecRef<T>,
}

impl<T> OptionCodec<T> {
    /// Wrap `inner` into `[null, inner]`.
    pub fn new(inner: CodecRef<T>) -> Self {
        let schema = Schema::Union(UnionSchema::nullable(inner.schema().clone()));
        Self {
            schema,
            null_index: 0,
            inner,
        }
    }

    /// Use a supplied union whose null branch sits at `null_index`.
    pub fn with_union(schema: Schema, null_index: u32, inner: CodecRef<T>) -> Self {
        Self {
            schema,
            null_index,
            inner,
        }
    }

    fn value_index(&self) -> u32 {
        1 - self.null_index
    }
}

impl<T> Codec<Option<T>> for OptionCodec<T> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &Option<T>) -> Result<Value, EncodeError> {
        match value {
            None => Ok(Value::Union(self.null_index, Box::new(Value::Null))),
            Some(v) => Ok(Value::Union(
                self.value_index(),
                Box::new(self.inner.encode(v)?),
            )),
        }
    }

    fn decode(&self, value: &Value) -> Result<Option<T>, DecodeError> {
        match value {
            Value::Null => Ok(None),
            Value::Union(index, _) if *index == self.null_index => Ok(None),
            Value::Union(_, inner) => self.inner.decode(inner).map(Some),
            other => self.inner.decode(other).map(Some),
        }
    }
}

impl<T: WireType> WireType for Option<T> {
    const LOGICAL_SHAPE: LogicalShape = match T::LOGICAL_SHAPE {
        LogicalShape::Decimal => LogicalShape::OptionalDecimal,
        _ => LogicalShape::Plain,
    };

    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError> {
        if let SchemaUpdate::FullSchemaUpdate(sf) = update {
            let schema = resolver.dereference(sf.schema())?;
            if let Schema::Union(union) = &schema {
                let (null_index, branch) = union
                    .nullable_branch()
                    .ok_or_else(|| ConfigError::mismatch::<Self>(&schema))?;
                let branch_update = SchemaUpdate::FullSchemaUpdate(sf.with_schema(branch.clone()));
                let inner = resolver.resolve::<T>(&branch_update)?;
                return Ok(Arc::new(OptionCodec::with_union(
                    schema.clone(),
                    null_index,
                    inner,
                )));
            }
        }
        let inner = resolver.resolve::<T>(update)?;
        Ok(Arc::new(OptionCodec::new(inner)))
    }

    fn decimal_codec(decimal: &DecimalSchema) -> Option<CodecRef<Self>> {
        let inner = T::decimal_codec(decimal)?;
        let codec: CodecRef<Self> = Arc::new(OptionCodec::new(inner));
        Some(codec)
    }

    fn optional_decimal_codec(
        decimal: &DecimalSchema,
        union: &UnionSchema,
    ) -> Option<CodecRef<Self>> {
        let inner = T::decimal_codec(decimal)?;
        let (null_index, _) = union.nullable_branch()?;
        let codec: CodecRef<Self> = Arc::new(OptionCodec::with_union(
            Schema::Union(union.clone()),
            null_index,
            inner,
        ));
        Some(codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ScalarCodec;

    #[test]
    fn test_default_union_layout() {
        let codec = OptionCodec::<i32>::new(Arc::new(ScalarCodec::<i32>::new()));
        assert_eq!(
            codec.schema(),
            &Schema::Union(UnionSchema::nullable(Schema::Int))
        );
        assert_eq!(
            codec.encode(&Some(3)).unwrap(),
            Value::Union(1, Box::new(Value::Int(3)))
        );
        assert_eq!(codec.decode(&Value::Int(3)).unwrap(), Some(3));
        assert_eq!(
            codec.decode(&Value::Union(0, Box::new(Value::Null))).unwrap(),
            None
        );
    }

    #[test]
    fn test_logical_shape() {
        use crate::decimal::Decimal;
        assert_eq!(<Option<Decimal>>::LOGICAL_SHAPE, LogicalShape::OptionalDecimal);
        assert_eq!(<Option<i32>>::LOGICAL_SHAPE, LogicalShape::Plain);
    }
}
