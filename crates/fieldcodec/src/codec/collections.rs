// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Arrays, maps and boxed values.

use super::{Codec, CodecRef, LogicalShape, WireType};
use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::record::SchemaUpdate;
use crate::schema::{DecimalSchema, Schema, UnionSchema};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Update for the element type of a container.
///
/// Under a full update the element schema is taken from `pick`, else the
/// container's update passes through unchanged.
fn element_update<T>(
    resolver: &Resolver<'_>,
    update: &SchemaUpdate,
    pick: fn(&Schema) -> Option<&Schema>,
) -> Result<SchemaUpdate, ConfigError> {
    match update {
        SchemaUpdate::FullSchemaUpdate(sf) => {
            let schema = resolver.dereference(sf.schema())?;
            let element = pick(&schema).ok_or_else(|| ConfigError::mismatch::<T>(&schema))?;
            Ok(SchemaUpdate::FullSchemaUpdate(sf.with_schema(element.clone())))
        }
        other => Ok(other.clone()),
    }
}

fn array_items(schema: &Schema) -> Option<&Schema> {
    match schema {
        Schema::Array(items) => Some(&**items),
        _ => None,
    }
}

fn map_values(schema: &Schema) -> Option<&Schema> {
    match schema {
        Schema::Map(values) => Some(&**values),
        _ => None,
    }
}

struct ArrayCodec<T> {
    schema: Schema,
    items: CodecRef<T>,
}

impl<T> Codec<Vec<T>> for ArrayCodec<T> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &Vec<T>) -> Result<Value, EncodeError> {
        value
            .iter()
            .map(|item| self.items.encode(item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn decode(&self, value: &Value) -> Result<Vec<T>, DecodeError> {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::mismatch("array", value))?;
        items.iter().map(|item| self.items.decode(item)).collect()
    }
}

impl<T: WireType> WireType for Vec<T> {
    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError> {
        let items_update = element_update::<Self>(resolver, update, array_items)?;
        let items = resolver.resolve::<T>(&items_update)?;
        Ok(Arc::new(ArrayCodec {
            schema: Schema::Array(Box::new(items.schema().clone())),
            items,
        }))
    }
}

struct MapCodec<T> {
    schema: Schema,
    values: CodecRef<T>,
}

impl<T> Codec<HashMap<String, T>> for MapCodec<T> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &HashMap<String, T>) -> Result<Value, EncodeError> {
        value
            .iter()
            .map(|(k, v)| self.values.encode(v).map(|encoded| (k.clone(), encoded)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Value::Map)
    }

    fn decode(&self, value: &Value) -> Result<HashMap<String, T>, DecodeError> {
        let Value::Map(entries) = value else {
            return Err(DecodeError::mismatch("map", value));
        };
        entries
            .iter()
            .map(|(k, v)| self.values.decode(v).map(|decoded| (k.clone(), decoded)))
            .collect()
    }
}

impl<T: WireType> WireType for HashMap<String, T> {
    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError> {
        let values_update = element_update::<Self>(resolver, update, map_values)?;
        let values = resolver.resolve::<T>(&values_update)?;
        Ok(Arc::new(MapCodec {
            schema: Schema::Map(Box::new(values.schema().clone())),
            values,
        }))
    }
}

struct BoxCodec<T> {
    inner: CodecRef<T>,
}

impl<T> Codec<Box<T>> for BoxCodec<T> {
    fn schema(&self) -> &Schema {
        self.inner.schema()
    }

    fn encode(&self, value: &Box<T>) -> Result<Value, EncodeError> {
        self.inner.encode(value)
    }

    fn decode(&self, value: &Value) -> Result<Box<T>, DecodeError> {
        self.inner.decode(value).map(Box::new)
    }
}

impl<T: WireType> WireType for Box<T> {
    const LOGICAL_SHAPE: LogicalShape = T::LOGICAL_SHAPE;

    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError> {
        let inner = resolver.resolve::<T>(update)?;
        Ok(Arc::new(BoxCodec { inner }))
    }

    fn decimal_codec(decimal: &DecimalSchema) -> Option<CodecRef<Self>> {
        let inner = T::decimal_codec(decimal)?;
        let codec: CodecRef<Self> = Arc::new(BoxCodec { inner });
        Some(codec)
    }

    fn optional_decimal_codec(
        decimal: &DecimalSchema,
        union: &UnionSchema,
    ) -> Option<CodecRef<Self>> {
        let inner = T::optional_decimal_codec(decimal, union)?;
        let codec: CodecRef<Self> = Arc::new(BoxCodec { inner });
        Some(codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{ScalarCodec, StringCodec};

    #[test]
    fn test_array_round_trip_and_item_error() {
        let codec = ArrayCodec::<i32> {
            schema: Schema::Array(Box::new(Schema::Int)),
            items: Arc::new(ScalarCodec::<i32>::new()),
        };
        let wire = codec.encode(&vec![1, 2, 3]).unwrap();
        assert_eq!(wire, Value::from(vec![1i32, 2, 3]));
        assert_eq!(codec.decode(&wire).unwrap(), vec![1, 2, 3]);

        let bad = Value::Array(vec![Value::Int(1), Value::String("x".into())]);
        assert!(codec.decode(&bad).is_err());
    }

    #[test]
    fn test_map_decode() {
        let codec = MapCodec::<String> {
            schema: Schema::Map(Box::new(Schema::String)),
            values: Arc::new(StringCodec::new(Schema::String)),
        };
        let mut entries = HashMap::new();
        entries.insert("unit".to_string(), Value::from("celsius"));
        let decoded = codec.decode(&Value::Map(entries)).unwrap();
        assert_eq!(decoded.get("unit").map(String::as_str), Some("celsius"));
        assert!(codec.decode(&Value::Int(0)).is_err());
    }
}
