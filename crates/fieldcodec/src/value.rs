// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire value types.

use crate::schema::RecordSchema;
use std::collections::HashMap;
use std::sync::Arc;

/// A value in the wire model, as produced by encoders and consumed by decoders.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    String(String),
    Fixed(usize, Vec<u8>), // (size, bytes)

    // Composites
    Array(Vec<Value>),
    Map(HashMap<String, Value>),
    Union(u32, Box<Value>), // (branch index, value)
    Record(GenericRecord),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Fixed(..) => "fixed",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Union(..) => "union",
            Self::Record(_) => "record",
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64, widening ints.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get raw bytes (bytes or fixed).
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) | Self::Fixed(_, v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as record.
    pub fn as_record(&self) -> Option<&GenericRecord> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Get union branch index.
    pub fn union_index(&self) -> Option<u32> {
        match self {
            Self::Union(idx, _) => Some(*idx),
            _ => None,
        }
    }

    /// Get union value.
    pub fn union_value(&self) -> Option<&Value> {
        match self {
            Self::Union(_, val) => Some(val),
            _ => None,
        }
    }
}

/// Positional record values together with the schema they were written with.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericRecord {
    schema: Arc<RecordSchema>,
    values: Vec<Value>,
}

impl GenericRecord {
    /// Create a record with every field set to null.
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let values = vec![Value::Null; schema.fields().len()];
        Self { schema, values }
    }

    /// Create a record from positional values.
    ///
    /// The number of values is not checked against the schema; readers treat
    /// a short record as missing trailing fields.
    pub fn from_values(schema: Arc<RecordSchema>, values: Vec<Value>) -> Self {
        Self { schema, values }
    }

    /// Attached (writer) schema.
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Positional values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a position.
    pub fn get_at(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Value of a field by name, per the attached schema.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let field = self.schema.field(name)?;
        self.values.get(field.position)
    }

    /// Set a field by name. Returns false if the schema has no such field.
    pub fn put(&mut self, name: &str, value: Value) -> bool {
        let Some(position) = self.schema.field(name).map(|f| f.position) else {
            return false;
        };
        if position >= self.values.len() {
            self.values.resize(position + 1, Value::Null);
        }
        self.values[position] = value;
        true
    }

    /// Consume the record, returning its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

// Conversion traits
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<GenericRecord> for Value {
    fn from(v: GenericRecord) -> Self {
        Self::Record(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}
