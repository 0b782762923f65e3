// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Placeholder codec for named types under construction.

use super::{Codec, CodecRef};
use crate::error::{DecodeError, EncodeError};
use crate::schema::{Name, Schema};
use crate::value::Value;
use std::sync::OnceLock;

/// Stand-in handed out for a named type while its own fields are resolved.
///
/// Its schema is a reference to the named type. Once the real codec exists it
/// is bound here; an unbound placeholder fails every call with an `Unbound`
/// error, which is fatal.
pub struct LazyCodec<T> {
    schema: Schema,
    target: OnceLock<CodecRef<T>>,
}

impl<T> LazyCodec<T> {
    pub fn new(name: Name) -> Self {
        Self {
            schema: Schema::Ref(name),
            target: OnceLock::new(),
        }
    }

    /// Bind the real codec. Returns false if already bound.
    pub fn bind(&self, codec: CodecRef<T>) -> bool {
        self.target.set(codec).is_ok()
    }

    pub fn is_bound(&self) -> bool {
        self.target.get().is_some()
    }

    fn fullname(&self) -> String {
        self.schema.name().map(|n| n.fullname()).unwrap_or_default()
    }
}

impl<T> Codec<T> for LazyCodec<T> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &T) -> Result<Value, EncodeError> {
        match self.target.get() {
            Some(codec) => codec.encode(value),
            None => Err(EncodeError::Unbound(self.fullname())),
        }
    }

    fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        match self.target.get() {
            Some(codec) => codec.decode(value),
            None => Err(DecodeError::Unbound(self.fullname())),
        }
    }
}
