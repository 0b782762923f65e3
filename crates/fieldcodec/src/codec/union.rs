// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Union codecs with one branch moved to the front.
//!
//! A union field default must belong to the first branch, so a field whose
//! default lives in another branch is written with that branch first.

use super::{Codec, CodecRef};
use crate::error::{DecodeError, EncodeError};
use crate::schema::{Schema, UnionSchema};
use crate::value::Value;

/// Wraps a union codec, moving branch `branch` to index 0.
pub struct PromotedBranch<T> {
    schema: Schema,
    inner: CodecRef<T>,
    branch: u32,
}

impl<T> PromotedBranch<T> {
    /// `None` if `inner` does not write a union with a branch at `branch`.
    pub fn new(inner: CodecRef<T>, branch: u32) -> Option<Self> {
        let Schema::Union(union) = inner.schema() else {
            return None;
        };
        let index = usize::try_from(branch).ok()?;
        if index >= union.variants().len() {
            return None;
        }
        let mut variants = union.variants().to_vec();
        let promoted = variants.remove(index);
        variants.insert(0, promoted);
        Some(Self {
            schema: Schema::Union(UnionSchema::new(variants)),
            inner,
            branch,
        })
    }

    fn to_outer(&self, index: u32) -> u32 {
        match index {
            i if i == self.branch => 0,
            i if i < self.branch => i + 1,
            i => i,
        }
    }

    fn to_inner(&self, index: u32) -> u32 {
        match index {
            0 => self.branch,
            i if i <= self.branch => i - 1,
            i => i,
        }
    }
}

impl<T> Codec<T> for PromotedBranch<T> {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn encode(&self, value: &T) -> Result<Value, EncodeError> {
        match self.inner.encode(value)? {
            Value::Union(index, inner) => Ok(Value::Union(self.to_outer(index), inner)),
            other => Ok(other),
        }
    }

    fn decode(&self, value: &Value) -> Result<T, DecodeError> {
        match value {
            Value::Union(index, inner) => self
                .inner
                .decode(&Value::Union(self.to_inner(*index), inner.clone())),
            other => self.inner.decode(other),
        }
    }
}
