// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base codec library.
//!
//! A [`Codec`] converts between a Rust value and its wire [`Value`] under a
//! fixed [`Schema`]. Types that can be resolved into a codec implement
//! [`WireType`]; resolution is driven by a [`SchemaUpdate`]:
//!
//! - `NoUpdate` / `NamespaceUpdate`: the type derives its own schema.
//! - `FullSchemaUpdate`: the supplied schema is authoritative and the type
//!   either accepts it or fails with [`ConfigError::SchemaMismatch`].

mod collections;
mod decimal;
mod lazy;
mod option;
mod primitives;
mod union;

pub use decimal::DecimalCodec;
pub use lazy::LazyCodec;
pub use option::OptionCodec;
pub use primitives::{Bytes, BytesCodec, Scalar, ScalarCodec, StringCodec};
pub use union::PromotedBranch;

use crate::env::Resolver;
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::record::SchemaUpdate;
use crate::schema::{DecimalSchema, Schema, UnionSchema};
use crate::value::Value;
use std::sync::Arc;

/// Bidirectional conversion between `T` and its wire form.
pub trait Codec<T>: Send + Sync {
    /// Schema of the values this codec produces.
    fn schema(&self) -> &Schema;

    fn encode(&self, value: &T) -> Result<Value, EncodeError>;

    fn decode(&self, value: &Value) -> Result<T, DecodeError>;
}

/// Shared codec handle.
pub type CodecRef<T> = Arc<dyn Codec<T>>;

/// Static shape of a type with respect to logical decimal coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalShape {
    Plain,
    /// A decimal.
    Decimal,
    /// An optional decimal.
    OptionalDecimal,
}

/// A type that can be resolved into a codec.
pub trait WireType: Sized + Send + Sync + 'static {
    /// Whether decoded values need per-value logical coercion.
    const LOGICAL_SHAPE: LogicalShape = LogicalShape::Plain;

    /// Resolve a codec for this type.
    fn resolve(
        resolver: &mut Resolver<'_>,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<Self>, ConfigError>;

    /// Codec for a value written under a concrete decimal schema.
    fn decimal_codec(_decimal: &DecimalSchema) -> Option<CodecRef<Self>> {
        None
    }

    /// Codec for a value written under a `[null, decimal]` union.
    fn optional_decimal_codec(
        _decimal: &DecimalSchema,
        _union: &UnionSchema,
    ) -> Option<CodecRef<Self>> {
        None
    }
}

/// Schema imposed by a full update, with references resolved.
pub(crate) fn supplied_schema(
    resolver: &Resolver<'_>,
    update: &SchemaUpdate,
) -> Result<Option<Schema>, ConfigError> {
    match update {
        SchemaUpdate::FullSchemaUpdate(sf) => resolver.dereference(sf.schema()).map(Some),
        SchemaUpdate::NoUpdate | SchemaUpdate::NamespaceUpdate(_) => Ok(None),
    }
}
