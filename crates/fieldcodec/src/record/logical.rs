// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-value logical type coercion.
//!
//! Decimal scale and precision belong to the schema a value was written
//! with, not to the Rust type. When a decoded record carries its own schema,
//! a decimal field is decoded with a codec built from that schema.

use crate::codec::{CodecRef, WireType};
use crate::error::DecodeError;
use crate::schema::Schema;
use crate::value::Value;

/// Decode `value`, honoring decimal parameters of its concrete `schema`.
///
/// Falls back to the statically resolved `codec` when no schema is known,
/// when the schema is not decimal-shaped, or when `T` has no decimal form.
pub fn coerce_logical<T: WireType>(
    codec: &CodecRef<T>,
    value: &Value,
    schema: Option<&Schema>,
) -> Result<T, DecodeError> {
    let coerced = match schema {
        Some(Schema::Decimal(decimal)) => T::decimal_codec(decimal),
        Some(Schema::Union(union)) => match union.nullable_branch() {
            Some((_, Schema::Decimal(decimal))) => T::optional_decimal_codec(decimal, union),
            _ => None,
        },
        _ => None,
    };
    match coerced {
        Some(codec) => codec.decode(value),
        None => codec.decode(value),
    }
}
