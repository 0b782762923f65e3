// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Synthesis of schema fields for code-first resolution.

use super::{FieldAnnotations, FieldMeta};
use crate::codec::{Codec, CodecRef, PromotedBranch};
use crate::error::ConfigError;
use crate::naming::FieldMapper;
use crate::schema::{Field, Schema};
use crate::value::Value;
use std::sync::Arc;

/// Build the schema field for a resolved field codec.
///
/// The doc comes from the field, else from the field's named type.
pub fn build_field(
    meta: &FieldMeta,
    annotations: &FieldAnnotations,
    schema: Schema,
    default: Option<Value>,
    position: usize,
    mapper: FieldMapper,
) -> Field {
    let doc = meta.doc.clone().or_else(|| match &schema {
        Schema::Record(record) => record.doc.clone(),
        Schema::Fixed(fixed) => fixed.doc.clone(),
        _ => None,
    });
    Field {
        name: annotations.resolved_name(meta, mapper),
        position,
        schema,
        default,
        doc,
        aliases: annotations.aliases.clone(),
    }
}

/// Encode a declared default and pick the codec that writes the field.
///
/// A default in a union branch other than the first moves that branch to
/// the front of the field's union.
pub fn with_default<T: 'static>(
    codec: CodecRef<T>,
    default: &T,
    field: &str,
) -> Result<(CodecRef<T>, Value), ConfigError> {
    let encoded = codec
        .encode(default)
        .map_err(|source| ConfigError::InvalidDefault {
            field: field.to_string(),
            source,
        })?;
    match encoded {
        Value::Union(branch, inner) if branch != 0 => {
            match PromotedBranch::new(codec.clone(), branch) {
                Some(promoted) => {
                    let promoted: CodecRef<T> = Arc::new(promoted);
                    Ok((promoted, *inner))
                }
                None => Ok((codec, *inner)),
            }
        }
        Value::Union(_, inner) => Ok((codec, *inner)),
        value => Ok((codec, value)),
    }
}
