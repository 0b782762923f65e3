// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Annotation extraction.

use super::{Annotation, FieldMeta};
use crate::naming::FieldMapper;

/// Flags derived from a field's annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAnnotations {
    pub fixed_size: Option<usize>,
    pub explicit_name: Option<String>,
    pub explicit_namespace: Option<String>,
    pub transient: bool,
    pub aliases: Vec<String>,
}

impl FieldAnnotations {
    /// Collect the flags of one field. When an annotation repeats, the first
    /// occurrence wins; aliases accumulate.
    pub fn extract(meta: &FieldMeta) -> Self {
        let mut flags = Self::default();
        for annotation in &meta.annotations {
            match annotation {
                Annotation::Fixed(size) => {
                    flags.fixed_size.get_or_insert(*size);
                }
                Annotation::Name(name) => {
                    flags.explicit_name.get_or_insert_with(|| name.clone());
                }
                Annotation::Namespace(ns) => {
                    flags.explicit_namespace.get_or_insert_with(|| ns.clone());
                }
                Annotation::Transient => flags.transient = true,
                Annotation::Alias(alias) => flags.aliases.push(alias.clone()),
            }
        }
        flags
    }

    /// Schema name of the field: the explicit name, else the mapped label.
    pub fn resolved_name(&self, meta: &FieldMeta, mapper: FieldMapper) -> String {
        match &self.explicit_name {
            Some(name) => name.clone(),
            None => mapper.apply(&meta.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_annotations() {
        let flags = FieldAnnotations::extract(&FieldMeta::new("x", 0));
        assert_eq!(flags, FieldAnnotations::default());
        assert!(!flags.transient);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let meta = FieldMeta::new("sensor_id", 0)
            .with_annotation(Annotation::Fixed(8))
            .with_annotation(Annotation::Fixed(16))
            .with_annotation(Annotation::Name("SensorKey".into()))
            .with_annotation(Annotation::Alias("id".into()))
            .with_annotation(Annotation::Alias("key".into()));
        let flags = FieldAnnotations::extract(&meta);
        assert_eq!(flags.fixed_size, Some(8));
        assert_eq!(flags.explicit_name.as_deref(), Some("SensorKey"));
        assert_eq!(flags.aliases, vec!["id", "key"]);
    }

    #[test]
    fn test_resolved_name() {
        let meta = FieldMeta::new("sensor_id", 0);
        let flags = FieldAnnotations::extract(&meta);
        assert_eq!(flags.resolved_name(&meta, FieldMapper::CamelCase), "sensorId");

        let named = meta.with_annotation(Annotation::Name("id".into()));
        let flags = FieldAnnotations::extract(&named);
        assert_eq!(flags.resolved_name(&named, FieldMapper::CamelCase), "id");
    }
}
