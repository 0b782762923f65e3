// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field-naming conventions applied to declared field labels.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};

/// Maps a declared field label to its schema name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMapper {
    /// Use the label unchanged.
    #[default]
    Identity,
    SnakeCase,
    PascalCase,
    CamelCase,
    KebabCase,
}

impl FieldMapper {
    /// Apply the convention to a label.
    pub fn apply(self, label: &str) -> String {
        match self {
            Self::Identity => label.to_string(),
            Self::SnakeCase => label.to_snake_case(),
            Self::PascalCase => label.to_upper_camel_case(),
            Self::CamelCase => label.to_lower_camel_case(),
            Self::KebabCase => label.to_kebab_case(),
        }
    }
}
