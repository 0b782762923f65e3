// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec construction settings.
//!
//! Supports both programmatic and file-based configuration.
//!
//! ```toml
//! field_mapper = "snake_case"
//! decode_mode = "fast"
//! ```

use crate::naming::FieldMapper;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How a field decoder locates its value inside a decoded record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Read by resolved position; assumes the writer used the same field order.
    Fast,
    /// Look the field up by name (then alias) in the record's attached schema.
    #[default]
    Safe,
}

/// Settings captured by every codec built from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Naming convention for synthesized field names.
    #[serde(default)]
    pub field_mapper: FieldMapper,

    /// Field lookup strategy for decoding.
    #[serde(default)]
    pub decode_mode: DecodeMode,
}

impl CodecConfig {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the naming convention.
    pub fn with_field_mapper(mut self, mapper: FieldMapper) -> Self {
        self.field_mapper = mapper;
        self
    }

    /// Set the decode mode.
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }
}
