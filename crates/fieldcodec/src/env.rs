// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Definition environment.
//!
//! [`Definitions`] is the shared, append-only table of finished codecs for
//! named types. It is cheap to clone and safe to use from many threads:
//! racing resolutions of the same type may both do the work, but the first
//! published codec is the one every caller gets back.
//!
//! [`Resolver`] is one resolution session on top of it. While a named type's
//! fields are being resolved, the session holds a [`LazyCodec`] placeholder
//! for it so that a type referring to itself resolves to the placeholder
//! instead of recursing.
//!
//! # Example
//!
//! ```
//! use fieldcodec::{CodecConfig, Definitions, Record};
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Point {
//!     x: i32,
//!     #[record(default = 0)]
//!     y: i32,
//! }
//!
//! let definitions = Definitions::new();
//! let codec = definitions.codec::<Point>(&CodecConfig::new()).unwrap();
//! let wire = codec.encode(&Point { x: 3, y: 0 }).unwrap();
//! assert_eq!(codec.decode(&wire).unwrap(), Point { x: 3, y: 0 });
//! ```

use crate::codec::{CodecRef, LazyCodec, WireType};
use crate::config::CodecConfig;
use crate::error::ConfigError;
use crate::record::{SchemaFor, SchemaUpdate};
use crate::schema::{Name, Schema};
use dashmap::DashMap;
use log::{debug, trace};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ErasedCodec = Arc<dyn Any + Send + Sync>;

/// Identity of a resolved definition: the Rust type plus the update it was
/// resolved under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DefinitionKey {
    type_id: TypeId,
    update: String,
}

impl DefinitionKey {
    fn new<T: 'static>(update: String) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            update,
        }
    }
}

/// Shared table of finished codecs.
#[derive(Clone, Default)]
pub struct Definitions {
    codecs: Arc<DashMap<DefinitionKey, ErasedCodec>>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of published definitions.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Resolve a codec for `T`, deriving its schema from the type.
    pub fn codec<T: WireType>(&self, config: &CodecConfig) -> Result<CodecRef<T>, ConfigError> {
        let mut resolver = Resolver::new(self, config);
        resolver.resolve::<T>(&SchemaUpdate::NoUpdate)
    }

    /// Resolve a codec for `T` that reads and writes `schema`.
    pub fn codec_for_schema<T: WireType>(
        &self,
        config: &CodecConfig,
        schema: &Schema,
    ) -> Result<CodecRef<T>, ConfigError> {
        let mut resolver = Resolver::new(self, config);
        resolver.register_named(schema);
        let update =
            SchemaUpdate::FullSchemaUpdate(SchemaFor::new(schema.clone(), config.field_mapper));
        resolver.resolve::<T>(&update)
    }

    /// Schema derived from `T`.
    pub fn schema<T: WireType>(&self, config: &CodecConfig) -> Result<Schema, ConfigError> {
        Ok(self.codec::<T>(config)?.schema().clone())
    }

    fn lookup<T: 'static>(&self, key: &DefinitionKey) -> Option<CodecRef<T>> {
        self.codecs
            .get(key)
            .and_then(|entry| entry.value().downcast_ref::<CodecRef<T>>().cloned())
    }

    /// Publish a codec. If another one won the race, that one is returned.
    fn publish<T: 'static>(&self, key: DefinitionKey, codec: CodecRef<T>) -> CodecRef<T> {
        let entry = self
            .codecs
            .entry(key)
            .or_insert_with(|| -> ErasedCodec { Arc::new(codec.clone()) });
        entry
            .value()
            .downcast_ref::<CodecRef<T>>()
            .cloned()
            .unwrap_or(codec)
    }
}

impl fmt::Debug for Definitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definitions")
            .field("len", &self.codecs.len())
            .finish()
    }
}

/// One resolution session.
pub struct Resolver<'a> {
    definitions: &'a Definitions,
    config: &'a CodecConfig,
    in_progress: HashMap<DefinitionKey, ErasedCodec>,
    named: HashMap<String, Schema>,
    /// Canonical form of the first registered schema.
    root: Option<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(definitions: &'a Definitions, config: &'a CodecConfig) -> Self {
        Self {
            definitions,
            config,
            in_progress: HashMap::new(),
            named: HashMap::new(),
            root: None,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        self.config
    }

    pub fn definitions(&self) -> &Definitions {
        self.definitions
    }

    /// Resolve a codec for `T` under `update`.
    pub fn resolve<T: WireType>(
        &mut self,
        update: &SchemaUpdate,
    ) -> Result<CodecRef<T>, ConfigError> {
        T::resolve(self, update)
    }

    /// Remember every named type defined in `schema` so that references to
    /// it can be followed.
    ///
    /// The first registered schema also scopes the definitions resolved
    /// against it: a named type is only shared with sessions whose whole
    /// supplied schema is the same.
    pub fn register_named(&mut self, schema: &Schema) {
        if self.root.is_none() {
            self.root = Some(schema.canonical_form());
        }
        self.collect_named(schema);
    }

    fn collect_named(&mut self, schema: &Schema) {
        match schema {
            Schema::Fixed(fixed) => {
                self.named
                    .entry(fixed.name.fullname())
                    .or_insert_with(|| schema.clone());
            }
            Schema::Record(record) => {
                let fullname = record.name.fullname();
                if self.named.contains_key(&fullname) {
                    return;
                }
                self.named.insert(fullname, schema.clone());
                for field in record.fields() {
                    self.collect_named(&field.schema);
                }
            }
            Schema::Array(inner) | Schema::Map(inner) => self.collect_named(inner),
            Schema::Union(union) => {
                for variant in union.variants() {
                    self.collect_named(variant);
                }
            }
            _ => {}
        }
    }

    /// Follow a reference to its named type; other schemas are returned as is.
    pub fn dereference(&self, schema: &Schema) -> Result<Schema, ConfigError> {
        match schema {
            Schema::Ref(name) => {
                let fullname = name.fullname();
                self.named
                    .get(&fullname)
                    .cloned()
                    .ok_or(ConfigError::UnresolvedReference(fullname))
            }
            other => Ok(other.clone()),
        }
    }

    /// Resolve the named type `name` exactly once per session and update.
    ///
    /// A reentrant request for the same type and update gets the in-progress
    /// placeholder. Finished codecs are published to the shared table.
    pub fn define<T, F>(
        &mut self,
        name: &Name,
        update: &SchemaUpdate,
        build: F,
    ) -> Result<CodecRef<T>, ConfigError>
    where
        T: WireType,
        F: FnOnce(&mut Self) -> Result<CodecRef<T>, ConfigError>,
    {
        let pending_key = DefinitionKey::new::<T>(pending_tag(name, update));
        if let Some(placeholder) = self
            .in_progress
            .get(&pending_key)
            .and_then(|erased| erased.downcast_ref::<CodecRef<T>>())
        {
            trace!("[Resolver::define] '{}' is in progress, using placeholder", name);
            return Ok(placeholder.clone());
        }

        let cache_key = DefinitionKey::new::<T>(self.cache_tag(name, update)?);
        if let Some(codec) = self.definitions.lookup::<T>(&cache_key) {
            trace!("[Resolver::define] '{}' found in definitions", name);
            return Ok(codec);
        }

        let placeholder = Arc::new(LazyCodec::<T>::new(name.clone()));
        let erased: CodecRef<T> = placeholder.clone();
        self.in_progress
            .insert(pending_key.clone(), Arc::new(erased));

        let built = build(self);
        self.in_progress.remove(&pending_key);
        let codec = built?;

        placeholder.bind(codec.clone());
        let published = self.definitions.publish(cache_key, codec);
        debug!(
            "[Resolver::define] published '{}' ({} definitions)",
            name,
            self.definitions.len()
        );
        Ok(published)
    }

    fn cache_tag(&self, name: &Name, update: &SchemaUpdate) -> Result<String, ConfigError> {
        let config = format!("{:?}/{:?}", self.config.field_mapper, self.config.decode_mode);
        Ok(match update {
            SchemaUpdate::FullSchemaUpdate(sf) => format!(
                "{}/{:?}/{}/{}",
                config,
                sf.mapper(),
                self.root.as_deref().unwrap_or_default(),
                self.dereference(sf.schema())?.canonical_form()
            ),
            _ => format!("{}/{}", config, pending_tag(name, update)),
        })
    }
}

fn pending_tag(name: &Name, update: &SchemaUpdate) -> String {
    match update {
        SchemaUpdate::NoUpdate => "code".to_string(),
        SchemaUpdate::NamespaceUpdate(namespace) => format!("ns:{}", namespace),
        SchemaUpdate::FullSchemaUpdate(_) => format!("schema:{}", name.fullname()),
    }
}
