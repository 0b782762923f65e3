// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # fieldcodec - field-level codec resolution for record types
//!
//! Resolves, for every field of a record type, the schema field it maps to
//! and the encoder and decoder that move its value to and from a generic
//! wire [`Value`]. Resolution runs either code-first (the schema is derived
//! from the Rust type and its `#[record(...)]` annotations) or schema-first
//! (an externally supplied [`Schema`] is authoritative).
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldcodec::{CodecConfig, Definitions, FieldMapper, Record, Value};
//!
//! #[derive(Debug, PartialEq, Record)]
//! #[record(namespace = "telemetry")]
//! struct Reading {
//!     sensor_id: String,
//!     celsius: f64,
//!     #[record(transient, default = 0)]
//!     retries: i32,
//! }
//!
//! let definitions = Definitions::new();
//! let config = CodecConfig::new().with_field_mapper(FieldMapper::CamelCase);
//! let codec = definitions.codec::<Reading>(&config).unwrap();
//!
//! let reading = Reading { sensor_id: "t-1".into(), celsius: 21.5, retries: 3 };
//! let wire = codec.encode(&reading).unwrap();
//! let record = wire.as_record().unwrap();
//! assert_eq!(record.get("sensorId"), Some(&Value::String("t-1".into())));
//! assert_eq!(codec.decode(&wire).unwrap().retries, 0);
//! ```
//!
//! ## Layout
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Schema model and JSON rendering |
//! | [`value`] | Generic wire values |
//! | [`codec`] | [`Codec`] trait and codecs for built-in types |
//! | [`record`] | Field resolution and [`RecordCodec`] |
//! | [`env`] | Shared [`Definitions`] and resolution sessions |
//! | [`config`] | [`CodecConfig`], loadable from TOML |

extern crate self as fieldcodec;

pub mod codec;
pub mod config;
pub mod decimal;
pub mod env;
pub mod error;
pub mod naming;
pub mod record;
pub mod schema;
pub mod value;

pub use codec::{
    Bytes, BytesCodec, Codec, CodecRef, DecimalCodec, LazyCodec, LogicalShape, OptionCodec,
    PromotedBranch, Scalar, ScalarCodec, StringCodec, WireType,
};
pub use config::{CodecConfig, ConfigFileError, DecodeMode};
pub use decimal::{Decimal, ParseDecimalError};
pub use env::{Definitions, Resolver};
pub use error::{ConfigError, DecodeError, EncodeError};
pub use naming::FieldMapper;
pub use record::{
    coerce_logical, field_update, Annotation, FieldAnnotations, FieldMeta, FieldPosition, Record,
    RecordBuilder, RecordCodec, RecordMeta, RecoverWithDefault, ResolvedFieldDecoder,
    ResolvedFieldEncoder, SchemaFor, SchemaUpdate,
};
pub use schema::{
    DecimalSchema, Field, FixedSchema, Name, RecordSchema, RecordSchemaBuilder, Schema,
    UnionSchema,
};
pub use value::{GenericRecord, Value};

/// `#[derive(Record)]`: implements [`Record`] and [`WireType`] for a struct
/// with named fields.
pub use fieldcodec_derive::Record;
