// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic

//! Schema-first resolution against hand-written record schemas.

use fieldcodec::{
    CodecConfig, ConfigError, Definitions, FieldMapper, GenericRecord, Name, Record,
    RecordSchemaBuilder, ResolvedFieldDecoder, ResolvedFieldEncoder, Resolver, Schema, SchemaFor,
    SchemaUpdate, Value,
};

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "telemetry")]
struct Sample {
    sensor_id: String,
    reading: f64,
    #[record(default = None)]
    note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "jobs")]
struct Job {
    id: i64,
    #[record(transient, default = String::from("idle"))]
    state: String,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(name = "Job", namespace = "jobs")]
struct CachedJob {
    id: i64,
    #[record(transient)]
    cache: Option<i64>,
}

fn sample_schema() -> Schema {
    RecordSchemaBuilder::new("telemetry.Sample")
        .optional_field("note", Schema::String)
        .field("reading", Schema::Double)
        .field("sensor_id", Schema::String)
        .build_schema()
}

#[test]
fn test_field_schemas_agree_with_supplied() {
    let schema = sample_schema();
    let supplied = schema.as_record().unwrap().clone();
    let definitions = Definitions::new();
    let config = CodecConfig::new();
    let mut resolver = Resolver::new(&definitions, &config);
    let update = SchemaUpdate::FullSchemaUpdate(SchemaFor::new(schema.clone(), config.field_mapper));
    let enclosing = Name::new("Sample", Some("telemetry"));
    let meta = Sample::meta();

    let encoder = ResolvedFieldEncoder::<Sample>::resolve::<Option<String>>(
        &mut resolver,
        &update,
        &enclosing,
        &meta.fields[2],
        |s| &s.note,
        None,
        2,
    )
    .unwrap();
    assert_eq!(encoder.field(), supplied.field("note").unwrap());

    let decoder = ResolvedFieldDecoder::<f64>::resolve(
        &mut resolver,
        1,
        &update,
        &enclosing,
        &meta.fields[1],
        None,
    )
    .unwrap();
    assert_eq!(decoder.field(), supplied.field("reading"));
    assert_eq!(decoder.schema(), &Schema::Double);
}

#[test]
fn test_schema_first_round_trip() {
    let schema = sample_schema();
    let codec = Definitions::new()
        .codec_for_schema::<Sample>(&CodecConfig::new(), &schema)
        .unwrap();
    assert_eq!(codec.schema(), &schema);

    let sample = Sample {
        sensor_id: "t-7".into(),
        reading: 19.25,
        note: Some("calibrated".into()),
    };
    let wire = codec.encode(&sample).unwrap();
    let record = wire.as_record().unwrap();
    assert_eq!(record.get_at(1), Some(&Value::Double(19.25)));
    assert_eq!(
        record.get_at(0),
        Some(&Value::Union(1, Box::new(Value::String("calibrated".into()))))
    );
    assert_eq!(codec.decode(&wire).unwrap(), sample);
}

#[test]
fn test_missing_supplied_field() {
    let schema = RecordSchemaBuilder::new("telemetry.Sample")
        .field("sensor_id", Schema::String)
        .field("reading", Schema::Double)
        .build_schema();
    let result = Definitions::new().codec_for_schema::<Sample>(&CodecConfig::new(), &schema);
    match result {
        Err(ConfigError::MissingField {
            record, field, ..
        }) => {
            assert_eq!(record, "telemetry.Sample");
            assert_eq!(field, "note");
        }
        other => panic!("expected missing field, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_incompatible_supplied_field() {
    let schema = RecordSchemaBuilder::new("telemetry.Sample")
        .field("sensor_id", Schema::String)
        .field("reading", Schema::Boolean)
        .optional_field("note", Schema::String)
        .build_schema();
    let result = Definitions::new().codec_for_schema::<Sample>(&CodecConfig::new(), &schema);
    assert!(matches!(result, Err(ConfigError::SchemaMismatch { .. })));
}

#[test]
fn test_non_record_schema_rejected() {
    let result = Definitions::new().codec_for_schema::<Sample>(&CodecConfig::new(), &Schema::Long);
    assert!(matches!(result, Err(ConfigError::SchemaMismatch { .. })));
}

#[test]
fn test_naming_convention_applies_to_lookup() {
    let schema = RecordSchemaBuilder::new("telemetry.Sample")
        .field("sensorId", Schema::String)
        .field("reading", Schema::Double)
        .optional_field("note", Schema::String)
        .build_schema();
    let config = CodecConfig::new().with_field_mapper(FieldMapper::CamelCase);
    let codec = Definitions::new()
        .codec_for_schema::<Sample>(&config, &schema)
        .unwrap();
    let wire = codec
        .encode(&Sample {
            sensor_id: "t-1".into(),
            reading: 0.5,
            note: None,
        })
        .unwrap();
    assert_eq!(
        wire.as_record().unwrap().get("sensorId"),
        Some(&Value::String("t-1".into()))
    );
}

#[test]
fn test_transient_field_ignores_supplied_field() {
    let schema = RecordSchemaBuilder::new("jobs.Job")
        .field("id", Schema::Long)
        .field_with_default("state", Schema::String, Value::String("queued".into()))
        .build_schema();
    let codec = Definitions::new()
        .codec_for_schema::<Job>(&CodecConfig::new(), &schema)
        .unwrap();

    let wire = codec
        .encode(&Job {
            id: 4,
            state: "running".into(),
        })
        .unwrap();
    assert_eq!(
        wire.as_record().unwrap().get("state"),
        Some(&Value::String("queued".into()))
    );

    let record = GenericRecord::from_values(
        schema.as_record().unwrap().clone(),
        vec![Value::Long(4), Value::String("running".into())],
    );
    assert_eq!(
        codec.decode(&Value::Record(record)).unwrap(),
        Job {
            id: 4,
            state: "idle".into()
        }
    );
}

#[test]
fn test_transient_field_matches_supplied_field_without_default() {
    let schema = RecordSchemaBuilder::new("jobs.Job")
        .field("id", Schema::Long)
        .field("cache", Schema::Long)
        .build_schema();
    let codec = Definitions::new()
        .codec_for_schema::<CachedJob>(&CodecConfig::new(), &schema)
        .unwrap();

    let wire = codec
        .encode(&CachedJob {
            id: 4,
            cache: Some(12),
        })
        .unwrap();
    assert_eq!(wire.as_record().unwrap().get("id"), Some(&Value::Long(4)));
    assert_eq!(wire.as_record().unwrap().get("cache"), Some(&Value::Null));

    let record = GenericRecord::from_values(
        schema.as_record().unwrap().clone(),
        vec![Value::Long(4), Value::Long(99)],
    );
    assert_eq!(
        codec.decode(&Value::Record(record)).unwrap(),
        CachedJob { id: 4, cache: None }
    );
}

#[test]
fn test_transient_field_writes_declared_default() {
    let schema = RecordSchemaBuilder::new("jobs.Job")
        .field("id", Schema::Long)
        .field("state", Schema::String)
        .build_schema();
    let codec = Definitions::new()
        .codec_for_schema::<Job>(&CodecConfig::new(), &schema)
        .unwrap();

    let wire = codec
        .encode(&Job {
            id: 1,
            state: "running".into(),
        })
        .unwrap();
    assert_eq!(
        wire.as_record().unwrap().get("state"),
        Some(&Value::String("idle".into()))
    );
}

#[test]
fn test_schema_field_without_counterpart() {
    let schema = RecordSchemaBuilder::new("jobs.Job")
        .field("id", Schema::Long)
        .field("owner", Schema::String)
        .field_with_default("state", Schema::String, Value::String("queued".into()))
        .build_schema();
    let result = Definitions::new().codec_for_schema::<Job>(&CodecConfig::new(), &schema);
    assert!(matches!(
        result,
        Err(ConfigError::UnmappedSchemaField { ref field, .. }) if field == "owner"
    ));
}
