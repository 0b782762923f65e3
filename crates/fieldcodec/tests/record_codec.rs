// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Code-first record codecs built by `#[derive(Record)]`.

use fieldcodec::{
    Annotation, CodecConfig, ConfigError, Decimal, DecimalSchema, DecodeError, DecodeMode,
    Definitions, Field, GenericRecord, Record, RecordSchemaBuilder, Schema, UnionSchema, Value,
};

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "geo")]
struct Point {
    x: i32,
    #[record(default = 0)]
    y: i32,
}

/// A vehicle registration.
#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "fleet")]
struct Vehicle {
    #[record(fixed = 8, namespace = "hw")]
    serial: String,
    #[record(fixed = 4)]
    code: String,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "maps")]
struct Route {
    start: Point,
    #[record(namespace = "archive")]
    end: Point,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "stats")]
struct Counter {
    name: String,
    #[record(default = -1)]
    hits: i64,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(name = "Counter", namespace = "stats")]
struct StrictCounter {
    name: String,
    hits: i64,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "crm")]
struct Contact {
    #[record(alias = "mail")]
    email: String,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "jobs")]
struct Draft {
    title: String,
    #[record(transient)]
    cursor: i32,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "billing")]
struct Quota {
    #[record(default = Some(5))]
    limit: Option<i32>,
}

fn config(mode: DecodeMode) -> CodecConfig {
    CodecConfig::new().with_decode_mode(mode)
}

fn written(schema: Schema, values: Vec<Value>) -> Value {
    let record = schema.as_record().expect("record schema").clone();
    Value::Record(GenericRecord::from_values(record, values))
}

#[test]
fn test_point_round_trip() {
    let codec = Definitions::new()
        .codec::<Point>(&CodecConfig::new())
        .unwrap();
    let wire = codec.encode(&Point { x: 3, y: 0 }).unwrap();
    assert_eq!(
        wire.as_record().unwrap().values(),
        &[Value::Int(3), Value::Int(0)]
    );
    assert_eq!(codec.decode(&wire).unwrap(), Point { x: 3, y: 0 });

    let record = codec.schema().as_record().unwrap().clone();
    assert_eq!(record.name.fullname(), "geo.Point");
    assert_eq!(record.field("y").unwrap().default, Some(Value::Int(0)));
    assert_eq!(record.field("x").unwrap().default, None);
}

#[test]
fn test_missing_field_takes_default() {
    let schema = RecordSchemaBuilder::new("geo.Point")
        .field("x", Schema::Int)
        .build_schema();
    let wire = written(schema, vec![Value::Int(7)]);

    for mode in [DecodeMode::Safe, DecodeMode::Fast] {
        let codec = Definitions::new().codec::<Point>(&config(mode)).unwrap();
        assert_eq!(codec.decode(&wire).unwrap(), Point { x: 7, y: 0 }, "{:?}", mode);
    }
}

#[test]
fn test_missing_field_without_default_fails() {
    let schema = RecordSchemaBuilder::new("geo.Point")
        .field("y", Schema::Int)
        .build_schema();
    let wire = written(schema, vec![Value::Int(7)]);
    let codec = Definitions::new()
        .codec::<Point>(&CodecConfig::new())
        .unwrap();
    assert!(matches!(
        codec.decode(&wire),
        Err(DecodeError::Field { ref field, .. }) if field == "x"
    ));
}

#[test]
fn test_fixed_annotation_precedence() {
    let codec = Definitions::new()
        .codec::<Vehicle>(&CodecConfig::new())
        .unwrap();
    let record = codec.schema().as_record().unwrap().clone();
    assert_eq!(record.doc.as_deref(), Some("A vehicle registration."));

    match &record.field("serial").unwrap().schema {
        Schema::Fixed(fixed) => {
            assert_eq!(fixed.name.fullname(), "hw.serial");
            assert_eq!(fixed.size, 8);
        }
        other => panic!("expected fixed, got {}", other),
    }
    assert_eq!(
        record.field("code").unwrap().schema.namespace(),
        Some("fleet")
    );

    let vehicle = Vehicle {
        serial: "AB12".into(),
        code: "X9".into(),
    };
    let wire = codec.encode(&vehicle).unwrap();
    assert_eq!(
        wire.as_record().unwrap().get("serial"),
        Some(&Value::Fixed(8, b"AB12\0\0\0\0".to_vec()))
    );
    assert_eq!(codec.decode(&wire).unwrap(), vehicle);
}

#[test]
fn test_fixed_overflow_is_encode_error() {
    let codec = Definitions::new()
        .codec::<Vehicle>(&CodecConfig::new())
        .unwrap();
    let vehicle = Vehicle {
        serial: "AB12".into(),
        code: "TOO-LONG".into(),
    };
    assert!(codec.encode(&vehicle).is_err());
}

#[test]
fn test_namespace_override_on_nested_record() {
    let codec = Definitions::new()
        .codec::<Route>(&CodecConfig::new())
        .unwrap();
    let record = codec.schema().as_record().unwrap().clone();
    assert_eq!(record.field("start").unwrap().schema.namespace(), Some("geo"));
    assert_eq!(
        record.field("end").unwrap().schema.namespace(),
        Some("archive")
    );

    let route = Route {
        start: Point { x: 0, y: 0 },
        end: Point { x: 4, y: 5 },
    };
    assert_eq!(codec.decode(&codec.encode(&route).unwrap()).unwrap(), route);
}

#[test]
fn test_decode_failure_recovers_with_default() {
    let schema = RecordSchemaBuilder::new("stats.Counter")
        .field("name", Schema::String)
        .field("hits", Schema::String)
        .build_schema();
    let wire = written(
        schema,
        vec![Value::String("home".into()), Value::String("many".into())],
    );
    let definitions = Definitions::new();

    let lenient = definitions.codec::<Counter>(&CodecConfig::new()).unwrap();
    assert_eq!(
        lenient.decode(&wire).unwrap(),
        Counter {
            name: "home".into(),
            hits: -1
        }
    );

    let strict = definitions
        .codec::<StrictCounter>(&CodecConfig::new())
        .unwrap();
    assert!(matches!(
        strict.decode(&wire),
        Err(DecodeError::Field { ref field, .. }) if field == "hits"
    ));
}

#[test]
fn test_optional_decimal_takes_written_scale() {
    #[derive(Debug, Clone, PartialEq, Record)]
    #[record(namespace = "billing")]
    struct Invoice {
        total: Option<Decimal>,
    }

    let reader = RecordSchemaBuilder::new("billing.Invoice")
        .push(Field::new(
            "total",
            Schema::Union(UnionSchema::nullable(Schema::Decimal(DecimalSchema::new(
                12, 4,
            )))),
        ))
        .build_schema();
    let writer = RecordSchemaBuilder::new("billing.Invoice")
        .push(Field::new(
            "total",
            Schema::Union(UnionSchema::nullable(Schema::Decimal(DecimalSchema::new(
                10, 2,
            )))),
        ))
        .build_schema();
    let wire = written(
        writer,
        vec![Value::Union(
            1,
            Box::new(Value::Bytes(Decimal::new(12_345, 2).to_be_bytes())),
        )],
    );

    let codec = Definitions::new()
        .codec_for_schema::<Invoice>(&CodecConfig::new(), &reader)
        .unwrap();
    let total = codec.decode(&wire).unwrap().total.unwrap();
    assert_eq!(total.scale(), 2);
    assert_eq!(total.to_string(), "123.45");

    let absent = written(
        RecordSchemaBuilder::new("billing.Invoice")
            .optional_field("total", Schema::Decimal(DecimalSchema::new(10, 2)))
            .build_schema(),
        vec![Value::Union(0, Box::new(Value::Null))],
    );
    assert_eq!(codec.decode(&absent).unwrap().total, None);
}

#[test]
fn test_safe_and_fast_modes_on_reordered_schema() {
    let schema = RecordSchemaBuilder::new("geo.Point")
        .field("y", Schema::Int)
        .field("x", Schema::Int)
        .build_schema();
    let wire = written(schema, vec![Value::Int(2), Value::Int(1)]);

    let safe = Definitions::new()
        .codec::<Point>(&config(DecodeMode::Safe))
        .unwrap();
    assert_eq!(safe.decode(&wire).unwrap(), Point { x: 1, y: 2 });

    let fast = Definitions::new()
        .codec::<Point>(&config(DecodeMode::Fast))
        .unwrap();
    assert_eq!(fast.decode(&wire).unwrap(), Point { x: 2, y: 1 });
}

#[test]
fn test_alias_fallback() {
    let schema = RecordSchemaBuilder::new("crm.Contact")
        .field("mail", Schema::String)
        .build_schema();
    let wire = written(schema.clone(), vec![Value::String("a@example.org".into())]);

    let codec = Definitions::new()
        .codec::<Contact>(&CodecConfig::new())
        .unwrap();
    assert_eq!(
        codec.schema().as_record().unwrap().field("email").unwrap().aliases,
        vec!["mail"]
    );
    assert_eq!(codec.decode(&wire).unwrap().email, "a@example.org");

    let renamed = Definitions::new()
        .codec_for_schema::<Contact>(&CodecConfig::new(), &schema)
        .unwrap();
    let out = renamed
        .encode(&Contact {
            email: "b@example.org".into(),
        })
        .unwrap();
    assert_eq!(
        out.as_record().unwrap().get("mail"),
        Some(&Value::String("b@example.org".into()))
    );
}

#[test]
fn test_transient_without_fallback_is_rejected() {
    let result = Definitions::new().codec::<Draft>(&CodecConfig::new());
    assert!(matches!(
        result,
        Err(ConfigError::NoFallback { ref field, .. }) if field == "cursor"
    ));
}

#[test]
fn test_record_meta_from_derive() {
    let meta = Point::meta();
    assert_eq!(meta.name, "Point");
    assert_eq!(meta.namespace.as_deref(), Some("geo"));
    assert_eq!(meta.fields.len(), 2);
    assert_eq!(meta.fields[1].label, "y");

    let meta = Draft::meta();
    assert_eq!(meta.fields[1].annotations, vec![Annotation::Transient]);
}

#[test]
fn test_some_default_writes_value_branch_first() {
    let codec = Definitions::new()
        .codec::<Quota>(&CodecConfig::new())
        .unwrap();
    let json = codec.schema().to_json();
    assert_eq!(json["fields"][0]["type"], serde_json::json!(["int", "null"]));
    assert_eq!(json["fields"][0]["default"], 5);

    let some = codec.encode(&Quota { limit: Some(7) }).unwrap();
    assert_eq!(
        some.as_record().unwrap().get("limit"),
        Some(&Value::Union(0, Box::new(Value::Int(7))))
    );
    assert_eq!(codec.decode(&some).unwrap(), Quota { limit: Some(7) });

    let none = codec.encode(&Quota { limit: None }).unwrap();
    assert_eq!(codec.decode(&none).unwrap(), Quota { limit: None });
}
