// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic

//! Recursive types, shared definitions and concurrent resolution.

use fieldcodec::{CodecConfig, Definitions, Record, Schema, Value};
use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

/// Singly linked list cell.
#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "graph")]
struct Node {
    value: i64,
    #[record(default = None)]
    next: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[record(namespace = "graph")]
struct Tree {
    label: String,
    children: Vec<Tree>,
    tags: HashMap<String, i32>,
}

fn chain(values: &[i64]) -> Option<Box<Node>> {
    values.iter().rev().fold(None, |next, &value| {
        Some(Box::new(Node { value, next }))
    })
}

#[test]
fn test_recursive_code_first() {
    let codec = Definitions::new()
        .codec::<Node>(&CodecConfig::new())
        .unwrap();
    let record = codec.schema().as_record().unwrap().clone();
    assert!(record.field("next").unwrap().schema.matches(&Schema::Union(
        fieldcodec::UnionSchema::nullable(Schema::Ref(fieldcodec::Name::parse("graph.Node")))
    )));
    assert!(codec.schema().to_string().contains("\"graph.Node\""));

    let list = *chain(&[1, 2, 3]).unwrap();
    let wire = codec.encode(&list).unwrap();
    assert_eq!(codec.decode(&wire).unwrap(), list);
}

#[test]
fn test_recursive_schema_first() {
    let definitions = Definitions::new();
    let config = CodecConfig::new();
    let schema = definitions.schema::<Node>(&config).unwrap();

    let codec = Definitions::new()
        .codec_for_schema::<Node>(&config, &schema)
        .unwrap();
    assert_eq!(codec.schema(), &schema);

    let list = *chain(&[10, 20]).unwrap();
    let wire = codec.encode(&list).unwrap();
    assert_eq!(codec.decode(&wire).unwrap(), list);
}

#[test]
fn test_recursive_collections() {
    let codec = Definitions::new()
        .codec::<Tree>(&CodecConfig::new())
        .unwrap();
    let tree = Tree {
        label: "root".into(),
        children: vec![
            Tree {
                label: "leaf".into(),
                children: Vec::new(),
                tags: HashMap::from([("depth".to_string(), 1)]),
            },
        ],
        tags: HashMap::new(),
    };
    let wire = codec.encode(&tree).unwrap();
    assert!(matches!(
        wire.as_record().unwrap().get("children"),
        Some(Value::Array(items)) if items.len() == 1
    ));
    assert_eq!(codec.decode(&wire).unwrap(), tree);
}

#[test]
fn test_definitions_are_reused() {
    let definitions = Definitions::new();
    let config = CodecConfig::new();
    let first = definitions.codec::<Node>(&config).unwrap();
    let count = definitions.len();
    let second = definitions.codec::<Node>(&config).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(definitions.len(), count);
}

#[test]
fn test_concurrent_resolution_converges() {
    let definitions = Definitions::new();
    let config = Arc::new(CodecConfig::new());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let definitions = definitions.clone();
            let config = Arc::clone(&config);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                definitions.codec::<Tree>(&config).unwrap()
            })
        })
        .collect();
    let codecs: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("resolver thread"))
        .collect();

    for codec in &codecs[1..] {
        assert!(Arc::ptr_eq(&codecs[0], codec));
    }
    let again = definitions.codec::<Tree>(&config).unwrap();
    assert!(Arc::ptr_eq(&codecs[0], &again));
}

#[test]
fn test_independent_resolutions_agree() {
    let config = CodecConfig::new();
    let a = Definitions::new().codec::<Node>(&config).unwrap();
    let b = Definitions::new().codec::<Node>(&config).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.schema(), b.schema());

    let list = *chain(&[5, 6]).unwrap();
    let wire = a.encode(&list).unwrap();
    assert_eq!(wire, b.encode(&list).unwrap());
    assert_eq!(b.decode(&wire).unwrap(), list);
}
