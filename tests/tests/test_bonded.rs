// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bond_core::resolver::context::ReadContext;
use bond_core::{
    Bond, BondDataType, BondType, Bonded, Config, Error, StructBondType, StructValue, Value,
};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::thread;
use tests::{base, derived, empty, envelope, leaf, point, top, top_value};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn payload_of(value: &StructValue) -> &Bonded {
    value.get(1).and_then(Value::as_bonded).unwrap()
}

#[test]
fn test_independent_adapters_are_equal() {
    let a = BondType::bonded_of(&point());
    let b = BondType::bonded_of(&point());
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, BondType::bonded_of(&leaf()));
    assert_ne!(a, BondType::from(point()));

    let mut map = HashMap::new();
    map.insert(a, "first");
    assert_eq!(map.get(&b), Some(&"first"));
}

#[test]
fn test_adapter_contract() {
    let bonded = BondType::bonded_of(&point());
    assert_eq!(bonded.name(), "bonded");
    assert_eq!(bonded.qualified_name(), "bonded");
    assert_eq!(bonded.full_name(), "bonded<geo.Point>");
    assert_eq!(bonded.bond_data_type(), BondType::from(point()).bond_data_type());
    assert_eq!(bonded.bond_data_type(), BondDataType::BT_STRUCT);
    assert!(bonded.is_generic());
    assert!(!bonded.is_nullable());
    assert_eq!(bonded.generic_type_arguments(), &[BondType::from(point())]);

    match bonded.default_value() {
        Value::Bonded(b) => {
            assert!(!b.is_deferred());
            assert_eq!(b.materialize().unwrap(), &point().default_struct_value());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_optional_bonded_field_at_default_is_written() {
    let bytes = Bond::default()
        .serialize(&envelope(&point()), &StructValue::new().with(0, 1u64))
        .unwrap();
    // id, then payload 1 as a struct holding the default point
    assert_eq!(bytes, vec![0x06, 0x01, 0x2a, 0x10, 0x00, 0x00, 0x00]);
}

#[test]
fn test_required_bonded_field_unset() {
    let holder = StructBondType::builder("test.Holder")
        .field(
            0,
            "payload",
            bond_core::Modifier::Required,
            BondType::bonded_of(&point()),
        )
        .build()
        .unwrap();
    let err = Bond::default()
        .serialize(&holder, &StructValue::new())
        .unwrap_err();
    assert!(err.is_value_validation());
    assert_eq!(err.field_path()[0].field_name, "payload");
}

#[test]
fn test_list_tagged_field_is_rejected_without_consuming() {
    let outer = envelope(&point());
    let field = outer.field(1).unwrap();
    // payload 1 tagged as an empty list of int32
    let bytes = [0x2b, 0x10, 0x00, 0x00];
    let config = Config::default();
    let mut context = ReadContext::new(&config, &bytes);
    context.read_field_result = context.reader.read_field_begin().unwrap();
    let position = context.reader.position();

    let err = field
        .field_type()
        .deserialize_field(&mut context, field)
        .unwrap_err();
    assert_eq!(context.reader.position(), position);
    match &err {
        Error::WireTypeMismatch {
            expected,
            actual,
            field,
        } => {
            assert_eq!(*expected, BondDataType::BT_STRUCT);
            assert_eq!(*actual, BondDataType::BT_LIST);
            assert_eq!(field.struct_name, "test.Envelope");
            assert_eq!(field.field_name, "payload");
            assert_eq!(field.id, 1);
        }
        other => panic!("unexpected {other:?}"),
    }

    let mut message = vec![0x06, 0x01];
    message.extend_from_slice(&bytes);
    message.push(0x00);
    let err = Bond::default().deserialize(&outer, &message).unwrap_err();
    assert!(err.is_wire_type_mismatch());
}

#[test]
fn test_round_trip_law() {
    let bond = Bond::default();
    let cases = [
        (empty(), StructValue::new()),
        (point(), StructValue::new().with(0, 8i32).with(1, -2i32)),
        (top(), top_value()),
    ];
    for (ty, value) in cases {
        let bonded = Bonded::new(ty.clone(), value.clone());
        let bytes = bond.serialize_bonded(&bonded).unwrap();
        let back = bond.deserialize_bonded(&ty, &bytes).unwrap();
        assert!(back.is_deferred());
        assert_eq!(back.materialize().unwrap(), &value);
        assert_eq!(back, bonded);
    }
}

#[test]
fn test_bonded_field_round_trip() {
    let bond = Bond::default();
    let outer = envelope(&top());
    let value = StructValue::new()
        .with(0, 11u64)
        .with(1, Bonded::new(top(), top_value()));
    let bytes = bond.serialize(&outer, &value).unwrap();

    // bonded<T> is encoded exactly like T
    let plain = StructBondType::builder("test.Envelope")
        .field(0, "id", bond_core::Modifier::Required, BondType::uint64())
        .field(1, "payload", bond_core::Modifier::Optional, top())
        .build()
        .unwrap();
    let plain_bytes = bond
        .serialize(&plain, &StructValue::new().with(0, 11u64).with(1, top_value()))
        .unwrap();
    assert_eq!(bytes, plain_bytes);

    let back = bond.deserialize(&outer, &bytes).unwrap();
    let payload = payload_of(&back);
    assert!(payload.is_deferred());
    assert_eq!(
        payload.captured_bytes().unwrap(),
        &bond.serialize(&top(), &top_value()).unwrap()[..]
    );
    assert_eq!(payload.materialize().unwrap(), &top_value());
    assert_eq!(back, value);
}

#[test]
fn test_deferred_value_is_passed_through() {
    let bond = Bond::default();
    let outer = envelope(&top());
    let value = StructValue::new()
        .with(0, 3u64)
        .with(1, Bonded::new(top(), top_value()));
    let bytes = bond.serialize(&outer, &value).unwrap();
    let back = bond.deserialize(&outer, &bytes).unwrap();
    assert_eq!(bond.serialize(&outer, &back).unwrap(), bytes);

    // forwarding after materialize still copies the captured bytes
    payload_of(&back).materialize().unwrap();
    assert_eq!(bond.serialize(&outer, &back).unwrap(), bytes);
}

#[test]
fn test_eager_mode_materializes() {
    let bond = Bond::default().lazy_bonded(false);
    let outer = envelope(&point());
    let value = StructValue::new()
        .with(0, 3u64)
        .with(1, Bonded::new(point(), StructValue::new().with(0, 1i32).with(1, 2i32)));
    let bytes = bond.serialize(&outer, &value).unwrap();
    let back = bond.deserialize(&outer, &bytes).unwrap();
    let payload = payload_of(&back);
    assert!(!payload.is_deferred());
    assert_eq!(back, value);

    let bonded = bond
        .deserialize_bonded(&point(), &bond.serialize(&point(), &StructValue::new().with(0, 1i32)).unwrap())
        .unwrap();
    assert!(!bonded.is_deferred());
}

#[test]
fn test_materialize_reports_bad_payloads() {
    let config = Config::default();
    // framing is valid but x carries a string
    let bonded = Bonded::from_bytes(point(), vec![0x09, 0x01, 0x61, 0x00], &config).unwrap();
    let err = bonded.materialize().unwrap_err();
    assert!(err.is_wire_type_mismatch());
    // failures are not memoized
    assert!(bonded.materialize().is_err());

    let bonded = Bonded::from_bytes(point(), vec![0x00], &config).unwrap();
    assert!(bonded.materialize().unwrap_err().is_value_validation());

    let err = Bonded::from_bytes(point(), vec![0x10], &config).unwrap_err();
    assert!(err.is_deserialization());
    let err = Bonded::from_bytes(point(), vec![0x10, 0x06, 0x00, 0x00], &config).unwrap_err();
    assert!(err.is_deserialization());
}

#[test]
fn test_truncated_bonded_field() {
    let bond = Bond::default();
    let outer = envelope(&point());
    let bytes = bond
        .serialize(&outer, &StructValue::new().with(0, 3u64))
        .unwrap();
    let err = bond.deserialize(&outer, &bytes[..bytes.len() - 2]).unwrap_err();
    assert!(err.is_deserialization());
    assert_eq!(err.field_path()[0].field_name, "payload");
}

#[test]
fn test_payload_type_must_match() {
    let value = StructValue::new()
        .with(0, 3u64)
        .with(1, Bonded::new(leaf(), StructValue::new()));
    let err = Bond::default()
        .serialize(&envelope(&point()), &value)
        .unwrap_err();
    assert!(err.is_value_validation());
    let path: Vec<u16> = err.field_path().iter().map(|f| f.id).collect();
    assert_eq!(path, vec![1]);
}

#[test]
fn test_nested_payload_failure_carries_field_path() {
    let value = StructValue::new()
        .with(0, 3u64)
        .with(1, Bonded::new(point(), StructValue::new().with(1, 4i32)));
    let err = Bond::default()
        .serialize(&envelope(&point()), &value)
        .unwrap_err();
    let path: Vec<(String, u16)> = err
        .field_path()
        .iter()
        .map(|f| (f.struct_name.clone(), f.id))
        .collect();
    assert_eq!(
        path,
        vec![
            ("test.Envelope".to_string(), 1),
            ("geo.Point".to_string(), 0)
        ]
    );
}

#[test]
fn test_base_bonded_carries_derived_payload() {
    let bond = Bond::default();
    let value = StructValue::new()
        .with(0, "derived")
        .with_base(StructValue::new().with(0, 5i32));
    let bytes = bond.serialize(&derived(), &value).unwrap();

    let as_base = Bonded::from_bytes(base(), bytes.clone(), bond.config()).unwrap();
    assert_eq!(
        as_base.materialize().unwrap(),
        &StructValue::new().with(0, 5i32)
    );
    assert_eq!(bond.serialize_bonded(&as_base).unwrap(), bytes);

    let as_derived = bond.deserialize_bonded(&derived(), &bytes).unwrap();
    assert_eq!(as_derived.materialize().unwrap().get(0), Some(&Value::from("derived")));
}

#[test]
fn test_equality_across_representations() {
    let bond = Bond::default();
    let value = StructValue::new().with(0, 1i32).with(1, 2i32);
    let materialized = Bonded::new(point(), value.clone());
    let deferred = bond
        .deserialize_bonded(&point(), &bond.serialize(&point(), &value).unwrap())
        .unwrap();
    assert_eq!(materialized, deferred);
    assert_ne!(
        materialized,
        Bonded::new(point(), StructValue::new().with(0, 1i32).with(1, 3i32))
    );
    assert_eq!(deferred.clone().into_value().unwrap(), value);
    assert_eq!(deferred.into_value().unwrap(), value);
}

#[test]
fn test_concurrent_materialize_is_shared() {
    let bond = Bond::default();
    let bytes = bond.serialize(&top(), &top_value()).unwrap();
    let bonded = Arc::new(bond.deserialize_bonded(&top(), &bytes).unwrap());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let bonded = Arc::clone(&bonded);
            thread::spawn(move || bonded.materialize().unwrap() as *const StructValue as usize)
        })
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.iter().all(|a| *a == addresses[0]));
    assert_eq!(bonded.materialize().unwrap(), &top_value());
}
