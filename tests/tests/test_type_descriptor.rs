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

use bond_core::{BondDataType, BondType, Error, Modifier, PrimitiveType, StructBondType, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tests::{derived, point};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_primitive_descriptors() {
    let ty = BondType::int64();
    assert_eq!(ty.name(), "int64");
    assert_eq!(ty.qualified_name(), "int64");
    assert_eq!(ty.bond_data_type(), BondDataType::BT_INT64);
    assert_eq!(ty.default_value(), Value::Int64(0));
    assert!(!ty.is_generic());
    assert!(!ty.is_nullable());
    assert_eq!(ty, BondType::from(PrimitiveType::Int64));
    assert_ne!(BondType::string(), BondType::wstring());
    assert_eq!(BondType::wstring().bond_data_type(), BondDataType::BT_WSTRING);
}

#[test]
fn test_struct_identity_is_structural() {
    let a = point();
    let b = point();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(hash_of(&BondType::from(a.clone())), hash_of(&BondType::from(b)));
    assert_eq!(a.name(), "Point");
    assert_eq!(a.qualified_name(), "geo.Point");
    assert_eq!(BondType::from(&a).to_string(), "geo.Point");
    assert!(a.base().is_none());
    assert_eq!(derived().base().map(|b| b.qualified_name()), Some("test.Base"));
}

#[test]
fn test_generic_struct_identity() {
    let build = |arg: BondType| {
        StructBondType::builder("test.Box")
            .generic_argument(arg)
            .field(0, "value", Modifier::Optional, BondType::int32())
            .build()
            .unwrap()
    };
    let ints = build(BondType::int32());
    assert_eq!(ints.qualified_name(), "test.Box<int32>");
    assert_eq!(ints.name(), "Box<int32>");
    assert_eq!(ints, build(BondType::int32()));
    assert_ne!(ints, build(BondType::string()));

    let ty = BondType::from(ints);
    assert!(ty.is_generic());
    assert_eq!(ty.generic_type_arguments(), &[BondType::int32()]);
}

#[test]
fn test_builder_rejects_duplicate_fields() {
    let err = StructBondType::builder("test.Dup")
        .field(1, "a", Modifier::Optional, BondType::int32())
        .field(1, "b", Modifier::Optional, BondType::int32())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSchema(_)));

    let err = StructBondType::builder("test.Dup")
        .field(1, "a", Modifier::Optional, BondType::int32())
        .field(2, "a", Modifier::Optional, BondType::int32())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSchema(_)));
}

#[test]
fn test_builder_rejects_bad_defaults() {
    let err = StructBondType::builder("test.Bad")
        .field_with_default(0, "n", Modifier::Optional, BondType::int32(), 1i64)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSchema(_)));

    let err = StructBondType::builder("test.Bad")
        .field_with_default(0, "p", Modifier::Optional, point(), point().default_struct_value())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSchema(_)));

    let err = StructBondType::builder("  ").build().unwrap_err();
    assert!(matches!(err, Error::InvalidSchema(_)));
}

#[test]
fn test_fields_keep_declaration_order() {
    let ty = StructBondType::builder("test.Order")
        .field(9, "z", Modifier::Optional, BondType::bool())
        .field(2, "a", Modifier::Optional, BondType::bool())
        .field(300, "wide", Modifier::Optional, BondType::double())
        .build()
        .unwrap();
    let ids: Vec<u16> = ty.fields().iter().map(|f| f.id()).collect();
    assert_eq!(ids, vec![9, 2, 300]);
    let wide = ty.field(300).unwrap();
    assert_eq!(wide.name(), "wide");
    assert_eq!(wide.owner(), "test.Order");
    assert_eq!(wide.default_value(), &Value::Double(0.0));
    assert!(ty.field(3).is_none());
}

#[test]
fn test_wide_ordinals_round_trip() {
    let ty = StructBondType::builder("test.Wide")
        .field(5, "inline", Modifier::Required, BondType::uint16())
        .field(6, "one_byte", Modifier::Required, BondType::uint16())
        .field(256, "two_byte", Modifier::Required, BondType::uint16())
        .build()
        .unwrap();
    let value = bond_core::StructValue::new()
        .with(5, 1u16)
        .with(6, 2u16)
        .with(256, 3u16);
    let bond = bond_core::Bond::default();
    let bytes = bond.serialize(&ty, &value).unwrap();
    assert_eq!(
        bytes,
        vec![0xa4, 0x01, 0xc4, 0x06, 0x02, 0xe4, 0x00, 0x01, 0x03, 0x00]
    );
    assert_eq!(bond.deserialize(&ty, &bytes).unwrap(), value);
}
