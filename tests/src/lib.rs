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

//! Schemas shared by the integration tests.

use bond_core::{BondType, Modifier, StructBondType, StructValue, Value};

/// `geo.Point { 0: required int32 x; 1: optional int32 y; }`
pub fn point() -> StructBondType {
    StructBondType::builder("geo.Point")
        .field(0, "x", Modifier::Required, BondType::int32())
        .field(1, "y", Modifier::Optional, BondType::int32())
        .build()
        .unwrap()
}

pub fn empty() -> StructBondType {
    StructBondType::builder("test.Empty").build().unwrap()
}

/// Innermost level of the three-level nest.
pub fn leaf() -> StructBondType {
    StructBondType::builder("test.Leaf")
        .field(0, "name", Modifier::Optional, BondType::string())
        .field_with_default(1, "count", Modifier::WithDefault, BondType::uint32(), 5u32)
        .build()
        .unwrap()
}

pub fn middle() -> StructBondType {
    StructBondType::builder("test.Middle")
        .field(0, "leaf", Modifier::Optional, leaf())
        .field(1, "tag", Modifier::Optional, BondType::int16())
        .build()
        .unwrap()
}

pub fn top() -> StructBondType {
    StructBondType::builder("test.Top")
        .field(0, "middle", Modifier::Optional, middle())
        .field(1, "note", Modifier::Optional, BondType::wstring())
        .build()
        .unwrap()
}

pub fn top_value() -> StructValue {
    let leaf = StructValue::new().with(0, "deep").with(1, 9u32);
    let middle = StructValue::new().with(0, leaf).with(1, -12i16);
    StructValue::new()
        .with(0, middle)
        .with(1, Value::WString("naïve ✓".to_string()))
}

/// `test.Envelope { 0: required uint64 id; 1: optional bonded<inner> payload; }`
pub fn envelope(inner: &StructBondType) -> StructBondType {
    StructBondType::builder("test.Envelope")
        .field(0, "id", Modifier::Required, BondType::uint64())
        .field(1, "payload", Modifier::Optional, BondType::bonded_of(inner))
        .build()
        .unwrap()
}

/// `test.Base { 0: required int32 a; }`
pub fn base() -> StructBondType {
    StructBondType::builder("test.Base")
        .field(0, "a", Modifier::Required, BondType::int32())
        .build()
        .unwrap()
}

/// `test.Derived : test.Base { 0: optional string b; 1: optional double c; }`
pub fn derived() -> StructBondType {
    StructBondType::builder("test.Derived")
        .base(&base())
        .field(0, "b", Modifier::Optional, BondType::string())
        .field(1, "c", Modifier::Optional, BondType::double())
        .build()
        .unwrap()
}
