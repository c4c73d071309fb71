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

use bond_core::{
    Bond, BondDataType, BondType, Modifier, StructBondType, StructDefResolver, TypeDef,
};
use tests::{derived, envelope, point, top};

#[test]
fn test_nested_structs_are_indexed_in_visit_order() {
    let schema = Bond::default().schema_of(&BondType::from(top())).unwrap();
    let names: Vec<&str> = schema
        .structs
        .iter()
        .map(|s| s.metadata.qualified_name.as_str())
        .collect();
    assert_eq!(names, vec!["test.Top", "test.Middle", "test.Leaf"]);
    assert_eq!(schema.root, TypeDef::struct_def(0));

    let top_def = schema.struct_of(&schema.root).unwrap();
    assert_eq!(top_def.metadata.name, "Top");
    assert_eq!(top_def.fields[0].type_def, TypeDef::struct_def(1));
    assert_eq!(top_def.fields[1].type_def.id, BondDataType::BT_WSTRING);

    let leaf_def = &schema.structs[2];
    let count = &leaf_def.fields[1];
    assert_eq!(count.id, 1);
    assert_eq!(count.metadata.name, "count");
    assert_eq!(count.metadata.modifier, Modifier::WithDefault);
    assert_eq!(count.metadata.default_value.uint_value, 5);
    assert_eq!(count.type_def.id, BondDataType::BT_UINT32);
}

#[test]
fn test_repeated_struct_is_defined_once() {
    let segment = StructBondType::builder("geo.Segment")
        .field(0, "from", Modifier::Required, point())
        .field(1, "to", Modifier::Required, point())
        .field(2, "cached", Modifier::Optional, BondType::bonded_of(&point()))
        .build()
        .unwrap();
    let schema = StructDefResolver::schema_of(&BondType::from(segment)).unwrap();
    assert_eq!(schema.structs.len(), 2);
    let fields = &schema.structs[0].fields;
    assert_eq!(fields[0].type_def, TypeDef::struct_def(1));
    assert_eq!(fields[1].type_def, TypeDef::struct_def(1));
    assert_eq!(fields[2].type_def.struct_def, 1);
    assert!(fields[2].type_def.bonded_type);
}

#[test]
fn test_bonded_export_differs_only_by_flag() {
    let bond = Bond::default();
    let plain = bond.schema_of(&BondType::from(top())).unwrap();
    let mut bonded = bond.schema_of(&BondType::bonded_of(&top())).unwrap();
    assert!(bonded.root.bonded_type);
    assert!(!plain.root.bonded_type);
    bonded.root.bonded_type = false;
    assert_eq!(bonded, plain);

    let schema = bond
        .schema_of(&BondType::from(envelope(&point())))
        .unwrap();
    let payload = &schema.structs[0].fields[1];
    assert_eq!(payload.type_def.id, BondDataType::BT_STRUCT);
    assert!(payload.type_def.bonded_type);
    assert_eq!(
        schema.struct_of(&payload.type_def).unwrap().metadata.qualified_name,
        "geo.Point"
    );
}

#[test]
fn test_base_definition() {
    let schema = Bond::default()
        .schema_of(&BondType::from(derived()))
        .unwrap();
    assert_eq!(schema.structs.len(), 2);
    let derived_def = &schema.structs[0];
    assert_eq!(derived_def.base_def, Some(TypeDef::struct_def(1)));
    assert_eq!(schema.structs[1].metadata.qualified_name, "test.Base");
    assert_eq!(schema.structs[1].base_def, None);
}

#[test]
fn test_primitive_root() {
    let schema = Bond::default().schema_of(&BondType::int32()).unwrap();
    assert!(schema.structs.is_empty());
    assert_eq!(schema.root, TypeDef::primitive(BondDataType::BT_INT32));
}

#[test]
fn test_generic_instantiation_names() {
    let pair = StructBondType::builder("test.Pair")
        .generic_argument(BondType::int32())
        .generic_argument(BondType::bonded_of(&point()))
        .field(0, "first", Modifier::Optional, BondType::int32())
        .build()
        .unwrap();
    let schema = Bond::default().schema_of(&BondType::from(pair)).unwrap();
    let metadata = &schema.structs[0].metadata;
    assert_eq!(metadata.name, "Pair<int32, bonded<geo.Point>>");
    assert_eq!(
        metadata.qualified_name,
        "test.Pair<int32, bonded<geo.Point>>"
    );
    assert!(!schema.structs[0].fields[0].metadata.default_value.nothing);
}
