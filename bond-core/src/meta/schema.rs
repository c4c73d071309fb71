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

//! Exported schema model.
//!
//! A [`SchemaDef`] lists every struct reachable from a root type once, in
//! registration order, and refers to them by index from [`TypeDef`]s.

use crate::types::{BondDataType, Modifier};
use crate::value::Value;

/// Default value of a field, flattened into one record per primitive family.
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    pub uint_value: u64,
    pub int_value: i64,
    pub double_value: f64,
    pub string_value: String,
    pub wstring_value: String,
    pub nothing: bool,
}

impl Default for Variant {
    fn default() -> Self {
        Variant {
            uint_value: 0,
            int_value: 0,
            double_value: 0.0,
            string_value: String::new(),
            wstring_value: String::new(),
            nothing: false,
        }
    }
}

impl Variant {
    pub fn nothing() -> Variant {
        Variant {
            nothing: true,
            ..Variant::default()
        }
    }

    pub fn from_value(value: &Value) -> Variant {
        let mut variant = Variant::default();
        match value {
            Value::Bool(v) => variant.uint_value = *v as u64,
            Value::UInt8(v) => variant.uint_value = *v as u64,
            Value::UInt16(v) => variant.uint_value = *v as u64,
            Value::UInt32(v) => variant.uint_value = *v as u64,
            Value::UInt64(v) => variant.uint_value = *v,
            Value::Int8(v) => variant.int_value = *v as i64,
            Value::Int16(v) => variant.int_value = *v as i64,
            Value::Int32(v) => variant.int_value = *v as i64,
            Value::Int64(v) => variant.int_value = *v,
            Value::Float(v) => variant.double_value = *v as f64,
            Value::Double(v) => variant.double_value = *v,
            Value::String(v) => variant.string_value = v.clone(),
            Value::WString(v) => variant.wstring_value = v.clone(),
            Value::Struct(_) | Value::Bonded(_) => {}
        }
        variant
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Metadata {
    pub name: String,
    pub qualified_name: String,
    pub modifier: Modifier,
    pub default_value: Variant,
}

/// Reference to a type. For structs, `struct_def` indexes
/// [`SchemaDef::structs`].
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDef {
    pub id: BondDataType,
    pub struct_def: u16,
    pub element: Option<Box<TypeDef>>,
    pub key: Option<Box<TypeDef>>,
    pub bonded_type: bool,
}

impl Default for TypeDef {
    fn default() -> Self {
        TypeDef {
            id: BondDataType::BT_STRUCT,
            struct_def: 0,
            element: None,
            key: None,
            bonded_type: false,
        }
    }
}

impl TypeDef {
    pub fn primitive(id: BondDataType) -> TypeDef {
        TypeDef {
            id,
            ..TypeDef::default()
        }
    }

    pub fn struct_def(index: u16) -> TypeDef {
        TypeDef {
            struct_def: index,
            ..TypeDef::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct FieldDef {
    pub metadata: Metadata,
    pub id: u16,
    pub type_def: TypeDef,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct StructDef {
    pub metadata: Metadata,
    pub base_def: Option<TypeDef>,
    pub fields: Vec<FieldDef>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SchemaDef {
    pub structs: Vec<StructDef>,
    pub root: TypeDef,
}

impl SchemaDef {
    /// Definition referenced by a struct `TypeDef`.
    pub fn struct_of(&self, type_def: &TypeDef) -> Option<&StructDef> {
        if type_def.id != BondDataType::BT_STRUCT {
            return None;
        }
        self.structs.get(type_def.struct_def as usize)
    }
}
