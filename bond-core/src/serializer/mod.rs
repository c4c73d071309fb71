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

//! Type descriptors.
//!
//! [`BondType`] is the closed set of descriptors: primitives, structs and
//! `bonded<T>`. Every descriptor knows its wire tag, its default value, how to
//! encode and decode a [`Value`] of its type, how to frame that value as a
//! struct field, and how to describe itself in an exported schema.

use crate::error::Error;
use crate::meta::TypeDef;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::schema_resolver::StructDefResolver;
use crate::types::{BondDataType, Modifier};
use crate::value::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod bonded;
pub mod primitive;
pub mod struct_;
pub(crate) mod util;

pub use bonded::BondedBondType;
pub use primitive::PrimitiveType;
pub use struct_::{StructBondType, StructBuilder, StructField};

use util::{identity_hash, read_field_scoped, resolve_field_value, write_field_framed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BondType {
    Primitive(PrimitiveType),
    Struct(StructBondType),
    Bonded(BondedBondType),
}

impl BondType {
    pub fn bool() -> BondType {
        BondType::Primitive(PrimitiveType::Bool)
    }

    pub fn int8() -> BondType {
        BondType::Primitive(PrimitiveType::Int8)
    }

    pub fn int16() -> BondType {
        BondType::Primitive(PrimitiveType::Int16)
    }

    pub fn int32() -> BondType {
        BondType::Primitive(PrimitiveType::Int32)
    }

    pub fn int64() -> BondType {
        BondType::Primitive(PrimitiveType::Int64)
    }

    pub fn uint8() -> BondType {
        BondType::Primitive(PrimitiveType::UInt8)
    }

    pub fn uint16() -> BondType {
        BondType::Primitive(PrimitiveType::UInt16)
    }

    pub fn uint32() -> BondType {
        BondType::Primitive(PrimitiveType::UInt32)
    }

    pub fn uint64() -> BondType {
        BondType::Primitive(PrimitiveType::UInt64)
    }

    pub fn float() -> BondType {
        BondType::Primitive(PrimitiveType::Float)
    }

    pub fn double() -> BondType {
        BondType::Primitive(PrimitiveType::Double)
    }

    pub fn string() -> BondType {
        BondType::Primitive(PrimitiveType::String)
    }

    pub fn wstring() -> BondType {
        BondType::Primitive(PrimitiveType::WString)
    }

    /// `bonded<T>` over the given struct.
    pub fn bonded_of(value_type: &StructBondType) -> BondType {
        BondType::Bonded(BondedBondType::new(value_type))
    }

    pub fn name(&self) -> &str {
        match self {
            BondType::Primitive(p) => p.name(),
            BondType::Struct(s) => s.name(),
            BondType::Bonded(b) => b.name(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        match self {
            BondType::Primitive(p) => p.name(),
            BondType::Struct(s) => s.qualified_name(),
            BondType::Bonded(b) => b.qualified_name(),
        }
    }

    /// Qualified name including generic arguments, e.g. `bonded<ns.Point>`.
    pub fn full_name(&self) -> String {
        match self {
            BondType::Bonded(b) => format!("bonded<{}>", b.value_type().qualified_name()),
            other => other.qualified_name().to_string(),
        }
    }

    pub fn bond_data_type(&self) -> BondDataType {
        match self {
            BondType::Primitive(p) => p.bond_data_type(),
            BondType::Struct(s) => s.bond_data_type(),
            BondType::Bonded(b) => b.bond_data_type(),
        }
    }

    /// None of the descriptors admit null; absent fields take defaults.
    #[inline(always)]
    pub fn is_nullable(&self) -> bool {
        false
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_type_arguments().is_empty()
    }

    pub fn generic_type_arguments(&self) -> &[BondType] {
        match self {
            BondType::Primitive(_) => &[],
            BondType::Struct(s) => s.generic_type_arguments(),
            BondType::Bonded(b) => b.generic_type_arguments(),
        }
    }

    pub fn default_value(&self) -> Value {
        match self {
            BondType::Primitive(p) => p.default_value(),
            BondType::Struct(s) => Value::Struct(s.default_struct_value()),
            BondType::Bonded(b) => b.default_value(),
        }
    }

    pub fn precomputed_hash(&self) -> u64 {
        match self {
            BondType::Primitive(p) => identity_hash("primitive", p),
            BondType::Struct(s) => s.precomputed_hash(),
            BondType::Bonded(b) => b.precomputed_hash(),
        }
    }

    pub fn serialize_value(&self, context: &mut WriteContext, value: &Value) -> Result<(), Error> {
        match self {
            BondType::Primitive(p) => p.serialize_value(context, value),
            BondType::Struct(s) => s.serialize_value(context, value),
            BondType::Bonded(b) => b.serialize_value(context, value),
        }
    }

    pub fn deserialize_value(&self, context: &mut ReadContext) -> Result<Value, Error> {
        match self {
            BondType::Primitive(p) => p.deserialize_value(context),
            BondType::Struct(s) => s.deserialize_value(context),
            BondType::Bonded(b) => b.deserialize_value(context),
        }
    }

    /// Writes `value` as `field`, applying the field's omission policy.
    /// `None` means the field is unset.
    pub fn serialize_field(
        &self,
        context: &mut WriteContext,
        value: Option<&Value>,
        field: &StructField,
    ) -> Result<(), Error> {
        match self {
            BondType::Primitive(p) => {
                let value = resolve_field_value(value, field)?;
                if field.modifier() == Modifier::Optional && value == field.default_value() {
                    return Ok(());
                }
                write_field_framed(context, p.bond_data_type(), field, |context| {
                    p.serialize_value(context, value)
                })
            }
            BondType::Struct(s) => {
                let value = resolve_field_value(value, field)?;
                write_field_framed(context, s.bond_data_type(), field, |context| {
                    s.serialize_value(context, value)
                })
            }
            BondType::Bonded(b) => b.serialize_field(context, value, field),
        }
    }

    /// Reads the value of `field` whose header is in
    /// `context.read_field_result`.
    pub fn deserialize_field(
        &self,
        context: &mut ReadContext,
        field: &StructField,
    ) -> Result<Value, Error> {
        let actual = context.read_field_result.tag;
        match self {
            BondType::Primitive(p) => {
                if !p.is_compatible_wire_type(actual) {
                    return Err(Error::field_type_mismatch(
                        p.bond_data_type(),
                        actual,
                        field.field_ref(),
                    ));
                }
                read_field_scoped(context, field, |context| {
                    p.read_wire_value(&mut context.reader, actual)
                })
            }
            BondType::Struct(s) => {
                if actual != BondDataType::BT_STRUCT {
                    return Err(Error::field_type_mismatch(
                        BondDataType::BT_STRUCT,
                        actual,
                        field.field_ref(),
                    ));
                }
                read_field_scoped(context, field, |context| s.deserialize_value(context))
            }
            BondType::Bonded(b) => b.deserialize_field(context, field),
        }
    }

    pub fn create_schema_type_def(
        &self,
        resolver: &mut StructDefResolver,
    ) -> Result<TypeDef, Error> {
        match self {
            BondType::Primitive(p) => Ok(TypeDef::primitive(p.bond_data_type())),
            BondType::Struct(s) => s.create_schema_type_def(resolver),
            BondType::Bonded(b) => b.create_schema_type_def(resolver),
        }
    }
}

impl Hash for BondType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.precomputed_hash());
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl From<PrimitiveType> for BondType {
    fn from(value: PrimitiveType) -> Self {
        BondType::Primitive(value)
    }
}

impl From<StructBondType> for BondType {
    fn from(value: StructBondType) -> Self {
        BondType::Struct(value)
    }
}

impl From<&StructBondType> for BondType {
    fn from(value: &StructBondType) -> Self {
        BondType::Struct(value.clone())
    }
}

impl From<BondedBondType> for BondType {
    fn from(value: BondedBondType) -> Self {
        BondType::Bonded(value)
    }
}
