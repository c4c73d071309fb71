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

use crate::bonded::Bonded;
use crate::error::Error;
use crate::meta::TypeDef;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::schema_resolver::StructDefResolver;
use crate::serializer::struct_::{StructBondType, StructField};
use crate::serializer::util::{
    identity_hash, read_field_scoped, resolve_field_value, write_field_framed,
};
use crate::serializer::BondType;
use crate::types::BondDataType;
use crate::value::Value;
use log::trace;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Descriptor of `bonded<T>`: a struct field whose payload may stay
/// undecoded until it is needed.
///
/// On the wire a `bonded<T>` field is indistinguishable from a plain `T`
/// field. Identity derives entirely from the wrapped struct descriptor.
#[derive(Clone, Debug)]
pub struct BondedBondType {
    value_type: StructBondType,
    generic_arguments: Arc<[BondType]>,
    hash: u64,
}

impl BondedBondType {
    pub fn new(value_type: &StructBondType) -> BondedBondType {
        BondedBondType {
            value_type: value_type.clone(),
            generic_arguments: Arc::from(vec![BondType::Struct(value_type.clone())]),
            hash: identity_hash("bonded", &value_type.precomputed_hash()),
        }
    }

    pub fn value_type(&self) -> &StructBondType {
        &self.value_type
    }

    pub fn name(&self) -> &str {
        "bonded"
    }

    pub fn qualified_name(&self) -> &str {
        "bonded"
    }

    #[inline(always)]
    pub fn bond_data_type(&self) -> BondDataType {
        self.value_type.bond_data_type()
    }

    pub fn generic_type_arguments(&self) -> &[BondType] {
        &self.generic_arguments
    }

    #[inline(always)]
    pub fn precomputed_hash(&self) -> u64 {
        self.hash
    }

    pub fn default_value(&self) -> Value {
        Value::Bonded(Bonded::new(
            self.value_type.clone(),
            self.value_type.default_struct_value(),
        ))
    }

    pub fn serialize_value(&self, context: &mut WriteContext, value: &Value) -> Result<(), Error> {
        match value {
            Value::Bonded(bonded) => {
                if bonded.value_type() != &self.value_type {
                    return Err(Error::value_validation(format!(
                        "bonded<{}> cannot carry a {} payload",
                        self.value_type.qualified_name(),
                        bonded.value_type().qualified_name()
                    )));
                }
                bonded.forward(context)
            }
            other => Err(Error::value_validation(format!(
                "Value of kind {} cannot be encoded as bonded<{}>",
                other.kind(),
                self.value_type.qualified_name()
            ))),
        }
    }

    /// Reads one struct body. With lazy bonded decoding enabled the body is
    /// validated by skipping and captured as bytes; otherwise it is decoded.
    pub fn deserialize_value(&self, context: &mut ReadContext) -> Result<Value, Error> {
        let config = context.config();
        let bonded = if config.is_lazy_bonded() {
            let start = context.reader.position();
            context.reader.skip_struct(context.depth_budget())?;
            let bytes = context.reader.captured(start, context.reader.position())?;
            trace!(
                "Captured {} bytes of {} as a deferred bonded value",
                bytes.len(),
                self.value_type.qualified_name()
            );
            Bonded::deferred(self.value_type.clone(), Arc::from(bytes), config.clone())
        } else {
            let value = self.value_type.deserialize_struct(context)?;
            Bonded::new(self.value_type.clone(), value)
        };
        Ok(Value::Bonded(bonded))
    }

    /// Bonded fields are written whatever their modifier; an unset optional
    /// field writes the default instance.
    pub fn serialize_field(
        &self,
        context: &mut WriteContext,
        value: Option<&Value>,
        field: &StructField,
    ) -> Result<(), Error> {
        let value = resolve_field_value(value, field)?;
        write_field_framed(context, self.bond_data_type(), field, |context| {
            self.serialize_value(context, value)
        })
    }

    /// Expects the field header to have been read into the context.
    /// A header tag other than `BT_STRUCT` fails before any payload byte is
    /// consumed.
    pub fn deserialize_field(
        &self,
        context: &mut ReadContext,
        field: &StructField,
    ) -> Result<Value, Error> {
        let actual = context.read_field_result.tag;
        if actual != BondDataType::BT_STRUCT {
            return Err(Error::field_type_mismatch(
                BondDataType::BT_STRUCT,
                actual,
                field.field_ref(),
            ));
        }
        read_field_scoped(context, field, |context| self.deserialize_value(context))
    }

    pub fn create_schema_type_def(
        &self,
        resolver: &mut StructDefResolver,
    ) -> Result<TypeDef, Error> {
        let mut type_def = self.value_type.create_schema_type_def(resolver)?;
        type_def.bonded_type = true;
        Ok(type_def)
    }
}

impl PartialEq for BondedBondType {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value_type == other.value_type
    }
}

impl Eq for BondedBondType {}

impl Hash for BondedBondType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}
