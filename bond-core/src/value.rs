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

//! In-memory values handled by the type descriptors.

use crate::bonded::Bonded;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    WString(String),
    Struct(StructValue),
    Bonded(Bonded),
}

impl Value {
    /// Short name of the variant, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::UInt8(_) => "uint8",
            Value::UInt16(_) => "uint16",
            Value::UInt32(_) => "uint32",
            Value::UInt64(_) => "uint64",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::WString(_) => "wstring",
            Value::Struct(_) => "struct",
            Value::Bonded(_) => "bonded",
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bonded(&self) -> Option<&Bonded> {
        match self {
            Value::Bonded(v) => Some(v),
            _ => None,
        }
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Value::Struct(v)
    }
}

impl From<Bonded> for Value {
    fn from(v: Bonded) -> Self {
        Value::Bonded(v)
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

impl_from_primitive!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// One struct instance: the fields of its own level keyed by ordinal, plus
/// the instance of its base level when the schema derives from another.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructValue {
    base: Option<Box<StructValue>>,
    fields: BTreeMap<u16, Value>,
}

impl StructValue {
    pub fn new() -> StructValue {
        StructValue::default()
    }

    pub fn with(mut self, id: u16, value: impl Into<Value>) -> StructValue {
        self.fields.insert(id, value.into());
        self
    }

    pub fn with_base(mut self, base: StructValue) -> StructValue {
        self.base = Some(Box::new(base));
        self
    }

    pub fn set(&mut self, id: u16, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(id, value.into())
    }

    pub fn set_base(&mut self, base: StructValue) {
        self.base = Some(Box::new(base));
    }

    pub fn remove(&mut self, id: u16) -> Option<Value> {
        self.fields.remove(&id)
    }

    pub fn get(&self, id: u16) -> Option<&Value> {
        self.fields.get(&id)
    }

    pub fn get_mut(&mut self, id: u16) -> Option<&mut Value> {
        self.fields.get_mut(&id)
    }

    pub fn base(&self) -> Option<&StructValue> {
        self.base.as_deref()
    }

    pub fn fields(&self) -> impl Iterator<Item = (u16, &Value)> {
        self.fields.iter().map(|(id, v)| (*id, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
