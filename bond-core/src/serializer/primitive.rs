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

use crate::error::Error;
use crate::protocol::TaggedReader;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::BondDataType;
use crate::value::Value;

/// Scalar and string leaf types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    WString,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "uint8",
            PrimitiveType::UInt16 => "uint16",
            PrimitiveType::UInt32 => "uint32",
            PrimitiveType::UInt64 => "uint64",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::String => "string",
            PrimitiveType::WString => "wstring",
        }
    }

    pub fn bond_data_type(self) -> BondDataType {
        match self {
            PrimitiveType::Bool => BondDataType::BT_BOOL,
            PrimitiveType::Int8 => BondDataType::BT_INT8,
            PrimitiveType::Int16 => BondDataType::BT_INT16,
            PrimitiveType::Int32 => BondDataType::BT_INT32,
            PrimitiveType::Int64 => BondDataType::BT_INT64,
            PrimitiveType::UInt8 => BondDataType::BT_UINT8,
            PrimitiveType::UInt16 => BondDataType::BT_UINT16,
            PrimitiveType::UInt32 => BondDataType::BT_UINT32,
            PrimitiveType::UInt64 => BondDataType::BT_UINT64,
            PrimitiveType::Float => BondDataType::BT_FLOAT,
            PrimitiveType::Double => BondDataType::BT_DOUBLE,
            PrimitiveType::String => BondDataType::BT_STRING,
            PrimitiveType::WString => BondDataType::BT_WSTRING,
        }
    }

    pub fn default_value(self) -> Value {
        match self {
            PrimitiveType::Bool => Value::Bool(false),
            PrimitiveType::Int8 => Value::Int8(0),
            PrimitiveType::Int16 => Value::Int16(0),
            PrimitiveType::Int32 => Value::Int32(0),
            PrimitiveType::Int64 => Value::Int64(0),
            PrimitiveType::UInt8 => Value::UInt8(0),
            PrimitiveType::UInt16 => Value::UInt16(0),
            PrimitiveType::UInt32 => Value::UInt32(0),
            PrimitiveType::UInt64 => Value::UInt64(0),
            PrimitiveType::Float => Value::Float(0.0),
            PrimitiveType::Double => Value::Double(0.0),
            PrimitiveType::String => Value::String(String::new()),
            PrimitiveType::WString => Value::WString(String::new()),
        }
    }

    /// Whether `value` is the variant this type encodes.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (PrimitiveType::Bool, Value::Bool(_))
                | (PrimitiveType::Int8, Value::Int8(_))
                | (PrimitiveType::Int16, Value::Int16(_))
                | (PrimitiveType::Int32, Value::Int32(_))
                | (PrimitiveType::Int64, Value::Int64(_))
                | (PrimitiveType::UInt8, Value::UInt8(_))
                | (PrimitiveType::UInt16, Value::UInt16(_))
                | (PrimitiveType::UInt32, Value::UInt32(_))
                | (PrimitiveType::UInt64, Value::UInt64(_))
                | (PrimitiveType::Float, Value::Float(_))
                | (PrimitiveType::Double, Value::Double(_))
                | (PrimitiveType::String, Value::String(_))
                | (PrimitiveType::WString, Value::WString(_))
        )
    }

    /// Whether a field of this type can be read from a value tagged `actual`.
    /// Integers widen within the same signedness and float widens to double.
    pub fn is_compatible_wire_type(self, actual: BondDataType) -> bool {
        let expected = self.bond_data_type();
        if expected == actual {
            return true;
        }
        match (signed_rank(expected), signed_rank(actual)) {
            (Some(e), Some(a)) => return a <= e,
            (None, None) => {}
            _ => return false,
        }
        match (unsigned_rank(expected), unsigned_rank(actual)) {
            (Some(e), Some(a)) => return a <= e,
            (None, None) => {}
            _ => return false,
        }
        expected == BondDataType::BT_DOUBLE && actual == BondDataType::BT_FLOAT
    }

    pub fn serialize_value(self, context: &mut WriteContext, value: &Value) -> Result<(), Error> {
        let writer = &mut context.writer;
        match (self, value) {
            (PrimitiveType::Bool, Value::Bool(v)) => writer.write_bool(*v),
            (PrimitiveType::Int8, Value::Int8(v)) => writer.write_int8(*v),
            (PrimitiveType::Int16, Value::Int16(v)) => writer.write_int16(*v),
            (PrimitiveType::Int32, Value::Int32(v)) => writer.write_int32(*v),
            (PrimitiveType::Int64, Value::Int64(v)) => writer.write_int64(*v),
            (PrimitiveType::UInt8, Value::UInt8(v)) => writer.write_uint8(*v),
            (PrimitiveType::UInt16, Value::UInt16(v)) => writer.write_uint16(*v),
            (PrimitiveType::UInt32, Value::UInt32(v)) => writer.write_uint32(*v),
            (PrimitiveType::UInt64, Value::UInt64(v)) => writer.write_uint64(*v),
            (PrimitiveType::Float, Value::Float(v)) => writer.write_float(*v),
            (PrimitiveType::Double, Value::Double(v)) => writer.write_double(*v),
            (PrimitiveType::String, Value::String(v)) => writer.write_string(v)?,
            (PrimitiveType::WString, Value::WString(v)) => writer.write_wstring(v)?,
            (ty, other) => {
                return Err(Error::value_validation(format!(
                    "Value of kind {} cannot be encoded as {}",
                    other.kind(),
                    ty.name()
                )))
            }
        }
        Ok(())
    }

    pub fn deserialize_value(self, context: &mut ReadContext) -> Result<Value, Error> {
        self.read_wire_value(&mut context.reader, self.bond_data_type())
    }

    /// Reads a value encoded as `actual` and widens it to this type.
    /// Callers check [`Self::is_compatible_wire_type`] first.
    pub(crate) fn read_wire_value(
        self,
        reader: &mut TaggedReader,
        actual: BondDataType,
    ) -> Result<Value, Error> {
        Ok(match self {
            PrimitiveType::Bool => Value::Bool(reader.read_bool()?),
            PrimitiveType::Int8 => Value::Int8(reader.read_int8()?),
            PrimitiveType::Int16 => Value::Int16(read_signed(reader, actual)? as i16),
            PrimitiveType::Int32 => Value::Int32(read_signed(reader, actual)? as i32),
            PrimitiveType::Int64 => Value::Int64(read_signed(reader, actual)?),
            PrimitiveType::UInt8 => Value::UInt8(reader.read_uint8()?),
            PrimitiveType::UInt16 => Value::UInt16(read_unsigned(reader, actual)? as u16),
            PrimitiveType::UInt32 => Value::UInt32(read_unsigned(reader, actual)? as u32),
            PrimitiveType::UInt64 => Value::UInt64(read_unsigned(reader, actual)?),
            PrimitiveType::Float => Value::Float(reader.read_float()?),
            PrimitiveType::Double => match actual {
                BondDataType::BT_FLOAT => Value::Double(reader.read_float()? as f64),
                _ => Value::Double(reader.read_double()?),
            },
            PrimitiveType::String => Value::String(reader.read_string()?),
            PrimitiveType::WString => Value::WString(reader.read_wstring()?),
        })
    }
}

fn signed_rank(tag: BondDataType) -> Option<u8> {
    match tag {
        BondDataType::BT_INT8 => Some(1),
        BondDataType::BT_INT16 => Some(2),
        BondDataType::BT_INT32 => Some(3),
        BondDataType::BT_INT64 => Some(4),
        _ => None,
    }
}

fn unsigned_rank(tag: BondDataType) -> Option<u8> {
    match tag {
        BondDataType::BT_UINT8 => Some(1),
        BondDataType::BT_UINT16 => Some(2),
        BondDataType::BT_UINT32 => Some(3),
        BondDataType::BT_UINT64 => Some(4),
        _ => None,
    }
}

fn read_signed(reader: &mut TaggedReader, actual: BondDataType) -> Result<i64, Error> {
    Ok(match actual {
        BondDataType::BT_INT8 => reader.read_int8()? as i64,
        BondDataType::BT_INT16 => reader.read_int16()? as i64,
        BondDataType::BT_INT32 => reader.read_int32()? as i64,
        _ => reader.read_int64()?,
    })
}

fn read_unsigned(reader: &mut TaggedReader, actual: BondDataType) -> Result<u64, Error> {
    Ok(match actual {
        BondDataType::BT_UINT8 => reader.read_uint8()? as u64,
        BondDataType::BT_UINT16 => reader.read_uint16()? as u64,
        BondDataType::BT_UINT32 => reader.read_uint32()? as u64,
        _ => reader.read_uint64()?,
    })
}
