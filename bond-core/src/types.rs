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
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Coarse wire tag preceding every field on the tagged protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum BondDataType {
    BT_STOP = 0,
    BT_STOP_BASE = 1,
    BT_BOOL = 2,
    BT_UINT8 = 3,
    BT_UINT16 = 4,
    BT_UINT32 = 5,
    BT_UINT64 = 6,
    BT_FLOAT = 7,
    BT_DOUBLE = 8,
    BT_STRING = 9,
    BT_STRUCT = 10,
    BT_LIST = 11,
    BT_SET = 12,
    BT_MAP = 13,
    BT_INT8 = 14,
    BT_INT16 = 15,
    BT_INT32 = 16,
    BT_INT64 = 17,
    BT_WSTRING = 18,
    BT_UNAVAILABLE = 127,
}

impl BondDataType {
    pub fn from_wire(value: u8) -> Result<BondDataType, Error> {
        BondDataType::try_from(value)
            .map_err(|_| Error::deserialization(format!("Unknown wire data type: {value}")))
    }

    #[inline(always)]
    pub fn value(self) -> u8 {
        self.into()
    }

    #[inline(always)]
    pub fn is_stop(self) -> bool {
        matches!(self, BondDataType::BT_STOP | BondDataType::BT_STOP_BASE)
    }
}

/// Presence policy of a struct field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Modifier {
    /// Omitted from the wire while equal to its default; absent means default.
    #[default]
    Optional = 0,
    /// Always written, and must be present when decoding.
    Required = 1,
    /// Always written; absent on the wire means default.
    WithDefault = 2,
}

pub mod field_header {
    /// Ordinals up to this value fit in the header byte itself.
    pub const MAX_INLINE_ID: u16 = 5;
    pub const ONE_BYTE_ID_FLAG: u8 = 6 << 5;
    pub const TWO_BYTE_ID_FLAG: u8 = 7 << 5;
    pub const TYPE_MASK: u8 = 0x1f;
}
