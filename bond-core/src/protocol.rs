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

//! Field-level cursor over the tagged wire protocol.
//!
//! Every field starts with a header carrying its [`BondDataType`] and
//! ordinal, so a reader can validate or skip any field without a schema:
//!
//! ```text
//! | id:3 bits | tag:5 bits |                 id <= 5
//! | 0b110     | tag:5 bits | id: u8 |        id <= 0xff
//! | 0b111     | tag:5 bits | id: u16 le |    otherwise
//! ```
//!
//! A struct is its field stream followed by `BT_STOP`; a base level of a
//! derived struct is terminated by `BT_STOP_BASE` instead.

use crate::buffer::{Reader, Writer};
use crate::ensure;
use crate::error::Error;
use crate::types::field_header::{
    MAX_INLINE_ID, ONE_BYTE_ID_FLAG, TWO_BYTE_ID_FLAG, TYPE_MASK,
};
use crate::types::BondDataType;

/// Header of the field just read: its wire tag and ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadFieldResult {
    pub tag: BondDataType,
    pub id: u16,
}

impl Default for ReadFieldResult {
    fn default() -> Self {
        ReadFieldResult {
            tag: BondDataType::BT_STOP,
            id: 0,
        }
    }
}

#[derive(Default)]
pub struct TaggedWriter {
    writer: Writer,
}

impl TaggedWriter {
    pub fn new(writer: Writer) -> TaggedWriter {
        TaggedWriter { writer }
    }

    pub fn into_inner(self) -> Writer {
        self.writer
    }

    pub fn write_field_begin(&mut self, tag: BondDataType, id: u16) {
        let tag = tag.value();
        if id <= MAX_INLINE_ID {
            self.writer.write_u8(((id as u8) << 5) | tag);
        } else if id <= 0xff {
            self.writer.write_u8(ONE_BYTE_ID_FLAG | tag);
            self.writer.write_u8(id as u8);
        } else {
            self.writer.write_u8(TWO_BYTE_ID_FLAG | tag);
            self.writer.write_u16(id);
        }
    }

    #[inline(always)]
    pub fn write_field_end(&mut self) {}

    /// Terminates a struct level: `BT_STOP_BASE` for a base level, `BT_STOP` otherwise.
    pub fn write_struct_end(&mut self, is_base: bool) {
        let marker = if is_base {
            BondDataType::BT_STOP_BASE
        } else {
            BondDataType::BT_STOP
        };
        self.writer.write_u8(marker.value());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.writer.write_u8(value as u8);
    }

    pub fn write_uint8(&mut self, value: u8) {
        self.writer.write_u8(value);
    }

    pub fn write_uint16(&mut self, value: u16) {
        self.writer.write_varuint16(value);
    }

    pub fn write_uint32(&mut self, value: u32) {
        self.writer.write_varuint32(value);
    }

    pub fn write_uint64(&mut self, value: u64) {
        self.writer.write_varuint64(value);
    }

    pub fn write_int8(&mut self, value: i8) {
        self.writer.write_i8(value);
    }

    pub fn write_int16(&mut self, value: i16) {
        self.writer.write_varint16(value);
    }

    pub fn write_int32(&mut self, value: i32) {
        self.writer.write_varint32(value);
    }

    pub fn write_int64(&mut self, value: i64) {
        self.writer.write_varint64(value);
    }

    pub fn write_float(&mut self, value: f32) {
        self.writer.write_f32(value);
    }

    pub fn write_double(&mut self, value: f64) {
        self.writer.write_f64(value);
    }

    pub fn write_string(&mut self, value: &str) -> Result<(), Error> {
        self.writer.write_utf8_string(value)
    }

    pub fn write_wstring(&mut self, value: &str) -> Result<(), Error> {
        self.writer.write_utf16_string(value)
    }

    /// Copies already-encoded protocol bytes verbatim.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.writer.write_bytes(bytes);
    }

    /// Container headers, only needed to produce shapes the reader must skip.
    pub fn write_list_begin(&mut self, element: BondDataType, count: u32) {
        self.writer.write_u8(element.value());
        self.writer.write_varuint32(count);
    }

    pub fn write_map_begin(&mut self, key: BondDataType, value: BondDataType, count: u32) {
        self.writer.write_u8(key.value());
        self.writer.write_u8(value.value());
        self.writer.write_varuint32(count);
    }
}

pub struct TaggedReader<'a> {
    reader: Reader<'a>,
}

impl<'a> TaggedReader<'a> {
    pub fn new(bf: &'a [u8]) -> TaggedReader<'a> {
        TaggedReader {
            reader: Reader::new(bf),
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.reader.get_cursor()
    }

    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.reader.is_exhausted()
    }

    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    /// Input bytes between two positions previously returned by [`Self::position`].
    pub fn captured(&self, start: usize, end: usize) -> Result<&'a [u8], Error> {
        self.reader.slice(start, end)
    }

    pub fn read_field_begin(&mut self) -> Result<ReadFieldResult, Error> {
        let header = self.reader.read_u8()?;
        let tag = BondDataType::from_wire(header & TYPE_MASK)?;
        let id = match header >> 5 {
            6 => self.reader.read_u8()? as u16,
            7 => self.reader.read_u16()?,
            inline => inline as u16,
        };
        Ok(ReadFieldResult { tag, id })
    }

    #[inline(always)]
    pub fn read_field_end(&mut self) {}

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        match self.reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::deserialization(format!(
                "Invalid bool byte: {other}"
            ))),
        }
    }

    pub fn read_uint8(&mut self) -> Result<u8, Error> {
        self.reader.read_u8()
    }

    pub fn read_uint16(&mut self) -> Result<u16, Error> {
        self.reader.read_varuint16()
    }

    pub fn read_uint32(&mut self) -> Result<u32, Error> {
        self.reader.read_varuint32()
    }

    pub fn read_uint64(&mut self) -> Result<u64, Error> {
        self.reader.read_varuint64()
    }

    pub fn read_int8(&mut self) -> Result<i8, Error> {
        self.reader.read_i8()
    }

    pub fn read_int16(&mut self) -> Result<i16, Error> {
        self.reader.read_varint16()
    }

    pub fn read_int32(&mut self) -> Result<i32, Error> {
        self.reader.read_varint32()
    }

    pub fn read_int64(&mut self) -> Result<i64, Error> {
        self.reader.read_varint64()
    }

    pub fn read_float(&mut self) -> Result<f32, Error> {
        self.reader.read_f32()
    }

    pub fn read_double(&mut self) -> Result<f64, Error> {
        self.reader.read_f64()
    }

    pub fn read_string(&mut self) -> Result<String, Error> {
        self.reader.read_utf8_string()
    }

    pub fn read_wstring(&mut self) -> Result<String, Error> {
        self.reader.read_utf16_string()
    }

    fn read_container_tag(&mut self) -> Result<BondDataType, Error> {
        let tag = BondDataType::from_wire(self.reader.read_u8()?)?;
        ensure!(
            !tag.is_stop() && tag != BondDataType::BT_UNAVAILABLE,
            Error::deserialization(format!("Invalid container element type: {tag:?}"))
        );
        Ok(tag)
    }

    fn read_count(&mut self) -> Result<usize, Error> {
        let count = self.reader.read_varuint32()? as usize;
        // every element occupies at least one byte
        ensure!(
            count <= self.reader.remaining(),
            Error::deserialization(format!(
                "Container count {count} exceeds remaining {} bytes",
                self.reader.remaining()
            ))
        );
        Ok(count)
    }

    /// Consumes one value of wire type `tag` using only its wire shape.
    ///
    /// `depth_budget` bounds how many struct and container levels may be entered.
    pub fn skip(&mut self, tag: BondDataType, depth_budget: u32) -> Result<(), Error> {
        match tag {
            BondDataType::BT_BOOL | BondDataType::BT_UINT8 | BondDataType::BT_INT8 => {
                self.reader.skip(1)
            }
            BondDataType::BT_UINT16 | BondDataType::BT_INT16 => {
                self.reader.read_varuint16().map(|_| ())
            }
            BondDataType::BT_UINT32 | BondDataType::BT_INT32 => {
                self.reader.read_varuint32().map(|_| ())
            }
            BondDataType::BT_UINT64 | BondDataType::BT_INT64 => {
                self.reader.read_varuint64().map(|_| ())
            }
            BondDataType::BT_FLOAT => self.reader.skip(4),
            BondDataType::BT_DOUBLE => self.reader.skip(8),
            BondDataType::BT_STRING => {
                let len = self.reader.read_varuint32()? as usize;
                self.reader.skip(len)
            }
            BondDataType::BT_WSTRING => {
                let count = self.reader.read_varuint32()? as usize;
                self.reader.skip(count.saturating_mul(2))
            }
            BondDataType::BT_STRUCT => self.skip_struct(depth_budget),
            BondDataType::BT_LIST | BondDataType::BT_SET => {
                let depth_budget = enter_container(depth_budget)?;
                let element = self.read_container_tag()?;
                let count = self.read_count()?;
                for _ in 0..count {
                    self.skip(element, depth_budget)?;
                }
                Ok(())
            }
            BondDataType::BT_MAP => {
                let depth_budget = enter_container(depth_budget)?;
                let key = self.read_container_tag()?;
                let value = self.read_container_tag()?;
                let count = self.read_count()?;
                for _ in 0..count {
                    self.skip(key, depth_budget)?;
                    self.skip(value, depth_budget)?;
                }
                Ok(())
            }
            BondDataType::BT_STOP | BondDataType::BT_STOP_BASE | BondDataType::BT_UNAVAILABLE => {
                Err(Error::deserialization(format!("Cannot skip value of type {tag:?}")))
            }
        }
    }

    /// Consumes a complete struct body, all hierarchy levels included,
    /// up to and including its final `BT_STOP`.
    pub fn skip_struct(&mut self, depth_budget: u32) -> Result<(), Error> {
        ensure!(
            depth_budget > 0,
            Error::depth_exceed("Maximum struct nesting depth exceeded while skipping")
        );
        self.skip_to_struct_end(depth_budget - 1)
    }

    /// Consumes the rest of the current struct body, remaining hierarchy
    /// levels included, up to and including its final `BT_STOP`.
    pub fn skip_to_struct_end(&mut self, depth_budget: u32) -> Result<(), Error> {
        loop {
            let field = self.read_field_begin()?;
            match field.tag {
                BondDataType::BT_STOP => return Ok(()),
                BondDataType::BT_STOP_BASE => continue,
                tag => {
                    self.skip(tag, depth_budget)?;
                    self.read_field_end();
                }
            }
        }
    }
}

/// Charges one container level against the nesting budget.
#[inline(always)]
fn enter_container(depth_budget: u32) -> Result<u32, Error> {
    ensure!(
        depth_budget > 0,
        Error::depth_exceed("Maximum container nesting depth exceeded while skipping")
    );
    Ok(depth_budget - 1)
}
