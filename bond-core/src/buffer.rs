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
use byteorder::{ByteOrder, LittleEndian};

#[derive(Default)]
pub struct Writer {
    pub(crate) bf: Vec<u8>,
}

impl Writer {
    pub fn into_bytes(self) -> Vec<u8> {
        self.bf
    }

    pub fn write_bytes(&mut self, v: &[u8]) -> usize {
        self.bf.extend_from_slice(v);
        v.len()
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) {
        self.bf.push(value);
    }

    #[inline(always)]
    pub fn write_i8(&mut self, value: i8) {
        self.bf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        let mut b = [0u8; 2];
        LittleEndian::write_u16(&mut b, value);
        self.bf.extend_from_slice(&b);
    }

    pub fn write_f32(&mut self, value: f32) {
        let mut b = [0u8; 4];
        LittleEndian::write_f32(&mut b, value);
        self.bf.extend_from_slice(&b);
    }

    pub fn write_f64(&mut self, value: f64) {
        let mut b = [0u8; 8];
        LittleEndian::write_f64(&mut b, value);
        self.bf.extend_from_slice(&b);
    }

    pub fn write_varuint16(&mut self, value: u16) {
        self._write_varuint64(value as u64)
    }

    pub fn write_varuint32(&mut self, value: u32) {
        self._write_varuint64(value as u64)
    }

    pub fn write_varuint64(&mut self, value: u64) {
        self._write_varuint64(value)
    }

    pub fn write_varint16(&mut self, value: i16) {
        let zigzag = ((value << 1) ^ (value >> 15)) as u16;
        self._write_varuint64(zigzag as u64)
    }

    pub fn write_varint32(&mut self, value: i32) {
        let zigzag = ((value << 1) ^ (value >> 31)) as u32;
        self._write_varuint64(zigzag as u64)
    }

    pub fn write_varint64(&mut self, value: i64) {
        let zigzag = ((value << 1) ^ (value >> 63)) as u64;
        self._write_varuint64(zigzag)
    }

    fn _write_varuint64(&mut self, mut value: u64) {
        if value < 0x80 {
            self.write_u8(value as u8);
            return;
        }
        while value >= 0x80 {
            self.bf.push(((value as u8) & 0x7F) | 0x80);
            value >>= 7;
        }
        self.bf.push(value as u8);
    }

    pub fn write_utf8_string(&mut self, s: &str) -> Result<(), Error> {
        self.write_varuint32(length_prefix(s.len())?);
        self.bf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Writes `s` as a count of UTF-16 code units followed by the units in little endian.
    pub fn write_utf16_string(&mut self, s: &str) -> Result<(), Error> {
        let units: Vec<u16> = s.encode_utf16().collect();
        self.write_varuint32(length_prefix(units.len())?);
        self.bf.reserve(units.len() * 2);
        for unit in units {
            self.write_u16(unit);
        }
        Ok(())
    }
}

/// Length prefixes are varint-encoded `u32`s.
#[inline(always)]
pub(crate) fn length_prefix(len: usize) -> Result<u32, Error> {
    u32::try_from(len)
        .map_err(|_| Error::value_validation(format!("Length {len} does not fit a u32 prefix")))
}

pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    #[inline(always)]
    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.bf.len()
    }

    /// Bytes in `[start, end)` of the underlying input.
    pub fn slice(&self, start: usize, end: usize) -> Result<&'a [u8], Error> {
        self.bf
            .get(start..end)
            .ok_or_else(|| Error::buffer_out_of_bound(start, end.saturating_sub(start), self.bf.len()))
    }

    #[inline(always)]
    fn check_bound(&self, n: usize) -> Result<(), Error> {
        if n > self.remaining() {
            return Err(Error::buffer_out_of_bound(self.cursor, n, self.bf.len()));
        }
        Ok(())
    }

    #[inline(always)]
    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        self.check_bound(n)?;
        let s = &self.bf[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(s)
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.check_bound(1)?;
        let result = self.bf[self.cursor];
        self.cursor += 1;
        Ok(result)
    }

    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    fn read_varuint(&mut self, max_bits: u32) -> Result<u64, Error> {
        let start = self.cursor;
        let mut result: u64 = 0;
        let mut shift = 0u32;
        loop {
            let b = self.read_u8()?;
            // the tenth byte of a 64-bit varint holds a single bit
            if shift == 63 && b > 1 {
                return Err(Error::deserialization(format!(
                    "Varint at offset {start} exceeds {max_bits} bits"
                )));
            }
            result |= ((b & 0x7F) as u64) << shift;
            if b < 0x80 {
                break;
            }
            shift += 7;
            if shift >= max_bits {
                return Err(Error::deserialization(format!(
                    "Varint at offset {start} exceeds {max_bits} bits"
                )));
            }
        }
        if max_bits < 64 && result >> max_bits != 0 {
            return Err(Error::deserialization(format!(
                "Varint at offset {start} exceeds {max_bits} bits"
            )));
        }
        Ok(result)
    }

    pub fn read_varuint16(&mut self) -> Result<u16, Error> {
        Ok(self.read_varuint(16)? as u16)
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        Ok(self.read_varuint(32)? as u32)
    }

    pub fn read_varuint64(&mut self) -> Result<u64, Error> {
        self.read_varuint(64)
    }

    pub fn read_varint16(&mut self) -> Result<i16, Error> {
        let encoded = self.read_varuint16()?;
        Ok(((encoded >> 1) as i16) ^ -((encoded & 1) as i16))
    }

    pub fn read_varint32(&mut self) -> Result<i32, Error> {
        let encoded = self.read_varuint32()?;
        Ok(((encoded >> 1) as i32) ^ -((encoded & 1) as i32))
    }

    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        let encoded = self.read_varuint64()?;
        Ok(((encoded >> 1) as i64) ^ -((encoded & 1) as i64))
    }

    pub fn read_utf8_string(&mut self) -> Result<String, Error> {
        let len = self.read_varuint32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::deserialization(format!("Invalid utf8 string: {e}")))
    }

    pub fn read_utf16_string(&mut self) -> Result<String, Error> {
        let count = self.read_varuint32()? as usize;
        let bytes = self.take(count.checked_mul(2).ok_or_else(|| {
            Error::deserialization(format!("Invalid wstring length {count}"))
        })?)?;
        let units: Vec<u16> = bytes.chunks_exact(2).map(LittleEndian::read_u16).collect();
        String::from_utf16(&units)
            .map_err(|e| Error::deserialization(format!("Invalid utf16 string: {e}")))
    }

    pub fn skip(&mut self, len: usize) -> Result<(), Error> {
        self.check_bound(len)?;
        self.cursor += len;
        Ok(())
    }
}
