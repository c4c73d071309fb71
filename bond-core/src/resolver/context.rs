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

use crate::buffer::Writer;
use crate::config::Config;
use crate::error::Error;
use crate::protocol::{ReadFieldResult, TaggedReader, TaggedWriter};

/// State of one encode operation.
#[derive(Default)]
pub struct WriteContext {
    pub writer: TaggedWriter,
}

impl WriteContext {
    pub fn new(writer: Writer) -> WriteContext {
        WriteContext {
            writer: TaggedWriter::new(writer),
        }
    }

    /// Returns the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner().into_bytes()
    }
}

/// State of one decode operation over a borrowed byte stream.
pub struct ReadContext<'de> {
    pub reader: TaggedReader<'de>,
    /// Header of the field whose value is being decoded.
    pub read_field_result: ReadFieldResult,
    config: &'de Config,
    current_depth: u32,
}

impl<'de> ReadContext<'de> {
    pub fn new(config: &'de Config, bytes: &'de [u8]) -> ReadContext<'de> {
        ReadContext {
            reader: TaggedReader::new(bytes),
            read_field_result: ReadFieldResult::default(),
            config,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &'de Config {
        self.config
    }

    #[inline(always)]
    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        if self.current_depth > self.config.max_depth() {
            self.current_depth -= 1;
            return Err(Error::depth_exceed(format!(
                "Maximum struct nesting depth {} exceeded",
                self.config.max_depth()
            )));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }

    /// Struct levels that may still be entered below the current one.
    #[inline(always)]
    pub fn depth_budget(&self) -> u32 {
        self.config.max_depth().saturating_sub(self.current_depth)
    }
}
