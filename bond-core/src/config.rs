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

/// Configuration for encoding and decoding.
///
/// Shared by the [`Bond`](crate::Bond) engine and the per-operation
/// contexts so both directions see the same settings.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether bonded fields are captured as undecoded bytes on read.
    /// When disabled they are decoded eagerly into materialized values.
    pub lazy_bonded: bool,
    /// Maximum struct nesting depth accepted while decoding or skipping.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lazy_bonded: true,
            max_depth: 64,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_lazy_bonded(&self) -> bool {
        self.lazy_bonded
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
