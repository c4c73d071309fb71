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

use crate::serializer::bonded::BondedBondType;
use crate::serializer::struct_::StructBondType;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent interning table for descriptors.
///
/// Equal descriptors requested from any thread come back as one shared
/// instance. Descriptor equality is structural, so callers that bypass the
/// cache still interoperate with interned instances.
#[derive(Clone, Default)]
pub struct TypeCache {
    structs: Arc<DashMap<StructBondType, StructBondType>>,
    bonded: Arc<DashMap<StructBondType, BondedBondType>>,
}

impl TypeCache {
    pub fn new() -> TypeCache {
        TypeCache::default()
    }

    /// Interned instance equal to `ty`.
    pub fn struct_type(&self, ty: StructBondType) -> StructBondType {
        self.structs.entry(ty.clone()).or_insert(ty).value().clone()
    }

    /// Interned bonded adapter over `value_type`.
    pub fn bonded_of(&self, value_type: &StructBondType) -> BondedBondType {
        let value_type = self.struct_type(value_type.clone());
        self.bonded
            .entry(value_type.clone())
            .or_insert_with(|| BondedBondType::new(&value_type))
            .value()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}
