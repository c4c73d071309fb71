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
use crate::meta::{SchemaDef, StructDef, TypeDef};
use crate::serializer::struct_::StructBondType;
use crate::serializer::BondType;
use log::debug;
use std::collections::HashMap;

/// Deduplicating registry of struct definitions built during schema export.
///
/// A struct is registered before its fields are visited, so recursive
/// references resolve to the index of the definition under construction.
#[derive(Default)]
pub struct StructDefResolver {
    indices: HashMap<StructBondType, u16>,
    struct_defs: Vec<StructDef>,
}

impl StructDefResolver {
    pub fn new() -> StructDefResolver {
        StructDefResolver::default()
    }

    /// Index of the definition of `ty`, registering it on first sight.
    pub fn resolve(&mut self, ty: &StructBondType) -> Result<u16, Error> {
        if let Some(&index) = self.indices.get(ty) {
            return Ok(index);
        }
        let index = u16::try_from(self.struct_defs.len()).map_err(|_| {
            Error::invalid_schema(format!(
                "Too many struct definitions while registering {}",
                ty.qualified_name()
            ))
        })?;
        self.indices.insert(ty.clone(), index);
        self.struct_defs.push(StructDef::default());
        debug!(
            "Registered struct definition {} at index {}",
            ty.qualified_name(),
            index
        );
        let def = ty.create_struct_def(self)?;
        self.struct_defs[index as usize] = def;
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.struct_defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.struct_defs.is_empty()
    }

    pub fn into_schema(self, root: TypeDef) -> SchemaDef {
        SchemaDef {
            structs: self.struct_defs,
            root,
        }
    }

    /// Exports the schema rooted at `ty`.
    pub fn schema_of(ty: &BondType) -> Result<SchemaDef, Error> {
        let mut resolver = StructDefResolver::new();
        let root = ty.create_schema_type_def(&mut resolver)?;
        Ok(resolver.into_schema(root))
    }
}
