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
use crate::buffer::Writer;
use crate::config::Config;
use crate::ensure;
use crate::error::Error;
use crate::meta::SchemaDef;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::schema_resolver::StructDefResolver;
use crate::resolver::type_cache::TypeCache;
use crate::serializer::{BondType, BondedBondType, StructBondType};
use crate::value::StructValue;

/// Entry point for encoding and decoding struct payloads.
///
/// A `Bond` holds the [`Config`] applied to every operation and a
/// [`TypeCache`] that interns descriptors. It is cheap to clone and can be
/// shared across threads.
///
/// # Examples
///
/// ```rust
/// use bond_core::{Bond, BondType, Modifier, StructBondType, StructValue};
///
/// let point = StructBondType::builder("geo.Point")
///     .field(0, "x", Modifier::Required, BondType::int32())
///     .field(1, "y", Modifier::Required, BondType::int32())
///     .build()
///     .unwrap();
/// let bond = Bond::default().max_depth(16);
/// let value = StructValue::new().with(0, 3i32).with(1, -4i32);
/// let bytes = bond.serialize(&point, &value).unwrap();
/// assert_eq!(bond.deserialize(&point, &bytes).unwrap(), value);
/// ```
#[derive(Clone, Default)]
pub struct Bond {
    config: Config,
    type_cache: TypeCache,
}

impl Bond {
    /// Sets whether `bonded<T>` fields are captured undecoded on read.
    ///
    /// Enabled by default. When disabled, bonded fields are decoded eagerly
    /// and come back materialized.
    pub fn lazy_bonded(mut self, lazy_bonded: bool) -> Self {
        self.config.lazy_bonded = lazy_bonded;
        self
    }

    /// Sets the maximum struct nesting depth accepted on read. Defaults to 64.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn type_cache(&self) -> &TypeCache {
        &self.type_cache
    }

    /// Interned `bonded<T>` descriptor.
    pub fn bonded_of(&self, value_type: &StructBondType) -> BondedBondType {
        self.type_cache.bonded_of(value_type)
    }

    /// Interned struct descriptor equal to `ty`.
    pub fn struct_type(&self, ty: StructBondType) -> StructBondType {
        self.type_cache.struct_type(ty)
    }

    pub fn serialize(&self, ty: &StructBondType, value: &StructValue) -> Result<Vec<u8>, Error> {
        let mut context = WriteContext::new(Writer::default());
        ty.serialize_struct(&mut context, value)?;
        Ok(context.finish())
    }

    /// Decodes one struct body spanning all of `bytes`.
    pub fn deserialize(&self, ty: &StructBondType, bytes: &[u8]) -> Result<StructValue, Error> {
        let mut context = ReadContext::new(&self.config, bytes);
        let value = ty.deserialize_struct(&mut context)?;
        ensure!(
            context.reader.is_exhausted(),
            Error::deserialization(format!(
                "{} trailing bytes after struct {}",
                context.reader.remaining(),
                ty.qualified_name()
            ))
        );
        Ok(value)
    }

    /// Encodes a bonded value as a standalone struct body.
    pub fn serialize_bonded(&self, bonded: &Bonded) -> Result<Vec<u8>, Error> {
        let mut context = WriteContext::new(Writer::default());
        bonded.forward(&mut context)?;
        Ok(context.finish())
    }

    /// Reads a standalone struct body as a bonded value, honoring
    /// [`Config::lazy_bonded`].
    pub fn deserialize_bonded(&self, ty: &StructBondType, bytes: &[u8]) -> Result<Bonded, Error> {
        if self.config.is_lazy_bonded() {
            Bonded::from_bytes(ty.clone(), bytes, &self.config)
        } else {
            Ok(Bonded::new(ty.clone(), self.deserialize(ty, bytes)?))
        }
    }

    /// Exports the schema rooted at `ty`.
    pub fn schema_of(&self, ty: &BondType) -> Result<SchemaDef, Error> {
        StructDefResolver::schema_of(ty)
    }
}
