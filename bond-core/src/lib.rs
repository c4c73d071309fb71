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

//! # Bond Core
//!
//! Runtime type descriptors for a schema-driven tagged binary protocol, with
//! lazily decoded `bonded<T>` struct payloads.
//!
//! ## Architecture
//!
//! - **`bond`**: the [`Bond`] engine, entry point for whole-message operations
//! - **`buffer`**: little-endian byte cursors with varint support
//! - **`protocol`**: field headers, stop markers and shape-based skipping
//! - **`serializer`**: the [`BondType`] descriptors (primitives, structs, bonded)
//! - **`bonded`**: the [`Bonded`] value, materialized or deferred
//! - **`value`**: the dynamic [`Value`] and [`StructValue`] model
//! - **`meta`**: exported schema definitions
//! - **`resolver`**: per-operation contexts, schema registry, type cache
//! - **`error`**: the [`Error`] type and its constructors
//!
//! ## Bonded fields
//!
//! A field declared `bonded<T>` is encoded exactly like a plain `T` field.
//! On read its struct body is captured as bytes; decoding is deferred until
//! [`Bonded::materialize`] is called, and re-encoding an untouched value
//! copies the captured bytes verbatim.
//!
//! ```rust
//! use bond_core::{Bond, BondType, Modifier, StructBondType, StructValue, Value};
//!
//! let inner = StructBondType::builder("demo.Inner")
//!     .field(0, "name", Modifier::Optional, BondType::string())
//!     .build()
//!     .unwrap();
//! let outer = StructBondType::builder("demo.Outer")
//!     .field(0, "payload", Modifier::Optional, BondType::bonded_of(&inner))
//!     .build()
//!     .unwrap();
//!
//! let bond = Bond::default();
//! let payload = bond_core::Bonded::new(inner.clone(), StructValue::new().with(0, "hi"));
//! let bytes = bond
//!     .serialize(&outer, &StructValue::new().with(0, payload))
//!     .unwrap();
//!
//! let decoded = bond.deserialize(&outer, &bytes).unwrap();
//! let bonded = decoded.get(0).and_then(Value::as_bonded).unwrap();
//! assert!(bonded.is_deferred());
//! assert_eq!(
//!     bonded.materialize().unwrap().get(0),
//!     Some(&Value::String("hi".to_string()))
//! );
//! ```

pub mod bond;
pub mod bonded;
pub mod buffer;
pub mod config;
pub mod error;
pub mod meta;
pub mod protocol;
pub mod resolver;
pub mod serializer;
pub mod types;
pub mod value;

pub use crate::bond::Bond;
pub use crate::bonded::Bonded;
pub use crate::config::Config;
pub use crate::error::{Error, FieldRef};
pub use crate::meta::{FieldDef, Metadata, SchemaDef, StructDef, TypeDef, Variant};
pub use crate::resolver::schema_resolver::StructDefResolver;
pub use crate::resolver::type_cache::TypeCache;
pub use crate::serializer::{
    BondType, BondedBondType, PrimitiveType, StructBondType, StructBuilder, StructField,
};
pub use crate::types::{BondDataType, Modifier};
pub use crate::value::{StructValue, Value};
