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

//! # Bond
//!
//! Schema-driven tagged binary serialization with lazily decoded `bonded<T>`
//! struct payloads.
//!
//! Schemas are described at runtime with [`StructBondType::builder`]; values
//! are dynamic [`StructValue`]s keyed by field ordinal.
//!
//! ```rust
//! use bond::{Bond, BondType, Error, Modifier, StructBondType, StructValue, Value};
//!
//! # fn main() -> Result<(), Error> {
//! let record = StructBondType::builder("demo.Record")
//!     .field(0, "id", Modifier::Required, BondType::uint64())
//!     .field_with_default(1, "label", Modifier::Optional, BondType::string(), "none")
//!     .build()?;
//!
//! let bond = Bond::default();
//! let bytes = bond.serialize(&record, &StructValue::new().with(0, 7u64))?;
//! let back = bond.deserialize(&record, &bytes)?;
//! assert_eq!(back.get(1), Some(&Value::String("none".to_string())));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures inside nested fields carry the field trail from the outermost
//! struct down:
//!
//! ```rust
//! use bond::{Bond, BondType, Modifier, StructBondType, StructValue};
//!
//! let inner = StructBondType::builder("demo.Inner")
//!     .field(3, "must", Modifier::Required, BondType::int32())
//!     .build()
//!     .unwrap();
//! let outer = StructBondType::builder("demo.Outer")
//!     .field(1, "inner", Modifier::Optional, &inner)
//!     .build()
//!     .unwrap();
//!
//! let value = StructValue::new().with(1, StructValue::new());
//! let err = Bond::default().serialize(&outer, &value).unwrap_err();
//! assert!(err.is_value_validation());
//! let trail: Vec<u16> = err.field_path().iter().map(|f| f.id).collect();
//! assert_eq!(trail, vec![1, 3]);
//! ```

pub use bond_core::{
    error::Error, Bond, BondDataType, BondType, Bonded, BondedBondType, Config, FieldDef,
    FieldRef, Metadata, Modifier, PrimitiveType, SchemaDef, StructBondType, StructBuilder,
    StructDef, StructDefResolver, StructField, StructValue, TypeCache, TypeDef, Value, Variant,
};
