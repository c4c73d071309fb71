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
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::struct_::StructField;
use crate::types::BondDataType;
use crate::value::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash of a descriptor identity. `DefaultHasher::new()` uses fixed keys, so
/// independently built descriptors with the same identity hash alike.
pub(crate) fn identity_hash<T: Hash + ?Sized>(kind: &str, identity: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    kind.hash(&mut hasher);
    identity.hash(&mut hasher);
    hasher.finish()
}

/// Value to encode for `field`, substituting the default for an unset
/// non-required field.
#[inline(always)]
pub(crate) fn resolve_field_value<'v>(
    value: Option<&'v Value>,
    field: &'v StructField,
) -> Result<&'v Value, Error> {
    match value {
        Some(v) => Ok(v),
        None if field.is_required() => Err(Error::struct_field_serialization(
            field.field_ref(),
            Error::value_validation("Required field is not set"),
        )),
        None => Ok(field.default_value()),
    }
}

/// Writes a field header followed by `write`'s payload, attaching the
/// field identity to any data error the payload raises.
#[inline(always)]
pub(crate) fn write_field_framed(
    context: &mut WriteContext,
    tag: BondDataType,
    field: &StructField,
    write: impl FnOnce(&mut WriteContext) -> Result<(), Error>,
) -> Result<(), Error> {
    context.writer.write_field_begin(tag, field.id());
    if let Err(e) = write(context) {
        return Err(wrap_serialization_error(field, e));
    }
    context.writer.write_field_end();
    Ok(())
}

/// Runs the nested value decoder for `field`, attaching the field identity
/// to any data error it raises.
#[inline(always)]
pub(crate) fn read_field_scoped<T>(
    context: &mut ReadContext,
    field: &StructField,
    read: impl FnOnce(&mut ReadContext) -> Result<T, Error>,
) -> Result<T, Error> {
    read(context).map_err(|e| wrap_deserialization_error(field, e))
}

#[cold]
fn wrap_serialization_error(field: &StructField, e: Error) -> Error {
    if e.is_data_error() {
        Error::struct_field_serialization(field.field_ref(), e)
    } else {
        e
    }
}

#[cold]
fn wrap_deserialization_error(field: &StructField, e: Error) -> Error {
    if e.is_data_error() {
        Error::struct_field_deserialization(field.field_ref(), e)
    } else {
        e
    }
}
