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

//! Lazily decoded struct payloads.

use crate::config::Config;
use crate::error::Error;
use crate::protocol::TaggedReader;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::struct_::StructBondType;
use crate::value::StructValue;
use crate::ensure;
use log::trace;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Value of a `bonded<T>` field.
///
/// A bonded value either holds a decoded struct instance or the captured
/// bytes of exactly one complete struct encoding together with the
/// descriptor that decodes them. Decoding captured bytes happens on the first
/// call to [`Bonded::materialize`] and the result is shared from then on.
#[derive(Clone)]
pub enum Bonded {
    Materialized {
        value_type: StructBondType,
        value: StructValue,
    },
    Deferred(Arc<DeferredStruct>),
}

/// Captured encoding of one struct, decoded on demand.
pub struct DeferredStruct {
    value_type: StructBondType,
    bytes: Arc<[u8]>,
    config: Config,
    decoded: OnceLock<StructValue>,
}

/// Decodes `bytes` as exactly one struct body of `value_type`.
fn decode_struct(
    value_type: &StructBondType,
    bytes: &[u8],
    config: &Config,
) -> Result<StructValue, Error> {
    let mut context = ReadContext::new(config, bytes);
    let value = value_type.deserialize_struct(&mut context)?;
    ensure!(
        context.reader.is_exhausted(),
        Error::deserialization(format!(
            "{} trailing bytes after the bonded {} payload",
            context.reader.remaining(),
            value_type.qualified_name()
        ))
    );
    Ok(value)
}

impl Bonded {
    pub fn new(value_type: StructBondType, value: StructValue) -> Bonded {
        Bonded::Materialized { value_type, value }
    }

    /// Wraps bytes already known to hold one complete struct body.
    pub(crate) fn deferred(value_type: StructBondType, bytes: Arc<[u8]>, config: Config) -> Bonded {
        Bonded::Deferred(Arc::new(DeferredStruct {
            value_type,
            bytes,
            config,
            decoded: OnceLock::new(),
        }))
    }

    /// Captures an encoded struct body without decoding it.
    ///
    /// The framing is checked up front: `bytes` must hold exactly one struct
    /// body. Field values are only checked by [`Bonded::materialize`].
    pub fn from_bytes(
        value_type: StructBondType,
        bytes: impl Into<Arc<[u8]>>,
        config: &Config,
    ) -> Result<Bonded, Error> {
        let bytes = bytes.into();
        let mut reader = TaggedReader::new(&bytes);
        reader.skip_struct(config.max_depth())?;
        ensure!(
            reader.is_exhausted(),
            Error::deserialization(format!(
                "{} trailing bytes after the struct body",
                reader.remaining()
            ))
        );
        Ok(Bonded::deferred(value_type, bytes, config.clone()))
    }

    pub fn value_type(&self) -> &StructBondType {
        match self {
            Bonded::Materialized { value_type, .. } => value_type,
            Bonded::Deferred(deferred) => &deferred.value_type,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Bonded::Deferred(_))
    }

    /// Captured encoding, if this value was read lazily.
    pub fn captured_bytes(&self) -> Option<&[u8]> {
        match self {
            Bonded::Materialized { .. } => None,
            Bonded::Deferred(deferred) => Some(&deferred.bytes),
        }
    }

    /// The struct instance, decoding captured bytes on first use.
    ///
    /// Concurrent first calls may decode independently; all of them observe
    /// the first stored result. A failed decode is not memoized.
    pub fn materialize(&self) -> Result<&StructValue, Error> {
        match self {
            Bonded::Materialized { value, .. } => Ok(value),
            Bonded::Deferred(deferred) => {
                if let Some(value) = deferred.decoded.get() {
                    return Ok(value);
                }
                let value =
                    decode_struct(&deferred.value_type, &deferred.bytes, &deferred.config)?;
                Ok(deferred.decoded.get_or_init(|| value))
            }
        }
    }

    pub fn into_value(self) -> Result<StructValue, Error> {
        match self {
            Bonded::Materialized { value, .. } => Ok(value),
            Bonded::Deferred(deferred) => match Arc::try_unwrap(deferred) {
                Ok(DeferredStruct {
                    value_type,
                    bytes,
                    config,
                    decoded,
                }) => match decoded.into_inner() {
                    Some(value) => Ok(value),
                    None => decode_struct(&value_type, &bytes, &config),
                },
                Err(shared) => {
                    let bonded = Bonded::Deferred(shared);
                    let value = bonded.materialize()?.clone();
                    Ok(value)
                }
            },
        }
    }

    /// Writes the payload as a struct body: materialized values through the
    /// struct codec, captured bytes verbatim.
    pub fn forward(&self, context: &mut WriteContext) -> Result<(), Error> {
        match self {
            Bonded::Materialized { value_type, value } => {
                value_type.serialize_struct(context, value)
            }
            Bonded::Deferred(deferred) => {
                trace!(
                    "Passing through {} captured bytes of {}",
                    deferred.bytes.len(),
                    deferred.value_type.qualified_name()
                );
                context.writer.write_raw(&deferred.bytes);
                Ok(())
            }
        }
    }
}

impl PartialEq for Bonded {
    fn eq(&self, other: &Self) -> bool {
        if self.value_type() != other.value_type() {
            return false;
        }
        if let (Some(a), Some(b)) = (self.captured_bytes(), other.captured_bytes()) {
            if a == b {
                return true;
            }
        }
        match (self.materialize(), other.materialize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Bonded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bonded::Materialized { value_type, value } => f
                .debug_struct("Materialized")
                .field("value_type", &value_type.qualified_name())
                .field("value", value)
                .finish(),
            Bonded::Deferred(deferred) => f
                .debug_struct("Deferred")
                .field("value_type", &deferred.value_type.qualified_name())
                .field("len", &deferred.bytes.len())
                .field("decoded", &deferred.decoded.get().is_some())
                .finish(),
        }
    }
}
