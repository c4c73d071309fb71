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

//! Error type shared by every codec in this crate.
//!
//! Errors are created exclusively through the static constructors on
//! [`Error`]. The constructors are `#[cold]` so the happy path of every buffer
//! read and field dispatch stays small; keep the attributes when adding new
//! ones.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::types::BondDataType;

/// Set `BOND_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("BOND_PANIC_ON_ERROR").is_some();

/// Identity of a struct field, attached to field-scoped errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRef {
    pub struct_name: String,
    pub field_name: String,
    pub id: u16,
}

impl FieldRef {
    pub fn new(struct_name: impl Into<String>, field_name: impl Into<String>, id: u16) -> Self {
        FieldRef {
            struct_name: struct_name.into(),
            field_name: field_name.into(),
            id,
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(#{})", self.struct_name, self.field_name, self.id)
    }
}

/// Error type for encoding, decoding and schema construction.
///
/// # IMPORTANT: Always Use Static Constructor Functions
///
/// Do not build variants directly; use [`Error::value_validation`],
/// [`Error::field_type_mismatch`], [`Error::struct_field_serialization`] and
/// friends so every error in the crate carries the same diagnostic payload.
///
/// ```rust
/// use bond_core::error::{Error, FieldRef};
/// use bond_core::types::BondDataType;
///
/// let field = FieldRef::new("demo.Outer", "payload", 1);
/// let err = Error::field_type_mismatch(BondDataType::BT_STRUCT, BondDataType::BT_LIST, field);
/// assert!(err.is_wire_type_mismatch());
/// assert_eq!(err.field_path()[0].field_name, "payload");
/// ```
///
/// ## Debug Mode: BOND_PANIC_ON_ERROR
///
/// ```bash
/// RUST_BACKTRACE=1 BOND_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An in-memory value violates its schema, or a decoded struct is
    /// internally inconsistent.
    ///
    /// Do not construct this variant directly; use [`Error::value_validation`] instead.
    #[error("{0}")]
    ValueValidation(Cow<'static, str>),

    /// The wire tag of a field differs from the tag its declared type expects.
    ///
    /// Do not construct this variant directly; use [`Error::field_type_mismatch`] instead.
    #[error("Wire type mismatch for field {field}: expected {expected:?}, actual {actual:?}")]
    WireTypeMismatch {
        expected: BondDataType,
        actual: BondDataType,
        field: FieldRef,
    },

    /// The byte stream is truncated or malformed.
    ///
    /// Do not construct this variant directly; use [`Error::deserialization`]
    /// or [`Error::buffer_out_of_bound`] instead.
    #[error("{0}")]
    Deserialization(Cow<'static, str>),

    /// A schema description is rejected at construction time.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_schema`] instead.
    #[error("{0}")]
    InvalidSchema(Cow<'static, str>),

    /// Maximum nesting depth exceeded.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// A nested value failed to serialize inside the given field.
    ///
    /// Do not construct this variant directly; use [`Error::struct_field_serialization`] instead.
    #[error("Failed to serialize field {field}: {source}")]
    StructFieldSerialization {
        field: FieldRef,
        #[source]
        source: Box<Error>,
    },

    /// A nested value failed to deserialize inside the given field.
    ///
    /// Do not construct this variant directly; use [`Error::struct_field_deserialization`] instead.
    #[error("Failed to deserialize field {field}: {source}")]
    StructFieldDeserialization {
        field: FieldRef,
        #[source]
        source: Box<Error>,
    },
}

macro_rules! message_constructor {
    ($(#[$doc:meta])* $fn_name:ident => $variant:ident) => {
        $(#[$doc])*
        #[inline(always)]
        #[cold]
        #[track_caller]
        pub fn $fn_name<S: Into<Cow<'static, str>>>(s: S) -> Self {
            let err = Error::$variant(s.into());
            if PANIC_ON_ERROR {
                panic!("BOND_PANIC_ON_ERROR: {}", err);
            }
            err
        }
    };
}

impl Error {
    message_constructor!(
        /// Creates a new [`Error::ValueValidation`].
        value_validation => ValueValidation
    );
    message_constructor!(
        /// Creates a new [`Error::Deserialization`].
        deserialization => Deserialization
    );
    message_constructor!(
        /// Creates a new [`Error::InvalidSchema`].
        invalid_schema => InvalidSchema
    );
    message_constructor!(
        /// Creates a new [`Error::DepthExceed`].
        depth_exceed => DepthExceed
    );

    /// Creates a [`Error::Deserialization`] describing a read past the end of the input.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        Self::deserialization(format!(
            "Buffer out of bound: {offset} + {length} > {capacity}"
        ))
    }

    /// Creates a [`Error::WireTypeMismatch`] naming the field whose header was read.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn field_type_mismatch(
        expected: BondDataType,
        actual: BondDataType,
        field: FieldRef,
    ) -> Self {
        let err = Error::WireTypeMismatch {
            expected,
            actual,
            field,
        };
        if PANIC_ON_ERROR {
            panic!("BOND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Wraps an error raised while encoding the value of `field`.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn struct_field_serialization(field: FieldRef, source: Error) -> Self {
        let err = Error::StructFieldSerialization {
            field,
            source: Box::new(source),
        };
        if PANIC_ON_ERROR {
            panic!("BOND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Wraps an error raised while decoding the value of `field`.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn struct_field_deserialization(field: FieldRef, source: Error) -> Self {
        let err = Error::StructFieldDeserialization {
            field,
            source: Box::new(source),
        };
        if PANIC_ON_ERROR {
            panic!("BOND_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// The innermost error beneath any field-scoped wrappers.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::StructFieldSerialization { source, .. }
        | Error::StructFieldDeserialization { source, .. } = current
        {
            current = source;
        }
        current
    }

    /// Field trail from the outermost struct down to the failing field.
    pub fn field_path(&self) -> Vec<&FieldRef> {
        let mut path = Vec::new();
        let mut current = self;
        loop {
            match current {
                Error::StructFieldSerialization { field, source }
                | Error::StructFieldDeserialization { field, source } => {
                    path.push(field);
                    current = source;
                }
                Error::WireTypeMismatch { field, .. } => {
                    path.push(field);
                    return path;
                }
                _ => return path,
            }
        }
    }

    /// Whether the error describes bad data rather than a misuse of the API.
    /// Only data errors get wrapped with field context.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Error::InvalidSchema(_) | Error::DepthExceed(_))
    }

    pub fn is_value_validation(&self) -> bool {
        matches!(self.root_cause(), Error::ValueValidation(_))
    }

    pub fn is_wire_type_mismatch(&self) -> bool {
        matches!(self.root_cause(), Error::WireTypeMismatch { .. })
    }

    pub fn is_deserialization(&self) -> bool {
        matches!(self.root_cause(), Error::Deserialization(_))
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// ```
/// use bond_core::ensure;
/// use bond_core::error::Error;
///
/// fn check(n: usize) -> Result<(), Error> {
///     ensure!(n < 10, Error::deserialization(format!("count {n} too large")));
///     Ok(())
/// }
/// assert!(check(20).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with a [`Error::ValueValidation`].
///
/// ```
/// use bond_core::bail;
/// use bond_core::error::Error;
///
/// fn fail_fast(id: u16) -> Result<(), Error> {
///     bail!("field {} is required", id);
/// }
/// assert!(fail_fast(1).unwrap_err().is_value_validation());
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal) => {
        return Err($crate::error::Error::value_validation($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::value_validation(format!($fmt, $($arg)*)))
    };
}
