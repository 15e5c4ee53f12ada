//! # Wire Model
//!
//! `WireValue` is the raw, positional output of ABI decoding; `Value` is
//! the reconstructed result tree handed back to callers. The
//! reconstruction from one to the other lives in the core crate; this
//! module only defines the shapes and the typed extraction surface.

use crate::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// WIRE VALUES
// =============================================================================

/// A raw decoded value as produced by ABI decoding, prior to conversion
/// into a target type.
///
/// Contract calls yield an ordered sequence of these; the sequence
/// length equals the invoked function's declared output arity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WireValue {
    /// An unsigned 256-bit integer.
    Uint(U256),
    /// A signed 64-bit integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// A UTF-8 string.
    Str(String),
    /// A 20-byte address.
    Address(Address),
    /// An opaque byte payload.
    Bytes(Bytes),
    /// A nested sequence (array or collection element payload).
    Seq(Vec<WireValue>),
}

impl WireValue {
    /// Short label for error payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Address(_) => "address",
            Self::Bytes(_) => "bytes",
            Self::Seq(_) => "sequence",
        }
    }
}

// =============================================================================
// RECONSTRUCTED VALUES
// =============================================================================

/// A reconstructed result: the typed tree built from a wire sequence
/// against a declared return shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// No value (void return).
    Unit,
    /// A signed 32-bit integer.
    I32(i32),
    /// A signed 64-bit integer.
    I64(i64),
    /// An unsigned 256-bit integer.
    U256(U256),
    /// A boolean.
    Bool(bool),
    /// A UTF-8 string.
    Str(String),
    /// A 20-byte address.
    Address(Address),
    /// An opaque byte payload.
    Bytes(Bytes),
    /// An ordered collection, element-wise reconstructed.
    List(Vec<Value>),
    /// A composite value object with in-order fields.
    Composite {
        /// Declared composite type name.
        name: String,
        /// Field values, in initializer order.
        fields: Vec<Value>,
    },
}

impl Value {
    /// Short label for error payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U256(_) => "u256",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Address(_) => "address",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Composite { .. } => "composite",
        }
    }
}

// =============================================================================
// TYPED EXTRACTION
// =============================================================================

/// A typed extraction failed because the value held a different kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("expected a {expected} value, found {found}")]
pub struct WrongValueKind {
    /// The kind the caller asked for.
    pub expected: &'static str,
    /// The kind the value actually held.
    pub found: &'static str,
}

impl WrongValueKind {
    fn new(expected: &'static str, value: &Value) -> Self {
        Self {
            expected,
            found: value.kind(),
        }
    }
}

macro_rules! extract_scalar {
    ($target:ty, $variant:ident, $label:literal) => {
        impl TryFrom<Value> for $target {
            type Error = WrongValueKind;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(WrongValueKind::new($label, &other)),
                }
            }
        }
    };
}

extract_scalar!(i32, I32, "i32");
extract_scalar!(i64, I64, "i64");
extract_scalar!(U256, U256, "u256");
extract_scalar!(bool, Bool, "bool");
extract_scalar!(String, Str, "string");
extract_scalar!(Address, Address, "address");
extract_scalar!(Bytes, Bytes, "bytes");

impl<T: TryFrom<Value, Error = WrongValueKind>> TryFrom<Value> for Vec<T> {
    type Error = WrongValueKind;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(WrongValueKind::new("list", &other)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
