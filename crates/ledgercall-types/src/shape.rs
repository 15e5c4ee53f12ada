//! # Return Shapes
//!
//! Declared return types are explicit decode descriptors, supplied with
//! the interface declaration and never inferred at call time. The call
//! mode of a method is derived purely from its declared return shape,
//! not from contract metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SCALAR TYPES
// =============================================================================

/// A scalar leaf type, resolved through the converter registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarType {
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 256-bit integer.
    U256,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Str,
    /// 20-byte address.
    Address,
    /// Opaque byte payload.
    Bytes,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U256 => "u256",
            Self::Bool => "bool",
            Self::Str => "string",
            Self::Address => "address",
            Self::Bytes => "bytes",
        };
        f.write_str(label)
    }
}

// =============================================================================
// TARGET TYPES
// =============================================================================

/// A declared return shape: the decode descriptor the reconstructor
/// rebuilds results against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TargetType {
    /// Void return.
    Unit,
    /// Async wrapper around an inner shape.
    Async(Box<TargetType>),
    /// Fixed-kind array of an element shape.
    Array(Box<TargetType>),
    /// Ordered collection. `None` models a collection declared without
    /// its element parameter; decoding such a shape is a malformed
    /// generic declaration.
    List(Option<Box<TargetType>>),
    /// A scalar leaf.
    Scalar(ScalarType),
    /// A composite value object with statically declared initializers.
    Composite(CompositeShape),
}

impl TargetType {
    /// Convenience constructor for an async-wrapped shape.
    #[must_use]
    pub fn asynchronous(inner: TargetType) -> Self {
        Self::Async(Box::new(inner))
    }

    /// Convenience constructor for a well-formed collection shape.
    #[must_use]
    pub fn list_of(element: TargetType) -> Self {
        Self::List(Some(Box::new(element)))
    }

    /// Convenience constructor for an array shape.
    #[must_use]
    pub fn array_of(element: TargetType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Human-readable shape label for error payloads.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Unit => "unit".to_string(),
            Self::Async(inner) => format!("async<{}>", inner.describe()),
            Self::Array(elem) => format!("array<{}>", elem.describe()),
            Self::List(Some(elem)) => format!("list<{}>", elem.describe()),
            Self::List(None) => "list<?>".to_string(),
            Self::Scalar(scalar) => scalar.to_string(),
            Self::Composite(shape) => shape.name.clone(),
        }
    }
}

// =============================================================================
// COMPOSITE SHAPES
// =============================================================================

/// An ordered parameter-shape list: one way to instantiate a composite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Initializer {
    /// Parameter shapes, in declaration order.
    pub params: Vec<TargetType>,
}

impl Initializer {
    /// Creates an initializer from its parameter shapes.
    #[must_use]
    pub fn new(params: Vec<TargetType>) -> Self {
        Self { params }
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// The statically declared decode descriptor of a composite value type.
///
/// Reconstruction requires exactly one initializer of nonzero arity
/// whose parameter count equals the wire sequence length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeShape {
    /// The composite type name, used in reconstructed values and errors.
    pub name: String,
    /// All declared initializers, including any zero-arity one.
    pub initializers: Vec<Initializer>,
}

impl CompositeShape {
    /// Creates a composite shape with a single initializer.
    #[must_use]
    pub fn with_fields(name: impl Into<String>, fields: Vec<TargetType>) -> Self {
        Self {
            name: name.into(),
            initializers: vec![Initializer::new(fields)],
        }
    }

    /// All initializers of nonzero arity.
    pub fn constructing_initializers(&self) -> impl Iterator<Item = &Initializer> {
        self.initializers.iter().filter(|init| init.arity() > 0)
    }
}

// =============================================================================
// CALL MODE
// =============================================================================

/// How an invocation is carried out, derived purely from the declared
/// return shape of the invoked method.
///
/// This mapping is public contract:
/// void ⇒ fire-and-forget, async-wrapped ⇒ awaited mutating call,
/// anything else ⇒ synchronous read call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallMode {
    /// Submit a mutating call and return immediately, never decoding.
    FireAndForget,
    /// Submit a mutating call and resolve the decoded result later.
    AsyncResult,
    /// Perform a synchronous read-only call and decode its result.
    SyncRead,
}

impl CallMode {
    /// Derives the call mode from a declared return shape.
    #[must_use]
    pub fn of(shape: &TargetType) -> Self {
        match shape {
            TargetType::Unit => Self::FireAndForget,
            TargetType::Async(_) => Self::AsyncResult,
            _ => Self::SyncRead,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
