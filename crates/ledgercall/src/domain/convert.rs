//! # Type Conversion Registry
//!
//! Ordered scalar converters between wire values and reconstructed
//! values. Handler order is fixed at construction and the first handler
//! whose `matches` accepts the target wins, so resolution is
//! deterministic for a given registry.
//!
//! Only decoded results pass through the registry; outbound call
//! arguments go to the function encoder unmodified.

use crate::errors::ConversionError;
use ledgercall_types::{Bytes, ScalarType, TargetType, Value, WireValue, U256};

// =============================================================================
// HANDLER CAPABILITY
// =============================================================================

/// A scalar converter: recognizes a target shape, decodes a wire value
/// into it, and encodes a reconstructed value back to wire form.
pub trait TypeHandler: Send + Sync {
    /// Whether this handler converts the given target shape.
    fn matches(&self, target: &TargetType) -> bool;

    /// Decodes a single wire value into the target representation.
    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError>;

    /// Encodes a reconstructed value back to wire form.
    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError>;
}

fn shape_mismatch(expected: &str, wire: &WireValue) -> ConversionError {
    ConversionError::ValueShapeMismatch {
        expected: expected.to_string(),
        actual: wire.kind().to_string(),
    }
}

fn value_mismatch(expected: &str, value: &Value) -> ConversionError {
    ConversionError::ValueShapeMismatch {
        expected: expected.to_string(),
        actual: value.kind().to_string(),
    }
}

// =============================================================================
// STANDARD HANDLERS
// =============================================================================

/// Signed 32-bit integers. Accepts in-range wire ints and uints.
pub struct I32Handler;

impl TypeHandler for I32Handler {
    fn matches(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Scalar(ScalarType::I32))
    }

    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match wire {
            WireValue::Int(i) => i32::try_from(*i)
                .map(Value::I32)
                .map_err(|_| shape_mismatch("i32-ranged int", wire)),
            WireValue::Uint(u) if *u <= U256::from(i32::MAX) => Ok(Value::I32(u.as_u32() as i32)),
            other => Err(shape_mismatch("i32", other)),
        }
    }

    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError> {
        match value {
            Value::I32(i) => Ok(WireValue::Int(i64::from(*i))),
            other => Err(value_mismatch("i32", other)),
        }
    }
}

/// Signed 64-bit integers. Accepts in-range wire ints and uints.
pub struct I64Handler;

impl TypeHandler for I64Handler {
    fn matches(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Scalar(ScalarType::I64))
    }

    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match wire {
            WireValue::Int(i) => Ok(Value::I64(*i)),
            WireValue::Uint(u) if *u <= U256::from(i64::MAX) => Ok(Value::I64(u.as_u64() as i64)),
            other => Err(shape_mismatch("i64", other)),
        }
    }

    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError> {
        match value {
            Value::I64(i) => Ok(WireValue::Int(*i)),
            other => Err(value_mismatch("i64", other)),
        }
    }
}

/// Unsigned 256-bit integers.
pub struct U256Handler;

impl TypeHandler for U256Handler {
    fn matches(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Scalar(ScalarType::U256))
    }

    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match wire {
            WireValue::Uint(u) => Ok(Value::U256(*u)),
            WireValue::Int(i) if *i >= 0 => Ok(Value::U256(U256::from(*i as u64))),
            other => Err(shape_mismatch("u256", other)),
        }
    }

    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError> {
        match value {
            Value::U256(u) => Ok(WireValue::Uint(*u)),
            other => Err(value_mismatch("u256", other)),
        }
    }
}

/// UTF-8 strings.
pub struct StrHandler;

impl TypeHandler for StrHandler {
    fn matches(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Scalar(ScalarType::Str))
    }

    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match wire {
            WireValue::Str(s) => Ok(Value::Str(s.clone())),
            other => Err(shape_mismatch("string", other)),
        }
    }

    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError> {
        match value {
            Value::Str(s) => Ok(WireValue::Str(s.clone())),
            other => Err(value_mismatch("string", other)),
        }
    }
}

/// Booleans. Execution engines report these as 0/1 integers at times.
pub struct BoolHandler;

impl TypeHandler for BoolHandler {
    fn matches(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Scalar(ScalarType::Bool))
    }

    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match wire {
            WireValue::Bool(b) => Ok(Value::Bool(*b)),
            WireValue::Uint(u) if u.is_zero() => Ok(Value::Bool(false)),
            WireValue::Uint(u) if *u == U256::one() => Ok(Value::Bool(true)),
            WireValue::Int(0) => Ok(Value::Bool(false)),
            WireValue::Int(1) => Ok(Value::Bool(true)),
            other => Err(shape_mismatch("bool", other)),
        }
    }

    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError> {
        match value {
            Value::Bool(b) => Ok(WireValue::Bool(*b)),
            other => Err(value_mismatch("bool", other)),
        }
    }
}

/// 20-byte addresses.
pub struct AddressHandler;

impl TypeHandler for AddressHandler {
    fn matches(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Scalar(ScalarType::Address))
    }

    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match wire {
            WireValue::Address(a) => Ok(Value::Address(*a)),
            other => Err(shape_mismatch("address", other)),
        }
    }

    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError> {
        match value {
            Value::Address(a) => Ok(WireValue::Address(*a)),
            other => Err(value_mismatch("address", other)),
        }
    }
}

/// Opaque byte payloads.
pub struct BytesHandler;

impl TypeHandler for BytesHandler {
    fn matches(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Scalar(ScalarType::Bytes))
    }

    fn decode(&self, wire: &WireValue) -> Result<Value, ConversionError> {
        match wire {
            WireValue::Bytes(b) => Ok(Value::Bytes(b.clone())),
            other => Err(shape_mismatch("bytes", other)),
        }
    }

    fn encode(&self, value: &Value) -> Result<WireValue, ConversionError> {
        match value {
            Value::Bytes(b) => Ok(WireValue::Bytes(Bytes::from_slice(b.as_slice()))),
            other => Err(value_mismatch("bytes", other)),
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The ordered set of scalar converters.
///
/// The handler list is fixed at construction; there is no dynamic
/// reordering or later registration.
pub struct ConverterRegistry {
    handlers: Vec<Box<dyn TypeHandler>>,
}

impl ConverterRegistry {
    /// The standard handler set, in resolution order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            handlers: vec![
                Box::new(I32Handler),
                Box::new(I64Handler),
                Box::new(U256Handler),
                Box::new(StrHandler),
                Box::new(BoolHandler),
                Box::new(AddressHandler),
                Box::new(BytesHandler),
            ],
        }
    }

    /// A registry with an explicit handler list. Order is significant:
    /// the first handler whose `matches` accepts a target wins.
    #[must_use]
    pub fn with_handlers(handlers: Vec<Box<dyn TypeHandler>>) -> Self {
        Self { handlers }
    }

    /// Resolves the first handler matching the target, if any.
    #[must_use]
    pub fn resolve(&self, target: &TargetType) -> Option<&dyn TypeHandler> {
        self.handlers
            .iter()
            .find(|h| h.matches(target))
            .map(AsRef::as_ref)
    }

    /// Decodes a single wire value against a scalar target.
    ///
    /// # Errors
    ///
    /// `NoHandlerForType` when no handler matches the target.
    pub fn decode_scalar(
        &self,
        target: &TargetType,
        wire: &WireValue,
    ) -> Result<Value, ConversionError> {
        let handler = self
            .resolve(target)
            .ok_or_else(|| ConversionError::NoHandlerForType {
                target: target.describe(),
            })?;
        handler.decode(wire)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// TESTS
// =============================================================================
