//! # Result Reconstruction
//!
//! Rebuilds arbitrary declared return shapes from the flat, positional
//! wire sequence a contract call produces: scalars through the
//! converter registry, collections element-wise, async wrappers by
//! unwrapping, composites through their single nonzero-arity
//! initializer, and any nesting of those.
//!
//! Decoding is total over the supported shapes: it terminates, and an
//! unsupported shape fails fast with a specific named error instead of
//! producing a wrong value.

use crate::domain::convert::ConverterRegistry;
use crate::errors::ConversionError;
use ledgercall_types::{CompositeShape, Initializer, TargetType, Value, WireValue};
use std::slice;
use std::sync::Arc;

/// The recursive decoder. Cheap to clone; shares its registry.
#[derive(Clone)]
pub struct ResultReconstructor {
    registry: Arc<ConverterRegistry>,
}

impl ResultReconstructor {
    /// Creates a reconstructor over the given registry.
    #[must_use]
    pub fn new(registry: Arc<ConverterRegistry>) -> Self {
        Self { registry }
    }

    /// The registry scalar leaves resolve through.
    #[must_use]
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Decodes a positional wire sequence against a declared shape.
    ///
    /// # Errors
    ///
    /// Every failure is a named [`ConversionError`]; see the crate-level
    /// error taxonomy.
    pub fn decode(&self, wire: &[WireValue], target: &TargetType) -> Result<Value, ConversionError> {
        match target {
            TargetType::Unit => Ok(Value::Unit),
            TargetType::Async(inner) => self.decode(wire, inner),
            TargetType::Array(elem) => self.decode_collection(wire, elem, target),
            TargetType::List(Some(elem)) => self.decode_collection(wire, elem, target),
            TargetType::List(None) => Err(ConversionError::MalformedGenericDeclaration {
                target: target.describe(),
            }),
            TargetType::Scalar(_) | TargetType::Composite(_) => {
                if wire.len() == 1 {
                    if let Some(handler) = self.registry.resolve(target) {
                        return handler.decode(&wire[0]);
                    }
                }
                self.decode_composite(wire, target)
            }
        }
    }

    /// Collections map the single corresponding wire element, itself a
    /// sequence, member-wise through the element-type path.
    fn decode_collection(
        &self,
        wire: &[WireValue],
        element: &TargetType,
        target: &TargetType,
    ) -> Result<Value, ConversionError> {
        let single = match wire {
            [one] => one,
            many => {
                return Err(ConversionError::ValueShapeMismatch {
                    expected: format!("a single sequence for {}", target.describe()),
                    actual: format!("{} wire values", many.len()),
                })
            }
        };
        let items = match single {
            WireValue::Seq(items) => items,
            other => {
                return Err(ConversionError::ValueShapeMismatch {
                    expected: format!("a sequence for {}", target.describe()),
                    actual: other.kind().to_string(),
                })
            }
        };
        let decoded = items
            .iter()
            .map(|item| self.registry.decode_scalar(element, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::List(decoded))
    }

    /// Composite targets assemble the whole wire sequence through their
    /// single nonzero-arity initializer; each element decodes
    /// recursively against the matching parameter shape.
    fn decode_composite(
        &self,
        wire: &[WireValue],
        target: &TargetType,
    ) -> Result<Value, ConversionError> {
        let shape = match target {
            TargetType::Composite(shape) => shape,
            scalar => {
                // A scalar no handler recognized, or a scalar asked to
                // absorb several wire values.
                if wire.len() == 1 {
                    return Err(ConversionError::NoHandlerForType {
                        target: scalar.describe(),
                    });
                }
                return Err(ConversionError::ValueShapeMismatch {
                    expected: format!("a single {} value", scalar.describe()),
                    actual: format!("{} wire values", wire.len()),
                });
            }
        };

        let initializer = self.sole_initializer(shape)?;
        if initializer.arity() != wire.len() {
            return Err(ConversionError::ConstructorArityMismatch {
                target: shape.name.clone(),
                expected: initializer.arity(),
                actual: wire.len(),
            });
        }

        let fields = wire
            .iter()
            .zip(&initializer.params)
            .map(|(value, param)| self.decode(slice::from_ref(value), param))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Value::Composite {
            name: shape.name.clone(),
            fields,
        })
    }

    /// Exactly one nonzero-arity initializer is required. Several of
    /// equal arity are just as ambiguous as several of different arity;
    /// nothing here picks "the first one found".
    fn sole_initializer<'a>(
        &self,
        shape: &'a CompositeShape,
    ) -> Result<&'a Initializer, ConversionError> {
        let mut candidates = shape.constructing_initializers();
        let (first, rest) = (candidates.next(), candidates.count());
        match first {
            Some(init) if rest == 0 => Ok(init),
            Some(_) => Err(ConversionError::AmbiguousConstructor {
                target: shape.name.clone(),
                found: rest + 1,
            }),
            None => Err(ConversionError::AmbiguousConstructor {
                target: shape.name.clone(),
                found: 0,
            }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
