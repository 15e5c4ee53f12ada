//! # Contract ABI and Call Payload Codec
//!
//! The published function set of a compiled contract, plus the payload
//! codec the live variant uses: a 4-byte Keccak selector over
//! `name(arity)` followed by the bincode-encoded argument sequence.
//! Receipt payloads decode back into positional wire values.

use crate::errors::ExecutionError;
use ledgercall_types::{Bytes, ContractFunction, Hash, WireValue};
use serde::{Deserialize, Serialize};

// =============================================================================
// ABI
// =============================================================================

/// The published function name/arity signature set of a compiled
/// contract. Used to encode calls and decode results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAbi {
    functions: Vec<ContractFunction>,
}

impl ContractAbi {
    /// Creates an ABI from its function set.
    #[must_use]
    pub fn new(functions: Vec<ContractFunction>) -> Self {
        Self { functions }
    }

    /// All published functions.
    #[must_use]
    pub fn functions(&self) -> &[ContractFunction] {
        &self.functions
    }

    /// Every published function name, in declaration order.
    #[must_use]
    pub fn function_names(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name.clone()).collect()
    }

    /// Looks up a function by exact name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&ContractFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Looks up a function, raising `FunctionNotFound` with the
    /// available-name list when absent.
    pub fn require(&self, name: &str) -> Result<&ContractFunction, ExecutionError> {
        self.function(name)
            .ok_or_else(|| ExecutionError::FunctionNotFound {
                name: name.to_string(),
                available: self.function_names(),
            })
    }
}

// =============================================================================
// CALL PAYLOAD CODEC
// =============================================================================

/// The 4-byte call selector: Keccak-256 over `name(arity)`.
#[must_use]
pub fn selector(function: &ContractFunction) -> [u8; 4] {
    let signature = format!("{}({})", function.name, function.inputs);
    let digest = Hash::keccak(signature.as_bytes());
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&digest.as_bytes()[..4]);
    bytes
}

/// Encodes a function call into its transaction payload.
///
/// Arguments are taken as-is; no conversion happens on the way out.
///
/// # Errors
///
/// `InputArityMismatch` when the argument count disagrees with the
/// ABI-declared input arity; `Codec` when serialization fails.
pub fn encode_call(
    function: &ContractFunction,
    args: &[WireValue],
) -> Result<Bytes, ExecutionError> {
    if args.len() != function.inputs {
        return Err(ExecutionError::InputArityMismatch {
            function: function.name.clone(),
            expected: function.inputs,
            actual: args.len(),
        });
    }
    let mut payload = selector(function).to_vec();
    let encoded = bincode::serialize(args).map_err(|e| ExecutionError::Codec {
        reason: e.to_string(),
    })?;
    payload.extend_from_slice(&encoded);
    Ok(Bytes::from_vec(payload))
}

/// Decodes an execution-output payload into the positional wire
/// sequence of the invoked function.
///
/// # Errors
///
/// `Codec` on malformed payloads; `OutputArityMismatch` when the
/// decoded length disagrees with the declared output arity.
pub fn decode_output(
    function: &ContractFunction,
    payload: &[u8],
) -> Result<Vec<WireValue>, ExecutionError> {
    let values: Vec<WireValue> =
        bincode::deserialize(payload).map_err(|e| ExecutionError::Codec {
            reason: e.to_string(),
        })?;
    if values.len() != function.outputs {
        return Err(ExecutionError::OutputArityMismatch {
            function: function.name.clone(),
            expected: function.outputs,
            actual: values.len(),
        });
    }
    Ok(values)
}

/// Encodes an execution output the way the engine reports it back.
///
/// The inverse of [`decode_output`]; harness executions and tests use
/// it to fabricate receipt payloads.
pub fn encode_output(values: &[WireValue]) -> Result<Bytes, ExecutionError> {
    let encoded = bincode::serialize(values).map_err(|e| ExecutionError::Codec {
        reason: e.to_string(),
    })?;
    Ok(Bytes::from_vec(encoded))
}

// =============================================================================
// TESTS
// =============================================================================
