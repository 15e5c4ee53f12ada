//! # Invocation Dispatch
//!
//! Routes a method call to its bound contract. The call mode comes from
//! the call-table entry built at registration — derived purely from the
//! declared return shape, never from contract metadata:
//!
//! - void return ⇒ fire-and-forget mutating call, returns immediately;
//! - async-wrapped return ⇒ mutating call resolved later through a
//!   [`PendingValue`];
//! - any other return ⇒ synchronous read call, decoded in place.
//!
//! Arguments pass through to the contract's function encoder
//! unmodified; only results are converted.

use crate::binding::BindingSet;
use crate::domain::reconstruct::ResultReconstructor;
use crate::errors::{ExecutionError, InvokeError};
use crate::ports::inbound::CallHandle;
use ledgercall_types::{CallMode, TargetType, Value, WireValue};
use tracing::debug;

// =============================================================================
// OUTCOMES
// =============================================================================

/// What an invocation produced, by call mode.
pub enum CallOutcome {
    /// A synchronous read call, decoded.
    Completed(Value),
    /// A mutating call still waiting for its receipt.
    Pending(PendingValue),
    /// A fire-and-forget submission; nothing will be decoded.
    Accepted,
}

impl CallOutcome {
    /// The decoded value of a completed read call, if that is what
    /// this outcome is.
    #[must_use]
    pub fn completed(self) -> Option<Value> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// The pending completion of an async mutating call, if that is
    /// what this outcome is.
    #[must_use]
    pub fn pending(self) -> Option<PendingValue> {
        match self {
            Self::Pending(pending) => Some(pending),
            _ => None,
        }
    }
}

/// A mutating call's eventual decoded result.
///
/// Resolves exactly once: either the receipt's output decoded against
/// the declared (unwrapped) return shape, or an error through the same
/// channel. Decode failures surface here, not at submission.
pub struct PendingValue {
    handle: CallHandle,
    target: TargetType,
    reconstructor: ResultReconstructor,
}

impl PendingValue {
    /// Awaits the receipt and decodes its output.
    ///
    /// # Errors
    ///
    /// The execution error of the underlying call, or the conversion
    /// error of the decode.
    pub async fn resolve(self) -> Result<Value, InvokeError> {
        let wire = self.handle.resolve().await?;
        Ok(self.reconstructor.decode(&wire, &self.target)?)
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// Routes invocations through a binding set.
#[derive(Clone)]
pub struct InvocationDispatcher {
    reconstructor: ResultReconstructor,
}

impl InvocationDispatcher {
    /// Creates a dispatcher decoding through the given reconstructor.
    #[must_use]
    pub fn new(reconstructor: ResultReconstructor) -> Self {
        Self { reconstructor }
    }

    /// Invokes `method` on the contract bound as `logical_name`.
    ///
    /// # Errors
    ///
    /// [`InvokeError::ContractNotFound`] when the logical name is not
    /// bound; `FunctionNotFound` (with the contract's available names)
    /// when the method has no call-table entry; execution and
    /// conversion errors from the call itself.
    pub fn invoke(
        &self,
        bindings: &BindingSet,
        logical_name: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<CallOutcome, InvokeError> {
        let binding = bindings
            .get(logical_name)
            .ok_or_else(|| InvokeError::ContractNotFound {
                name: logical_name.to_string(),
                registered: bindings.logical_names(),
            })?;

        let bound = binding
            .method(method)
            .ok_or_else(|| ExecutionError::FunctionNotFound {
                name: method.to_string(),
                available: binding
                    .contract()
                    .functions()
                    .into_iter()
                    .map(|f| f.name)
                    .collect(),
            })?;

        debug!(logical_name, method, mode = ?bound.mode, "dispatching");
        match bound.mode {
            CallMode::FireAndForget => {
                // Submit and never wait; the handle is dropped on
                // purpose and the completion side tolerates that.
                let _ = binding.contract().call_function(&bound.function, args)?;
                Ok(CallOutcome::Accepted)
            }
            CallMode::AsyncResult => {
                let handle = binding.contract().call_function(&bound.function, args)?;
                Ok(CallOutcome::Pending(PendingValue {
                    handle,
                    target: bound.returns.clone(),
                    reconstructor: self.reconstructor.clone(),
                }))
            }
            CallMode::SyncRead => {
                let wire = binding
                    .contract()
                    .call_const_function(&bound.function, args)?;
                let value = self.reconstructor.decode(&wire, &bound.returns)?;
                Ok(CallOutcome::Completed(value))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
