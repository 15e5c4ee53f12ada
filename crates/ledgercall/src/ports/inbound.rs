//! # Inbound Ports
//!
//! The capability surface a bound contract exposes to the dispatcher.
//! Both the live and the harness variant implement [`SmartContract`];
//! callers cannot tell them apart through this surface.

use crate::errors::ExecutionError;
use ledgercall_types::{ContractFunction, WireValue};
use tokio::sync::oneshot;

// =============================================================================
// SMART CONTRACT CAPABILITY SURFACE
// =============================================================================

/// A bound, invokable contract.
///
/// `call_function` submits a mutating call: the submission side is
/// synchronous and non-blocking, the completion arrives through the
/// returned [`CallHandle`]. `call_const_function` performs a read-only
/// call and blocks the caller for the duration of the simulated
/// execution. Both raise [`ExecutionError::FunctionNotFound`] with the
/// available-name list for an unknown function name.
pub trait SmartContract: Send + Sync {
    /// Submits a mutating call and returns its completion handle.
    fn call_function(
        &self,
        name: &str,
        args: &[WireValue],
    ) -> Result<CallHandle, ExecutionError>;

    /// Performs a synchronous read-only call.
    fn call_const_function(
        &self,
        name: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, ExecutionError>;

    /// The function set published by the contract's ABI.
    fn functions(&self) -> Vec<ContractFunction>;
}

// =============================================================================
// CALL COMPLETION
// =============================================================================

type CallResult = Result<Vec<WireValue>, ExecutionError>;

/// Single-shot completion handle for a mutating call.
///
/// Resolves exactly once, with either the decoded wire values of the
/// receipt or an error. Dropping the handle never blocks or cancels the
/// underlying submission; fire-and-forget dispatch does exactly that.
pub struct CallHandle {
    rx: oneshot::Receiver<CallResult>,
}

/// The producing side of a [`CallHandle`].
pub struct CallCompletion {
    tx: oneshot::Sender<CallResult>,
}

impl CallHandle {
    /// A handle and its completion, not yet resolved.
    #[must_use]
    pub fn pending() -> (CallCompletion, CallHandle) {
        let (tx, rx) = oneshot::channel();
        (CallCompletion { tx }, CallHandle { rx })
    }

    /// An already-completed handle, used when the result is available
    /// at submission time (harness executions).
    #[must_use]
    pub fn ready(result: CallResult) -> CallHandle {
        let (completion, handle) = Self::pending();
        completion.complete(result);
        handle
    }

    /// Waits for the completion.
    ///
    /// # Errors
    ///
    /// The completion's error, or [`ExecutionError::CompletionDropped`]
    /// when the producing side went away without resolving.
    pub async fn resolve(self) -> CallResult {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(ExecutionError::CompletionDropped),
        }
    }
}

impl CallCompletion {
    /// Resolves the paired handle. A dropped handle is fine; the
    /// result is discarded in that case.
    pub fn complete(self, result: CallResult) {
        let _ = self.tx.send(result);
    }
}

// =============================================================================
// TESTS
// =============================================================================
