//! # In-Memory Harness
//!
//! The [`SmartContract`] variant backed by an in-process execution
//! simulation. Both operations run synchronously; the mutating call
//! wraps its immediately-available result in an already-completed
//! handle so the capability surface stays identical to the live
//! variant.

use crate::domain::abi::ContractAbi;
use crate::errors::{ExecutionError, RegistrationError};
use crate::ports::inbound::{CallHandle, SmartContract};
use crate::ports::outbound::{ContractArtifact, ContractPlatform};
use ledgercall_types::{Address, ContractFunction, SigningIdentity, WireValue};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

// =============================================================================
// SIMULATED LEDGER
// =============================================================================

/// One simulated contract function: arguments in, wire values out.
pub type FunctionBehaviour =
    dyn Fn(&[WireValue]) -> Result<Vec<WireValue>, ExecutionError> + Send + Sync;

/// In-process execution simulation shared by harness contracts.
///
/// Tests and local development register a behaviour per function name;
/// a storage map is provided for behaviours that need mutable state
/// across calls.
#[derive(Default)]
pub struct SimulatedLedger {
    behaviours: RwLock<HashMap<String, Box<FunctionBehaviour>>>,
    storage: RwLock<HashMap<String, WireValue>>,
}

impl SimulatedLedger {
    /// Creates an empty simulation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the behaviour executed for a function name.
    pub fn provide_function<F>(&self, name: impl Into<String>, behaviour: F)
    where
        F: Fn(&[WireValue]) -> Result<Vec<WireValue>, ExecutionError> + Send + Sync + 'static,
    {
        self.behaviours
            .write()
            .unwrap()
            .insert(name.into(), Box::new(behaviour));
    }

    /// Writes a storage slot.
    pub fn write_slot(&self, key: impl Into<String>, value: WireValue) {
        self.storage.write().unwrap().insert(key.into(), value);
    }

    /// Reads a storage slot.
    #[must_use]
    pub fn read_slot(&self, key: &str) -> Option<WireValue> {
        self.storage.read().unwrap().get(key).cloned()
    }

    /// Executes the behaviour registered for a function.
    fn execute(
        &self,
        function: &ContractFunction,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, ExecutionError> {
        if args.len() != function.inputs {
            return Err(ExecutionError::InputArityMismatch {
                function: function.name.clone(),
                expected: function.inputs,
                actual: args.len(),
            });
        }
        let behaviours = self.behaviours.read().unwrap();
        let behaviour =
            behaviours
                .get(&function.name)
                .ok_or_else(|| ExecutionError::Reverted {
                    reason: format!("no simulation provided for '{}'", function.name),
                })?;
        let values = behaviour(args)?;
        if values.len() != function.outputs {
            return Err(ExecutionError::OutputArityMismatch {
                function: function.name.clone(),
                expected: function.outputs,
                actual: values.len(),
            });
        }
        Ok(values)
    }
}

// =============================================================================
// CONTRACT
// =============================================================================

/// A contract bound to the in-memory simulation.
pub struct HarnessContract {
    abi: ContractAbi,
    ledger: Arc<SimulatedLedger>,
}

impl HarnessContract {
    /// Binds an ABI to a simulation.
    #[must_use]
    pub fn new(abi: ContractAbi, ledger: Arc<SimulatedLedger>) -> Self {
        Self { abi, ledger }
    }
}

impl SmartContract for HarnessContract {
    fn call_function(
        &self,
        name: &str,
        args: &[WireValue],
    ) -> Result<CallHandle, ExecutionError> {
        let function = self.abi.require(name)?;
        debug!(function = name, "harness mutating call");
        Ok(CallHandle::ready(self.ledger.execute(function, args)))
    }

    fn call_const_function(
        &self,
        name: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, ExecutionError> {
        let function = self.abi.require(name)?;
        self.ledger.execute(function, args)
    }

    fn functions(&self) -> Vec<ContractFunction> {
        self.abi.functions().to_vec()
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

/// Builds [`HarnessContract`] bindings over one shared simulation.
pub struct HarnessPlatform {
    ledger: Arc<SimulatedLedger>,
}

impl HarnessPlatform {
    /// Creates a platform over the given simulation.
    #[must_use]
    pub fn new(ledger: Arc<SimulatedLedger>) -> Self {
        Self { ledger }
    }

    /// The shared simulation.
    #[must_use]
    pub fn ledger(&self) -> &Arc<SimulatedLedger> {
        &self.ledger
    }
}

impl ContractPlatform for HarnessPlatform {
    fn bind(
        &self,
        artifact: &ContractArtifact,
        _address: Address,
        _identity: SigningIdentity,
    ) -> Result<Arc<dyn SmartContract>, RegistrationError> {
        Ok(Arc::new(HarnessContract::new(
            artifact.abi.clone(),
            Arc::clone(&self.ledger),
        )))
    }
}

// =============================================================================
// TESTS
// =============================================================================
