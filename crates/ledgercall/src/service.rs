//! # Contract Gateway
//!
//! The facade a caller holds: it owns the binding set, the binder, and
//! the dispatcher, and exposes the two public entry points —
//! registration and invocation.
//!
//! Registration is expected to finish before the gateway serves calls;
//! the binding set is never mutated afterwards, which is what makes
//! concurrent dispatch safe without locking.

use crate::adapters::{HarnessPlatform, ManifestCompiler, SimulatedLedger};
use crate::binder::ContractBinder;
use crate::binding::BindingSet;
use crate::dispatch::{CallOutcome, InvocationDispatcher};
use crate::domain::convert::ConverterRegistry;
use crate::domain::reconstruct::ResultReconstructor;
use crate::errors::{InvokeError, RegistrationError};
use ledgercall_types::{Address, InterfaceDescriptor, SigningIdentity, WireValue};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::instrument;

// =============================================================================
// STATISTICS
// =============================================================================

/// A point-in-time view of gateway activity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GatewayStats {
    /// Successful registrations.
    pub contracts_registered: u64,
    /// Invocations dispatched, successful or not.
    pub calls_dispatched: u64,
    /// Invocations that failed at dispatch time.
    pub failed_dispatches: u64,
}

#[derive(Default)]
struct GatewayCounters {
    contracts_registered: AtomicU64,
    calls_dispatched: AtomicU64,
    failed_dispatches: AtomicU64,
}

impl GatewayCounters {
    fn snapshot(&self) -> GatewayStats {
        GatewayStats {
            contracts_registered: self.contracts_registered.load(Ordering::Relaxed),
            calls_dispatched: self.calls_dispatched.load(Ordering::Relaxed),
            failed_dispatches: self.failed_dispatches.load(Ordering::Relaxed),
        }
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// The public entry point: register interfaces, then invoke them.
pub struct ContractGateway {
    binder: ContractBinder,
    dispatcher: InvocationDispatcher,
    bindings: BindingSet,
    counters: GatewayCounters,
}

impl ContractGateway {
    /// A gateway over explicit collaborators and converter set.
    #[must_use]
    pub fn new(
        compiler: Arc<dyn crate::ports::outbound::ContractCompiler>,
        platform: Arc<dyn crate::ports::outbound::ContractPlatform>,
        converters: Arc<ConverterRegistry>,
    ) -> Self {
        Self {
            binder: ContractBinder::new(compiler, platform),
            dispatcher: InvocationDispatcher::new(ResultReconstructor::new(converters)),
            bindings: BindingSet::new(),
            counters: GatewayCounters::default(),
        }
    }

    /// A gateway over the in-memory harness: manifest compiler,
    /// simulated ledger, standard converters. Returns the simulation so
    /// callers can provide function behaviours.
    #[must_use]
    pub fn harness() -> (Self, Arc<SimulatedLedger>) {
        let ledger = Arc::new(SimulatedLedger::new());
        let gateway = Self::new(
            Arc::new(ManifestCompiler),
            Arc::new(HarnessPlatform::new(Arc::clone(&ledger))),
            Arc::new(ConverterRegistry::standard()),
        );
        (gateway, ledger)
    }

    /// Registers an interface against a contract in `source` under
    /// `logical_name`. All-or-nothing; see [`ContractBinder::register`].
    ///
    /// # Errors
    ///
    /// Every [`RegistrationError`] variant.
    #[instrument(skip(self, interface, source), fields(interface = %interface.name))]
    pub fn register(
        &mut self,
        interface: &InterfaceDescriptor,
        source: &str,
        logical_name: &str,
        address: Address,
        identity: SigningIdentity,
    ) -> Result<(), RegistrationError> {
        self.binder.register(
            &mut self.bindings,
            interface,
            source,
            logical_name,
            address,
            identity,
        )?;
        self.counters
            .contracts_registered
            .fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Invokes `method` on the contract bound as `logical_name`.
    /// Arguments pass through to the function encoder unmodified.
    ///
    /// # Errors
    ///
    /// See [`InvocationDispatcher::invoke`].
    #[instrument(skip(self, args))]
    pub fn invoke(
        &self,
        logical_name: &str,
        method: &str,
        args: &[WireValue],
    ) -> Result<CallOutcome, InvokeError> {
        self.counters
            .calls_dispatched
            .fetch_add(1, Ordering::Relaxed);
        let outcome = self
            .dispatcher
            .invoke(&self.bindings, logical_name, method, args);
        if outcome.is_err() {
            self.counters
                .failed_dispatches
                .fetch_add(1, Ordering::Relaxed);
        }
        outcome
    }

    /// The registered bindings.
    #[must_use]
    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    /// Current activity counters.
    #[must_use]
    pub fn stats(&self) -> GatewayStats {
        self.counters.snapshot()
    }
}

// =============================================================================
// TESTS
// =============================================================================
