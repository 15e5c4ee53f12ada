//! # LedgerCall - Typed Contract Invocation
//!
//! Invoke a remote, immutable contract deployed on a ledger as if it
//! were a local strongly-typed object: declare an interface, register
//! it against the compiled contract once, then dispatch calls whose
//! arguments and results are marshalled across the encoding boundary.
//!
//! ## Call Modes
//!
//! The mode of every method is derived from its declared return shape,
//! never from contract metadata:
//!
//! | Declared return | Mode | Behavior |
//! |-----------------|------|----------|
//! | void | fire-and-forget | submit, return immediately, never decode |
//! | async-wrapped | async result | submit, resolve decoded value on receipt |
//! | anything else | sync read | read-only call, decode in place |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Converter registry | `domain/convert.rs` | Ordered scalar converters, first match wins |
//! | Result reconstructor | `domain/reconstruct.rs` | Recursive rebuild of declared return shapes |
//! | ABI + payload codec | `domain/abi.rs` | Selector + argument encoding, output decoding |
//! | Contract binder | `binder.rs` | Compile, select, verify, store bindings |
//! | Invocation dispatcher | `dispatch.rs` | Mode selection and routing |
//! | Live / harness contracts | `adapters/` | The two `SmartContract` variants |
//! | Gateway | `service.rs` | Public register + invoke facade |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ledgercall::prelude::*;
//!
//! let (mut gateway, ledger) = ContractGateway::harness();
//! ledger.provide_function("balanceOf", |_| Ok(vec![WireValue::Int(1_000)]));
//!
//! gateway.register(&interface, source, "Token", address, identity)?;
//!
//! match gateway.invoke("token", "balanceOf", &args)? {
//!     CallOutcome::Completed(value) => println!("balance: {value:?}"),
//!     _ => unreachable!("balanceOf is a sync read"),
//! }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod binder;
pub mod binding;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Shared value objects and wire model
    pub use ledgercall_types::{
        Address, BlockRef, Bytes, CallMode, CompositeShape, ContractFunction, Hash, Initializer,
        InterfaceDescriptor, MethodDescriptor, ScalarType, SigningIdentity, TargetType, Value,
        WireValue, U256,
    };

    // Domain
    pub use crate::domain::abi::{ContractAbi, decode_output, encode_call, encode_output};
    pub use crate::domain::convert::{ConverterRegistry, TypeHandler};
    pub use crate::domain::reconstruct::ResultReconstructor;

    // Bindings and dispatch
    pub use crate::binder::ContractBinder;
    pub use crate::binding::{BindingSet, BoundMethod, ContractBinding};
    pub use crate::dispatch::{CallOutcome, InvocationDispatcher, PendingValue};

    // Ports
    pub use crate::ports::inbound::{CallCompletion, CallHandle, SmartContract};
    pub use crate::ports::outbound::{
        CallTransaction, ChainState, CompilationOutput, ContractArtifact, ContractCompiler,
        ContractPlatform, SignedTransaction, StateSnapshot, TransactionReceipt,
        TransactionSubmitter,
    };

    // Adapters
    pub use crate::adapters::{
        HarnessContract, HarnessPlatform, LedgerContract, LedgerPlatform, ManifestCompiler,
        SimulatedLedger,
    };

    // Errors
    pub use crate::errors::{
        CompileError, ConversionError, ExecutionError, InvokeError, RegistrationError,
    };

    // Service
    pub use crate::service::{ContractGateway, GatewayStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
