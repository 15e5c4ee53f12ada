//! # Adapters Layer
//!
//! Concrete implementations of the port traits: the live ledger
//! contract, the in-memory harness, and the manifest compiler.
//! The chain-state and transaction-submission collaborators of a real
//! deployment live outside this crate and plug into the same ports.

pub mod compiler;
pub mod harness;
pub mod ledger_contract;

pub use compiler::*;
pub use harness::*;
pub use ledger_contract::*;
