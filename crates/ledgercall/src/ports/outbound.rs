//! # Outbound Ports
//!
//! The collaborators this core depends on, as traits: the contract
//! compiler, the chain-state snapshot provider, the transaction
//! submitter, and the platform that turns a compiled artifact into a
//! bound contract. Adapters implement these; the core never reaches
//! past them.

use crate::domain::abi::ContractAbi;
use crate::errors::{CompileError, ExecutionError, RegistrationError};
use crate::ports::inbound::SmartContract;
use async_trait::async_trait;
use ledgercall_types::{Address, BlockRef, Bytes, Hash, SigningIdentity, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

// =============================================================================
// COMPILER
// =============================================================================

/// ABI plus bytecode for one compiled contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractArtifact {
    /// The published function set.
    pub abi: ContractAbi,
    /// Deployable bytecode.
    pub bytecode: Bytes,
}

/// Everything one compiler run produced, keyed by contract name.
///
/// A `BTreeMap` keeps iteration order deterministic, so ambiguity
/// errors list candidates stably.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationOutput {
    /// Compiled contracts by declared name.
    pub contracts: BTreeMap<String, ContractArtifact>,
}

/// The external compiler collaborator: source text in, artifacts out.
pub trait ContractCompiler: Send + Sync {
    /// Compiles contract source text.
    fn compile(&self, source: &str) -> Result<CompilationOutput, CompileError>;
}

// =============================================================================
// CHAIN STATE
// =============================================================================

/// A zero-value synthetic call transaction, signed with the placeholder
/// key only to satisfy the execution engine. Read-only calls execute
/// these against a snapshot; nothing is ever submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct CallTransaction {
    /// Target contract address.
    pub to: Address,
    /// Always zero for synthetic calls.
    pub value: U256,
    /// Encoded function call.
    pub payload: Bytes,
    /// Placeholder signature.
    pub signature: Hash,
}

/// A copy-on-write view of ledger state at one point in time.
///
/// Implementations must roll the view back when the snapshot drops, on
/// every exit path; a snapshot is never shared across calls and never
/// outlives the call that acquired it.
pub trait StateSnapshot: Send {
    /// Executes a synthetic call against this view.
    fn execute_call(&mut self, tx: &CallTransaction) -> Result<Bytes, ExecutionError>;
}

/// The chain-state collaborator: hands out state snapshots.
pub trait ChainState: Send + Sync {
    /// A snapshot of the state selected by `block` (latest by default).
    fn snapshot_at(&self, block: BlockRef) -> Result<Box<dyn StateSnapshot>, ExecutionError>;
}

// =============================================================================
// TRANSACTION SUBMISSION
// =============================================================================

/// A signed transaction payload ready for submission.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedTransaction {
    /// Correlation id, echoed on the receipt.
    pub id: Uuid,
    /// Sender address derived from the signing identity.
    pub sender: Address,
    /// Target contract address.
    pub to: Address,
    /// Transferred value.
    pub value: U256,
    /// Encoded function call.
    pub payload: Bytes,
    /// Signature over the payload.
    pub signature: Hash,
}

/// The receipt an accepted transaction eventually produces.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionReceipt {
    /// Correlation id of the submitted transaction.
    pub transaction: Uuid,
    /// The execution-output byte payload.
    pub execution_output: Bytes,
}

/// The transaction-submission collaborator.
///
/// Receipts for concurrently submitted transactions may arrive in any
/// order; nothing here reorders or retries.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Submits a signed transaction and resolves with its receipt.
    async fn submit(&self, tx: SignedTransaction) -> Result<TransactionReceipt, ExecutionError>;
}

// =============================================================================
// CONTRACT PLATFORM
// =============================================================================

/// Builds a bound contract from a compiled artifact.
///
/// The live platform wires the artifact to the chain-state and
/// submission collaborators; the harness platform wires it to an
/// in-process simulation. Registration is agnostic to which one it
/// holds.
pub trait ContractPlatform: Send + Sync {
    /// Binds an artifact at an address on behalf of an identity.
    fn bind(
        &self,
        artifact: &ContractArtifact,
        address: Address,
        identity: SigningIdentity,
    ) -> Result<Arc<dyn SmartContract>, RegistrationError>;
}

// =============================================================================
// TESTS
// =============================================================================
