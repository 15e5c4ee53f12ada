//! # Live Ledger Contract
//!
//! The [`SmartContract`] variant that executes against a real ledger.
//! Read-only calls run a placeholder-signed synthetic transaction
//! against a disposable state snapshot; mutating calls sign and submit
//! a real transaction and complete once its receipt arrives.

use crate::domain::abi::{self, ContractAbi};
use crate::errors::{ExecutionError, RegistrationError};
use crate::ports::inbound::{CallHandle, SmartContract};
use crate::ports::outbound::{
    CallTransaction, ChainState, ContractArtifact, ContractPlatform, SignedTransaction,
    TransactionSubmitter,
};
use ledgercall_types::{
    Address, BlockRef, ContractFunction, SigningIdentity, WireValue, U256,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

// =============================================================================
// CONTRACT
// =============================================================================

/// A contract bound to an address on a live ledger.
pub struct LedgerContract {
    abi: ContractAbi,
    address: Address,
    identity: SigningIdentity,
    chain: Arc<dyn ChainState>,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl LedgerContract {
    /// Binds an ABI at an address, on behalf of a signing identity.
    #[must_use]
    pub fn new(
        abi: ContractAbi,
        address: Address,
        identity: SigningIdentity,
        chain: Arc<dyn ChainState>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> Self {
        Self {
            abi,
            address,
            identity,
            chain,
            submitter,
        }
    }

    /// The bound contract address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Read-only call against a chosen historical state.
    ///
    /// The snapshot is acquired for this call alone and dropped on
    /// every exit path, so the simulated execution never leaks into
    /// persistent state.
    pub fn call_const_function_at(
        &self,
        block: BlockRef,
        name: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, ExecutionError> {
        let function = self.abi.require(name)?;
        let payload = abi::encode_call(function, args)?;
        let placeholder = SigningIdentity::placeholder();
        let tx = CallTransaction {
            to: self.address,
            value: U256::zero(),
            signature: placeholder.sign(payload.as_slice()),
            payload,
        };

        let mut snapshot = self.chain.snapshot_at(block)?;
        let output = snapshot.execute_call(&tx)?;
        debug!(function = name, block = ?block, "read call executed against snapshot");
        abi::decode_output(function, output.as_slice())
    }

    /// Mutating call that also transfers `value` to the contract.
    ///
    /// [`SmartContract::call_function`] is this with a zero value.
    pub fn call_function_with_value(
        &self,
        value: U256,
        name: &str,
        args: &[WireValue],
    ) -> Result<CallHandle, ExecutionError> {
        let function = self.abi.require(name)?.clone();
        let payload = abi::encode_call(&function, args)?;
        let tx = SignedTransaction {
            id: Uuid::new_v4(),
            sender: self.identity.address(),
            to: self.address,
            value,
            signature: self.identity.sign(payload.as_slice()),
            payload,
        };
        debug!(function = %function.name, transaction = %tx.id, "submitting mutating call");

        let (completion, handle) = CallHandle::pending();
        let submitter = Arc::clone(&self.submitter);
        tokio::spawn(async move {
            let result = match submitter.submit(tx).await {
                Ok(receipt) => abi::decode_output(&function, receipt.execution_output.as_slice()),
                Err(err) => Err(err),
            };
            completion.complete(result);
        });
        Ok(handle)
    }
}

impl SmartContract for LedgerContract {
    fn call_function(
        &self,
        name: &str,
        args: &[WireValue],
    ) -> Result<CallHandle, ExecutionError> {
        self.call_function_with_value(U256::zero(), name, args)
    }

    fn call_const_function(
        &self,
        name: &str,
        args: &[WireValue],
    ) -> Result<Vec<WireValue>, ExecutionError> {
        self.call_const_function_at(BlockRef::Latest, name, args)
    }

    fn functions(&self) -> Vec<ContractFunction> {
        self.abi.functions().to_vec()
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

/// Builds [`LedgerContract`] bindings over the live collaborators.
pub struct LedgerPlatform {
    chain: Arc<dyn ChainState>,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl LedgerPlatform {
    /// Creates a platform over the given collaborators.
    #[must_use]
    pub fn new(chain: Arc<dyn ChainState>, submitter: Arc<dyn TransactionSubmitter>) -> Self {
        Self { chain, submitter }
    }
}

impl ContractPlatform for LedgerPlatform {
    fn bind(
        &self,
        artifact: &ContractArtifact,
        address: Address,
        identity: SigningIdentity,
    ) -> Result<Arc<dyn SmartContract>, RegistrationError> {
        Ok(Arc::new(LedgerContract::new(
            artifact.abi.clone(),
            address,
            identity,
            Arc::clone(&self.chain),
            Arc::clone(&self.submitter),
        )))
    }
}

// =============================================================================
// TESTS
// =============================================================================
