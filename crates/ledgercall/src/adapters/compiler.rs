//! # Manifest Compiler
//!
//! A [`ContractCompiler`] that reads a JSON contract manifest instead
//! of driving a real toolchain. The harness gateway and the test suite
//! write "source code" in this format; production deployments plug a
//! real compiler into the same port.
//!
//! ```json
//! {
//!   "Token": {
//!     "functions": [
//!       { "name": "balanceOf", "inputs": 1, "outputs": 1 },
//!       { "name": "transfer",  "inputs": 2, "outputs": 1 }
//!     ]
//!   }
//! }
//! ```

use crate::domain::abi::ContractAbi;
use crate::errors::CompileError;
use crate::ports::outbound::{CompilationOutput, ContractArtifact, ContractCompiler};
use ledgercall_types::{Bytes, ContractFunction};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct ManifestContract {
    functions: Vec<ContractFunction>,
    #[serde(default)]
    bytecode: Vec<u8>,
}

/// Compiles JSON contract manifests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestCompiler;

impl ContractCompiler for ManifestCompiler {
    fn compile(&self, source: &str) -> Result<CompilationOutput, CompileError> {
        let manifest: BTreeMap<String, ManifestContract> =
            serde_json::from_str(source).map_err(|e| CompileError::new(e.to_string()))?;

        let contracts = manifest
            .into_iter()
            .map(|(name, contract)| {
                let artifact = ContractArtifact {
                    abi: ContractAbi::new(contract.functions),
                    bytecode: Bytes::from_vec(contract.bytecode),
                };
                (name, artifact)
            })
            .collect();

        Ok(CompilationOutput { contracts })
    }
}

// =============================================================================
// TESTS
// =============================================================================
