//! # Contract Binder
//!
//! Registration-time compilation and structural verification. The
//! binder compiles the contract source through the compiler
//! collaborator, selects the contract matching the interface name,
//! builds the bound contract through the platform, verifies the
//! interface against the published function set, and only then stores
//! the binding. Any failure leaves the binding set exactly as it was.

use crate::binding::{build_call_table, BindingSet, ContractBinding};
use crate::errors::RegistrationError;
use crate::ports::inbound::SmartContract;
use crate::ports::outbound::{ContractArtifact, ContractCompiler, ContractPlatform};
use ledgercall_types::{Address, ContractFunction, InterfaceDescriptor, SigningIdentity};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Compiles, verifies, and stores contract bindings.
pub struct ContractBinder {
    compiler: Arc<dyn ContractCompiler>,
    platform: Arc<dyn ContractPlatform>,
}

impl ContractBinder {
    /// Creates a binder over a compiler and a platform.
    #[must_use]
    pub fn new(compiler: Arc<dyn ContractCompiler>, platform: Arc<dyn ContractPlatform>) -> Self {
        Self { compiler, platform }
    }

    /// Registers an interface against a contract in `source`.
    ///
    /// All-or-nothing: on any error the binding set is unchanged and an
    /// existing binding under `logical_name` is left untouched.
    ///
    /// # Errors
    ///
    /// Every [`RegistrationError`] variant; see the error taxonomy.
    pub fn register(
        &self,
        bindings: &mut BindingSet,
        interface: &InterfaceDescriptor,
        source: &str,
        logical_name: &str,
        address: Address,
        identity: SigningIdentity,
    ) -> Result<(), RegistrationError> {
        if bindings.contains(logical_name) {
            warn!(logical_name, "rejecting duplicate registration");
            return Err(RegistrationError::DuplicateRegistration {
                name: logical_name.to_string(),
            });
        }

        let output = self.compiler.compile(source)?;
        let artifact = select_contract(&output.contracts, &interface.name)?;

        let contract = self.platform.bind(artifact, address, identity)?;
        verify_structure(interface, contract.as_ref())?;

        debug!(
            logical_name,
            interface = %interface.name,
            methods = interface.methods.len(),
            "binding registered"
        );
        bindings.insert(ContractBinding::new(
            logical_name,
            contract,
            build_call_table(interface),
        ));
        Ok(())
    }
}

/// Selects the single compiled contract whose name matches the
/// interface simple name, case-insensitively.
fn select_contract<'a>(
    contracts: &'a std::collections::BTreeMap<String, ContractArtifact>,
    interface_name: &str,
) -> Result<&'a ContractArtifact, RegistrationError> {
    let matches: Vec<(&String, &ContractArtifact)> = contracts
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case(interface_name))
        .collect();

    match matches.as_slice() {
        [] => Err(RegistrationError::ContractNotFoundInSource {
            interface: interface_name.to_string(),
        }),
        [(_, artifact)] => Ok(artifact),
        several => Err(RegistrationError::AmbiguousContract {
            interface: interface_name.to_string(),
            candidates: several.iter().map(|(name, _)| (*name).clone()).collect(),
        }),
    }
}

/// Structural verification: names and arities only. Parameter and
/// return types are not checked against the ABI (known limitation).
fn verify_structure(
    interface: &InterfaceDescriptor,
    contract: &dyn SmartContract,
) -> Result<(), RegistrationError> {
    let functions: HashMap<String, ContractFunction> = contract
        .functions()
        .into_iter()
        .map(|f| (f.name.clone(), f))
        .collect();

    let mut superfluous: Vec<String> = interface
        .methods
        .iter()
        .filter(|m| !functions.contains_key(&m.name))
        .map(|m| m.name.clone())
        .collect();
    if !superfluous.is_empty() {
        superfluous.sort();
        return Err(RegistrationError::SuperfluousMethod {
            interface: interface.name.clone(),
            methods: superfluous,
        });
    }

    for method in &interface.methods {
        if let Some(function) = functions.get(&method.name) {
            if function.inputs != method.params.len() {
                return Err(RegistrationError::ArityMismatch {
                    function: method.name.clone(),
                    interface_arity: method.params.len(),
                    contract_arity: function.inputs,
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
