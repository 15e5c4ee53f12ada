//! # Bindings
//!
//! A binding ties a logical name to a bound contract plus the call
//! table built from the declared interface: method name to call mode
//! and return shape, resolved once at registration time.
//!
//! The [`BindingSet`] is populated during a registration phase and
//! read-only afterwards; concurrent dispatch against it is safe because
//! it is never mutated again (a precondition of the caller, not
//! enforced by locking here).

use crate::ports::inbound::SmartContract;
use ledgercall_types::{CallMode, InterfaceDescriptor, TargetType};
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// CALL TABLE
// =============================================================================

/// One dispatchable method of a binding.
#[derive(Clone, Debug)]
pub struct BoundMethod {
    /// The contract function this method routes to.
    pub function: String,
    /// Derived from the declared return shape at registration time.
    pub mode: CallMode,
    /// The declared return shape results decode against.
    pub returns: TargetType,
}

/// Builds the call table of an interface: every declared method gets a
/// strongly typed entry, once.
#[must_use]
pub fn build_call_table(interface: &InterfaceDescriptor) -> HashMap<String, BoundMethod> {
    interface
        .methods
        .iter()
        .map(|method| {
            let entry = BoundMethod {
                function: method.name.clone(),
                mode: CallMode::of(&method.returns),
                returns: method.returns.clone(),
            };
            (method.name.clone(), entry)
        })
        .collect()
}

// =============================================================================
// BINDING
// =============================================================================

/// A registered contract: logical name, bound contract, call table.
/// Created once at successful registration; immutable afterwards.
pub struct ContractBinding {
    logical_name: String,
    contract: Arc<dyn SmartContract>,
    call_table: HashMap<String, BoundMethod>,
}

impl ContractBinding {
    /// Assembles a binding. Only registration creates these.
    pub(crate) fn new(
        logical_name: impl Into<String>,
        contract: Arc<dyn SmartContract>,
        call_table: HashMap<String, BoundMethod>,
    ) -> Self {
        Self {
            logical_name: logical_name.into(),
            contract,
            call_table,
        }
    }

    /// The logical name as registered.
    #[must_use]
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    /// The bound contract.
    #[must_use]
    pub fn contract(&self) -> &Arc<dyn SmartContract> {
        &self.contract
    }

    /// Looks up the call-table entry of a method.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&BoundMethod> {
        self.call_table.get(name)
    }
}

// =============================================================================
// BINDING SET
// =============================================================================

/// The explicit name→binding context the dispatcher works against.
/// Logical names are case-insensitive and bound at most once.
#[derive(Default)]
pub struct BindingSet {
    bindings: HashMap<String, ContractBinding>,
}

impl BindingSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a logical name is already bound.
    #[must_use]
    pub fn contains(&self, logical_name: &str) -> bool {
        self.bindings.contains_key(&logical_name.to_lowercase())
    }

    /// Resolves a binding by logical name.
    #[must_use]
    pub fn get(&self, logical_name: &str) -> Option<&ContractBinding> {
        self.bindings.get(&logical_name.to_lowercase())
    }

    /// Every bound logical name, as registered.
    #[must_use]
    pub fn logical_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .bindings
            .values()
            .map(|b| b.logical_name.clone())
            .collect();
        names.sort();
        names
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Stores a binding under its lower-cased logical name. Only
    /// registration inserts, and only as its final step.
    pub(crate) fn insert(&mut self, binding: ContractBinding) {
        self.bindings
            .insert(binding.logical_name.to_lowercase(), binding);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExecutionError;
    use crate::ports::inbound::CallHandle;
    use ledgercall_types::{ContractFunction, MethodDescriptor, ScalarType, WireValue};

    struct NullContract;

    impl SmartContract for NullContract {
        fn call_function(
            &self,
            _name: &str,
            _args: &[WireValue],
        ) -> Result<CallHandle, ExecutionError> {
            Ok(CallHandle::ready(Ok(vec![])))
        }

        fn call_const_function(
            &self,
            _name: &str,
            _args: &[WireValue],
        ) -> Result<Vec<WireValue>, ExecutionError> {
            Ok(vec![])
        }

        fn functions(&self) -> Vec<ContractFunction> {
            vec![]
        }
    }

    fn binding(name: &str) -> ContractBinding {
        ContractBinding::new(name, Arc::new(NullContract), HashMap::new())
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut set = BindingSet::new();
        set.insert(binding("Token"));

        assert!(set.contains("token"));
        assert!(set.contains("TOKEN"));
        assert_eq!(set.get("tOkEn").unwrap().logical_name(), "Token");
    }

    #[test]
    fn call_table_derives_modes_from_return_shapes() {
        let interface = InterfaceDescriptor::new(
            "Token",
            vec![
                MethodDescriptor::new("transfer", vec![], TargetType::Unit),
                MethodDescriptor::new(
                    "transferChecked",
                    vec![],
                    TargetType::asynchronous(TargetType::Scalar(ScalarType::Bool)),
                ),
                MethodDescriptor::new(
                    "balanceOf",
                    vec![],
                    TargetType::Scalar(ScalarType::I64),
                ),
            ],
        );

        let table = build_call_table(&interface);
        assert_eq!(table["transfer"].mode, CallMode::FireAndForget);
        assert_eq!(table["transferChecked"].mode, CallMode::AsyncResult);
        assert_eq!(table["balanceOf"].mode, CallMode::SyncRead);
    }

    #[test]
    fn logical_names_are_sorted_and_original_case() {
        let mut set = BindingSet::new();
        set.insert(binding("Wallet"));
        set.insert(binding("Token"));

        assert_eq!(set.logical_names(), vec!["Token", "Wallet"]);
    }
}
