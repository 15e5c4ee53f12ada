//! # Interface and Contract Descriptors
//!
//! The caller declares an interface as data: method names, parameter
//! shapes, and return shapes. The compiled contract publishes its
//! function set as name plus input/output arity. Registration verifies
//! one against the other structurally (names and arities only).

use crate::shape::TargetType;
use serde::{Deserialize, Serialize};

// =============================================================================
// INTERFACE SIDE
// =============================================================================

/// One declared method of a caller interface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name, matched against contract function names.
    pub name: String,
    /// Declared parameter shapes. Only the count is verified at
    /// registration; arguments pass through to the function encoder
    /// unmodified.
    pub params: Vec<TargetType>,
    /// Declared return shape; decides the call mode.
    pub returns: TargetType,
}

impl MethodDescriptor {
    /// Creates a method descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, params: Vec<TargetType>, returns: TargetType) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }
}

/// The set of method signatures a caller declares against a contract.
///
/// Supplied externally; read-only to the binding core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    /// Simple interface name, matched case-insensitively against the
    /// compiled contract names.
    pub name: String,
    /// Declared methods.
    pub methods: Vec<MethodDescriptor>,
}

impl InterfaceDescriptor {
    /// Creates an interface descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, methods: Vec<MethodDescriptor>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    /// Looks up a declared method by exact name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

// =============================================================================
// CONTRACT SIDE
// =============================================================================

/// One exported function as published by the compiled contract's ABI.
///
/// Only name and arities are modelled; parameter and return types are
/// not verified against the interface (known limitation).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFunction {
    /// Exported function name.
    pub name: String,
    /// Input arity.
    pub inputs: usize,
    /// Output arity.
    pub outputs: usize,
}

impl ContractFunction {
    /// Creates a function descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, inputs: usize, outputs: usize) -> Self {
        Self {
            name: name.into(),
            inputs,
            outputs,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
