//! # Error Types
//!
//! All error families of the binding core. Every variant is a distinct,
//! named condition carrying the offending name(s) and
//! expected-vs-actual counts where applicable; nothing here is a
//! generic or opaque failure, and no path retries automatically.

use thiserror::Error;

// =============================================================================
// COMPILATION ERRORS
// =============================================================================

/// The external compiler collaborator rejected the contract source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("contract source failed to compile: {message}")]
pub struct CompileError {
    /// Compiler diagnostics, verbatim.
    pub message: String,
}

impl CompileError {
    /// Creates a compile error from compiler diagnostics.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// REGISTRATION ERRORS
// =============================================================================

/// Errors raised synchronously while registering an interface against a
/// contract. Registration is all-or-nothing: on any of these the
/// binding set is exactly as it was before the attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// The logical name is already bound; the existing binding stays.
    #[error("attempt to register '{name}' twice")]
    DuplicateRegistration {
        /// The logical name that was already bound.
        name: String,
    },

    /// No compiled contract matched the interface simple name.
    #[error("no contract found in source for interface '{interface}'")]
    ContractNotFoundInSource {
        /// The interface simple name that found no match.
        interface: String,
    },

    /// More than one compiled contract matched the interface name.
    #[error("more than one contract found for interface '{interface}': {candidates:?}")]
    AmbiguousContract {
        /// The interface simple name.
        interface: String,
        /// Every case-insensitively colliding contract name.
        candidates: Vec<String>,
    },

    /// Interface methods with no counterpart in the contract.
    #[error("superfluous method definition in interface '{interface}': {methods:?}")]
    SuperfluousMethod {
        /// The interface simple name.
        interface: String,
        /// Every declared method absent from the contract function set.
        methods: Vec<String>,
    },

    /// Parameter count disagreement between interface and contract.
    #[error(
        "parameter count mismatch for '{function}': interface declares \
         {interface_arity}, contract takes {contract_arity}"
    )]
    ArityMismatch {
        /// The function whose arities disagree.
        function: String,
        /// The declared parameter count on the interface.
        interface_arity: usize,
        /// The input arity published by the contract ABI.
        contract_arity: usize,
    },

    /// The compiler collaborator failed.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

// =============================================================================
// CONVERSION ERRORS
// =============================================================================

/// Errors raised during result decoding. Synchronous calls surface
/// these directly; asynchronous calls surface them through the async
/// error channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// No registered handler recognizes the target type.
    #[error("no handler found to convert '{target}'")]
    NoHandlerForType {
        /// The shape that no handler matched.
        target: String,
    },

    /// Zero or several nonzero-arity initializers on a composite.
    #[error("'{target}' declares {found} nonzero-arity initializers, exactly one is required")]
    AmbiguousConstructor {
        /// The composite type name.
        target: String,
        /// How many nonzero-arity initializers were declared.
        found: usize,
    },

    /// Initializer arity disagrees with the wire sequence length.
    #[error("initializer arity mismatch for '{target}': initializer has {expected}, result has {actual}")]
    ConstructorArityMismatch {
        /// The composite type name.
        target: String,
        /// The initializer's parameter count.
        expected: usize,
        /// The wire sequence length.
        actual: usize,
    },

    /// A collection shape was declared without its element parameter.
    #[error("malformed generic declaration: '{target}' has no element type")]
    MalformedGenericDeclaration {
        /// The offending shape.
        target: String,
    },

    /// A wire value had the wrong shape for the declared target.
    #[error("wire value shape mismatch: expected {expected}, found {actual}")]
    ValueShapeMismatch {
        /// What the declared shape required.
        expected: String,
        /// What the wire actually carried.
        actual: String,
    },
}

// =============================================================================
// EXECUTION ERRORS
// =============================================================================

/// Errors raised by contract execution, submission, or output decoding.
/// These propagate to the caller or the async error channel; they are
/// never silently discarded and never retried here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    /// The named function is not exported by the contract.
    #[error("function '{name}' cannot be found; available: {available:?}")]
    FunctionNotFound {
        /// The requested function name.
        name: String,
        /// Every function the contract does export.
        available: Vec<String>,
    },

    /// The remote execution reverted or faulted.
    #[error("execution reverted: {reason}")]
    Reverted {
        /// The revert reason as reported by the execution engine.
        reason: String,
    },

    /// The transaction-submission collaborator failed.
    #[error("transaction submission failed: {reason}")]
    Submission {
        /// The collaborator's failure description.
        reason: String,
    },

    /// The chain-state collaborator could not provide a snapshot.
    #[error("state snapshot unavailable: {reason}")]
    Snapshot {
        /// The collaborator's failure description.
        reason: String,
    },

    /// Caller passed the wrong number of arguments to the encoder.
    #[error("'{function}' takes {expected} arguments, {actual} were passed")]
    InputArityMismatch {
        /// The invoked function.
        function: String,
        /// The ABI-declared input arity.
        expected: usize,
        /// The number of arguments actually passed.
        actual: usize,
    },

    /// Decoded output length disagrees with the declared output arity.
    #[error("'{function}' declares {expected} outputs, execution produced {actual}")]
    OutputArityMismatch {
        /// The invoked function.
        function: String,
        /// The ABI-declared output arity.
        expected: usize,
        /// The number of decoded wire values.
        actual: usize,
    },

    /// Payload could not be encoded or decoded.
    #[error("call payload codec failure: {reason}")]
    Codec {
        /// The codec's failure description.
        reason: String,
    },

    /// The completion side of an async call went away before resolving.
    #[error("call completion dropped before resolving")]
    CompletionDropped,
}

// =============================================================================
// INVOCATION ERRORS
// =============================================================================

/// Errors surfaced by the dispatch entry point.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvokeError {
    /// No binding registered under the logical name.
    #[error("no contract bound as '{name}'; registered: {registered:?}")]
    ContractNotFound {
        /// The requested logical name.
        name: String,
        /// Every logical name currently bound.
        registered: Vec<String>,
    },

    /// Execution-side failure.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Result decoding failure.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

// =============================================================================
// TESTS
// =============================================================================
