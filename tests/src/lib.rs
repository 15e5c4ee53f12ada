//! # LedgerCall Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── gateway_flows.rs   # Register + invoke through the harness
//!     └── live_pipeline.rs   # Live variant against collaborator doubles
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledgercall-tests
//!
//! # By category
//! cargo test -p ledgercall-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

/// Installs a tracing subscriber honoring `RUST_LOG`, once per process.
/// Tests call this when their output is being inspected by hand.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
