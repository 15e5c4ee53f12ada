//! # Ports Layer
//!
//! Trait seams between the binding core and everything outside it.
//!
//! - **Inbound**: [`inbound::SmartContract`], the capability surface a
//!   bound contract exposes to the dispatcher.
//! - **Outbound**: the consumed collaborators — compiler, chain state,
//!   transaction submission, and the contract platform.
//!
//! No concrete implementations in this module.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
