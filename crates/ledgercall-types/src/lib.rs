//! # LedgerCall Shared Types
//!
//! Value objects and the wire model shared by the binding core.
//!
//! ## Clusters
//!
//! - **Primitives**: `Address`, `Hash`, `Bytes`, `SigningIdentity`, `BlockRef`
//! - **Wire model**: `WireValue` (raw decoded ABI output), `Value`
//!   (reconstructed result tree)
//! - **Shapes**: `TargetType` decode descriptors, `CallMode`
//! - **Descriptors**: `InterfaceDescriptor`, `MethodDescriptor`,
//!   `ContractFunction`
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: everything that crosses the encoding
//!   boundary is defined here, once.
//! - **Explicit shapes**: declared return types are data
//!   (`TargetType`), never inferred at call time.

pub mod descriptors;
pub mod primitives;
pub mod shape;
pub mod wire;

pub use descriptors::*;
pub use primitives::*;
pub use shape::*;
pub use wire::*;
