//! # Domain Layer
//!
//! Pure marshalling logic: the ABI and its payload codec, the scalar
//! converter registry, and the recursive result reconstructor.
//! No I/O and no async in this layer.

pub mod abi;
pub mod convert;
pub mod reconstruct;

pub use abi::*;
pub use convert::*;
pub use reconstruct::*;
