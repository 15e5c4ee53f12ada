//! # Integration Tests
//!
//! Cross-module flows: registration through the binder, dispatch by
//! call mode, result reconstruction, and the live-variant pipeline
//! against collaborator doubles.

pub mod gateway_flows;
pub mod live_pipeline;
