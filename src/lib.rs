//! ka, the Orus package manager
//!
//! This crate provides the dependency manifest and installation subsystem
//! and the delegation of run/build/test actions to the external Orus
//! toolchain.

pub mod error;
pub mod package;
pub mod toolchain;
pub mod cli;

// Re-export core types for convenience
pub use error::*;
