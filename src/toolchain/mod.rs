//! External Orus toolchain integration
//!
//! This module provides:
//! - Toolchain discovery via `ORUS_HOME` or the search path
//! - Process delegation with exit-status passthrough

pub mod locate;
pub mod delegate;

pub use locate::{ToolchainConfig, TOOLCHAIN_EXECUTABLE};
pub use delegate::{Delegate, Termination};
