//! Simulation front door.
//!
//! This module assembles the machine and drives it:
//! 1. **Loader:** The flat hex-text program reader.
//! 2. **Simulator:** Construction, the run drivers, reset, and the operator
//!    surface the shell talks to.

/// Flat hex-text program loading.
pub mod loader;

/// Top-level simulator and operator surface.
pub mod simulator;

pub use loader::Program;
pub use simulator::Simulator;
