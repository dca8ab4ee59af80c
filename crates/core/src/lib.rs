//! Cycle-accurate 5-stage MIPS-like pipeline simulator library.
//!
//! This crate implements a single-issue, in-order, five-stage
//! (IF/ID/EX/MEM/WB) 32-bit pipeline with the following:
//! 1. **Core:** Double-buffered architectural state, pipeline latches, and
//!    the five stage functions run in write-before-read order.
//! 2. **Hazards:** Data-hazard detection with operand forwarding or
//!    configurable stalling, plus late branch resolution with a one-cycle
//!    flush.
//! 3. **Memory:** Named byte-addressable regions behind an optional
//!    direct-mapped write-allocate data cache.
//! 4. **Simulation:** Hex-text program loader, bounded and unbounded run
//!    drivers, statistics, and the operator surface for an interactive
//!    shell.
//!
//! The model is deliberately faithful to the machine it reproduces,
//! including its sharp edges: register 0 is writable, the cache's raw
//! hit/miss counters are cross-wired, and only the bounded run charges
//! miss latency. See `DESIGN.md` for the full list of preserved quirks.

/// Common constants and error types.
pub mod common;
/// Simulator configuration.
pub mod config;
/// Processor core (architectural state, pipeline, stages).
pub mod core;
/// Instruction set (decode, disassembly, field extraction).
pub mod isa;
/// Memory regions and the data cache.
pub mod mem;
/// Program loading and the run drivers.
pub mod sim;
/// Cycle / instruction / stall counters.
pub mod stats;

pub use crate::common::SimError;
pub use crate::config::Config;
pub use crate::core::Cpu;
pub use crate::sim::{Program, Simulator};
