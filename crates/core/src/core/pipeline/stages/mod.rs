//! Pipeline stage functions.
//!
//! Each stage is a free function over `&mut Cpu`, invoked once per cycle by
//! the cycle driver in the order WB, MEM, EX, ID, IF (reverse of logical
//! flow). Running a stage before its upstream neighbor lets it consume the
//! latch produced last cycle before the neighbor overwrites it this cycle,
//! which substitutes for true simultaneous register-transfer semantics
//! without double-buffering every latch.

/// Instruction fetch.
pub mod fetch;

/// Instruction decode and hazard evaluation.
pub mod decode;

/// Execute.
pub mod execute;

/// Memory access.
pub mod memory;

/// Writeback.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
