//! Processor core.
//!
//! This module contains the CPU implementation:
//! 1. **Architectural State:** Registers, HI/LO, and PC in two generations.
//! 2. **Pipeline:** Latches, the hazard/forward unit, and the five stage functions.
//! 3. **Cycle Driver:** The fixed WB, MEM, EX, ID, IF evaluation order and the commit point.

/// Architectural state (registers, HI/LO, PC).
pub mod arch;

/// Pipeline latches, hazards, and stage functions.
pub mod pipeline;

use crate::config::Config;
use crate::core::arch::ArchState;
use crate::core::pipeline::hazards::HazardUnit;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::stages;
use crate::mem::{Cache, Memory};
use crate::stats::SimStats;

/// The machine aggregate: every piece of mutable simulator state.
///
/// Stage functions take `&mut Cpu`; nothing about the machine lives in
/// process-wide state. Lifecycle is `new` -> run cycles -> drop, with
/// [`Cpu::clear`] re-arming the same machine for a reset.
pub struct Cpu {
    /// Architectural state read by the stages this cycle.
    pub current: ArchState,
    /// Staging generation: WB writes land here and become `current` at the
    /// end-of-cycle commit. The decode stage latches operands from this
    /// generation so a value staged by WB earlier in the same cycle is
    /// already visible (write-before-read register file).
    pub next: ArchState,

    /// IF -> ID latch.
    pub if_id: IfId,
    /// ID -> EX latch.
    pub id_ex: IdEx,
    /// EX -> MEM latch.
    pub ex_mem: ExMem,
    /// MEM -> WB latch.
    pub mem_wb: MemWb,

    /// Hazard detection and forwarding state.
    pub hazards: HazardUnit,

    /// Backing memory regions.
    pub mem: Memory,
    /// Data cache in front of memory.
    pub cache: Cache,
    /// When false, MEM-stage accesses bypass the cache.
    pub cache_enabled: bool,

    /// Set by EX when a control transfer redirects the PC; consumed by ID
    /// next in program order to squash the one instruction fetched behind
    /// the branch.
    pub branch_taken: bool,
    /// Set by ID in cycles where it emitted a stall bubble, so IF holds the
    /// current fetch and re-presents it.
    pub fetch_hold: bool,
    /// Cleared by a retiring SYSCALL with the halt code; the run drivers
    /// loop on it.
    pub run_flag: bool,

    /// Cycle / instruction / stall accounting.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a zero-filled machine with PC at the text base.
    pub fn new(config: &Config) -> Self {
        let state = ArchState {
            pc: config.memory.text_base,
            ..ArchState::default()
        };
        Self {
            current: state,
            next: state,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            hazards: HazardUnit::new(config.pipeline.forwarding),
            mem: Memory::new(&config.memory),
            cache: Cache::new(),
            cache_enabled: config.cache.enabled,
            branch_taken: false,
            fetch_hold: false,
            run_flag: true,
            stats: SimStats::default(),
        }
    }

    /// Executes one cycle: all five stages in write-before-read order, then
    /// the single commit point.
    ///
    /// The order is load-bearing: each stage consumes the latch its upstream
    /// neighbor produced *last* cycle before that neighbor overwrites it
    /// later this cycle, and IF observes the PC after EX has possibly
    /// redirected it.
    pub fn cycle(&mut self) {
        stages::wb_stage(self);
        stages::mem_stage(self);
        stages::execute_stage(self);
        stages::decode_stage(self);
        stages::fetch_stage(self);

        self.current = self.next;
        self.stats.cycles += 1;
    }

    /// Zeroes registers, memory, cache, latches, hazard state, and counters,
    /// and re-arms the run flag. The PC is reset to `pc`.
    ///
    /// The forwarding toggle survives a reset, like every other operator
    /// switch.
    pub fn clear(&mut self, pc: u32) {
        self.current = ArchState {
            pc,
            ..ArchState::default()
        };
        self.next = self.current;
        self.if_id = IfId::default();
        self.id_ex = IdEx::default();
        self.ex_mem = ExMem::default();
        self.mem_wb = MemWb::default();
        self.hazards.clear();
        self.mem.clear();
        self.cache.reset();
        self.branch_taken = false;
        self.fetch_hold = false;
        self.run_flag = true;
        self.stats = SimStats::default();
    }
}
