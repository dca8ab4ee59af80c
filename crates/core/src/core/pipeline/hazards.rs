//! Data hazard detection and operand forwarding.
//!
//! Run every cycle inside the decode stage, after EX and MEM have refreshed
//! the occupant latches for this cycle. It provides:
//! 1. **Hazard Detection:** Compares the decoding instruction's actual source
//!    registers against the destination registers of the EX- and MEM-stage
//!    occupants.
//! 2. **Forwarding:** Arms single-use selectors that EX resolves one cycle
//!    later; with forwarding disabled the same comparisons arm stalls
//!    instead (3 cycles for an EX-stage producer, 2 for MEM-stage).
//! 3. **Load Shadow:** An unconditional 2-cycle stall behind every load,
//!    with no dependency check — any instruction decoding while a load sits
//!    in EX/MEM waits for the loaded value to clear MEM.

use tracing::debug;

use crate::core::arch::ArchState;
use crate::core::pipeline::latches::MemWb;
use crate::isa::decode::Decoded;

/// Stall cycles charged when the producer is the EX-stage occupant and
/// forwarding is off.
const STALL_EX_PRODUCER: u32 = 3;

/// Stall cycles charged when the producer is the MEM-stage occupant and
/// forwarding is off, and for the unconditional load shadow.
const STALL_MEM_PRODUCER: u32 = 2;

/// Forwarding source for one operand. Armed by ID, consumed (and cleared)
/// by EX exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Forward {
    /// No bypass; use the operand latched at decode.
    #[default]
    None,
    /// Producer was in EX at decode time; by resolution it has advanced to
    /// MEM, so its result is read from the MEM/WB latch.
    FromEx,
    /// Producer was in MEM at decode time; by resolution its writeback has
    /// staged the value, so it is read from the staging register file.
    FromMem,
}

/// Hazard/forward unit state, refreshed every cycle.
#[derive(Clone, Copy, Debug)]
pub struct HazardUnit {
    /// Bypass selector for operand A (rs).
    pub forward_a: Forward,
    /// Bypass selector for operand B (rt).
    pub forward_b: Forward,
    /// Decode-stage bubble cycles remaining.
    pub stall: u32,
    /// Destination register of the EX-stage occupant (`None` when it does
    /// not write a GPR); refreshed by EX every cycle.
    pub ex_dest: Option<usize>,
    /// Destination register of the MEM-stage occupant; refreshed by MEM
    /// every cycle.
    pub mem_dest: Option<usize>,
    /// Whether the EX-stage occupant is a load; drives the load shadow.
    pub ex_is_load: bool,
    /// Operator toggle: bypass results when true, stall when false.
    pub forwarding: bool,
}

impl HazardUnit {
    /// A quiescent unit with the given forwarding mode.
    pub fn new(forwarding: bool) -> Self {
        Self {
            forward_a: Forward::None,
            forward_b: Forward::None,
            stall: 0,
            ex_dest: None,
            mem_dest: None,
            ex_is_load: false,
            forwarding,
        }
    }

    /// Resets everything except the forwarding toggle.
    pub fn clear(&mut self) {
        *self = Self::new(self.forwarding);
    }

    /// Clears both selectors. Called by EX after resolution so a selector is
    /// never applied twice, and on bubbles so a stall armed together with a
    /// selector cannot leak a stale bypass to a later instruction.
    pub fn clear_forwards(&mut self) {
        self.forward_a = Forward::None;
        self.forward_b = Forward::None;
    }

    /// Runs the per-cycle hazard comparison for the instruction being
    /// decoded, arming forward selectors or a stall.
    ///
    /// Only the instruction's actual source registers participate, and an
    /// occupant only hazards if it writes a GPR other than register 0. The
    /// MEM-stage occupant is checked first so that when both occupants
    /// write the same source, the younger EX-stage producer wins.
    pub fn examine(&mut self, d: &Decoded) {
        self.clear_forwards();

        if d.reads_rs() {
            self.forward_a = self.check_source(d.rs);
        }
        if d.reads_rt() {
            self.forward_b = self.check_source(d.rt);
        }

        // Load shadow: the loaded value does not exist until the load
        // clears MEM, so everything decoding behind it waits out 2 cycles
        // whether or not it consumes the value.
        if self.ex_is_load && self.stall == 0 {
            self.stall = STALL_MEM_PRODUCER;
            debug!(stall = self.stall, "load shadow stall");
        }
    }

    fn check_source(&mut self, src: usize) -> Forward {
        let mut sel = Forward::None;

        if matches!(self.mem_dest, Some(dst) if dst != 0 && dst == src) {
            if self.forwarding {
                sel = Forward::FromMem;
            } else {
                self.stall = self.stall.max(STALL_MEM_PRODUCER);
            }
        }
        if matches!(self.ex_dest, Some(dst) if dst != 0 && dst == src) {
            if self.forwarding {
                sel = Forward::FromEx;
            } else {
                self.stall = self.stall.max(STALL_EX_PRODUCER);
            }
        }

        if sel != Forward::None {
            debug!(src, ?sel, "forward armed");
        } else if self.stall > 0 {
            debug!(src, stall = self.stall, "hazard stall armed");
        }
        sel
    }
}

/// Resolves one armed forward selector to the producer's value.
///
/// Applied exactly once, in EX, the cycle after the selector was armed:
/// - [`Forward::FromEx`]: the producer has just advanced through MEM, so
///   MEM/WB holds its result — the loaded datum if it was a load, the ALU
///   output otherwise.
/// - [`Forward::FromMem`]: the producer's writeback ran earlier this cycle
///   and staged the value; read it from the staging register generation.
/// - [`Forward::None`]: use the operand latched at decode.
pub fn resolve(sel: Forward, src: usize, latched: u32, mem_wb: &MemWb, staged: &ArchState) -> u32 {
    match sel {
        Forward::None => latched,
        Forward::FromEx => match mem_wb.op {
            Some(d) if d.is_load() => mem_wb.lmd,
            _ => mem_wb.alu_out,
        },
        Forward::FromMem => staged.regs[src],
    }
}
