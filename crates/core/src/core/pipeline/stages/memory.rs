//! Memory Access (MEM) stage.
//!
//! Loads and stores go through the data cache (or straight to memory when
//! the cache is disabled) at the ALU-computed effective address. Everything
//! else passes its results through to MEM/WB.
//!
//! Bubbles clear only the IR/tag and the occupant latch: the MEM/WB data
//! fields keep their last values so the forwarding unit can still read a
//! one-cycle-old result.

use tracing::warn;

use crate::core::Cpu;
use crate::isa::decode::{Op, OpClass};
use crate::mem::cache::AccessWidth;

/// Executes the memory stage.
pub fn mem_stage(cpu: &mut Cpu) {
    let ex = cpu.ex_mem;

    // Refresh the MEM-occupant hazard latch for this cycle's decode.
    cpu.hazards.mem_dest = ex.op.as_ref().and_then(|d| d.dest());

    if ex.ir == 0 {
        cpu.mem_wb.ir = 0;
        cpu.mem_wb.op = None;
        return;
    }

    cpu.mem_wb.ir = ex.ir;
    cpu.mem_wb.op = ex.op;

    let Some(d) = ex.op else {
        warn!(ir = format_args!("{:#010x}", ex.ir), "MEM: instruction not implemented");
        return;
    };

    match d.class {
        OpClass::Load => {
            let word = data_read(cpu, ex.alu_out);
            // LB/LH extend from the low bits of the fetched word.
            cpu.mem_wb.lmd = match d.op {
                Op::Lb => word as u8 as i8 as i32 as u32,
                Op::Lh => word as u16 as i16 as i32 as u32,
                _ => word,
            };
        }
        OpClass::Store => {
            if let Some(width) = d.store_width() {
                data_write(cpu, ex.alu_out, ex.b, width);
            }
        }
        _ => {
            cpu.mem_wb.alu_out = ex.alu_out;
            cpu.mem_wb.hi = ex.hi;
            cpu.mem_wb.lo = ex.lo;
        }
    }
}

/// Reads the word containing `addr`, through the cache when enabled. Both
/// paths are word-aligned: the cache indexes its block by address bits 3-2,
/// and the uncached path masks the low bits to match.
fn data_read(cpu: &mut Cpu, addr: u32) -> u32 {
    if cpu.cache_enabled {
        cpu.cache.read32(&cpu.mem, addr)
    } else {
        cpu.mem.read32(addr & !0x3)
    }
}

/// Writes `value` at `addr` at the given width, through the cache when
/// enabled. The uncached path performs the same read-merge-write the cache
/// does, so width semantics are identical in both modes.
fn data_write(cpu: &mut Cpu, addr: u32, value: u32, width: AccessWidth) {
    if cpu.cache_enabled {
        cpu.cache.write32(&mut cpu.mem, addr, value, width);
        return;
    }
    let old = cpu.mem.read32(addr & !0x3);
    let merged = match width {
        AccessWidth::Byte => (old & 0xFFFF_FF00) | (value & 0x0000_00FF),
        AccessWidth::Half => (old & 0xFFFF_0000) | (value & 0x0000_FFFF),
        AccessWidth::Word => value,
    };
    cpu.mem.write32(addr & !0x3, merged);
}
