//! Writeback (WB) stage.
//!
//! The final stage. Commits results into the staging register generation
//! (which becomes `current` at the end-of-cycle commit), stops the machine
//! when a SYSCALL retires with the halt code, and counts retired
//! instructions.

use tracing::warn;

use crate::common::constants::HALT_CODE;
use crate::core::Cpu;
use crate::isa::decode::{Op, OpClass};

/// Executes the writeback stage.
pub fn wb_stage(cpu: &mut Cpu) {
    let wb = cpu.mem_wb;

    if wb.ir == 0 {
        return;
    }

    match wb.op {
        None => {
            // Unimplemented encoding retires with no architectural effect.
            warn!(ir = format_args!("{:#010x}", wb.ir), "WB: instruction not implemented");
        }
        Some(d) => match d.op {
            Op::Syscall => {
                if wb.alu_out == HALT_CODE {
                    cpu.run_flag = false;
                }
            }
            Op::Mfhi => cpu.next.regs[d.rd] = wb.hi,
            Op::Mflo => cpu.next.regs[d.rd] = wb.lo,
            Op::Mthi => cpu.next.hi = wb.alu_out,
            Op::Mtlo => cpu.next.lo = wb.alu_out,
            Op::Mult | Op::Multu | Op::Div | Op::Divu => {
                cpu.next.hi = wb.hi;
                cpu.next.lo = wb.lo;
            }
            _ => {
                if let Some(dst) = d.dest() {
                    // No hard-wired zero: a destination of r0 really writes.
                    cpu.next.regs[dst] = if d.class == OpClass::Load {
                        wb.lmd
                    } else {
                        wb.alu_out
                    };
                }
            }
        },
    }

    cpu.stats.instructions += 1;
}
