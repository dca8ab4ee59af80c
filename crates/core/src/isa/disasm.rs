//! Instruction disassembler.
//!
//! Converts a 32-bit instruction encoding into mnemonic text for the program
//! listing, debug tracing, and test diagnostics. The rendering follows the
//! operator-facing dump format: `ADD $r3, $r1, $r2`, `LW $r2, 0x8($r1)`,
//! `BEQ $r1, $r2, 0x10`.

use crate::isa::decode::{Op, decode};

/// Disassembles a 32-bit instruction word.
///
/// Branch offsets are shown pre-shifted (byte offsets) and jump targets are
/// resolved against `addr`, the address the word was fetched from. Unknown
/// encodings render as `.word 0x...`.
pub fn disassemble(addr: u32, inst: u32) -> String {
    let Some(d) = decode(inst) else {
        return format!(".word {:#010x}", inst);
    };

    let (rs, rt, rd) = (d.rs, d.rt, d.rd);
    let imm = d.imm;
    let boff = u32::from(imm) << 2;
    let jtarget = (addr & 0xF000_0000) | (d.target << 2);

    match d.op {
        Op::Sll => format!("SLL $r{}, $r{}, {:#x}", rd, rt, d.shamt),
        Op::Srl => format!("SRL $r{}, $r{}, {:#x}", rd, rt, d.shamt),
        Op::Sra => format!("SRA $r{}, $r{}, {:#x}", rd, rt, d.shamt),
        Op::Jr => format!("JR $r{}", rs),
        Op::Jalr if rd == 31 => format!("JALR $r{}", rs),
        Op::Jalr => format!("JALR $r{}, $r{}", rd, rs),
        Op::Syscall => "SYSCALL".to_owned(),
        Op::Mfhi => format!("MFHI $r{}", rd),
        Op::Mthi => format!("MTHI $r{}", rs),
        Op::Mflo => format!("MFLO $r{}", rd),
        Op::Mtlo => format!("MTLO $r{}", rs),
        Op::Mult => format!("MULT $r{}, $r{}", rs, rt),
        Op::Multu => format!("MULTU $r{}, $r{}", rs, rt),
        Op::Div => format!("DIV $r{}, $r{}", rs, rt),
        Op::Divu => format!("DIVU $r{}, $r{}", rs, rt),
        Op::Add => format!("ADD $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Addu => format!("ADDU $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Sub => format!("SUB $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Subu => format!("SUBU $r{}, $r{}, $r{}", rd, rs, rt),
        Op::And => format!("AND $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Or => format!("OR $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Xor => format!("XOR $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Nor => format!("NOR $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Slt => format!("SLT $r{}, $r{}, $r{}", rd, rs, rt),
        Op::Bltz => format!("BLTZ $r{}, {:#x}", rs, boff),
        Op::Bgez => format!("BGEZ $r{}, {:#x}", rs, boff),
        Op::J => format!("J {:#x}", jtarget),
        Op::Jal => format!("JAL {:#x}", jtarget),
        Op::Beq => format!("BEQ $r{}, $r{}, {:#x}", rs, rt, boff),
        Op::Bne => format!("BNE $r{}, $r{}, {:#x}", rs, rt, boff),
        Op::Blez => format!("BLEZ $r{}, {:#x}", rs, boff),
        Op::Bgtz => format!("BGTZ $r{}, {:#x}", rs, boff),
        Op::Addi => format!("ADDI $r{}, $r{}, {:#x}", rt, rs, imm),
        Op::Addiu => format!("ADDIU $r{}, $r{}, {:#x}", rt, rs, imm),
        Op::Slti => format!("SLTI $r{}, $r{}, {:#x}", rt, rs, imm),
        Op::Andi => format!("ANDI $r{}, $r{}, {:#x}", rt, rs, imm),
        Op::Ori => format!("ORI $r{}, $r{}, {:#x}", rt, rs, imm),
        Op::Xori => format!("XORI $r{}, $r{}, {:#x}", rt, rs, imm),
        Op::Lui => format!("LUI $r{}, {:#x}", rt, imm),
        Op::Lb => format!("LB $r{}, {:#x}($r{})", rt, imm, rs),
        Op::Lh => format!("LH $r{}, {:#x}($r{})", rt, imm, rs),
        Op::Lw => format!("LW $r{}, {:#x}($r{})", rt, imm, rs),
        Op::Sb => format!("SB $r{}, {:#x}($r{})", rt, imm, rs),
        Op::Sh => format!("SH $r{}, {:#x}($r{})", rt, imm, rs),
        Op::Sw => format!("SW $r{}, {:#x}($r{})", rt, imm, rs),
    }
}
