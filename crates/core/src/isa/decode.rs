//! Decode-once instruction classification.
//!
//! Every fetched word is decoded exactly once, in the decode stage, into a
//! [`Decoded`] value: the operation, its class tag, and the raw fields. The
//! tag travels through the pipeline registers so the execute, memory, and
//! writeback stages match on the variant instead of re-deriving bit fields.
//!
//! [`decode`] returns `None` for encodings the machine does not implement;
//! such words still flow through the pipeline (each stage reports a
//! diagnostic and contributes no semantic effect).

use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{funct, opcode, regimm};
use crate::mem::cache::AccessWidth;

/// The operations implemented by the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)] // variant names are the MIPS mnemonics
pub enum Op {
    Sll,
    Srl,
    Sra,
    Jr,
    Jalr,
    Syscall,
    Mfhi,
    Mthi,
    Mflo,
    Mtlo,
    Mult,
    Multu,
    Div,
    Divu,
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Bltz,
    Bgez,
    J,
    Jal,
    Beq,
    Bne,
    Blez,
    Bgtz,
    Addi,
    Addiu,
    Slti,
    Andi,
    Ori,
    Xori,
    Lui,
    Lb,
    Lh,
    Lw,
    Sb,
    Sh,
    Sw,
}

/// Coarse classification of an operation, used by the later pipeline stages
/// and the hazard unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpClass {
    /// Register-register ALU operation (result into rd).
    AluReg,
    /// Immediate ALU operation (result into rt).
    AluImm,
    /// Memory load (result into rt).
    Load,
    /// Memory store (value from rt).
    Store,
    /// Conditional branch.
    Branch,
    /// Unconditional jump.
    Jump,
    /// HI/LO traffic, multiply/divide, and SYSCALL.
    Special,
}

/// A fully decoded instruction: operation, class tag, and raw fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The operation.
    pub op: Op,
    /// Coarse class of the operation.
    pub class: OpClass,
    /// First source register field.
    pub rs: usize,
    /// Second source / destination register field (format-dependent).
    pub rt: usize,
    /// Destination register field of R-format instructions.
    pub rd: usize,
    /// Shift amount field.
    pub shamt: u32,
    /// Raw 16-bit immediate.
    pub imm: u16,
    /// 26-bit jump target field.
    pub target: u32,
}

impl Decoded {
    /// The immediate, sign-extended to 32 bits.
    #[inline]
    pub fn imm_sext(&self) -> u32 {
        self.imm as i16 as i32 as u32
    }

    /// The immediate, zero-extended to 32 bits (ANDI/ORI/XORI convention).
    #[inline]
    pub fn imm_zext(&self) -> u32 {
        u32::from(self.imm)
    }

    /// The general-purpose register this instruction writes in WB, if any.
    ///
    /// HI/LO writers and control transfers return `None`: they do not commit
    /// through the register-file path the hazard unit guards. (`JAL`/`JALR`
    /// stage their link directly from EX.)
    pub fn dest(&self) -> Option<usize> {
        match self.class {
            OpClass::AluReg => Some(self.rd),
            OpClass::AluImm | OpClass::Load => Some(self.rt),
            OpClass::Special => match self.op {
                Op::Mfhi | Op::Mflo => Some(self.rd),
                _ => None,
            },
            OpClass::Store | OpClass::Branch | OpClass::Jump => None,
        }
    }

    /// Whether the operation reads the `rs` register as an operand.
    pub fn reads_rs(&self) -> bool {
        !matches!(
            self.op,
            Op::Sll
                | Op::Srl
                | Op::Sra
                | Op::Syscall
                | Op::Mfhi
                | Op::Mflo
                | Op::J
                | Op::Jal
                | Op::Lui
        )
    }

    /// Whether the operation reads the `rt` register as an operand.
    ///
    /// Shifts read rt (the value being shifted); stores read it as the value
    /// to write; `BEQ`/`BNE` compare against it.
    pub fn reads_rt(&self) -> bool {
        match self.class {
            OpClass::AluReg | OpClass::Store => true,
            OpClass::Branch => matches!(self.op, Op::Beq | Op::Bne),
            OpClass::Special => matches!(self.op, Op::Mult | Op::Multu | Op::Div | Op::Divu),
            OpClass::AluImm | OpClass::Load | OpClass::Jump => false,
        }
    }

    /// Whether this is a load.
    #[inline]
    pub fn is_load(&self) -> bool {
        self.class == OpClass::Load
    }

    /// The access width of a store, or `None` for everything else.
    pub fn store_width(&self) -> Option<AccessWidth> {
        match self.op {
            Op::Sb => Some(AccessWidth::Byte),
            Op::Sh => Some(AccessWidth::Half),
            Op::Sw => Some(AccessWidth::Word),
            _ => None,
        }
    }
}

/// Decodes a raw instruction word into its tagged representation.
///
/// Returns `None` for opcode/funct combinations the machine does not
/// implement. Note that the all-zero word decodes as `SLL $r0, $r0, 0`;
/// the pipeline treats a zero IR as a bubble *before* consulting the
/// decoder, so the encoding never reaches a stage as an instruction.
pub fn decode(inst: u32) -> Option<Decoded> {
    use OpClass::*;

    let (op, class) = match inst.opcode() {
        opcode::SPECIAL => match inst.funct() {
            funct::SLL => (Op::Sll, AluReg),
            funct::SRL => (Op::Srl, AluReg),
            funct::SRA => (Op::Sra, AluReg),
            funct::JR => (Op::Jr, Jump),
            funct::JALR => (Op::Jalr, Jump),
            funct::SYSCALL => (Op::Syscall, Special),
            funct::MFHI => (Op::Mfhi, Special),
            funct::MTHI => (Op::Mthi, Special),
            funct::MFLO => (Op::Mflo, Special),
            funct::MTLO => (Op::Mtlo, Special),
            funct::MULT => (Op::Mult, Special),
            funct::MULTU => (Op::Multu, Special),
            funct::DIV => (Op::Div, Special),
            funct::DIVU => (Op::Divu, Special),
            funct::ADD => (Op::Add, AluReg),
            funct::ADDU => (Op::Addu, AluReg),
            funct::SUB => (Op::Sub, AluReg),
            funct::SUBU => (Op::Subu, AluReg),
            funct::AND => (Op::And, AluReg),
            funct::OR => (Op::Or, AluReg),
            funct::XOR => (Op::Xor, AluReg),
            funct::NOR => (Op::Nor, AluReg),
            funct::SLT => (Op::Slt, AluReg),
            _ => return None,
        },
        opcode::REGIMM => match inst.rt() as u32 {
            regimm::BLTZ => (Op::Bltz, Branch),
            regimm::BGEZ => (Op::Bgez, Branch),
            _ => return None,
        },
        opcode::J => (Op::J, Jump),
        opcode::JAL => (Op::Jal, Jump),
        opcode::BEQ => (Op::Beq, Branch),
        opcode::BNE => (Op::Bne, Branch),
        opcode::BLEZ => (Op::Blez, Branch),
        opcode::BGTZ => (Op::Bgtz, Branch),
        opcode::ADDI => (Op::Addi, AluImm),
        opcode::ADDIU => (Op::Addiu, AluImm),
        opcode::SLTI => (Op::Slti, AluImm),
        opcode::ANDI => (Op::Andi, AluImm),
        opcode::ORI => (Op::Ori, AluImm),
        opcode::XORI => (Op::Xori, AluImm),
        opcode::LUI => (Op::Lui, AluImm),
        opcode::LB => (Op::Lb, Load),
        opcode::LH => (Op::Lh, Load),
        opcode::LW => (Op::Lw, Load),
        opcode::SB => (Op::Sb, Store),
        opcode::SH => (Op::Sh, Store),
        opcode::SW => (Op::Sw, Store),
        _ => return None,
    };

    Some(Decoded {
        op,
        class,
        rs: inst.rs(),
        rt: inst.rt(),
        rd: inst.rd(),
        shamt: inst.shamt(),
        imm: inst.imm16(),
        target: inst.target26(),
    })
}
