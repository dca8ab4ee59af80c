//! Opcode and function-field constant tables.

/// Primary opcode values (instruction bits 31-26).
pub mod opcode {
    /// R-format instructions; the funct field selects the operation.
    pub const SPECIAL: u32 = 0x00;
    /// REGIMM group; the rt field selects BLTZ or BGEZ.
    pub const REGIMM: u32 = 0x01;
    /// Unconditional jump.
    pub const J: u32 = 0x02;
    /// Jump and link.
    pub const JAL: u32 = 0x03;
    /// Branch if equal.
    pub const BEQ: u32 = 0x04;
    /// Branch if not equal.
    pub const BNE: u32 = 0x05;
    /// Branch if less than or equal to zero.
    pub const BLEZ: u32 = 0x06;
    /// Branch if greater than zero.
    pub const BGTZ: u32 = 0x07;
    /// Add immediate.
    pub const ADDI: u32 = 0x08;
    /// Add immediate unsigned.
    pub const ADDIU: u32 = 0x09;
    /// Set on less than immediate.
    pub const SLTI: u32 = 0x0A;
    /// AND immediate (zero-extended).
    pub const ANDI: u32 = 0x0C;
    /// OR immediate (zero-extended).
    pub const ORI: u32 = 0x0D;
    /// XOR immediate (zero-extended).
    pub const XORI: u32 = 0x0E;
    /// Load upper immediate.
    pub const LUI: u32 = 0x0F;
    /// Load byte (sign-extended).
    pub const LB: u32 = 0x20;
    /// Load halfword (sign-extended).
    pub const LH: u32 = 0x21;
    /// Load word.
    pub const LW: u32 = 0x23;
    /// Store byte.
    pub const SB: u32 = 0x28;
    /// Store halfword.
    pub const SH: u32 = 0x29;
    /// Store word.
    pub const SW: u32 = 0x2B;
}

/// Function field values under [`opcode::SPECIAL`] (instruction bits 5-0).
pub mod funct {
    /// Shift left logical.
    pub const SLL: u32 = 0x00;
    /// Shift right logical.
    pub const SRL: u32 = 0x02;
    /// Shift right arithmetic.
    pub const SRA: u32 = 0x03;
    /// Jump register.
    pub const JR: u32 = 0x08;
    /// Jump and link register.
    pub const JALR: u32 = 0x09;
    /// System call.
    pub const SYSCALL: u32 = 0x0C;
    /// Move from HI.
    pub const MFHI: u32 = 0x10;
    /// Move to HI.
    pub const MTHI: u32 = 0x11;
    /// Move from LO.
    pub const MFLO: u32 = 0x12;
    /// Move to LO.
    pub const MTLO: u32 = 0x13;
    /// Multiply (signed).
    pub const MULT: u32 = 0x18;
    /// Multiply unsigned.
    pub const MULTU: u32 = 0x19;
    /// Divide (signed).
    pub const DIV: u32 = 0x1A;
    /// Divide unsigned.
    pub const DIVU: u32 = 0x1B;
    /// Add.
    pub const ADD: u32 = 0x20;
    /// Add unsigned.
    pub const ADDU: u32 = 0x21;
    /// Subtract.
    pub const SUB: u32 = 0x22;
    /// Subtract unsigned.
    pub const SUBU: u32 = 0x23;
    /// Bitwise AND.
    pub const AND: u32 = 0x24;
    /// Bitwise OR.
    pub const OR: u32 = 0x25;
    /// Bitwise XOR.
    pub const XOR: u32 = 0x26;
    /// Bitwise NOR.
    pub const NOR: u32 = 0x27;
    /// Set on less than (signed).
    pub const SLT: u32 = 0x2A;
}

/// rt field values under [`opcode::REGIMM`].
pub mod regimm {
    /// Branch if less than zero.
    pub const BLTZ: u32 = 0x00;
    /// Branch if greater than or equal to zero.
    pub const BGEZ: u32 = 0x01;
}
