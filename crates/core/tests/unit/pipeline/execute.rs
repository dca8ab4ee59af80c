//! ALU and load/store semantics, exercised through full pipeline runs.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{TestContext, asm};

const DATA: u32 = 0x1001_0000;

/// One-instruction programs over preset registers: r1 = 0xFF00_FF0C,
/// r2 = 5, r3 = -7.
#[rstest]
#[case(asm::add(4, 2, 3), (-2i32) as u32)]
#[case(asm::sub(4, 2, 3), 12)]
#[case(asm::and(4, 1, 2), 4)]
#[case(asm::or(4, 2, 3), 0xFFFF_FFFD)]
#[case(asm::xor(4, 2, 2), 0)]
#[case(asm::nor(4, 2, 2), !5u32)]
#[case(asm::slt(4, 3, 2), 1)] // -7 < 5 signed
#[case(asm::slt(4, 2, 3), 0)]
#[case(asm::addi(4, 2, -8), (-3i32) as u32)]
#[case(asm::slti(4, 3, 0), 1)] // -7 < 0 signed
#[case(asm::andi(4, 1, 0xF0F0), 0x0000_F000)]
#[case(asm::ori(4, 2, 0x8000), 0x0000_8005)] // zero-extended, not sign-extended
#[case(asm::xori(4, 2, 0x000F), 0x0000_000A)]
#[case(asm::lui(4, 0x8765), 0x8765_0000)]
fn alu_results(#[case] word: u32, #[case] expected: u32) {
    let mut t = TestContext::new(&[word, asm::syscall()]);
    t.set_reg(1, 0xFF00_FF0C);
    t.set_reg(2, 5);
    t.set_reg(3, (-7i32) as u32);
    t.run_to_halt();
    assert_eq!(t.reg(4), expected);
}

/// Shifts move the rt operand by the shamt field; SRA replicates the sign.
#[test]
fn shifts() {
    let mut t = TestContext::new(&[
        asm::sll(4, 1, 4),
        asm::srl(5, 1, 4),
        asm::sra(6, 1, 4),
        asm::syscall(),
    ]);
    t.set_reg(1, 0x8000_0010);
    t.run_to_halt();

    assert_eq!(t.reg(4), 0x0000_0100);
    assert_eq!(t.reg(5), 0x0800_0001);
    assert_eq!(t.reg(6), 0xF800_0001, "SRA replicates the sign bit");
}

#[test]
fn loads_extend_from_the_low_bits() {
    let words = [
        asm::lb(2, 0, 8),
        asm::lh(3, 0, 8),
        asm::lw(4, 0, 8),
        asm::syscall(),
    ];
    let mut t = TestContext::new(&words);
    t.set_reg(8, DATA);
    t.poke_mem(DATA, 0x0001_80FF);
    t.run_to_halt();

    assert_eq!(t.reg(2), 0xFFFF_FFFF, "LB sign-extends bit 7");
    assert_eq!(t.reg(3), 0xFFFF_80FF, "LH sign-extends bit 15");
    assert_eq!(t.reg(4), 0x0001_80FF);
}

/// The load path extends from the low bits of the *word*, whatever the
/// byte offset inside it.
#[test]
fn byte_loads_ignore_the_subword_offset() {
    let words = [asm::lb(2, 0, 8), asm::lb(3, 1, 8), asm::syscall()];
    let mut t = TestContext::new(&words);
    t.set_reg(8, DATA);
    t.poke_mem(DATA, 0x1122_3380);
    t.run_to_halt();

    assert_eq!(t.reg(2), t.reg(3));
    assert_eq!(t.reg(2), 0xFFFF_FF80);
}

/// SB then LW over the same word: write-then-read consistency across
/// mixed widths (through the write-allocate cache).
#[test]
fn store_byte_then_load_word() {
    let words = [
        asm::addi(1, 0, 0x55),
        asm::sb(1, 0, 8),
        asm::lw(2, 0, 8),
        asm::syscall(),
    ];
    let mut t = TestContext::new(&words);
    t.set_reg(8, DATA);
    t.poke_mem(DATA, 0x1122_3344);
    t.run_to_halt();

    assert_eq!(t.reg(2), 0x1122_3355);
    assert_eq!(t.peek_mem(DATA), 0x1122_3355, "write-through reaches memory");
}

#[test]
fn store_halfword_merges() {
    let words = [
        asm::lui(1, 0xBEEF), // r1 = 0xBEEF0000
        asm::ori(1, 1, 0xA0A0),
        asm::sh(1, 0, 8),
        asm::syscall(),
    ];
    let mut t = TestContext::new(&words);
    t.set_reg(8, DATA);
    t.poke_mem(DATA, 0x1122_3344);
    t.run_to_halt();

    assert_eq!(t.peek_mem(DATA), 0x1122_A0A0);
}

/// Same program, cache on and cache off: identical architectural results.
#[test]
fn cache_bypass_is_transparent() {
    let words = [
        asm::addi(1, 0, 0x31),
        asm::sb(1, 0, 8),
        asm::lw(2, 0, 8),
        asm::lb(3, 0, 8),
        asm::syscall(),
    ];
    let mut run = |cache: bool| {
        let mut t = TestContext::new(&words).cache_enabled(cache);
        t.set_reg(8, DATA);
        t.poke_mem(DATA, 0x7700_0042);
        t.run_to_halt();
        (t.reg(2), t.reg(3), t.peek_mem(DATA))
    };

    assert_eq!(run(true), run(false));
}

/// Effective addresses use sign-extended offsets for every width.
#[test]
fn negative_offsets() {
    let words = [
        asm::lw(2, -4, 8),
        asm::lb(3, -4, 8),
        asm::syscall(),
    ];
    let mut t = TestContext::new(&words);
    t.set_reg(8, DATA + 4);
    t.poke_mem(DATA, 0x0000_0049);
    t.run_to_halt();

    assert_eq!(t.reg(2), 0x49);
    assert_eq!(t.reg(3), 0x49);
}

/// Out-of-range data accesses are lenient: loads return zero, stores are
/// dropped, and the pipeline keeps going.
#[test]
fn unmapped_data_accesses_do_not_stop_the_machine() {
    let words = [
        asm::lw(2, 0, 0),  // address 0: unmapped
        asm::sw(2, 4, 0),
        asm::syscall(),
    ];
    let mut t = TestContext::new(&words);
    t.run_to_halt();

    assert_eq!(t.reg(2), 0);
    assert_eq!(t.instructions(), 3);
}
