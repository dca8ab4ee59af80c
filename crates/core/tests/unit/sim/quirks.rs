//! Pins for deliberately preserved machine quirks.
//!
//! These behaviors look like bugs and are not: they are part of the machine
//! being modeled. Each test documents one so an accidental "fix" fails
//! loudly. The swapped cache counter naming is pinned next to the cache
//! tests.

use pretty_assertions::assert_eq;

use crate::common::{TestContext, asm};

const DATA: u32 = 0x1001_0000;

/// Register 0 is an ordinary register: writes to it land and later reads
/// observe them.
#[test]
fn register_zero_is_writable() {
    let words = [
        asm::addi(0, 0, 5),
        asm::addi(9, 0, 0), // spacing, unrelated
        asm::addi(9, 0, 0),
        asm::addi(9, 0, 0),
        asm::add(4, 0, 0), // decodes after the write commits: 5 + 5
        asm::syscall(),
    ];
    let mut t = TestContext::new(&words);
    t.run_to_halt();

    assert_eq!(t.reg(0), 5);
    assert_eq!(t.reg(4), 10);
}

/// Miss-latency stretching applies only to the bounded run command.
/// Run-to-completion counts pure pipeline cycles; `run_cycles` charges the
/// 100-cycle penalty budget while the miss flag drains, *without* stepping
/// the pipeline. Same workload, different totals — by design.
#[test]
fn bounded_run_stretches_cycles_on_miss() {
    let words = [asm::lw(2, 0, 8), asm::syscall()];

    let mut unbounded = TestContext::new(&words);
    unbounded.set_reg(8, DATA);
    unbounded.poke_mem(DATA, 7);
    unbounded.run_to_halt();

    let mut bounded = TestContext::new(&words);
    bounded.set_reg(8, DATA);
    bounded.poke_mem(DATA, 7);
    bounded.sim.run_cycles(10_000);

    assert!(!bounded.sim.running());
    assert_eq!(bounded.reg(2), 7);
    assert_eq!(unbounded.reg(2), 7);
    assert_eq!(
        bounded.cycles(),
        unbounded.cycles() + 100,
        "one miss charges the full penalty budget under run_cycles"
    );
    assert_eq!(
        bounded.instructions(),
        unbounded.instructions(),
        "penalty cycles do not step the pipeline"
    );
}

/// A hit-only workload sees identical totals under both run commands.
#[test]
fn bounded_run_matches_without_misses() {
    let words = [asm::addi(1, 0, 4), asm::addi(2, 0, 8), asm::syscall()];

    let mut unbounded = TestContext::new(&words);
    unbounded.run_to_halt();

    let mut bounded = TestContext::new(&words);
    bounded.sim.run_cycles(10_000);

    assert_eq!(bounded.cycles(), unbounded.cycles());
}

/// The branch flag set by EX is consumed by decode even when the slot
/// behind the branch holds a bubble; nothing real is lost.
#[test]
fn flush_of_a_bubble_is_harmless() {
    // The slot behind the jump is a zero word, so the flush squashes a
    // bubble rather than an instruction.
    let words = [
        asm::j(0x0040_0010),
        0,
        0,
        0,
        asm::addi(10, 0, 3), // @ +0x10
        asm::syscall(),
    ];
    let mut t = TestContext::new(&words);
    t.run_to_halt();

    assert_eq!(t.reg(10), 3);
    assert_eq!(t.instructions(), 3);
}
