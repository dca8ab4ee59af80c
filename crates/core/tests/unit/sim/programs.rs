//! End-to-end program tests and operator-surface behavior.

use pretty_assertions::assert_eq;

use mupipe_core::{Config, Program, Simulator};

use crate::common::{TestContext, asm};

/// The canonical scenario: ADDI r1,r0,5; ADDI r2,r0,10; ADD r3,r1,r2;
/// SYSCALL — halts with r3 = 15 after retiring all 4 instructions.
#[test]
fn canonical_program_halts_with_r3_15() {
    let words = [0x20010005, 0x2002000A, 0x00221820, 0x0000000C];
    let mut t = TestContext::new(&words);
    t.run_to_halt();

    assert_eq!(t.reg(1), 5);
    assert_eq!(t.reg(2), 10);
    assert_eq!(t.reg(3), 15);
    assert_eq!(t.instructions(), 4);
    assert_eq!(t.cycles(), 8);
    assert!(!t.sim.running());
}

/// The same scenario with forwarding off: same architecture, more cycles.
#[test]
fn canonical_program_agrees_without_forwarding() {
    let words = [0x20010005, 0x2002000A, 0x00221820, 0x0000000C];
    let mut t = TestContext::new(&words).forwarding(false);
    t.run_to_halt();

    assert_eq!(t.reg(3), 15);
    assert_eq!(t.instructions(), 4);
    assert!(t.cycles() > 8);
}

/// An unimplemented encoding is a diagnostic, not a fault: it retires with
/// no effect and the program completes.
#[test]
fn unknown_instruction_is_non_fatal() {
    let words = [0xFC00_0000, asm::addi(1, 0, 3), asm::syscall()];
    let mut t = TestContext::new(&words);
    t.run_to_halt();

    assert_eq!(t.reg(1), 3);
    assert_eq!(t.instructions(), 3, "the unknown word still retires");
}

/// Run commands on a halted machine are no-ops.
#[test]
fn run_after_halt_does_nothing() {
    let words = [asm::syscall()];
    let mut t = TestContext::new(&words);
    t.run_to_halt();

    let cycles = t.cycles();
    t.sim.run_to_completion();
    t.sim.run_cycles(10);
    assert_eq!(t.cycles(), cycles);
}

/// The bounded run stops early once the halt retires.
#[test]
fn bounded_run_stops_on_halt() {
    let words = [asm::addi(1, 0, 1), asm::syscall()];
    let mut t = TestContext::new(&words);
    t.sim.run_cycles(1_000);

    assert!(!t.sim.running());
    assert_eq!(t.cycles(), 6);
    assert_eq!(t.reg(1), 1);
}

#[test]
fn reset_restores_the_initial_machine() {
    let words = vec![0x20010005u32, 0x2002000A, 0x00221820, 0x0000000C];
    let program = Program {
        words: words.clone(),
    };
    let config = Config::default();
    let base = config.memory.text_base;
    let mut sim = Simulator::new(config, program).expect("sim");

    sim.run_to_completion();
    assert!(!sim.running());

    sim.reset().expect("reset");
    assert!(sim.running());
    assert_eq!(sim.cpu.stats.cycles, 0);
    assert_eq!(sim.cpu.stats.instructions, 0);
    assert_eq!(sim.cpu.current.pc, base);
    assert!(sim.cpu.current.regs.iter().all(|&r| r == 0));
    assert!(sim.cpu.cache.blocks.iter().all(|b| !b.valid));
    // Program re-placed, not lost.
    assert_eq!(sim.cpu.mem.read32(base), words[0]);

    // Deterministic: the second run matches the first.
    sim.run_to_completion();
    assert_eq!(sim.cpu.current.regs[3], 15);
    assert_eq!(sim.cpu.stats.instructions, 4);
}

#[test]
fn operator_pokes_write_both_generations() {
    let words = [asm::add(3, 1, 2), asm::syscall()];
    let mut t = TestContext::new(&words);
    t.sim.set_register(1, 40);
    t.sim.set_register(2, 2);
    t.run_to_halt();

    assert_eq!(t.reg(3), 42);
}

/// Forwarding can be toggled between runs of the same machine.
#[test]
fn forwarding_toggle_is_sticky_across_reset() {
    let words = [asm::syscall()];
    let mut t = TestContext::new(&words).forwarding(false);
    assert!(!t.sim.forwarding());
    t.run_to_halt();
    t.sim.reset().expect("reset");
    assert!(!t.sim.forwarding(), "operator switches survive reset");
}
