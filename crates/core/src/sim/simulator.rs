//! Top-level simulator.
//!
//! Owns the machine, the configuration, and the loaded program image, and
//! exposes the operator surface the interactive shell drives: the two run
//! commands, state pokes, the forwarding toggle, reset, and the program
//! listing.

use std::path::Path;

use tracing::info;

use crate::common::SimError;
use crate::common::constants::WORD_BYTES;
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::disasm::disassemble;
use crate::sim::loader::Program;

/// The simulator: machine + configuration + program image.
pub struct Simulator {
    /// The machine.
    pub cpu: Cpu,
    config: Config,
    program: Program,
}

impl Simulator {
    /// Builds a machine from `config` and places `program` at the text
    /// base with the PC pointing at its first word.
    pub fn new(config: Config, program: Program) -> Result<Self, SimError> {
        let mut cpu = Cpu::new(&config);
        program.place(&mut cpu.mem, config.memory.text_base)?;
        Ok(Self {
            cpu,
            config,
            program,
        })
    }

    /// Convenience constructor: parse a program file, then [`Simulator::new`].
    pub fn from_file(config: Config, path: &Path) -> Result<Self, SimError> {
        let program = Program::read(path)?;
        Self::new(config, program)
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The loaded program image.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Whether the machine is still willing to run (no halting SYSCALL has
    /// retired since the last reset).
    pub fn running(&self) -> bool {
        self.cpu.run_flag
    }

    /// Runs until the halt condition fires.
    ///
    /// No miss-latency stretching happens here; see [`Simulator::run_cycles`]
    /// for the asymmetry.
    pub fn run_to_completion(&mut self) {
        while self.cpu.run_flag {
            self.cpu.cycle();
        }
        info!(
            cycles = self.cpu.stats.cycles,
            instructions = self.cpu.stats.instructions,
            "run to completion finished"
        );
    }

    /// Runs for at most `n` iterations, stopping early on halt.
    ///
    /// This driver — and only this driver — models miss latency: while the
    /// cache's miss flag is raised, iterations advance the cycle counter
    /// *without stepping the pipeline*, up to the configured penalty budget
    /// per call, after which the flag clears. Run-to-completion never does
    /// this, so cycle totals for the same workload differ between the two
    /// commands by design.
    pub fn run_cycles(&mut self, n: u64) {
        if !self.cpu.run_flag {
            return;
        }

        let mut penalty_spent = 0u64;
        for _ in 0..n {
            if self.cpu.cache.miss_flag {
                if penalty_spent < self.config.cache.miss_penalty {
                    penalty_spent += 1;
                    self.cpu.stats.cycles += 1;
                    continue;
                }
                self.cpu.cache.miss_flag = false;
            } else if !self.cpu.run_flag {
                break;
            }
            self.cpu.cycle();
        }
    }

    /// Zeroes all state, re-places the program, and re-arms the run flag.
    /// Operator switches (forwarding, cache enable) survive.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.cpu.clear(self.config.memory.text_base);
        self.program
            .place(&mut self.cpu.mem, self.config.memory.text_base)?;
        info!("machine reset");
        Ok(())
    }

    /// Sets a general-purpose register in both generations, so the value is
    /// visible immediately and survives the next commit.
    pub fn set_register(&mut self, index: usize, value: u32) {
        if index < self.cpu.current.regs.len() {
            self.cpu.current.regs[index] = value;
            self.cpu.next.regs[index] = value;
        }
    }

    /// Sets HI in both generations.
    pub fn set_hi(&mut self, value: u32) {
        self.cpu.current.hi = value;
        self.cpu.next.hi = value;
    }

    /// Sets LO in both generations.
    pub fn set_lo(&mut self, value: u32) {
        self.cpu.current.lo = value;
        self.cpu.next.lo = value;
    }

    /// Turns operand forwarding on or off.
    pub fn set_forwarding(&mut self, enabled: bool) {
        self.cpu.hazards.forwarding = enabled;
    }

    /// Current state of the forwarding toggle.
    pub fn forwarding(&self) -> bool {
        self.cpu.hazards.forwarding
    }

    /// Disassembles the loaded program: (address, mnemonic) per word.
    pub fn disassembly(&self) -> Vec<(u32, String)> {
        let base = self.config.memory.text_base;
        (0..self.program.len())
            .map(|i| {
                let addr = base + (i as u32) * WORD_BYTES;
                (addr, disassemble(addr, self.cpu.mem.read32(addr)))
            })
            .collect()
    }
}
