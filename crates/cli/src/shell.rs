//! Operator command loop.
//!
//! Reads commands from standard input, dispatches them against the
//! simulator's operator surface, and formats the dumps. Malformed input is
//! ignored and the prompt re-issued; only `quit` and end-of-input leave the
//! loop.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use mupipe_core::Simulator;
use mupipe_core::mem::cache::BLOCK_COUNT;

/// Runs the prompt loop until `quit` or EOF.
pub fn repl(mut sim: Simulator) -> Result<()> {
    help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("MUPIPE> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(cmd) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();

        match cmd {
            "sim" | "s" => {
                if sim.running() {
                    println!("Simulation started...\n");
                    sim.run_to_completion();
                    println!("Simulation finished.\n");
                } else {
                    println!("Simulation stopped.\n");
                }
            }
            "run" | "r" => match args.first().and_then(|s| parse_u32(s)) {
                Some(n) => {
                    if sim.running() {
                        println!("Running simulator for {n} cycles...\n");
                        sim.run_cycles(u64::from(n));
                    } else {
                        println!("Simulation stopped.\n");
                    }
                }
                None => println!("usage: run <cycles>"),
            },
            "rdump" => rdump(&sim),
            "mdump" => match (parse_arg_hex(&args, 0), parse_arg_hex(&args, 1)) {
                (Some(start), Some(stop)) => mdump(&sim, start, stop),
                _ => println!("usage: mdump <start> <stop>"),
            },
            "cdump" | "cacheDump" => cdump(&sim),
            "reset" => {
                if let Err(e) = sim.reset() {
                    println!("reset failed: {e}");
                }
            }
            "input" | "i" => {
                let reg = args.first().and_then(|s| parse_u32(s));
                let val = args.get(1).and_then(|s| parse_u32(s));
                match (reg, val) {
                    (Some(reg), Some(val)) if (reg as usize) < 32 => {
                        sim.set_register(reg as usize, val);
                    }
                    _ => println!("usage: input <reg> <value>"),
                }
            }
            "high" | "h" => match args.first().and_then(|s| parse_u32(s)) {
                Some(val) => sim.set_hi(val),
                None => println!("usage: high <value>"),
            },
            "low" | "l" => match args.first().and_then(|s| parse_u32(s)) {
                Some(val) => sim.set_lo(val),
                None => println!("usage: low <value>"),
            },
            "forward" | "f" => match args.first().and_then(|s| parse_u32(s)) {
                Some(0) => {
                    sim.set_forwarding(false);
                    println!("Forwarding OFF");
                }
                Some(_) => {
                    sim.set_forwarding(true);
                    println!("Forwarding ON");
                }
                None => println!("usage: forward <0|1>"),
            },
            "print" | "p" => {
                for (addr, text) in sim.disassembly() {
                    println!("[{addr:#010x}]\t{text}");
                }
            }
            "show" => show_pipeline(&sim),
            "?" | "help" => help(),
            "quit" | "q" => {
                println!("Exiting MUPIPE. Good bye...");
                break;
            }
            _ => println!("Invalid command."),
        }
    }

    Ok(())
}

/// Parses a number, accepting `0x`-prefixed hex or plain decimal, plus a
/// leading minus for two's-complement values.
fn parse_u32(s: &str) -> Option<u32> {
    let (neg, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let value = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        body.parse::<u32>().ok()?
    };
    Some(if neg { value.wrapping_neg() } else { value })
}

/// Parses a positional argument as bare hex (`mdump 400000 400010`), also
/// accepting a `0x` prefix.
fn parse_arg_hex(args: &[&str], idx: usize) -> Option<u32> {
    let s = args.get(idx)?;
    let body = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    u32::from_str_radix(body, 16).ok()
}

fn help() {
    println!("------------------------------------------------------------------");
    println!("sim                   -- simulate program to completion");
    println!("run <n>               -- simulate program for <n> cycles");
    println!("rdump                 -- dump register values and counters");
    println!("mdump <start> <stop>  -- dump memory over an address range (hex)");
    println!("cdump                 -- dump cache contents and hit/miss counts");
    println!("reset                 -- clear all state and reload the program");
    println!("input <reg> <val>     -- set GPR <reg> to <val>");
    println!("high <val>            -- set the HI register");
    println!("low <val>             -- set the LO register");
    println!("forward <0|1>         -- disable/enable operand forwarding");
    println!("print                 -- print the loaded program, disassembled");
    println!("show                  -- print the pipeline register contents");
    println!("?                     -- this menu");
    println!("quit                  -- exit the simulator");
    println!("------------------------------------------------------------------");
}

fn rdump(sim: &Simulator) {
    let cpu = &sim.cpu;
    println!("-------------------------------------");
    println!("Dumping register content");
    println!("-------------------------------------");
    println!("# Instructions executed\t: {}", cpu.stats.instructions);
    println!("# Cycles executed\t: {}", cpu.stats.cycles);
    println!("PC\t: {:#010x}", cpu.current.pc);
    println!("-------------------------------------");
    println!("[Register]\t[Value]");
    println!("-------------------------------------");
    for (i, value) in cpu.current.regs.iter().enumerate() {
        println!("[R{i}]\t: {value:#010x}");
    }
    println!("-------------------------------------");
    println!("[HI]\t: {:#010x}", cpu.current.hi);
    println!("[LO]\t: {:#010x}", cpu.current.lo);
    println!("-------------------------------------");
}

fn mdump(sim: &Simulator, start: u32, stop: u32) {
    println!("-------------------------------------------------------------");
    println!("Memory content [{start:#010x}..{stop:#010x}]:");
    println!("-------------------------------------------------------------");
    println!("\t[Address]\t[Value]");
    let mut addr = start;
    while addr <= stop {
        println!("\t{:#010x}\t{:#010x}", addr, sim.cpu.mem.read32(addr));
        match addr.checked_add(4) {
            Some(next) => addr = next,
            None => break,
        }
    }
    println!();
}

fn cdump(sim: &Simulator) {
    let report = sim.cpu.cache.report();
    println!("------------Cache content----------------");
    println!("Cache hits:   {}", report.hits);
    println!("Cache misses: {}", report.misses);
    println!("Hit ratio:    {:.2}%", report.hit_ratio());
    println!("-----------------------------------------");
    println!("Block\tValid\tTag\t\tWord 0\t\tWord 1\t\tWord 2\t\tWord 3");
    for i in 0..BLOCK_COUNT {
        let b = &sim.cpu.cache.blocks[i];
        println!(
            "[B{i}]\t{}\t{:#08x}\t{:#010x}\t{:#010x}\t{:#010x}\t{:#010x}",
            u8::from(b.valid),
            b.tag,
            b.words[0],
            b.words[1],
            b.words[2],
            b.words[3],
        );
    }
    println!("-----------------------------------------");
}

fn show_pipeline(sim: &Simulator) {
    let cpu = &sim.cpu;
    println!("Current PC:      {:#010x}", cpu.current.pc);
    println!("IF/ID.IR:        {:#010x}", cpu.if_id.ir);
    println!("IF/ID.PC:        {:#010x}", cpu.if_id.pc);
    println!("ID/EX.IR:        {:#010x}", cpu.id_ex.ir);
    println!("ID/EX.A:         {:#010x}", cpu.id_ex.a);
    println!("ID/EX.B:         {:#010x}", cpu.id_ex.b);
    println!("ID/EX.imm:       {:#010x}", cpu.id_ex.imm);
    println!("EX/MEM.IR:       {:#010x}", cpu.ex_mem.ir);
    println!("EX/MEM.A:        {:#010x}", cpu.ex_mem.a);
    println!("EX/MEM.B:        {:#010x}", cpu.ex_mem.b);
    println!("EX/MEM.ALUOut:   {:#010x}", cpu.ex_mem.alu_out);
    println!("MEM/WB.IR:       {:#010x}", cpu.mem_wb.ir);
    println!("MEM/WB.ALUOut:   {:#010x}", cpu.mem_wb.alu_out);
    println!("MEM/WB.LMD:      {:#010x}", cpu.mem_wb.lmd);
}
