//! Loads a raw binary image and runs it with per-instruction tracing.
//!
//! ```text
//! cargo run --example run -- program.bin [reset_vector_hex]
//! ```

use std::env;
use std::process;

use mos6502::{Cpu, Memory, Variant};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: run <image.bin> [reset_vector_hex]");
            process::exit(1);
        }
    };
    let reset_vector = args
        .next()
        .map(|hex| u16::from_str_radix(hex.trim_start_matches("0x"), 16).expect("bad hex address"))
        .unwrap_or(0x0600);

    let mut memory = Memory::new();
    if let Err(err) = memory.load_data_from_file(&path, 0x0000) {
        eprintln!("failed to load {path}: {err}");
        process::exit(1);
    }
    memory.write_word(mos6502::memory::vectors::RESET, reset_vector);

    let mut cpu = Cpu::new(memory, Variant::Cmos);
    cpu.set_loop_detection(true);

    loop {
        let (line, outcome) = match cpu.trace_one() {
            Ok(step) => step,
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        };
        println!("{line}  ({} cycles)", outcome.used_cycles);

        if cpu.loop_detected() {
            println!("stopped: self-loop detected at {:#06x}", cpu.pc());
            break;
        }
    }
}
