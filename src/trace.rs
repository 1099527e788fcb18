//! One-line colorized disassembly of the instruction about to execute.
//!
//! Everything here is peek-only: it reads memory through `Cpu::memory()`
//! without advancing `pc` or touching any register, since `trace_one`
//! calls `execute_one` immediately afterward.

use colored::*;

use crate::cpu::Cpu;
use crate::opcodes::{self, Mode};

fn peek(cpu: &mut Cpu, addr: u16) -> u8 {
    cpu.memory_mut().read(addr)
}

fn peek_word(cpu: &mut Cpu, addr: u16) -> u16 {
    let lo = peek(cpu, addr) as u16;
    let hi = peek(cpu, addr.wrapping_add(1)) as u16;
    (hi << 8) | lo
}

fn operand_string(cpu: &mut Cpu, mode: Mode, operand_addr: u16) -> String {
    match mode {
        Mode::Implied => String::new(),
        Mode::Accumulator => "A".to_string(),
        Mode::Immediate => format!("#${:02x}", peek(cpu, operand_addr)),
        Mode::ZeroPage => format!("${:02x}", peek(cpu, operand_addr)),
        Mode::ZeroPageX => format!("${:02x},X", peek(cpu, operand_addr)),
        Mode::ZeroPageY => format!("${:02x},Y", peek(cpu, operand_addr)),
        Mode::Relative => {
            let offset = peek(cpu, operand_addr) as i8;
            let target = (operand_addr.wrapping_add(1)).wrapping_add(offset as i16 as u16);
            format!("${:04x}", target)
        }
        Mode::Absolute => format!("${:04x}", peek_word(cpu, operand_addr)),
        Mode::AbsoluteX => format!("${:04x},X", peek_word(cpu, operand_addr)),
        Mode::AbsoluteY => format!("${:04x},Y", peek_word(cpu, operand_addr)),
        Mode::Indirect => format!("(${:04x})", peek_word(cpu, operand_addr)),
        Mode::IndirectX => format!("(${:02x},X)", peek(cpu, operand_addr)),
        Mode::IndirectY => format!("(${:02x}),Y", peek(cpu, operand_addr)),
        Mode::ZeroPageIndirect => format!("(${:02x})", peek(cpu, operand_addr)),
        Mode::AbsoluteIndexedIndirect => format!("(${:04x},X)", peek_word(cpu, operand_addr)),
        Mode::ZeroPageRelative => {
            let zp = peek(cpu, operand_addr);
            let offset = peek(cpu, operand_addr.wrapping_add(1)) as i8;
            let target = operand_addr
                .wrapping_add(2)
                .wrapping_add(offset as i16 as u16);
            format!("${:02x},${:04x}", zp, target)
        }
    }
}

/// Renders the instruction at the current `pc`. Reads memory through the
/// same path `execute_one` uses, so a hooked I/O range can in principle
/// observe the peek; it does not touch any register or advance `pc`.
pub fn disassemble(cpu: &mut Cpu) -> String {
    let pc = cpu.pc();
    let opcode = peek(cpu, pc);

    let descriptor = match opcodes::decode(cpu.variant(), opcode) {
        Some(descriptor) => descriptor,
        None => {
            return format!(
                "{} {}",
                format!("{:04x}", pc).dimmed(),
                format!("??? (${:02x})", opcode).red()
            );
        }
    };

    let operand_addr = pc.wrapping_add(1);
    let operand = operand_string(cpu, descriptor.mode, operand_addr);

    let mnemonic = descriptor.mnemonic.to_string();
    let mnemonic = if mnemonic.starts_with('B') && mnemonic != "BIT" && mnemonic != "BRK" {
        mnemonic.yellow()
    } else {
        mnemonic.cyan()
    };

    if operand.is_empty() {
        format!("{} {}", format!("{:04x}", pc).dimmed(), mnemonic)
    } else {
        format!("{} {} {}", format!("{:04x}", pc).dimmed(), mnemonic, operand)
    }
}
