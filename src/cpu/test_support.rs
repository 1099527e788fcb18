//! Shared test fixtures: build a `Cpu` from a raw byte program and assert
//! on the resulting register/flag state.

use super::Cpu;
use crate::flags::StatusFlags;
use crate::memory::Memory;
use crate::variant::Variant;

pub const C: u8 = StatusFlags::CARRY.bits();
pub const Z: u8 = StatusFlags::ZERO.bits();
pub const I: u8 = StatusFlags::INTERRUPT_DISABLE.bits();
pub const D: u8 = StatusFlags::DECIMAL.bits();
pub const V: u8 = StatusFlags::OVERFLOW.bits();
pub const N: u8 = StatusFlags::NEGATIVE.bits();
pub const P: u8 = StatusFlags::UNUSED.bits();

const PROGRAM_START: u16 = 0x0200;

/// Loads `program` at `PROGRAM_START`, appends a `JMP` back to itself right
/// after the last byte, and points the reset vector at the program. The
/// trailing self-jump gives loop detection something to trip on, so
/// `execute()` always returns instead of running through zeroed memory and
/// BRK-looping on the IRQ vector forever.
pub fn run_program(variant: Variant, program: &[u8]) -> Cpu {
    let mut memory = Memory::new();
    memory.load_data(program, PROGRAM_START);

    let terminator = PROGRAM_START.wrapping_add(program.len() as u16);
    memory.load_data(&[0x4C, terminator as u8, (terminator >> 8) as u8], terminator);
    memory.write_word(crate::memory::vectors::RESET, PROGRAM_START);

    let mut cpu = Cpu::new(memory, variant);
    cpu.set_loop_detection(true);
    let _ = cpu.execute();
    cpu
}

pub fn run_nmos(program: &[u8]) -> Cpu {
    run_program(Variant::Nmos, program)
}

pub fn assert_register_a(program: &[u8], value: u8, status: u8) {
    let cpu = run_nmos(program);
    assert_eq!(cpu.a(), value, "register A mismatch");
    assert_status(&cpu, status);
}

pub fn assert_register_x(program: &[u8], value: u8, status: u8) {
    let cpu = run_nmos(program);
    assert_eq!(cpu.x(), value, "register X mismatch");
    assert_status(&cpu, status);
}

pub fn assert_register_y(program: &[u8], value: u8, status: u8) {
    let cpu = run_nmos(program);
    assert_eq!(cpu.y(), value, "register Y mismatch");
    assert_status(&cpu, status);
}

/// Compares against the live status register (bit 5 forced to 1, as it
/// always reads), so callers pass `expected | P` only when they care about
/// that bit explicitly -- it's set unconditionally here to match.
pub fn assert_status(cpu: &Cpu, expected: u8) {
    let actual = cpu.status();
    let expected = expected | P;
    assert_eq!(
        actual, expected,
        "status mismatch: expected {:#010b}, got {:#010b}",
        expected, actual
    );
}
