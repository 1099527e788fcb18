use super::test_support::*;
use super::*;
use crate::error::CpuError;
use crate::memory::vectors;

fn blank_cpu(variant: Variant) -> Cpu {
    Cpu::new(Memory::new(), variant)
}

#[test]
fn reset_lands_on_reset_vector_with_interrupts_disabled() {
    let mut memory = Memory::new();
    memory.write_word(vectors::RESET, 0x1234);
    let cpu = Cpu::new(memory, Variant::Nmos);
    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(cpu.flag_interrupt_disable());
}

#[test]
fn p_bit_5_always_reads_as_one() {
    let mut cpu = blank_cpu(Variant::Nmos);
    cpu.set_status(0x00);
    assert_eq!(cpu.status() & P, P);
}

#[test]
fn lda_immediate_sets_zero_and_negative_flags() {
    assert_register_a(&[0xA9, 0x00], 0x00, Z);
    assert_register_a(&[0xA9, 0x80], 0x80, N);
    assert_register_a(&[0xA9, 0x2A], 0x2A, 0);
}

#[test]
fn ldx_immediate_sets_zero_and_negative_flags() {
    assert_register_x(&[0xA2, 0x00], 0x00, Z);
    assert_register_x(&[0xA2, 0x80], 0x80, N);
    assert_register_x(&[0xA2, 0x2A], 0x2A, 0);
}

#[test]
fn ldy_immediate_sets_zero_and_negative_flags() {
    assert_register_y(&[0xA0, 0x00], 0x00, Z);
    assert_register_y(&[0xA0, 0x80], 0x80, N);
    assert_register_y(&[0xA0, 0x2A], 0x2A, 0);
}

#[test]
fn test_reset_sets_pc_and_sp_directly_without_vectoring() {
    let mut cpu = blank_cpu(Variant::Nmos);
    cpu.test_reset(0x5000, 0xFF);
    assert_eq!(cpu.pc(), 0x5000);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn pha_pla_round_trips_a_and_restores_sp() {
    let mut memory = Memory::new();
    memory.load_data(&[0xA9, 0x42, 0x48, 0xA9, 0x00, 0x68], 0x0200);
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    let sp_before = cpu.sp();
    for _ in 0..4 {
        cpu.execute_one().unwrap();
    }
    assert_eq!(cpu.sp(), sp_before);
    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn two_asl_then_two_lsr_is_identity_with_no_bits_shifted_off() {
    let mut memory = Memory::new();
    memory.load_data(&[0xA9, 0x0F, 0x0A, 0x0A, 0x4A, 0x4A], 0x0200);
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    for _ in 0..5 {
        cpu.execute_one().unwrap();
    }
    assert_eq!(cpu.a(), 0x0F);
}

#[test]
fn nmos_indirect_jmp_page_bug_stays_within_the_page() {
    let mut memory = Memory::new();
    memory.load_data(&[0x6C, 0xFF, 0x30], 0x0200);
    memory.write(0x30FF, 0x80);
    memory.write(0x3000, 0x40);
    memory.write(0x3100, 0x50);
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    cpu.execute_one().unwrap();
    assert_eq!(cpu.pc(), 0x4080);
}

#[test]
fn cmos_indirect_jmp_bug_is_fixed_and_costs_one_more_cycle() {
    let mut memory = Memory::new();
    memory.load_data(&[0x6C, 0xFF, 0x30], 0x0200);
    memory.write(0x30FF, 0x80);
    memory.write(0x3000, 0x40);
    memory.write(0x3100, 0x50);
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Cmos);
    let outcome = cpu.execute_one().unwrap();
    assert_eq!(cpu.pc(), 0x5080);
    assert_eq!(outcome.used_cycles, 6);
}

#[test]
fn irq_is_masked_while_interrupt_disable_is_set() {
    let mut memory = Memory::new();
    memory.load_data(&[0xEA], 0x0200);
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    cpu.set_flag_interrupt_disable(true);
    cpu.raise_irq();
    let sp_before = cpu.sp();
    cpu.execute_one().unwrap();
    assert_eq!(cpu.pc(), 0x0201);
    assert_eq!(cpu.sp(), sp_before);
    assert!(cpu.pending_irq());
}

#[test]
fn nmi_overrides_the_interrupt_disable_mask() {
    let mut memory = Memory::new();
    memory.write_word(vectors::NMI, 0x4000);
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    cpu.set_flag_interrupt_disable(true);
    cpu.raise_nmi();
    let sp_before = cpu.sp();
    cpu.execute_one().unwrap();
    assert_eq!(cpu.pc(), 0x4000);
    assert_eq!(cpu.sp(), sp_before.wrapping_sub(3));
    assert!(cpu.flag_interrupt_disable());
    assert!(!cpu.pending_nmi());
}

#[test]
fn brk_pushes_pc_plus_two_and_sets_break_in_pushed_status() {
    let mut memory = Memory::new();
    memory.load_data(&[0x00], 0x7FFE);
    memory.write_word(vectors::IRQ_BRK, 0x6000);
    memory.write_word(vectors::RESET, 0x7FFE);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    let sp_before = cpu.sp();
    cpu.execute_one().unwrap();
    assert_eq!(cpu.pc(), 0x6000);

    let sp_hi = sp_before;
    let sp_lo = sp_before.wrapping_sub(1);
    let sp_status = sp_before.wrapping_sub(2);
    let hi = cpu.memory_mut().read(STACK_PAGE | sp_hi as u16);
    let lo = cpu.memory_mut().read(STACK_PAGE | sp_lo as u16);
    assert_eq!(lo, 0x00);
    assert_eq!(hi, 0x80);

    let pushed_status = cpu.memory_mut().read(STACK_PAGE | sp_status as u16);
    assert_eq!(pushed_status & StatusFlags::BREAK.bits(), StatusFlags::BREAK.bits());
}

#[test]
fn invalid_opcode_is_reported_without_mutating_registers_beyond_the_fetch() {
    let mut memory = Memory::new();
    memory.load_data(&[0x02], 0x0200); // KIL/undocumented on every variant
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    let a_before = cpu.a();
    let err = cpu.execute_one().unwrap_err();
    assert!(matches!(err, CpuError::InvalidOpcode { opcode: 0x02, pc: 0x0200 }));
    assert_eq!(cpu.pc(), 0x0200);
    assert_eq!(cpu.a(), a_before);
}

#[test]
fn cross_thread_irq_is_observed_by_the_owning_thread() {
    use std::thread;
    use std::time::Duration;

    let mut memory = Memory::new();
    // DEX ; INY ; JMP $0200 -- a tight loop the owning thread keeps
    // stepping through until the interrupt fires.
    memory.load_data(&[0xCA, 0xC8, 0x4C, 0x00, 0x02], 0x0200);
    memory.write_word(vectors::IRQ_BRK, 0x7000);
    memory.write_word(vectors::RESET, 0x0200);
    let mut cpu = Cpu::new(memory, Variant::Nmos);
    cpu.set_flag_interrupt_disable(false);
    let lines = cpu.interrupt_lines();

    let raiser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(5));
        lines.raise_irq();
    });

    let mut steps = 0;
    loop {
        cpu.execute_one().unwrap();
        steps += 1;
        if cpu.pc() == 0x7000 || steps > 1_000_000 {
            break;
        }
    }
    raiser.join().unwrap();

    assert_eq!(cpu.pc(), 0x7000, "IRQ should have vectored within a bounded number of steps");
}
