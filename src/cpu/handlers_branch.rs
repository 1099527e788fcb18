use super::Cpu;
use crate::flags::StatusFlags;
use crate::memory::vectors;
use crate::opcodes::Mode;

fn branch_if(cpu: &mut Cpu, condition: bool) {
    let offset = cpu.fetch_u8() as i8;
    if condition {
        cpu.branch_to(offset);
    }
}

pub fn bcc(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, !cpu.flag_carry());
}

pub fn bcs(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, cpu.flag_carry());
}

pub fn beq(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, cpu.flag_zero());
}

pub fn bne(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, !cpu.flag_zero());
}

pub fn bmi(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, cpu.flag_negative());
}

pub fn bpl(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, !cpu.flag_negative());
}

pub fn bvc(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, !cpu.flag_overflow());
}

pub fn bvs(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, cpu.flag_overflow());
}

/// 65C02 unconditional branch.
pub fn bra(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    branch_if(cpu, true);
}

fn bbx_bit(opcode: u8) -> u8 {
    (opcode >> 4) & 0x07
}

/// Rockwell BBRn: branch if bit `n` of the zero-page operand is clear.
pub fn bbr(cpu: &mut Cpu, _mode: Mode, opcode: u8) {
    let (zp, offset) = cpu.zero_page_and_relative();
    let value = cpu.read_u8(zp as u16);
    let bit = bbx_bit(opcode);
    if value & (1 << bit) == 0 {
        cpu.branch_to(offset);
    }
}

/// Rockwell BBSn: branch if bit `n` of the zero-page operand is set.
pub fn bbs(cpu: &mut Cpu, _mode: Mode, opcode: u8) {
    let (zp, offset) = cpu.zero_page_and_relative();
    let value = cpu.read_u8(zp as u16);
    let bit = bbx_bit(opcode);
    if value & (1 << bit) != 0 {
        cpu.branch_to(offset);
    }
}

/// Software interrupt. Skips the padding signature byte, pushes PC/P with B
/// set, then vectors through the IRQ/BRK vector. 65C02 and Rockwell also
/// clear D on entry; NMOS leaves it as-is.
pub fn brk(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_pc(cpu.pc().wrapping_add(1));
    cpu.push_u16(cpu.pc());
    let byte = cpu.status.bits_for_push(true);
    cpu.push_u8(byte);
    cpu.status.insert(StatusFlags::INTERRUPT_DISABLE);
    if cpu.variant().is_cmos_family() {
        cpu.status.remove(StatusFlags::DECIMAL);
    }
    let target = cpu.read_word(vectors::IRQ_BRK);
    cpu.set_pc(target);
}

pub fn jmp(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let target = cpu.operand_address(mode);
    cpu.set_pc(target);
    cpu.record_jmp_target(target);
}

/// JSR pushes the address of the last byte of the JSR instruction, not the
/// address of the next one.
pub fn jsr(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let target = cpu.fetch_u16();
    let return_addr = cpu.pc().wrapping_sub(1);
    cpu.push_u16(return_addr);
    cpu.set_pc(target);
    cpu.record_jmp_target(target);
}

pub fn rts(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let addr = cpu.pull_u16();
    cpu.set_pc(addr.wrapping_add(1));
}

pub fn rti(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let byte = cpu.pull_u8();
    cpu.status = StatusFlags::from_popped_byte(byte);
    let addr = cpu.pull_u16();
    cpu.set_pc(addr);
}
