use super::Cpu;
use crate::flags::StatusFlags;
use crate::opcodes::Mode;

pub fn pha(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let value = cpu.a();
    cpu.push_u8(value);
}

pub fn php(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let byte = cpu.status.bits_for_push(true);
    cpu.push_u8(byte);
}

pub fn pla(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let value = cpu.pull_u8();
    cpu.set_a(value);
    cpu.status = cpu.status.with_zn(value);
}

pub fn plp(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let byte = cpu.pull_u8();
    cpu.status = StatusFlags::from_popped_byte(byte);
}

pub fn phx(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let value = cpu.x();
    cpu.push_u8(value);
}

pub fn phy(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let value = cpu.y();
    cpu.push_u8(value);
}

pub fn plx(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let value = cpu.pull_u8();
    cpu.set_x(value);
    cpu.status = cpu.status.with_zn(value);
}

pub fn ply(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    let value = cpu.pull_u8();
    cpu.set_y(value);
    cpu.status = cpu.status.with_zn(value);
}

pub fn tax(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_x(cpu.a());
    cpu.status = cpu.status.with_zn(cpu.x());
}

pub fn tay(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_y(cpu.a());
    cpu.status = cpu.status.with_zn(cpu.y());
}

pub fn tsx(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_x(cpu.sp());
    cpu.status = cpu.status.with_zn(cpu.x());
}

pub fn txa(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_a(cpu.x());
    cpu.status = cpu.status.with_zn(cpu.a());
}

/// TXS does not touch the status flags.
pub fn txs(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_sp(cpu.x());
}

pub fn tya(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.set_a(cpu.y());
    cpu.status = cpu.status.with_zn(cpu.a());
}
