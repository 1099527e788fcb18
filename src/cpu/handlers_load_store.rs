use super::Cpu;
use crate::opcodes::Mode;

pub fn lda(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let value = cpu.operand_value(mode);
    cpu.a = value;
    cpu.status = cpu.status.with_zn(value);
}

pub fn ldx(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let value = cpu.operand_value(mode);
    cpu.x = value;
    cpu.status = cpu.status.with_zn(value);
}

pub fn ldy(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let value = cpu.operand_value(mode);
    cpu.y = value;
    cpu.status = cpu.status.with_zn(value);
}

pub fn sta(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let addr = cpu.operand_address(mode);
    let value = cpu.a;
    cpu.write_u8(addr, value);
}

pub fn stx(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let addr = cpu.operand_address(mode);
    let value = cpu.x;
    cpu.write_u8(addr, value);
}

pub fn sty(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let addr = cpu.operand_address(mode);
    let value = cpu.y;
    cpu.write_u8(addr, value);
}
