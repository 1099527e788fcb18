use super::Cpu;
use crate::flags::StatusFlags;
use crate::opcodes::Mode;

fn binary_overflow(a: u8, m: u8, result: u8) -> bool {
    (!(a ^ m) & (a ^ result)) & 0x80 != 0
}

/// Binary-mode ADC: returns (result, carry_out, zero, negative, overflow).
fn adc_binary(a: u8, m: u8, carry_in: bool) -> (u8, bool, bool, bool, bool) {
    let sum = a as u16 + m as u16 + carry_in as u16;
    let result = sum as u8;
    (
        result,
        sum > 0xFF,
        result == 0,
        result & 0x80 != 0,
        binary_overflow(a, m, result),
    )
}

/// BCD-mode ADC per the classic 6502 decimal-adjustment algorithm.
/// Returns (decimal result, carry_out).
fn adc_decimal(a: u8, m: u8, carry_in: bool) -> (u8, bool) {
    let carry_in = carry_in as i32;
    let mut al = (a & 0x0F) as i32 + (m & 0x0F) as i32 + carry_in;
    if al > 9 {
        al += 6;
    }
    let mut sum = (a >> 4) as i32 + (m >> 4) as i32 + if al > 0x0F { 1 } else { 0 };
    let low_nibble = al & 0x0F;
    if sum > 9 {
        sum += 6;
    }
    let carry_out = sum > 0x0F;
    let result = (((sum & 0x0F) << 4) | low_nibble) as u8;
    (result, carry_out)
}

pub fn adc(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let m = cpu.operand_value(mode);
    let a = cpu.a;
    let carry_in = cpu.flag_carry();

    let (bin_result, bin_carry, bin_zero, bin_negative, bin_overflow) =
        adc_binary(a, m, carry_in);

    if cpu.flag_decimal() {
        let (dec_result, dec_carry) = adc_decimal(a, m, carry_in);
        cpu.a = dec_result;
        if cpu.variant.decimal_flags_are_corrected() {
            cpu.status = cpu.status.with_zn(dec_result);
            cpu.status.set(StatusFlags::CARRY, dec_carry);
            cpu.status.set(StatusFlags::OVERFLOW, bin_overflow);
            cpu.cycle_penalty += 1;
        } else {
            cpu.status.set(StatusFlags::CARRY, dec_carry);
            cpu.status.set(StatusFlags::ZERO, bin_zero);
            cpu.status.set(StatusFlags::NEGATIVE, bin_negative);
            cpu.status.set(StatusFlags::OVERFLOW, bin_overflow);
        }
    } else {
        cpu.a = bin_result;
        cpu.status.set(StatusFlags::CARRY, bin_carry);
        cpu.status.set(StatusFlags::ZERO, bin_zero);
        cpu.status.set(StatusFlags::NEGATIVE, bin_negative);
        cpu.status.set(StatusFlags::OVERFLOW, bin_overflow);
    }
}

/// BCD-mode SBC. Returns (decimal result, carry_out / no-borrow).
fn sbc_decimal(a: u8, m: u8, carry_in: bool) -> (u8, bool) {
    let borrow_in = if carry_in { 0i32 } else { 1i32 };
    let raw_low = (a & 0x0F) as i32 - (m & 0x0F) as i32 - borrow_in;
    let low_borrowed = raw_low < 0;
    let low_nibble = if low_borrowed { raw_low + 16 } else { raw_low };

    let mut high = (a >> 4) as i32 - (m >> 4) as i32 - if low_borrowed { 1 } else { 0 };
    let carry_out = high >= 0;
    if high < 0 {
        high += 16;
    }
    let result = (((high & 0x0F) << 4) | (low_nibble & 0x0F)) as u8;
    (result, carry_out)
}

pub fn sbc(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let m = cpu.operand_value(mode);
    let a = cpu.a;
    let carry_in = cpu.flag_carry();

    // SBC is ADC with the operand's complement; this produces the correct
    // binary result, carry (=no borrow) and overflow in one shared path.
    let (bin_result, bin_carry, bin_zero, bin_negative, bin_overflow) =
        adc_binary(a, !m, carry_in);

    if cpu.flag_decimal() {
        let (dec_result, dec_carry) = sbc_decimal(a, m, carry_in);
        cpu.a = dec_result;
        if cpu.variant.decimal_flags_are_corrected() {
            cpu.status = cpu.status.with_zn(dec_result);
            cpu.status.set(StatusFlags::CARRY, dec_carry);
            cpu.status.set(StatusFlags::OVERFLOW, bin_overflow);
            cpu.cycle_penalty += 1;
        } else {
            cpu.status.set(StatusFlags::CARRY, dec_carry);
            cpu.status.set(StatusFlags::ZERO, bin_zero);
            cpu.status.set(StatusFlags::NEGATIVE, bin_negative);
            cpu.status.set(StatusFlags::OVERFLOW, bin_overflow);
        }
    } else {
        cpu.a = bin_result;
        cpu.status.set(StatusFlags::CARRY, bin_carry);
        cpu.status.set(StatusFlags::ZERO, bin_zero);
        cpu.status.set(StatusFlags::NEGATIVE, bin_negative);
        cpu.status.set(StatusFlags::OVERFLOW, bin_overflow);
    }
}

fn compare(cpu: &mut Cpu, register: u8, operand: u8) {
    let result = register.wrapping_sub(operand);
    cpu.status.set(StatusFlags::CARRY, register >= operand);
    cpu.status = cpu.status.with_zn(result);
}

pub fn cmp(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let operand = cpu.operand_value(mode);
    compare(cpu, cpu.a, operand);
}

pub fn cpx(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let operand = cpu.operand_value(mode);
    compare(cpu, cpu.x, operand);
}

pub fn cpy(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    let operand = cpu.operand_value(mode);
    compare(cpu, cpu.y, operand);
}

pub fn inc(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    if mode == Mode::Accumulator {
        cpu.a = cpu.a.wrapping_add(1);
        cpu.status = cpu.status.with_zn(cpu.a);
        return;
    }
    let addr = cpu.operand_address(mode);
    let value = cpu.read_u8(addr).wrapping_add(1);
    cpu.write_u8(addr, value);
    cpu.status = cpu.status.with_zn(value);
}

pub fn dec(cpu: &mut Cpu, mode: Mode, _opcode: u8) {
    if mode == Mode::Accumulator {
        cpu.a = cpu.a.wrapping_sub(1);
        cpu.status = cpu.status.with_zn(cpu.a);
        return;
    }
    let addr = cpu.operand_address(mode);
    let value = cpu.read_u8(addr).wrapping_sub(1);
    cpu.write_u8(addr, value);
    cpu.status = cpu.status.with_zn(value);
}

pub fn inx(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.status = cpu.status.with_zn(cpu.x);
}

pub fn iny(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.status = cpu.status.with_zn(cpu.y);
}

pub fn dex(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.status = cpu.status.with_zn(cpu.x);
}

pub fn dey(cpu: &mut Cpu, _mode: Mode, _opcode: u8) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.status = cpu.status.with_zn(cpu.y);
}
