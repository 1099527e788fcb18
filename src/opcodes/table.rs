use super::{Mode, OpDescriptor, Penalty};
use crate::cpu::handlers_branch as branch;
use crate::cpu::handlers_load_store as load_store;
use crate::cpu::handlers_logic as logic;
use crate::cpu::handlers_math as math;
use crate::cpu::handlers_stack as stack;
use crate::cpu::handlers_system as system;

macro_rules! d {
    ($mnemonic:literal, $mode:expr, $cycles:expr, $handler:expr) => {
        Some(OpDescriptor {
            mnemonic: $mnemonic,
            mode: $mode,
            cycles: $cycles,
            penalty: Penalty::empty(),
            handler: $handler,
        })
    };
    ($mnemonic:literal, $mode:expr, $cycles:expr, $handler:expr, $penalty:expr) => {
        Some(OpDescriptor {
            mnemonic: $mnemonic,
            mode: $mode,
            cycles: $cycles,
            penalty: $penalty,
            handler: $handler,
        })
    };
}

/// The full legal NMOS opcode set. Anything not listed here -- every
/// undocumented/"illegal" opcode included -- is `None`, per the stated
/// non-goal that illegal opcodes decode as a fatal failure rather than
/// emulate silicon-accurate undocumented behavior.
pub fn nmos_decode(opcode: u8) -> Option<OpDescriptor> {
    use Mode::*;
    use Penalty as P;

    match opcode {
        // ADC
        0x69 => d!("ADC", Immediate, 2, math::adc),
        0x65 => d!("ADC", ZeroPage, 3, math::adc),
        0x75 => d!("ADC", ZeroPageX, 4, math::adc),
        0x6D => d!("ADC", Absolute, 4, math::adc),
        0x7D => d!("ADC", AbsoluteX, 4, math::adc, P::PAGE_CROSS),
        0x79 => d!("ADC", AbsoluteY, 4, math::adc, P::PAGE_CROSS),
        0x61 => d!("ADC", IndirectX, 6, math::adc),
        0x71 => d!("ADC", IndirectY, 5, math::adc, P::PAGE_CROSS),

        // AND
        0x29 => d!("AND", Immediate, 2, logic::and),
        0x25 => d!("AND", ZeroPage, 3, logic::and),
        0x35 => d!("AND", ZeroPageX, 4, logic::and),
        0x2D => d!("AND", Absolute, 4, logic::and),
        0x3D => d!("AND", AbsoluteX, 4, logic::and, P::PAGE_CROSS),
        0x39 => d!("AND", AbsoluteY, 4, logic::and, P::PAGE_CROSS),
        0x21 => d!("AND", IndirectX, 6, logic::and),
        0x31 => d!("AND", IndirectY, 5, logic::and, P::PAGE_CROSS),

        // ASL
        0x0A => d!("ASL", Accumulator, 2, logic::asl),
        0x06 => d!("ASL", ZeroPage, 5, logic::asl),
        0x16 => d!("ASL", ZeroPageX, 6, logic::asl),
        0x0E => d!("ASL", Absolute, 6, logic::asl),
        0x1E => d!("ASL", AbsoluteX, 7, logic::asl),

        // Branches
        0x90 => d!("BCC", Relative, 2, branch::bcc),
        0xB0 => d!("BCS", Relative, 2, branch::bcs),
        0xF0 => d!("BEQ", Relative, 2, branch::beq),
        0x30 => d!("BMI", Relative, 2, branch::bmi),
        0xD0 => d!("BNE", Relative, 2, branch::bne),
        0x10 => d!("BPL", Relative, 2, branch::bpl),
        0x50 => d!("BVC", Relative, 2, branch::bvc),
        0x70 => d!("BVS", Relative, 2, branch::bvs),

        // BIT
        0x24 => d!("BIT", ZeroPage, 3, logic::bit),
        0x2C => d!("BIT", Absolute, 4, logic::bit),

        // BRK
        0x00 => d!("BRK", Implied, 7, branch::brk),

        // Flags
        0x18 => d!("CLC", Implied, 2, system::clc),
        0xD8 => d!("CLD", Implied, 2, system::cld),
        0x58 => d!("CLI", Implied, 2, system::cli),
        0xB8 => d!("CLV", Implied, 2, system::clv),
        0x38 => d!("SEC", Implied, 2, system::sec),
        0xF8 => d!("SED", Implied, 2, system::sed),
        0x78 => d!("SEI", Implied, 2, system::sei),

        // CMP
        0xC9 => d!("CMP", Immediate, 2, math::cmp),
        0xC5 => d!("CMP", ZeroPage, 3, math::cmp),
        0xD5 => d!("CMP", ZeroPageX, 4, math::cmp),
        0xCD => d!("CMP", Absolute, 4, math::cmp),
        0xDD => d!("CMP", AbsoluteX, 4, math::cmp, P::PAGE_CROSS),
        0xD9 => d!("CMP", AbsoluteY, 4, math::cmp, P::PAGE_CROSS),
        0xC1 => d!("CMP", IndirectX, 6, math::cmp),
        0xD1 => d!("CMP", IndirectY, 5, math::cmp, P::PAGE_CROSS),

        // CPX / CPY
        0xE0 => d!("CPX", Immediate, 2, math::cpx),
        0xE4 => d!("CPX", ZeroPage, 3, math::cpx),
        0xEC => d!("CPX", Absolute, 4, math::cpx),
        0xC0 => d!("CPY", Immediate, 2, math::cpy),
        0xC4 => d!("CPY", ZeroPage, 3, math::cpy),
        0xCC => d!("CPY", Absolute, 4, math::cpy),

        // DEC / DEX / DEY
        0xC6 => d!("DEC", ZeroPage, 5, math::dec),
        0xD6 => d!("DEC", ZeroPageX, 6, math::dec),
        0xCE => d!("DEC", Absolute, 6, math::dec),
        0xDE => d!("DEC", AbsoluteX, 7, math::dec),
        0xCA => d!("DEX", Implied, 2, math::dex),
        0x88 => d!("DEY", Implied, 2, math::dey),

        // EOR
        0x49 => d!("EOR", Immediate, 2, logic::eor),
        0x45 => d!("EOR", ZeroPage, 3, logic::eor),
        0x55 => d!("EOR", ZeroPageX, 4, logic::eor),
        0x4D => d!("EOR", Absolute, 4, logic::eor),
        0x5D => d!("EOR", AbsoluteX, 4, logic::eor, P::PAGE_CROSS),
        0x59 => d!("EOR", AbsoluteY, 4, logic::eor, P::PAGE_CROSS),
        0x41 => d!("EOR", IndirectX, 6, logic::eor),
        0x51 => d!("EOR", IndirectY, 5, logic::eor, P::PAGE_CROSS),

        // INC / INX / INY
        0xE6 => d!("INC", ZeroPage, 5, math::inc),
        0xF6 => d!("INC", ZeroPageX, 6, math::inc),
        0xEE => d!("INC", Absolute, 6, math::inc),
        0xFE => d!("INC", AbsoluteX, 7, math::inc),
        0xE8 => d!("INX", Implied, 2, math::inx),
        0xC8 => d!("INY", Implied, 2, math::iny),

        // JMP / JSR / RTS / RTI
        0x4C => d!("JMP", Absolute, 3, branch::jmp),
        0x6C => d!("JMP", Indirect, 5, branch::jmp),
        0x20 => d!("JSR", Absolute, 6, branch::jsr),
        0x60 => d!("RTS", Implied, 6, branch::rts),
        0x40 => d!("RTI", Implied, 6, branch::rti),

        // LDA
        0xA9 => d!("LDA", Immediate, 2, load_store::lda),
        0xA5 => d!("LDA", ZeroPage, 3, load_store::lda),
        0xB5 => d!("LDA", ZeroPageX, 4, load_store::lda),
        0xAD => d!("LDA", Absolute, 4, load_store::lda),
        0xBD => d!("LDA", AbsoluteX, 4, load_store::lda, P::PAGE_CROSS),
        0xB9 => d!("LDA", AbsoluteY, 4, load_store::lda, P::PAGE_CROSS),
        0xA1 => d!("LDA", IndirectX, 6, load_store::lda),
        0xB1 => d!("LDA", IndirectY, 5, load_store::lda, P::PAGE_CROSS),

        // LDX
        0xA2 => d!("LDX", Immediate, 2, load_store::ldx),
        0xA6 => d!("LDX", ZeroPage, 3, load_store::ldx),
        0xB6 => d!("LDX", ZeroPageY, 4, load_store::ldx),
        0xAE => d!("LDX", Absolute, 4, load_store::ldx),
        0xBE => d!("LDX", AbsoluteY, 4, load_store::ldx, P::PAGE_CROSS),

        // LDY
        0xA0 => d!("LDY", Immediate, 2, load_store::ldy),
        0xA4 => d!("LDY", ZeroPage, 3, load_store::ldy),
        0xB4 => d!("LDY", ZeroPageX, 4, load_store::ldy),
        0xAC => d!("LDY", Absolute, 4, load_store::ldy),
        0xBC => d!("LDY", AbsoluteX, 4, load_store::ldy, P::PAGE_CROSS),

        // LSR
        0x4A => d!("LSR", Accumulator, 2, logic::lsr),
        0x46 => d!("LSR", ZeroPage, 5, logic::lsr),
        0x56 => d!("LSR", ZeroPageX, 6, logic::lsr),
        0x4E => d!("LSR", Absolute, 6, logic::lsr),
        0x5E => d!("LSR", AbsoluteX, 7, logic::lsr),

        // NOP
        0xEA => d!("NOP", Implied, 2, system::nop),

        // ORA
        0x09 => d!("ORA", Immediate, 2, logic::ora),
        0x05 => d!("ORA", ZeroPage, 3, logic::ora),
        0x15 => d!("ORA", ZeroPageX, 4, logic::ora),
        0x0D => d!("ORA", Absolute, 4, logic::ora),
        0x1D => d!("ORA", AbsoluteX, 4, logic::ora, P::PAGE_CROSS),
        0x19 => d!("ORA", AbsoluteY, 4, logic::ora, P::PAGE_CROSS),
        0x01 => d!("ORA", IndirectX, 6, logic::ora),
        0x11 => d!("ORA", IndirectY, 5, logic::ora, P::PAGE_CROSS),

        // Stack / transfers
        0x48 => d!("PHA", Implied, 3, stack::pha),
        0x08 => d!("PHP", Implied, 3, stack::php),
        0x68 => d!("PLA", Implied, 4, stack::pla),
        0x28 => d!("PLP", Implied, 4, stack::plp),
        0xAA => d!("TAX", Implied, 2, stack::tax),
        0xA8 => d!("TAY", Implied, 2, stack::tay),
        0xBA => d!("TSX", Implied, 2, stack::tsx),
        0x8A => d!("TXA", Implied, 2, stack::txa),
        0x9A => d!("TXS", Implied, 2, stack::txs),
        0x98 => d!("TYA", Implied, 2, stack::tya),

        // ROL / ROR
        0x2A => d!("ROL", Accumulator, 2, logic::rol),
        0x26 => d!("ROL", ZeroPage, 5, logic::rol),
        0x36 => d!("ROL", ZeroPageX, 6, logic::rol),
        0x2E => d!("ROL", Absolute, 6, logic::rol),
        0x3E => d!("ROL", AbsoluteX, 7, logic::rol),
        0x6A => d!("ROR", Accumulator, 2, logic::ror),
        0x66 => d!("ROR", ZeroPage, 5, logic::ror),
        0x76 => d!("ROR", ZeroPageX, 6, logic::ror),
        0x6E => d!("ROR", Absolute, 6, logic::ror),
        0x7E => d!("ROR", AbsoluteX, 7, logic::ror),

        // SBC
        0xE9 => d!("SBC", Immediate, 2, math::sbc),
        0xE5 => d!("SBC", ZeroPage, 3, math::sbc),
        0xF5 => d!("SBC", ZeroPageX, 4, math::sbc),
        0xED => d!("SBC", Absolute, 4, math::sbc),
        0xFD => d!("SBC", AbsoluteX, 4, math::sbc, P::PAGE_CROSS),
        0xF9 => d!("SBC", AbsoluteY, 4, math::sbc, P::PAGE_CROSS),
        0xE1 => d!("SBC", IndirectX, 6, math::sbc),
        0xF1 => d!("SBC", IndirectY, 5, math::sbc, P::PAGE_CROSS),

        // STA / STX / STY
        0x85 => d!("STA", ZeroPage, 3, load_store::sta),
        0x95 => d!("STA", ZeroPageX, 4, load_store::sta),
        0x8D => d!("STA", Absolute, 4, load_store::sta),
        0x9D => d!("STA", AbsoluteX, 5, load_store::sta),
        0x99 => d!("STA", AbsoluteY, 5, load_store::sta),
        0x81 => d!("STA", IndirectX, 6, load_store::sta),
        0x91 => d!("STA", IndirectY, 6, load_store::sta),
        0x86 => d!("STX", ZeroPage, 3, load_store::stx),
        0x96 => d!("STX", ZeroPageY, 4, load_store::stx),
        0x8E => d!("STX", Absolute, 4, load_store::stx),
        0x84 => d!("STY", ZeroPage, 3, load_store::sty),
        0x94 => d!("STY", ZeroPageX, 4, load_store::sty),
        0x8C => d!("STY", Absolute, 4, load_store::sty),

        _ => None,
    }
}

/// The 65C02 table: CMOS-specific additions/overrides layered over the
/// shared NMOS legal set, plus Rockwell's bit-test/set/reset family when
/// `rockwell` is true.
pub fn cmos_decode(opcode: u8, rockwell: bool) -> Option<OpDescriptor> {
    use Mode::*;
    use Penalty as P;

    if rockwell {
        if let Some(desc) = rockwell_decode(opcode) {
            return Some(desc);
        }
    }

    let cmos_specific = match opcode {
        0x89 => d!("BIT", Immediate, 2, logic::bit),
        0x34 => d!("BIT", ZeroPageX, 4, logic::bit),
        0x3C => d!("BIT", AbsoluteX, 4, logic::bit, P::PAGE_CROSS),
        0x80 => d!("BRA", Relative, 3, branch::bra),
        0xD2 => d!("CMP", ZeroPageIndirect, 5, math::cmp),
        0x3A => d!("DEC", Accumulator, 2, math::dec),
        0x1A => d!("INC", Accumulator, 2, math::inc),
        0x52 => d!("EOR", ZeroPageIndirect, 5, logic::eor),
        0x7C => d!("JMP", AbsoluteIndexedIndirect, 6, branch::jmp),
        0xB2 => d!("LDA", ZeroPageIndirect, 5, load_store::lda),
        0x12 => d!("ORA", ZeroPageIndirect, 5, logic::ora),
        0x32 => d!("AND", ZeroPageIndirect, 5, logic::and),
        0x72 => d!("ADC", ZeroPageIndirect, 5, math::adc),
        0xF2 => d!("SBC", ZeroPageIndirect, 5, math::sbc),
        0x92 => d!("STA", ZeroPageIndirect, 5, load_store::sta),
        0xDA => d!("PHX", Implied, 3, stack::phx),
        0x5A => d!("PHY", Implied, 3, stack::phy),
        0xFA => d!("PLX", Implied, 4, stack::plx),
        0x7A => d!("PLY", Implied, 4, stack::ply),
        0x64 => d!("STZ", ZeroPage, 3, system::stz),
        0x74 => d!("STZ", ZeroPageX, 4, system::stz),
        0x9C => d!("STZ", Absolute, 4, system::stz),
        0x9E => d!("STZ", AbsoluteX, 5, system::stz),
        0x14 => d!("TRB", ZeroPage, 5, logic::trb),
        0x1C => d!("TRB", Absolute, 6, logic::trb),
        0x04 => d!("TSB", ZeroPage, 5, logic::tsb),
        0x0C => d!("TSB", Absolute, 6, logic::tsb),
        0x6C => d!("JMP", Indirect, 6, branch::jmp),
        _ => None,
    };

    cmos_specific.or_else(|| nmos_decode(opcode))
}

fn rockwell_decode(opcode: u8) -> Option<OpDescriptor> {
    use Mode::ZeroPage as Zp;
    use Mode::ZeroPageRelative as Zpr;

    match opcode {
        0x07 | 0x17 | 0x27 | 0x37 | 0x47 | 0x57 | 0x67 | 0x77 => {
            d!("RMB", Zp, 5, system::rmb)
        }
        0x87 | 0x97 | 0xA7 | 0xB7 | 0xC7 | 0xD7 | 0xE7 | 0xF7 => {
            d!("SMB", Zp, 5, system::smb)
        }
        0x0F | 0x1F | 0x2F | 0x3F | 0x4F | 0x5F | 0x6F | 0x7F => {
            d!("BBR", Zpr, 5, branch::bbr)
        }
        0x8F | 0x9F | 0xAF | 0xBF | 0xCF | 0xDF | 0xEF | 0xFF => {
            d!("BBS", Zpr, 5, branch::bbs)
        }
        _ => None,
    }
}
