mod mode;
mod table;

pub use mode::Mode;

use crate::cpu::Cpu;
use crate::variant::Variant;

/// `fn(cpu, addressing mode, raw opcode byte)`. The raw opcode byte lets a
/// handful of handlers (the Rockwell bit-test/set/reset family) recover the
/// bit index encoded in the opcode without a separate table column.
pub type OperationFn = fn(&mut Cpu, Mode, u8);

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Penalty: u8 {
        /// AbsoluteX/Y, IndirectY: +1 cycle if the effective address
        /// computation crosses a page boundary.
        const PAGE_CROSS = 0b0000_0001;
        /// 65C02 override: this opcode no longer charges `PAGE_CROSS` even
        /// though the NMOS table for the same mnemonic/mode would.
        const NO_BOUNDARY_CROSSED = 0b0000_0010;
    }
}

#[derive(Clone, Copy)]
pub struct OpDescriptor {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub cycles: u8,
    pub penalty: Penalty,
    pub handler: OperationFn,
}

/// Looks up the descriptor for `opcode` under `variant`. Any byte with no
/// documented legal meaning for the variant -- including every NMOS
/// "illegal"/undocumented opcode -- decodes to `None`.
pub fn decode(variant: Variant, opcode: u8) -> Option<OpDescriptor> {
    match variant {
        Variant::Nmos => table::nmos_decode(opcode),
        Variant::Cmos => table::cmos_decode(opcode, false),
        Variant::Rockwell => table::cmos_decode(opcode, true),
    }
}
