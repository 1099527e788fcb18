/// Which physical CPU this core is emulating. Selects the opcode table and
/// a handful of handler-level branches (decimal-mode flag correctness, the
/// BRK D-flag clear, the indirect-JMP page bug).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The original NMOS 6502, including its indirect-JMP page bug and the
    /// absence of any of the 65C02 instructions.
    Nmos,
    /// WDC 65C02: adds BRA/STZ/TRB/TSB/PHX/PHY/PLX/PLY, fixes the
    /// indirect-JMP bug, and makes decimal-mode flags reflect the decimal
    /// result.
    Cmos,
    /// Rockwell R65C02: a Cmos superset that also implements
    /// BBRn/BBSn/RMBn/SMBn.
    Rockwell,
}

impl Variant {
    pub fn is_cmos_family(self) -> bool {
        matches!(self, Variant::Cmos | Variant::Rockwell)
    }

    pub fn has_rockwell_bit_ops(self) -> bool {
        matches!(self, Variant::Rockwell)
    }

    /// Whether decimal-mode ADC/SBC reports flags from the decimal result
    /// (true) or from the binary intermediate (false, NMOS).
    pub fn decimal_flags_are_corrected(self) -> bool {
        self.is_cmos_family()
    }

    /// Whether the indirect-JMP page-boundary bug is fixed, which also
    /// charges one extra cycle.
    pub fn indirect_jmp_bug_fixed(self) -> bool {
        self.is_cmos_family()
    }
}
