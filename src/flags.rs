use bitflags::bitflags;

bitflags! {
    /// The 8-bit processor status register `P`.
    ///
    /// Bit layout (LSB -> MSB): C, Z, I, D, B, Unused, V, N.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct StatusFlags: u8 {
        const CARRY             = 0b0000_0001;
        const ZERO               = 0b0000_0010;
        const INTERRUPT_DISABLE  = 0b0000_0100;
        const DECIMAL            = 0b0000_1000;
        const BREAK              = 0b0001_0000;
        const UNUSED             = 0b0010_0000;
        const OVERFLOW           = 0b0100_0000;
        const NEGATIVE           = 0b1000_0000;
    }
}

impl StatusFlags {
    /// The value of `P` immediately following a real hardware RESET.
    pub const RESET: StatusFlags =
        StatusFlags::UNUSED.union(StatusFlags::INTERRUPT_DISABLE);

    /// Bit 5 always reads as 1 regardless of how it was stored; this helper
    /// synthesizes that rather than relying on callers to keep it set.
    pub fn bits_for_read(self) -> u8 {
        (self | StatusFlags::UNUSED).bits()
    }

    /// The byte pushed to the stack by BRK / PHP: same as `bits_for_read`
    /// but with B forced to 1.
    pub fn bits_for_push(self, break_flag: bool) -> u8 {
        let mut bits = self.bits_for_read();
        if break_flag {
            bits |= StatusFlags::BREAK.bits();
        } else {
            bits &= !StatusFlags::BREAK.bits();
        }
        bits
    }

    /// Reconstructs flags from a popped byte (PLP / RTI), forcing Unused=1
    /// and clearing B in the live register (B only ever exists in the
    /// pushed copy).
    pub fn from_popped_byte(byte: u8) -> StatusFlags {
        let mut flags = StatusFlags::from_bits_truncate(byte);
        flags.insert(StatusFlags::UNUSED);
        flags.remove(StatusFlags::BREAK);
        flags
    }

    pub fn with_zn(mut self, value: u8) -> StatusFlags {
        self.set(StatusFlags::ZERO, value == 0);
        self.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
        self
    }
}

impl Default for StatusFlags {
    fn default() -> Self {
        StatusFlags::RESET
    }
}
