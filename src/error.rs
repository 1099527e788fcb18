use thiserror::Error;

/// Errors raised while configuring or loading into the address space.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("range {new_start:#06x}..={new_end:#06x} overlaps existing range {existing_start:#06x}..={existing_end:#06x}")]
    RangeOverlap {
        new_start: u16,
        new_end: u16,
        existing_start: u16,
        existing_end: u16,
    },

    #[error("range end {end:#06x} is before start {start:#06x}")]
    InvalidRange { start: u16, end: u16 },

    #[error("failed to load image into memory: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal conditions raised by the execution core.
#[derive(Debug, Error)]
pub enum CpuError {
    #[error("invalid opcode {opcode:#04x} at {pc:#06x}")]
    InvalidOpcode { opcode: u8, pc: u16 },
}
