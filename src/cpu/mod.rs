pub mod handlers_branch;
pub mod handlers_load_store;
pub mod handlers_logic;
pub mod handlers_math;
pub mod handlers_stack;
pub mod handlers_system;

#[cfg(test)]
mod test;
#[cfg(test)]
pub(crate) mod test_support;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::bus_clock::BusClock;
use crate::error::CpuError;
use crate::flags::StatusFlags;
use crate::memory::{vectors, Memory, STACK_PAGE};
use crate::opcodes::{self, Mode, OpDescriptor, Penalty};
use crate::variant::Variant;

/// The cross-thread contact surface: a cheaply-cloneable handle to the
/// atomic interrupt/debug latches. `Cpu::interrupt_lines()` hands out a
/// clone so a different thread can raise IRQ/NMI while the owning thread
/// keeps driving `execute`/`execute_one` with an exclusive `&mut Cpu`.
#[derive(Clone)]
pub struct InterruptLines {
    nmi: Arc<AtomicBool>,
    irq: Arc<AtomicBool>,
    reset: Arc<AtomicBool>,
    debug: Arc<AtomicBool>,
}

impl InterruptLines {
    fn new() -> Self {
        InterruptLines {
            nmi: Arc::new(AtomicBool::new(false)),
            irq: Arc::new(AtomicBool::new(false)),
            reset: Arc::new(AtomicBool::new(false)),
            debug: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn raise_irq(&self) {
        self.irq.store(true, Ordering::Release);
    }

    pub fn raise_nmi(&self) {
        self.nmi.store(true, Ordering::Release);
    }

    pub fn set_pending_reset(&self) {
        self.reset.store(true, Ordering::Release);
    }

    pub fn set_debug(&self, value: bool) {
        self.debug.store(value, Ordering::Release);
    }

    pub fn pending_irq(&self) -> bool {
        self.irq.load(Ordering::Acquire)
    }

    pub fn pending_nmi(&self) -> bool {
        self.nmi.load(Ordering::Acquire)
    }

    pub fn debug_requested(&self) -> bool {
        self.debug.load(Ordering::Acquire)
    }
}

/// Result of a single `execute_one` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub used_cycles: u8,
    pub expected_cycles: u8,
}

/// Why `execute()` stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Halted,
    LoopDetected,
}

/// A MOS 6502 / 65C02 / R65C02 core: register file, address space, and the
/// fetch-decode-execute loop.
pub struct Cpu {
    memory: Memory,
    variant: Variant,

    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: StatusFlags,

    lines: InterruptLines,
    clock: Option<BusClock>,

    halt_address: Option<u16>,
    halted: bool,
    loop_detection: bool,
    loop_detected: bool,

    last_outcome: StepOutcome,

    // Scratch state for the instruction currently being decoded; reset at
    // the top of every step.
    current: Option<OpDescriptor>,
    cycle_penalty: u8,
    last_jmp_target: Option<u16>,
}

impl Cpu {
    pub fn new(memory: Memory, variant: Variant) -> Self {
        let mut cpu = Cpu {
            memory,
            variant,
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: StatusFlags::default(),
            lines: InterruptLines::new(),
            clock: None,
            halt_address: None,
            halted: false,
            loop_detection: false,
            loop_detected: false,
            last_outcome: StepOutcome {
                used_cycles: 0,
                expected_cycles: 0,
            },
            current: None,
            cycle_penalty: 0,
            last_jmp_target: None,
        };
        cpu.reset();
        cpu
    }

    /// A cloneable handle for raising interrupts / requesting debug
    /// hand-off from another thread while this `Cpu` is being driven by
    /// `execute`/`execute_one` elsewhere.
    pub fn interrupt_lines(&self) -> InterruptLines {
        self.lines.clone()
    }

    // -- registers --------------------------------------------------

    pub fn a(&self) -> u8 {
        self.a
    }
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }
    pub fn x(&self) -> u8 {
        self.x
    }
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }
    pub fn y(&self) -> u8 {
        self.y
    }
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }
    pub fn sp(&self) -> u8 {
        self.sp
    }
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }
    pub fn pc(&self) -> u16 {
        self.pc
    }
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }
    pub fn status(&self) -> u8 {
        self.status.bits_for_read()
    }
    pub fn set_status(&mut self, value: u8) {
        self.status = StatusFlags::from_popped_byte(value);
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    // -- flags --------------------------------------------------------

    pub fn flag_carry(&self) -> bool {
        self.status.contains(StatusFlags::CARRY)
    }
    pub fn set_flag_carry(&mut self, value: bool) {
        self.status.set(StatusFlags::CARRY, value);
    }
    pub fn flag_zero(&self) -> bool {
        self.status.contains(StatusFlags::ZERO)
    }
    pub fn set_flag_zero(&mut self, value: bool) {
        self.status.set(StatusFlags::ZERO, value);
    }
    pub fn flag_interrupt_disable(&self) -> bool {
        self.status.contains(StatusFlags::INTERRUPT_DISABLE)
    }
    pub fn set_flag_interrupt_disable(&mut self, value: bool) {
        self.status.set(StatusFlags::INTERRUPT_DISABLE, value);
    }
    pub fn flag_decimal(&self) -> bool {
        self.status.contains(StatusFlags::DECIMAL)
    }
    pub fn set_flag_decimal(&mut self, value: bool) {
        self.status.set(StatusFlags::DECIMAL, value);
    }
    pub fn flag_overflow(&self) -> bool {
        self.status.contains(StatusFlags::OVERFLOW)
    }
    pub fn set_flag_overflow(&mut self, value: bool) {
        self.status.set(StatusFlags::OVERFLOW, value);
    }
    pub fn flag_negative(&self) -> bool {
        self.status.contains(StatusFlags::NEGATIVE)
    }
    pub fn set_flag_negative(&mut self, value: bool) {
        self.status.set(StatusFlags::NEGATIVE, value);
    }

    // -- interrupts / debug, mirrored from InterruptLines for callers
    //    that only have a `&Cpu` -----------------------------------

    pub fn raise_irq(&self) {
        self.lines.raise_irq();
    }
    pub fn raise_nmi(&self) {
        self.lines.raise_nmi();
    }
    pub fn pending_irq(&self) -> bool {
        self.lines.pending_irq()
    }
    pub fn pending_nmi(&self) -> bool {
        self.lines.pending_nmi()
    }
    pub fn set_debug(&self, value: bool) {
        self.lines.set_debug(value);
    }
    pub fn debug_requested(&self) -> bool {
        self.lines.debug_requested()
    }

    // -- configuration --------------------------------------------------

    pub fn set_halt_address(&mut self, addr: u16) {
        self.halt_address = Some(addr);
    }

    pub fn set_reset_vector(&mut self, addr: u16) {
        self.memory.write_word(vectors::RESET, addr);
    }

    pub fn set_interrupt_vector(&mut self, addr: u16) {
        self.memory.write_word(vectors::IRQ_BRK, addr);
    }

    /// Attaches a `BusClock` so every future `execute_one` step paces
    /// itself against real time. Library use and tests typically leave
    /// this unset, which makes `execute_one`/`execute` run at host speed.
    pub fn attach_bus_clock(&mut self, clock: BusClock) {
        self.clock = Some(clock);
    }

    pub fn detach_bus_clock(&mut self) -> Option<BusClock> {
        self.clock.take()
    }

    pub fn set_loop_detection(&mut self, on: bool) {
        self.loop_detection = on;
    }

    pub fn loop_detected(&self) -> bool {
        self.loop_detected
    }

    pub fn used_cycles(&self) -> u8 {
        self.last_outcome.used_cycles
    }

    pub fn expected_cycles(&self) -> u8 {
        self.last_outcome.expected_cycles
    }

    // -- reset ------------------------------------------------------

    /// Hardware RESET: three phantom stack decrements land SP at `0xFD`
    /// regardless of where it sat before, PC loaded from the reset vector,
    /// `I` set, `D` cleared.
    pub fn reset(&mut self) {
        self.sp = 0xFD;
        self.pc = self.memory.read_word(vectors::RESET);
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
        self.status.remove(StatusFlags::DECIMAL);
        self.lines.reset.store(false, Ordering::Release);
        self.halted = false;
        self.loop_detected = false;
        log::debug!("reset: pc={:#06x} sp={:#04x}", self.pc, self.sp);
    }

    /// Deterministic reset for test fixtures: sets PC and SP directly
    /// rather than vectoring, per this crate's documented `sp` default of
    /// `0xFF` (one push above the real post-reset value of `0xFD`).
    pub fn test_reset(&mut self, pc: u16, sp: u8) {
        self.pc = pc;
        self.sp = sp;
        self.status = StatusFlags::RESET;
        self.lines.reset.store(false, Ordering::Release);
        self.halted = false;
        self.loop_detected = false;
    }

    // -- stack --------------------------------------------------------

    fn push_u8(&mut self, value: u8) {
        let addr = STACK_PAGE | self.sp as u16;
        self.memory.write(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull_u8(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = STACK_PAGE | self.sp as u16;
        self.memory.read(addr)
    }

    fn push_u16(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push_u8(hi);
        self.push_u8(lo);
    }

    fn pull_u16(&mut self) -> u16 {
        let lo = self.pull_u8();
        let hi = self.pull_u8();
        u16::from_le_bytes([lo, hi])
    }

    // -- memory helpers used by handlers --------------------------------

    fn read_u8(&mut self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    fn write_u8(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    fn read_word(&mut self, addr: u16) -> u16 {
        self.memory.read_word(addr)
    }

    fn fetch_u8(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn fetch_u16(&mut self) -> u16 {
        let value = self.memory.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    fn read_word_zero_page(&mut self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16);
        let hi = self.memory.read(zp.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }

    fn charge_page_cross_if_applicable(&mut self, base: u16, addr: u16) {
        if let Some(desc) = self.current {
            if desc.penalty.contains(Penalty::PAGE_CROSS)
                && !desc.penalty.contains(Penalty::NO_BOUNDARY_CROSSED)
                && (base & 0xFF00) != (addr & 0xFF00)
            {
                self.cycle_penalty += 1;
            }
        }
    }

    /// Resolves the effective address for every mode except `Implied`,
    /// `Accumulator`, and `ZeroPageRelative` (handled separately by the
    /// handlers that use them). Advances `pc` over the operand bytes.
    fn operand_address(&mut self, mode: Mode) -> u16 {
        match mode {
            Mode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            Mode::ZeroPage => self.fetch_u8() as u16,
            Mode::ZeroPageX => {
                let base = self.fetch_u8();
                base.wrapping_add(self.x) as u16
            }
            Mode::ZeroPageY => {
                let base = self.fetch_u8();
                base.wrapping_add(self.y) as u16
            }
            Mode::Absolute => self.fetch_u16(),
            Mode::AbsoluteX => {
                let base = self.fetch_u16();
                let addr = base.wrapping_add(self.x as u16);
                self.charge_page_cross_if_applicable(base, addr);
                addr
            }
            Mode::AbsoluteY => {
                let base = self.fetch_u16();
                let addr = base.wrapping_add(self.y as u16);
                self.charge_page_cross_if_applicable(base, addr);
                addr
            }
            Mode::Indirect => {
                let ptr = self.fetch_u16();
                if self.variant.indirect_jmp_bug_fixed() {
                    self.memory.read_word(ptr)
                } else {
                    self.memory.read_word_with_nmos_jmp_bug(ptr)
                }
            }
            Mode::IndirectX => {
                let zp = self.fetch_u8().wrapping_add(self.x);
                self.read_word_zero_page(zp)
            }
            Mode::IndirectY => {
                let zp = self.fetch_u8();
                let base = self.read_word_zero_page(zp);
                let addr = base.wrapping_add(self.y as u16);
                self.charge_page_cross_if_applicable(base, addr);
                addr
            }
            Mode::ZeroPageIndirect => {
                let zp = self.fetch_u8();
                self.read_word_zero_page(zp)
            }
            Mode::AbsoluteIndexedIndirect => {
                let base = self.fetch_u16();
                let ptr = base.wrapping_add(self.x as u16);
                self.memory.read_word(ptr)
            }
            Mode::Relative => {
                let offset = self.fetch_u8() as i8;
                self.pc.wrapping_add(offset as i16 as u16)
            }
            Mode::Implied | Mode::Accumulator | Mode::ZeroPageRelative => {
                unreachable!("{:?} has no single effective address", mode)
            }
        }
    }

    /// Reads the operand value for a mode, following Accumulator
    /// addressing to `a` instead of memory.
    fn operand_value(&mut self, mode: Mode) -> u8 {
        match mode {
            Mode::Accumulator => self.a,
            _ => {
                let addr = self.operand_address(mode);
                self.read_u8(addr)
            }
        }
    }

    /// Reads the zero-page address and the following signed relative
    /// offset used by BBRn/BBSn.
    fn zero_page_and_relative(&mut self) -> (u8, i8) {
        let zp = self.fetch_u8();
        let offset = self.fetch_u8() as i8;
        (zp, offset)
    }

    fn branch_to(&mut self, offset: i8) {
        let next = self.pc;
        let target = next.wrapping_add(offset as i16 as u16);
        self.cycle_penalty += 1;
        if (next & 0xFF00) != (target & 0xFF00) {
            self.cycle_penalty += 1;
        }
        self.pc = target;
        self.last_jmp_target = Some(target);
    }

    fn pace(&mut self, cycles: u8) {
        if let Some(clock) = &mut self.clock {
            clock.delay(cycles as u64);
        }
    }

    // -- interrupt servicing --------------------------------------------

    fn service_nmi(&mut self) {
        self.push_u16(self.pc);
        let byte = self.status.bits_for_push(false);
        self.push_u8(byte);
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
        self.pc = self.memory.read_word(vectors::NMI);
        self.lines.nmi.store(false, Ordering::Release);
        log::debug!("NMI vectored to {:#06x}", self.pc);
    }

    fn service_irq(&mut self) {
        self.push_u16(self.pc);
        let byte = self.status.bits_for_push(false);
        self.push_u8(byte);
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
        self.pc = self.memory.read_word(vectors::IRQ_BRK);
        log::debug!("IRQ vectored to {:#06x}", self.pc);
    }

    // -- execution core ---------------------------------------------------

    /// Runs a single fetch-decode-execute step, servicing any pending
    /// RESET/NMI/IRQ first (RESET > NMI > IRQ in priority).
    pub fn execute_one(&mut self) -> Result<StepOutcome, CpuError> {
        if self.lines.reset.load(Ordering::Acquire) {
            self.reset();
            let outcome = StepOutcome {
                used_cycles: 7,
                expected_cycles: 7,
            };
            self.last_outcome = outcome;
            self.pace(outcome.used_cycles);
            return Ok(outcome);
        }
        if self.lines.nmi.load(Ordering::Acquire) {
            self.service_nmi();
            let outcome = StepOutcome {
                used_cycles: 7,
                expected_cycles: 7,
            };
            self.last_outcome = outcome;
            self.pace(outcome.used_cycles);
            return Ok(outcome);
        }
        if self.lines.irq.load(Ordering::Acquire) && !self.flag_interrupt_disable() {
            self.service_irq();
            let outcome = StepOutcome {
                used_cycles: 7,
                expected_cycles: 7,
            };
            self.last_outcome = outcome;
            self.pace(outcome.used_cycles);
            return Ok(outcome);
        }

        let pc_at_fetch = self.pc;
        let opcode = self.fetch_u8();
        let descriptor = match opcodes::decode(self.variant, opcode) {
            Some(descriptor) => descriptor,
            None => {
                self.pc = pc_at_fetch;
                return Err(CpuError::InvalidOpcode {
                    opcode,
                    pc: pc_at_fetch,
                });
            }
        };

        self.current = Some(descriptor);
        self.cycle_penalty = 0;
        self.last_jmp_target = None;
        let was_jmp = descriptor.mnemonic == "JMP";

        (descriptor.handler)(self, descriptor.mode, opcode);

        let total = descriptor.cycles + self.cycle_penalty;
        let outcome = StepOutcome {
            used_cycles: total,
            expected_cycles: total,
        };
        self.last_outcome = outcome;
        self.pace(outcome.used_cycles);

        if self.loop_detection && was_jmp {
            if let Some(target) = self.last_jmp_target {
                if target == pc_at_fetch {
                    self.loop_detected = true;
                }
            }
        }
        if Some(self.pc) == self.halt_address {
            self.halted = true;
        }

        Ok(outcome)
    }

    /// Runs `execute_one` until a halt condition is reached or a fatal
    /// error occurs.
    pub fn execute(&mut self) -> Result<StopReason, CpuError> {
        loop {
            self.execute_one()?;
            if self.loop_detected {
                return Ok(StopReason::LoopDetected);
            }
            if self.halted {
                return Ok(StopReason::Halted);
            }
        }
    }

    /// Renders a one-line disassembly of the instruction about to execute,
    /// then steps past it.
    pub fn trace_one(&mut self) -> Result<(String, StepOutcome), CpuError> {
        let line = crate::trace::disassemble(self);
        let outcome = self.execute_one()?;
        Ok((line, outcome))
    }
}

// JMP needs to record its target for loop detection even though it does
// not go through `branch_to`.
impl Cpu {
    pub(crate) fn record_jmp_target(&mut self, target: u16) {
        self.last_jmp_target = Some(target);
    }
}
