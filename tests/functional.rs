//! Runs the canonical Klaus Dormann 6502 functional test ROM end to end.
//!
//! The binary itself isn't vendored into this repository; point
//! `MOS6502_FUNCTIONAL_TEST_ROM` at a local copy to exercise it:
//!
//! ```text
//! MOS6502_FUNCTIONAL_TEST_ROM=/path/to/6502_functional_test.bin \
//!     cargo test --test functional -- --ignored
//! ```

use std::env;

use mos6502::{Cpu, Memory, Variant};

const RESET_VECTOR: u16 = 0x0400;
const HALT_ADDRESS: u16 = 0x3469;

#[test]
#[ignore]
fn klaus_dormann_functional_test_halts_at_success_trap() {
    let rom_path = match env::var("MOS6502_FUNCTIONAL_TEST_ROM") {
        Ok(path) => path,
        Err(_) => {
            eprintln!("skipping: MOS6502_FUNCTIONAL_TEST_ROM not set");
            return;
        }
    };

    let mut memory = Memory::new();
    memory
        .load_data_from_file(&rom_path, 0x0000)
        .expect("failed to load functional test ROM");
    memory.write_word(mos6502::memory::vectors::RESET, RESET_VECTOR);

    let mut cpu = Cpu::new(memory, Variant::Nmos);
    cpu.set_halt_address(HALT_ADDRESS);
    cpu.set_loop_detection(true);

    loop {
        cpu.execute_one().expect("unexpected invalid opcode");
        if cpu.pc() == HALT_ADDRESS {
            break;
        }
        assert!(
            !cpu.loop_detected(),
            "test suite got stuck in a self-loop before reaching the success trap"
        );
    }

    assert_eq!(cpu.pc(), HALT_ADDRESS);
    assert!(!cpu.loop_detected());
}
