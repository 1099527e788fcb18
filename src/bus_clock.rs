use std::time::{Duration, Instant};

const NS_IN_CYCLE_AT_1_MHZ: u64 = 1000;
const RESOLUTION_FLOOR_NS: u64 = 250;

fn bound_mhz(mhz: u16) -> u16 {
    if mhz < 1 {
        1
    } else if mhz > 1000 {
        1000
    } else {
        mhz
    }
}

/// Throttles execution to an emulated frequency by busy-waiting after each
/// instruction's reported cycles.
///
/// Construction measures a one-time calibration (the overhead of two
/// back-to-back clock reads) that is subtracted from every `delay()` call,
/// mirroring the reference bus clock this is modeled on.
pub struct BusClock {
    mhz: u16,
    ns_per_cycle: Duration,
    calibration: Duration,
    emulate_timing: bool,
    accumulated_cycles: u64,
}

impl BusClock {
    pub fn new(mhz: u16) -> Self {
        let bounded = bound_mhz(mhz);
        if bounded != mhz {
            log::warn!("BusClock frequency {mhz} MHz out of range, clamped to {bounded} MHz");
        }

        let mut ns_per_cycle = NS_IN_CYCLE_AT_1_MHZ / bounded as u64;
        if ns_per_cycle < RESOLUTION_FLOOR_NS {
            ns_per_cycle = RESOLUTION_FLOOR_NS;
        }

        let start = Instant::now();
        let calibration = Instant::now().duration_since(start);

        BusClock {
            mhz: bounded,
            ns_per_cycle: Duration::from_nanos(ns_per_cycle),
            calibration,
            emulate_timing: true,
            accumulated_cycles: 0,
        }
    }

    pub fn frequency_mhz(&self) -> u16 {
        self.mhz
    }

    pub fn enable_timing_emulation(&mut self) {
        self.emulate_timing = true;
    }

    pub fn disable_timing_emulation(&mut self) {
        self.emulate_timing = false;
    }

    fn resolution_floor(&self) -> Duration {
        Duration::from_nanos(RESOLUTION_FLOOR_NS)
    }

    /// Paces execution for `cycles` emulated cycles. Cycles below the host
    /// timer's honorable resolution are coalesced into an accumulator and
    /// only actually waited on once enough of them have built up.
    pub fn delay(&mut self, cycles: u64) {
        if !self.emulate_timing {
            return;
        }

        self.accumulated_cycles += cycles;
        let owed = self.ns_per_cycle.saturating_mul(self.accumulated_cycles as u32);
        if owed < self.resolution_floor() {
            return;
        }

        let start = Instant::now();
        let target = start + owed.saturating_sub(self.calibration);
        while Instant::now() < target {
            std::hint::spin_loop();
        }
        self.accumulated_cycles = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamps_out_of_range_frequency() {
        let clock = BusClock::new(0);
        assert_eq!(clock.frequency_mhz(), 1);
        let clock = BusClock::new(5000);
        assert_eq!(clock.frequency_mhz(), 1000);
    }

    #[test]
    fn disabled_timing_does_not_block() {
        let mut clock = BusClock::new(1);
        clock.disable_timing_emulation();
        let start = Instant::now();
        clock.delay(1_000_000);
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
