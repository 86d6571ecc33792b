//! The delay unit shared by the LCD latch and the keypad debounce
//!
//! Every driver waits through [`DelayNs`], so a board timer (or a no-op mock in
//! tests) can be injected. [`SpinDelay`] is the fallback for targets without one.

use embedded_hal::delay::DelayNs;

/// Iterations of the reference busy-wait (50 outer × 200 inner loops)
pub const DELAY_SPIN_COUNT: u32 = 50 * 200;

/// One delay unit in microseconds, i.e. [`DELAY_SPIN_COUNT`] spins at one spin per microsecond
pub const DEFAULT_DELAY_US: u32 = DELAY_SPIN_COUNT;

/// A [`DelayNs`] built on a counted busy loop
///
/// Accuracy depends entirely on `spins_per_us`, which has to be calibrated for
/// the core clock. Nothing else can run while it spins.
pub struct SpinDelay {
    spins_per_us: u32,
}

impl SpinDelay {
    /// Create a delayer that burns `spins_per_us` loop iterations per microsecond
    pub const fn new(spins_per_us: u32) -> Self {
        Self { spins_per_us }
    }

    /// Number of loop iterations a wait of `ns` nanoseconds will take
    pub fn spins_for_ns(&self, ns: u32) -> u64 {
        (ns as u64 * self.spins_per_us as u64).div_ceil(1_000)
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(1)
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        for _ in 0..self.spins_for_ns(ns) {
            core::hint::spin_loop();
        }
    }
}
