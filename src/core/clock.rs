//! Cadence controller - converts wall-clock time into simulation cycles.
//!
//! An accumulator timer: callers report monotonic wall time each poll and
//! consume whole cycles one at a time. Polling granularity does not affect
//! the total number of cycles produced, because the fractional remainder is
//! carried between updates. Time is always injected; the clock never reads a
//! system clock itself, which keeps the core testable with synthetic time.

/// Accumulator-based cycle timer with pause support.
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Duration of one cycle at the current rate.
    millis_per_cycle: f32,
    /// Wall time of the last `update` call.
    last_update_ms: u64,
    /// Whole cycles accumulated and not yet consumed.
    elapsed_cycles: u32,
    /// Fractional milliseconds carried into the next update.
    excess_ms: f32,
    paused: bool,
}

impl GameClock {
    pub fn new(cycles_per_second: f32, now_ms: u64) -> Self {
        let mut clock = Self {
            millis_per_cycle: 0.0,
            last_update_ms: now_ms,
            elapsed_cycles: 0,
            excess_ms: 0.0,
            paused: false,
        };
        clock.set_cycles_per_second(cycles_per_second);
        clock
    }

    /// Change the cycle rate. Pending cycles and carry are untouched.
    pub fn set_cycles_per_second(&mut self, cycles_per_second: f32) {
        self.millis_per_cycle = (1.0 / cycles_per_second) * 1000.0;
    }

    /// Zero pending cycles and carry, re-baseline on `now_ms`, and unpause.
    pub fn reset(&mut self, now_ms: u64) {
        self.elapsed_cycles = 0;
        self.excess_ms = 0.0;
        self.last_update_ms = now_ms;
        self.paused = false;
    }

    /// Fold the time since the last update into pending cycles.
    ///
    /// While paused, the accumulator is frozen but the baseline still
    /// advances, so time spent paused is never counted once unpaused.
    pub fn update(&mut self, now_ms: u64) {
        let delta = now_ms.saturating_sub(self.last_update_ms) as f32 + self.excess_ms;

        if !self.paused {
            self.elapsed_cycles += (delta / self.millis_per_cycle) as u32;
            self.excess_ms = delta % self.millis_per_cycle;
        }

        self.last_update_ms = now_ms;
    }

    /// Pause or resume accumulation. Pending cycles are kept.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Consume one pending cycle if any is available.
    pub fn has_elapsed_cycle(&mut self) -> bool {
        if self.elapsed_cycles > 0 {
            self.elapsed_cycles -= 1;
            return true;
        }
        false
    }

    /// Pending cycles not yet consumed.
    pub fn pending_cycles(&self) -> u32 {
        self.elapsed_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut GameClock) -> u32 {
        let mut n = 0;
        while clock.has_elapsed_cycle() {
            n += 1;
        }
        n
    }

    #[test]
    fn one_cycle_per_period() {
        // 10 cycles/sec -> 100 ms per cycle.
        let mut clock = GameClock::new(10.0, 0);
        clock.update(100);
        assert!(clock.has_elapsed_cycle());
        assert!(!clock.has_elapsed_cycle());
    }

    #[test]
    fn carry_survives_fine_grained_polling() {
        let mut coarse = GameClock::new(10.0, 0);
        coarse.update(1000);
        let coarse_cycles = drain(&mut coarse);

        let mut fine = GameClock::new(10.0, 0);
        let mut now = 0;
        // Awkward 7 ms polls; the carry must make up the difference.
        while now < 1000 {
            now += 7;
            fine.update(now.min(1000));
        }
        let fine_cycles = drain(&mut fine);

        assert_eq!(coarse_cycles, 10);
        assert_eq!(fine_cycles, coarse_cycles);
    }

    #[test]
    fn paused_time_is_not_counted() {
        let mut clock = GameClock::new(10.0, 0);
        clock.set_paused(true);
        clock.update(5000);
        assert_eq!(drain(&mut clock), 0);

        // Unpausing does not release a burst; only newly elapsed time counts.
        clock.set_paused(false);
        clock.update(5100);
        assert_eq!(drain(&mut clock), 1);
    }

    #[test]
    fn reset_clears_pending_and_carry_and_unpauses() {
        let mut clock = GameClock::new(10.0, 0);
        clock.update(250);
        assert_eq!(clock.pending_cycles(), 2);

        clock.set_paused(true);
        clock.reset(250);
        assert!(!clock.is_paused());
        assert_eq!(clock.pending_cycles(), 0);

        // The 50 ms carry was dropped by the reset.
        clock.update(300);
        assert_eq!(drain(&mut clock), 0);
        clock.update(350);
        assert_eq!(drain(&mut clock), 1);
    }

    #[test]
    fn rate_change_applies_to_subsequent_time() {
        let mut clock = GameClock::new(1.0, 0);
        clock.update(1000);
        assert_eq!(drain(&mut clock), 1);

        clock.set_cycles_per_second(25.0);
        clock.update(2000);
        assert_eq!(drain(&mut clock), 25);
    }
}
