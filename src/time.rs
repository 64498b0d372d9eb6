//=========================================================================
// Frame Timing
//=========================================================================
//
// Monotonic per-tick timing supplied to every update call.
//
// The driver ticks the timer once per logical frame; everything below it
// (states, world, scene graph) consumes the resulting delta.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

//=== GameTimer ===========================================================

/// Per-tick frame timer.
///
/// `tick()` advances the timer once per logical frame. Update code reads
/// `delta_seconds()` for integration and `total_seconds()` for effects
/// that depend on absolute time.
pub struct GameTimer {
    last_tick: Instant,
    delta: f32,
    total: f32,
}

impl GameTimer {
    /// Creates a timer with a zero delta.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            delta: 0.0,
            total: 0.0,
        }
    }

    /// Creates a timer with a fixed delta, for deterministic stepping.
    pub fn from_delta(delta: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            delta,
            total: delta,
        }
    }

    /// Advances the timer, measuring the elapsed wall-clock time since the
    /// previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_tick).as_secs_f32();
        self.total += self.delta;
        self.last_tick = now;
    }

    /// Seconds elapsed between the two most recent ticks.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Seconds accumulated across all ticks.
    pub fn total_seconds(&self) -> f32 {
        self.total
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_has_zero_delta() {
        let timer = GameTimer::new();
        assert_eq!(timer.delta_seconds(), 0.0);
        assert_eq!(timer.total_seconds(), 0.0);
    }

    #[test]
    fn fixed_delta_is_reported() {
        let timer = GameTimer::from_delta(0.25);
        assert_eq!(timer.delta_seconds(), 0.25);
    }

    #[test]
    fn tick_accumulates_total_time() {
        let mut timer = GameTimer::new();
        timer.tick();
        timer.tick();
        assert!(timer.total_seconds() >= timer.delta_seconds());
    }
}
