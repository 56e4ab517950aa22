use std::time::{Duration, Instant};

/// Frame timing source.
pub struct Clocks {
    start: Instant,
    last: Instant,
    frame: u64,
}

/// Timing of a single tick.
#[derive(Clone, Copy, Debug)]
pub struct ClockIndex {
    /// Time passed since previous tick.
    pub delta: Duration,

    /// When this tick started.
    pub step: Instant,

    /// When clocks were created.
    pub start: Instant,

    /// Number of this tick, starting from 1.
    pub frame: u64,
}

impl Default for Clocks {
    fn default() -> Self {
        Clocks::new()
    }
}

impl Clocks {
    pub fn new() -> Self {
        let now = Instant::now();
        Clocks {
            start: now,
            last: now,
            frame: 0,
        }
    }

    /// Advances clocks to the next tick.
    pub fn step(&mut self) -> ClockIndex {
        let step = Instant::now();
        let delta = step.saturating_duration_since(self.last);
        self.last = step;
        self.frame += 1;

        ClockIndex {
            delta,
            step,
            start: self.start,
            frame: self.frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_counted() {
        let mut clocks = Clocks::new();
        let first = clocks.step();
        let second = clocks.step();

        assert_eq!(first.frame, 1);
        assert_eq!(second.frame, 2);
        assert!(second.step >= first.step);
        assert_eq!(first.start, second.start);
    }
}
