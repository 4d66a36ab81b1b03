//! Frame timing: turns monotonic timestamps into clamped frame deltas.

/// Time step handed to one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Elapsed time in nominal frames, clamped to `max_steps`.
    pub dt: f64,
    /// The same step in milliseconds (`dt * nominal_ms`), used by timed screens.
    pub elapsed_ms: f64,
}

impl FrameDelta {
    /// A delta of `ms` milliseconds, clamped the same way the clock clamps.
    pub fn from_ms(ms: f64, nominal_ms: f64, max_steps: f64) -> Self {
        let dt = (ms.max(0.0) / nominal_ms).min(max_steps);
        Self {
            dt,
            elapsed_ms: dt * nominal_ms,
        }
    }
}

/// Converts a stream of timestamps into [`FrameDelta`]s.
///
/// A long gap (terminal suspended, debugger pause) is capped at
/// `max_steps` nominal frames so the bird cannot tunnel through a pipe.
#[derive(Debug, Clone)]
pub struct FrameClock {
    nominal_ms: f64,
    max_steps: f64,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(nominal_ms: f64, max_steps: f64) -> Self {
        Self {
            nominal_ms,
            max_steps,
            last_ms: None,
        }
    }

    /// Feed the current timestamp. The first sample only primes the clock.
    pub fn advance(&mut self, now_ms: f64) -> Option<FrameDelta> {
        let last = self.last_ms.replace(now_ms)?;
        Some(FrameDelta::from_ms(
            now_ms - last,
            self.nominal_ms,
            self.max_steps,
        ))
    }

    /// Forget the previous sample (next `advance` primes again).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOMINAL: f64 = 1000.0 / 60.0;

    #[test]
    fn test_first_sample_primes() {
        let mut clock = FrameClock::new(NOMINAL, 3.0);
        assert!(clock.advance(1000.0).is_none());
        let d = clock.advance(1000.0 + NOMINAL).unwrap();
        assert!((d.dt - 1.0).abs() < 1e-9);
        assert!((d.elapsed_ms - NOMINAL).abs() < 1e-9);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new(NOMINAL, 3.0);
        clock.advance(0.0);
        let d = clock.advance(5_000.0).unwrap();
        assert!((d.dt - 3.0).abs() < 1e-9);
        assert!((d.elapsed_ms - 3.0 * NOMINAL).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new(NOMINAL, 3.0);
        clock.advance(500.0);
        let d = clock.advance(400.0).unwrap();
        assert_eq!(d.dt, 0.0);
    }

    #[test]
    fn test_reset_reprimes() {
        let mut clock = FrameClock::new(NOMINAL, 3.0);
        clock.advance(0.0);
        clock.reset();
        assert!(clock.advance(100.0).is_none());
    }
}
