use std::time::Instant;

/// Wall-clock frame timer.
///
/// `elapsed` returns fractional seconds since the previous `elapsed` call
/// (or since `start` for the first call) and resets the reference point.
/// `Instant` is monotonic, so the value is never negative.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the last sample, resetting the reference to now.
    pub fn elapsed(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;
        dt
    }

    /// Restart the reference point without sampling.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn elapsed_is_never_negative() {
        let mut clock = FrameClock::start();
        for _ in 0..100 {
            assert!(clock.elapsed() >= 0.0);
        }
    }

    #[test]
    fn elapsed_tracks_wall_time() {
        let mut clock = FrameClock::start();
        thread::sleep(Duration::from_millis(20));
        let dt = clock.elapsed();
        // Sleep may overshoot but never undershoots.
        assert!(dt >= 0.02, "dt was {dt}");
        assert!(dt < 1.0, "dt was {dt}");
    }

    #[test]
    fn elapsed_resets_reference_point() {
        let mut clock = FrameClock::start();
        thread::sleep(Duration::from_millis(15));
        let first = clock.elapsed();
        let second = clock.elapsed();
        assert!(second < first, "second sample should be near zero");
    }
}
