use tokio::time::Instant;

/// Advances the displayed playback position between authoritative snapshots.
///
/// The clock holds a fixed `(position, instant)` reference pair and every
/// tick recomputes `reference + elapsed` from it, clamped to the track
/// length. Recomputing from the reference instead of incrementing the last
/// displayed value means irregular tick intervals cannot accumulate drift.
#[derive(Debug, Clone, Default)]
pub struct PositionClock {
    reference: Option<(u64, Instant)>,
    duration_ms: Option<u64>,
}

impl PositionClock {
    /// Create a stopped clock with no known track length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the track length used for clamping.
    pub fn set_duration(&mut self, duration_ms: Option<u64>) {
        self.duration_ms = duration_ms;
    }

    /// Begin advancing from the given reference point.
    pub fn start(&mut self, position_ms: u64, at: Instant) {
        self.reference = Some((position_ms, at));
    }

    /// Re-anchor the reference point without stopping.
    ///
    /// Used on every accepted snapshot while no drag is active.
    pub fn reset(&mut self, position_ms: u64, at: Instant) {
        self.start(position_ms, at);
    }

    /// Stop advancing; the displayed position freezes at its last value.
    ///
    /// Used when playback pauses, when a seek drag begins, and when the
    /// track length is unknown.
    pub fn stop(&mut self) {
        self.reference = None;
    }

    /// Whether the clock is currently advancing.
    pub fn is_running(&self) -> bool {
        self.reference.is_some()
    }

    /// Compute the position for `now`, or `None` when stopped.
    ///
    /// Clamping at the track length does not stop the clock; it keeps
    /// producing the clamped maximum until an explicit stop or a new
    /// reference changes behavior.
    pub fn tick(&self, now: Instant) -> Option<u64> {
        let (position_ms, at) = self.reference?;
        let elapsed = now.saturating_duration_since(at).as_millis() as u64;
        let advanced = position_ms.saturating_add(elapsed);

        Some(match self.duration_ms {
            Some(duration) => advanced.min(duration),
            None => advanced,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn tick_advances_by_elapsed_wall_clock() {
        let t0 = Instant::now();
        let mut clock = PositionClock::new();
        clock.set_duration(Some(200_000));
        clock.start(50_000, t0);

        assert_eq!(clock.tick(t0 + Duration::from_millis(3_000)), Some(53_000));
    }

    #[test]
    fn irregular_ticks_do_not_drift() {
        let t0 = Instant::now();
        let mut clock = PositionClock::new();
        clock.set_duration(Some(600_000));
        clock.start(10_000, t0);

        // Many uneven ticks land on the same value a single tick would.
        for offset in [1, 7, 13, 250, 251, 999, 4_999] {
            clock.tick(t0 + Duration::from_millis(offset));
        }
        assert_eq!(clock.tick(t0 + Duration::from_millis(5_000)), Some(15_000));
    }

    #[test]
    fn clamps_at_track_length_without_stopping() {
        let t0 = Instant::now();
        let mut clock = PositionClock::new();
        clock.set_duration(Some(30_000));
        clock.start(29_500, t0);

        assert_eq!(clock.tick(t0 + Duration::from_millis(2_000)), Some(30_000));
        assert!(clock.is_running());
        assert_eq!(clock.tick(t0 + Duration::from_millis(60_000)), Some(30_000));
    }

    #[test]
    fn stopped_clock_produces_nothing() {
        let t0 = Instant::now();
        let mut clock = PositionClock::new();
        clock.start(1_000, t0);
        clock.stop();

        assert_eq!(clock.tick(t0 + Duration::from_millis(500)), None);
        assert!(!clock.is_running());
    }

    #[test]
    fn reset_reanchors_the_reference() {
        let t0 = Instant::now();
        let mut clock = PositionClock::new();
        clock.set_duration(Some(100_000));
        clock.start(10_000, t0);

        let t1 = t0 + Duration::from_millis(4_000);
        clock.reset(70_000, t1);

        assert_eq!(clock.tick(t1 + Duration::from_millis(1_000)), Some(71_000));
    }

    #[test]
    fn tick_before_reference_stays_at_reference() {
        let t0 = Instant::now() + Duration::from_millis(1_000);
        let mut clock = PositionClock::new();
        clock.set_duration(Some(100_000));
        clock.start(10_000, t0);

        // A tick scheduled before the anchor cannot move backwards.
        assert_eq!(clock.tick(t0 - Duration::from_millis(500)), Some(10_000));
    }
}
