use alloc::vec::Vec;

/// One timestamped scroll observation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocitySample {
    pub timestamp_ms: u64,
    pub offset: u64,
}

/// Smoothed scroll-speed estimate over a bounded sample window.
///
/// Feeds an external load-gating policy: expensive work (content fetches,
/// heavy render paths) is deferred while the user is flinging and resumed as
/// speed drops. The tracker never reads a clock; callers pass `now_ms`, which
/// keeps it deterministic under test.
///
/// Velocities are signed, in content units per second; positive means
/// scrolling toward larger offsets.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: Vec<VelocitySample>,
    head: usize,
    len: usize,
    staleness_ms: u64,
}

impl VelocityTracker {
    /// `capacity` is the ring size (≥ 2, validated by the engine's options).
    /// Sample pairs separated by more than `staleness_ms` are treated as a
    /// pause, not a measurement.
    pub fn new(capacity: usize, staleness_ms: u64) -> Self {
        debug_assert!(capacity >= 2, "velocity window must hold a sample pair");
        Self {
            samples: alloc::vec![VelocitySample::default(); capacity.max(2)],
            head: 0,
            len: 0,
            staleness_ms: staleness_ms.max(1),
        }
    }

    pub fn staleness_ms(&self) -> u64 {
        self.staleness_ms
    }

    /// Records one observation, overwriting the oldest when full.
    pub fn sample(&mut self, timestamp_ms: u64, offset: u64) {
        let cap = self.samples.len();
        let slot = (self.head + self.len) % cap;
        self.samples[slot] = VelocitySample {
            timestamp_ms,
            offset,
        };
        if self.len < cap {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % cap;
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Velocity between the two most recent samples, 0.0 when the pair is
    /// stale or fewer than two samples exist.
    pub fn instantaneous(&self) -> f64 {
        if self.len < 2 {
            return 0.0;
        }
        let newest = self.at(self.len - 1);
        let prev = self.at(self.len - 2);
        pair_velocity(prev, newest, self.staleness_ms).unwrap_or(0.0)
    }

    /// Smoothed velocity: the mean over all non-stale consecutive pairs in
    /// the window. Single-sample spikes get averaged out before they reach
    /// load-gating decisions.
    ///
    /// Returns 0.0 once the stream has gone quiet for longer than the
    /// staleness bound relative to `now_ms`.
    pub fn current(&self, now_ms: u64) -> f64 {
        if self.len < 2 || self.is_idle(now_ms, self.staleness_ms) {
            return 0.0;
        }
        let mut sum = 0.0;
        let mut pairs = 0u32;
        for i in 1..self.len {
            if let Some(v) = pair_velocity(self.at(i - 1), self.at(i), self.staleness_ms) {
                sum += v;
                pairs += 1;
            }
        }
        if pairs == 0 { 0.0 } else { sum / pairs as f64 }
    }

    /// True once no sample has arrived within `timeout_ms` of `now_ms`.
    pub fn is_idle(&self, now_ms: u64, timeout_ms: u64) -> bool {
        if self.len == 0 {
            return true;
        }
        let newest = self.at(self.len - 1);
        now_ms.saturating_sub(newest.timestamp_ms) > timeout_ms
    }

    pub fn latest(&self) -> Option<VelocitySample> {
        if self.len == 0 {
            return None;
        }
        Some(self.at(self.len - 1))
    }

    fn at(&self, logical: usize) -> VelocitySample {
        self.samples[(self.head + logical) % self.samples.len()]
    }
}

fn pair_velocity(prev: VelocitySample, next: VelocitySample, staleness_ms: u64) -> Option<f64> {
    let dt = next.timestamp_ms.saturating_sub(prev.timestamp_ms);
    if dt == 0 || dt > staleness_ms {
        return None;
    }
    let delta = next.offset as f64 - prev.offset as f64;
    Some(delta * 1000.0 / dt as f64)
}
