/// Average round-trip time to a host in milliseconds. Never negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatencySample {
    round_trip_ms: f64,
}

impl LatencySample {
    /// Returns `None` for negative or non-finite round trips.
    pub fn new(round_trip_ms: f64) -> Option<Self> {
        if round_trip_ms.is_finite() && round_trip_ms >= 0.0 {
            Some(LatencySample { round_trip_ms })
        } else {
            None
        }
    }

    pub fn round_trip_ms(&self) -> f64 {
        self.round_trip_ms
    }
}
