/// Signal speed in optical fiber, roughly two thirds of the speed of light.
pub const DEFAULT_PROPAGATION_KM_PER_MS: f64 = 200.0;

/// Estimates the one-way distance covered in half a round trip at the given
/// propagation speed. This is an upper bound at best: routes are never straight.
pub fn estimate_km(rtt_ms: f64, propagation_km_per_ms: f64) -> f64 {
    debug_assert!(rtt_ms >= 0.0, "round trip time must not be negative: {}", rtt_ms);
    (rtt_ms / 2.0) * propagation_km_per_ms
}
