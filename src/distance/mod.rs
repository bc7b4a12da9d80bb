pub mod great_circle;
pub mod rtt;

pub use great_circle::distance_km;
pub use rtt::{DEFAULT_PROPAGATION_KM_PER_MS, estimate_km};
