mod distance_estimate;
mod geo_coordinate;
mod latency_probe;
mod latency_sample;
mod location;
mod location_resolver;
mod target_spec;

pub use distance_estimate::DistanceEstimate;
#[cfg(test)]
pub use distance_estimate::EstimationMethod;
pub use geo_coordinate::GeoCoordinate;
pub use latency_probe::LatencyProbe;
pub use latency_sample::LatencySample;
pub use location::Location;
pub use location_resolver::{LocationResolver, ResolutionError};
pub use target_spec::TargetSpec;
