use crate::domain::{DistanceEstimate, LatencySample, Location};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

#[derive(Clone, Debug, PartialEq)]
pub struct RttMeasurement {
    pub sample: LatencySample,
    pub estimate: DistanceEstimate,
}

/// Everything a successful run found out, ready to be printed.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceReport {
    pub custom_source: Option<IpAddr>,
    pub source: Location,
    pub target: Location,
    pub geo: DistanceEstimate,
    pub rtt: Option<RttMeasurement>,
}

impl Display for DistanceReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(ip) = self.custom_source {
            writeln!(f, "Using custom IP: {}", ip)?;
        }
        writeln!(f, "Source IP Location: {}", self.source)?;
        writeln!(f, "Target IP Location: {}", self.target)?;
        writeln!(f, "Estimated Distance: {}", self.geo)?;

        match &self.rtt {
            Some(rtt) => write!(
                f,
                "RTT: {} ms (Estimated Distance from RTT: {})",
                rtt.sample.round_trip_ms(),
                rtt.estimate
            ),
            None => write!(f, "RTT: not available (Estimated Distance from RTT: not available)"),
        }
    }
}
