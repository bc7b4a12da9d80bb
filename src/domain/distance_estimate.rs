use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EstimationMethod {
    Geo,
    Rtt,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceEstimate {
    pub kilometers: f64,
    pub method: EstimationMethod,
}

impl DistanceEstimate {
    pub fn geo(kilometers: f64) -> Self {
        DistanceEstimate {
            kilometers,
            method: EstimationMethod::Geo,
        }
    }

    pub fn rtt(kilometers: f64) -> Self {
        DistanceEstimate {
            kilometers,
            method: EstimationMethod::Rtt,
        }
    }
}

impl Display for DistanceEstimate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} km", self.kilometers)
    }
}
