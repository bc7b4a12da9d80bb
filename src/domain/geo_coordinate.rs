use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A point on the Earth's surface in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !(latitude >= -90.0 && latitude <= 90.0) {
            return Err(InvalidCoordinate::Latitude(latitude));
        }

        if !(longitude >= -180.0 && longitude <= 180.0) {
            return Err(InvalidCoordinate::Longitude(longitude));
        }

        Ok(GeoCoordinate { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Display for GeoCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat={}, Lon={}", self.latitude, self.longitude)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidCoordinate {
    #[error("invalid latitude: {0}, must be between -90 and 90")]
    Latitude(f64),
    #[error("invalid longitude: {0}, must be between -180 and 180")]
    Longitude(f64),
}
