use crate::domain::{GeoCoordinate, Location, ResolutionError};
use serde::Deserialize;
use std::net::IpAddr;

// API: https://ipinfo.io/developers/responses
#[derive(Debug, Deserialize)]
pub struct IpInfoResponse {
    pub ip: Option<IpAddr>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub loc: Option<GeoCoordinate>,
    #[serde(default)]
    pub bogon: bool,
}

impl IpInfoResponse {
    /// `subject` names what was looked up, for error messages.
    pub fn into_location(self, subject: &str) -> Result<Location, ResolutionError> {
        if self.bogon {
            return match self.ip {
                Some(ip) => Err(ResolutionError::Bogon(ip)),
                None => Err(ResolutionError::MissingLocation(subject.to_string())),
            };
        }

        let place = self.place();
        let Some(coordinate) = self.loc else {
            return Err(ResolutionError::MissingLocation(subject.to_string()));
        };

        Ok(Location {
            ip: self.ip,
            coordinate,
            place,
        })
    }

    fn place(&self) -> Option<String> {
        let parts = [&self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim).filter(|part| !part.is_empty()))
            .collect::<Vec<_>>();

        if parts.is_empty() { None } else { Some(parts.join(", ")) }
    }
}
