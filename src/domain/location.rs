use crate::domain::GeoCoordinate;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub ip: Option<IpAddr>,
    pub coordinate: GeoCoordinate,
    pub place: Option<String>, // e.g. "Mountain View, California, US"
}

impl Location {
    #[cfg(test)]
    pub fn new(coordinate: GeoCoordinate) -> Self {
        Location {
            ip: None,
            coordinate,
            place: None,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.place {
            Some(place) => write!(f, "{} ({})", self.coordinate, place),
            None => write!(f, "{}", self.coordinate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_the_place_when_known() {
        let mut location = Location::new(GeoCoordinate::new(37.4056, -122.0775).unwrap());
        assert_eq!(location.to_string(), "Lat=37.4056, Lon=-122.0775");

        location.place = Some("Mountain View, California, US".to_string());
        assert_eq!(location.to_string(), "Lat=37.4056, Lon=-122.0775 (Mountain View, California, US)");
    }
}
