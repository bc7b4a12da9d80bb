use crate::domain::GeoCoordinate;
use serde::de::{Unexpected, Visitor};
use serde::{Deserialize, Deserializer, de};
use std::fmt::Formatter;

/// Reads the `"latitude,longitude"` notation the lookup service uses for its `loc` field.
impl<'de> Deserialize<'de> for GeoCoordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GeoCoordinateVisitor;

        impl<'de> Visitor<'de> for GeoCoordinateVisitor {
            type Value = GeoCoordinate;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "a string like '51.5074,-0.1278'")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let (latitude, longitude) = v.split_once(',').ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))?;

                let latitude = latitude
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::invalid_value(Unexpected::Str(latitude), &"a decimal latitude"))?;
                let longitude = longitude
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::invalid_value(Unexpected::Str(longitude), &"a decimal longitude"))?;

                GeoCoordinate::new(latitude, longitude).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(GeoCoordinateVisitor)
    }
}
