use crate::domain::GeoCoordinate;

/// Mean Earth radius, treating the Earth as a sphere.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates using the Haversine formula.
pub fn distance_km(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + a.latitude().to_radians().cos() * b.latitude().to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h just outside [0, 1] for (near) antipodal points
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
