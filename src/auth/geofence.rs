//! Great-circle distance between a client's reported position and a stored
//! location anchor.

use crate::error::{AppError, AppResult};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

impl Coordinate {
    /// Parse decimal-degree strings. Non-numeric, non-finite or out-of-range
    /// input is an InvalidValue error.
    pub fn parse(lat: &str, long: &str) -> AppResult<Self> {
        let lat = parse_degrees("lat", lat, 90.0)?;
        let long = parse_degrees("long", long, 180.0)?;
        Ok(Self { lat, long })
    }

    /// Haversine distance in metres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.long - self.long).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_METERS * c
    }
}

/// Inclusive: a distance exactly at the limit is inside.
pub fn within(distance_meters: f64, allowed_meters: i64) -> bool {
    distance_meters <= allowed_meters as f64
}

fn parse_degrees(name: &str, raw: &str, bound: f64) -> AppResult<f64> {
    let value: f64 = raw
        .parse()
        .map_err(|_| AppError::invalid_value(format!("{} is not a number: {:?}", name, raw)))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(AppError::invalid_value(format!("{} out of range: {}", name, raw)));
    }
    Ok(value)
}
