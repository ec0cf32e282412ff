use serde::{Deserialize, Serialize};

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Returns `None` unless both axes fall inside the legal geographic range.
    pub fn checked(lat: f64, lon: f64) -> Option<Self> {
        if Self::is_legal(lat, lon) {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    pub fn is_legal(lat: f64, lon: f64) -> bool {
        (LAT_MIN..=LAT_MAX).contains(&lat) && (LON_MIN..=LON_MAX).contains(&lon)
    }
}
