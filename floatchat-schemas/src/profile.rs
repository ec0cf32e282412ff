use serde::{Deserialize, Serialize};

/// One sample of a vertical profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    /// Pressure in dbar, used as a stand-in for depth in metres.
    #[serde(rename = "pres")]
    pub pressure: f64,
    /// Temperature in °C.
    #[serde(rename = "temp")]
    pub temperature: f64,
    /// Salinity in PSU.
    pub salinity: f64,
}

/// The wire form of a generated profile, as returned by `POST /query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile_id: u32,
    pub lat: f64,
    pub lon: f64,
    /// Generation time, `YYYY-MM-DD HH:MM:SS`.
    pub time: String,
    pub depth_levels: Vec<DepthLevel>,
    pub query_explain: String,
}
