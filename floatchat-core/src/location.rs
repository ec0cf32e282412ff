//! Turns free text into a position.
//!
//! Strategies run in a fixed order and the first one that produces a legal
//! coordinate wins:
//!
//! 1. keyed coordinates (`lat 12.9 lon 77.6`, either order),
//! 2. compact hemisphere form (`12.9N 77.6E`),
//! 3. the named-place table, scanned top to bottom,
//! 4. a seeded random position in `[-60, 60] x [-180, 180]`.

use crate::error::FloatChatError;
use crate::format::{display_float, title_case};
use crate::seed::{round_to, DeterministicSeed};
use floatchat_schemas::coordinate::Coordinate;
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use tracing::{debug, warn};

/// A keyword and the position it stands for. Matching is by substring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceRule {
    pub keyword: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// Order matters: a query naming several places resolves to the first row.
pub const NAMED_PLACES: [PlaceRule; 7] = [
    PlaceRule { keyword: "mumbai", lat: 19.0760, lon: 72.8777 },
    PlaceRule { keyword: "india", lat: 19.0760, lon: 72.8777 },
    PlaceRule { keyword: "equator", lat: 0.0, lon: 78.0 },
    PlaceRule { keyword: "pacific", lat: 0.0, lon: -140.0 },
    PlaceRule { keyword: "atlantic", lat: 0.0, lon: -30.0 },
    PlaceRule { keyword: "arabian", lat: 15.0, lon: 65.0 },
    PlaceRule { keyword: "indian ocean", lat: 0.0, lon: 78.0 },
];

const FALLBACK_LAT_SPAN: f64 = 60.0;

lazy_static! {
    static ref KEYED_LAT: Regex =
        Regex::new(r"\b(?:latitude|lat)\s*[:=]?\s*([+-]?\d{1,2}(?:\.\d+)?)(?:[^\d]|$)")
            .expect("latitude pattern is valid");
    static ref KEYED_LON: Regex =
        Regex::new(r"\b(?:longitude|lon)\s*[:=]?\s*([+-]?\d{1,3}(?:\.\d+)?)(?:[^\d]|$)")
            .expect("longitude pattern is valid");
    static ref COMPACT: Regex =
        Regex::new(r"\b(\d{1,2}(?:\.\d+)?)°?([ns])\s+(\d{1,3}(?:\.\d+)?)°?([ew])\b")
            .expect("compact coordinate pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionSource {
    KeyedCoordinates,
    CompactCoordinates,
    NamedPlace(&'static str),
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub coordinate: Coordinate,
    pub description: String,
    pub source: ResolutionSource,
}

impl Resolution {
    fn explicit(coordinate: Coordinate, source: ResolutionSource) -> Self {
        Self {
            description: format!("at {:.3}°N, {:.3}°E", coordinate.lat, coordinate.lon),
            coordinate,
            source,
        }
    }
}

/// Resolves `query` to a position. Never fails: unrecognised text lands on
/// the seeded fallback.
pub fn resolve(query: &str) -> Resolution {
    let query_lower = query.to_lowercase();

    let resolution = keyed_coordinates(&query_lower)
        .or_else(|| compact_coordinates(&query_lower))
        .or_else(|| named_place(&query_lower))
        .unwrap_or_else(|| fallback(&query_lower));

    debug!(
        source = ?resolution.source,
        lat = resolution.coordinate.lat,
        lon = resolution.coordinate.lon,
        "Resolved query location"
    );
    resolution
}

/// Validates caller-supplied coordinates and describes them the way explicit
/// coordinates in the query text are described.
pub fn from_coordinates(lat: f64, lon: f64) -> Result<Resolution, FloatChatError> {
    let coordinate =
        Coordinate::checked(lat, lon).ok_or(FloatChatError::InvalidCoordinate { lat, lon })?;
    Ok(Resolution::explicit(coordinate, ResolutionSource::KeyedCoordinates))
}

fn keyed_coordinates(query_lower: &str) -> Option<Resolution> {
    let lat = capture_number(&KEYED_LAT, query_lower)?;
    let lon = capture_number(&KEYED_LON, query_lower)?;

    match Coordinate::checked(lat, lon) {
        Some(coordinate) => Some(Resolution::explicit(coordinate, ResolutionSource::KeyedCoordinates)),
        None => {
            warn!(lat, lon, "Ignoring out-of-range keyed coordinates");
            None
        }
    }
}

fn compact_coordinates(query_lower: &str) -> Option<Resolution> {
    let caps = COMPACT.captures(query_lower)?;
    let lat_abs: f64 = caps.get(1)?.as_str().parse().ok()?;
    let lon_abs: f64 = caps.get(3)?.as_str().parse().ok()?;

    let lat = if caps.get(2)?.as_str() == "s" { -lat_abs } else { lat_abs };
    let lon = if caps.get(4)?.as_str() == "w" { -lon_abs } else { lon_abs };

    match Coordinate::checked(lat, lon) {
        Some(coordinate) => Some(Resolution::explicit(coordinate, ResolutionSource::CompactCoordinates)),
        None => {
            warn!(lat, lon, "Ignoring out-of-range compact coordinates");
            None
        }
    }
}

fn named_place(query_lower: &str) -> Option<Resolution> {
    NAMED_PLACES
        .iter()
        .find(|place| query_lower.contains(place.keyword))
        .map(|place| Resolution {
            coordinate: Coordinate { lat: place.lat, lon: place.lon },
            description: format!("near {}", title_case(place.keyword)),
            source: ResolutionSource::NamedPlace(place.keyword),
        })
}

// The seed deliberately ignores position: none is known yet, so (0, 0) stands in.
fn fallback(query_lower: &str) -> Resolution {
    let mut rng = DeterministicSeed::derive(0.0, 0.0, query_lower).rng();
    let lat = round_to(rng.gen_range(-FALLBACK_LAT_SPAN..=FALLBACK_LAT_SPAN), 3);
    let lon = round_to(rng.gen_range(-180.0..=180.0), 3);

    Resolution {
        coordinate: Coordinate { lat, lon },
        description: format!("at {}°N, {}°E", display_float(lat), display_float(lon)),
        source: ResolutionSource::Fallback,
    }
}

fn capture_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
