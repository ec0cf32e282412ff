//! Procedural temperature/salinity profiles.
//!
//! All randomness comes from one generator threaded through the call. Draws
//! happen in a fixed order: surface temperature, surface salinity, regional
//! adjustment, then temperature and salinity noise for each level from the
//! shallowest down. Changing that order changes every value downstream.

use crate::seed::{round_to, DeterministicSeed};
use floatchat_schemas::{coordinate::Coordinate, profile::DepthLevel};
use rand::Rng;
use tracing::debug;

pub const MIN_TEMPERATURE: f64 = 1.5;
pub const MIN_SALINITY: f64 = 32.0;
pub const MAX_SALINITY: f64 = 37.5;

pub const STANDARD_PRESSURES: [f64; 8] = [5.0, 15.0, 30.0, 50.0, 75.0, 100.0, 125.0, 150.0];
pub const DETAILED_PRESSURES: [f64; 11] =
    [5.0, 10.0, 15.0, 20.0, 30.0, 40.0, 50.0, 75.0, 100.0, 125.0, 150.0];

const DETAIL_KEYWORDS: [&str; 3] = ["detailed", "high-res", "high resolution"];

const MIXED_LAYER_BASE: f64 = 20.0;
const THERMOCLINE_BASE: f64 = 100.0;
const THERMOCLINE_SPAN: f64 = 80.0;
const DEEP_COOLING_PER_DBAR: f64 = 0.02;

const HALOCLINE_TOP: f64 = 30.0;
const HALOCLINE_BASE: f64 = 80.0;

/// Latitude band, chosen from `|lat|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionalBand {
    Tropical,
    Subtropical,
    Temperate,
    Polar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParameters {
    pub surface_temperature: (f64, f64),
    pub surface_salinity: (f64, f64),
    pub thermocline_strength: f64,
}

impl RegionalBand {
    pub fn classify(lat: f64) -> Self {
        let abs_lat = lat.abs();
        if abs_lat <= 10.0 {
            Self::Tropical
        } else if abs_lat <= 30.0 {
            Self::Subtropical
        } else if abs_lat <= 50.0 {
            Self::Temperate
        } else {
            Self::Polar
        }
    }

    pub fn parameters(self) -> BandParameters {
        match self {
            Self::Tropical => BandParameters {
                surface_temperature: (26.0, 29.0),
                surface_salinity: (34.5, 35.5),
                thermocline_strength: 0.18,
            },
            Self::Subtropical => BandParameters {
                surface_temperature: (22.0, 27.0),
                surface_salinity: (35.0, 36.5),
                thermocline_strength: 0.14,
            },
            Self::Temperate => BandParameters {
                surface_temperature: (15.0, 22.0),
                surface_salinity: (34.0, 35.5),
                thermocline_strength: 0.10,
            },
            Self::Polar => BandParameters {
                surface_temperature: (2.0, 10.0),
                surface_salinity: (33.5, 34.5),
                thermocline_strength: 0.06,
            },
        }
    }
}

/// Surface state the depth levels are shaped from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConditions {
    pub band: RegionalBand,
    pub temperature: f64,
    pub salinity: f64,
    pub thermocline_strength: f64,
}

impl SurfaceConditions {
    pub fn draw<R: Rng>(band: RegionalBand, rng: &mut R) -> Self {
        let params = band.parameters();
        let temperature = uniform(rng, params.surface_temperature);
        let salinity = uniform(rng, params.surface_salinity);
        Self {
            band,
            temperature,
            salinity,
            thermocline_strength: params.thermocline_strength,
        }
    }
}

/// Regional corrections, checked in declaration order; at most one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionalAdjustment {
    /// Warmer, saltier surface from evaporation.
    ArabianSea,
    /// Surface variability, with equatorial freshening south of 10°N.
    EasternPacific,
    None,
}

impl RegionalAdjustment {
    pub fn classify(coordinate: Coordinate, query_lower: &str) -> Self {
        let Coordinate { lat, lon } = coordinate;
        if query_lower.contains("arabian") || (50.0 < lon && lon < 80.0 && 10.0 < lat && lat < 25.0) {
            Self::ArabianSea
        } else if query_lower.contains("pacific") && -180.0 < lon && lon < -80.0 {
            Self::EasternPacific
        } else {
            Self::None
        }
    }

    pub fn apply<R: Rng>(self, surface: &mut SurfaceConditions, lat: f64, rng: &mut R) {
        match self {
            Self::ArabianSea => {
                surface.temperature += uniform(rng, (0.5, 2.0));
                surface.salinity += uniform(rng, (0.3, 0.8));
            }
            Self::EasternPacific => {
                surface.temperature += uniform(rng, (-1.0, 1.0));
                if lat < 10.0 {
                    surface.salinity -= uniform(rng, (0.2, 0.5));
                }
            }
            Self::None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureSet {
    Standard,
    Detailed,
}

impl PressureSet {
    pub fn for_query(query_lower: &str) -> Self {
        if DETAIL_KEYWORDS.iter().any(|k| query_lower.contains(k)) {
            Self::Detailed
        } else {
            Self::Standard
        }
    }

    pub fn pressures(self) -> &'static [f64] {
        match self {
            Self::Standard => &STANDARD_PRESSURES,
            Self::Detailed => &DETAILED_PRESSURES,
        }
    }
}

/// Builds the depth levels for a resolved position, starting a fresh
/// generator from `seed`.
pub fn synthesize(coordinate: Coordinate, query_lower: &str, seed: DeterministicSeed) -> Vec<DepthLevel> {
    let mut rng = seed.rng();
    synthesize_with_rng(coordinate, query_lower, &mut rng)
}

pub fn synthesize_with_rng<R: Rng>(
    coordinate: Coordinate,
    query_lower: &str,
    rng: &mut R,
) -> Vec<DepthLevel> {
    let band = RegionalBand::classify(coordinate.lat);
    let mut surface = SurfaceConditions::draw(band, rng);

    let adjustment = RegionalAdjustment::classify(coordinate, query_lower);
    adjustment.apply(&mut surface, coordinate.lat, rng);

    let pressure_set = PressureSet::for_query(query_lower);
    debug!(?band, ?adjustment, ?pressure_set, "Synthesizing profile");

    pressure_set
        .pressures()
        .iter()
        .map(|&pressure| {
            let temperature = level_temperature(&surface, pressure, rng);
            let salinity = level_salinity(&surface, pressure, rng);
            DepthLevel {
                pressure,
                temperature: round_to(temperature, 2),
                salinity: round_to(salinity, 2),
            }
        })
        .collect()
}

fn level_temperature<R: Rng>(surface: &SurfaceConditions, pressure: f64, rng: &mut R) -> f64 {
    let full_drop = surface.thermocline_strength * THERMOCLINE_SPAN;
    let temperature = if pressure <= MIXED_LAYER_BASE {
        surface.temperature + uniform(rng, (-0.5, 0.5))
    } else if pressure <= THERMOCLINE_BASE {
        let depth_factor = (pressure - MIXED_LAYER_BASE) / THERMOCLINE_SPAN;
        surface.temperature - full_drop * depth_factor + uniform(rng, (-0.8, 0.8))
    } else {
        surface.temperature - full_drop - (pressure - THERMOCLINE_BASE) * DEEP_COOLING_PER_DBAR
            + uniform(rng, (-0.5, 0.5))
    };
    temperature.max(MIN_TEMPERATURE)
}

fn level_salinity<R: Rng>(surface: &SurfaceConditions, pressure: f64, rng: &mut R) -> f64 {
    let salinity = if pressure <= HALOCLINE_TOP {
        surface.salinity + uniform(rng, (-0.1, 0.1))
    } else if pressure <= HALOCLINE_BASE {
        // subsurface salinity maximum
        surface.salinity + 0.1 + uniform(rng, (-0.15, 0.15))
    } else {
        surface.salinity - 0.05 + uniform(rng, (-0.2, 0.2))
    };
    salinity.clamp(MIN_SALINITY, MAX_SALINITY)
}

fn uniform<R: Rng>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    rng.gen_range(low..=high)
}
