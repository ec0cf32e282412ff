//! Query in, profile out: resolve, seed, synthesize, narrate.

use crate::{
    error::FloatChatError,
    location::{self, Resolution},
    narrative,
    seed::DeterministicSeed,
    synthesis,
};
use chrono::{Local, NaiveDateTime};
use floatchat_schemas::{
    coordinate::Coordinate,
    profile::{DepthLevel, ProfileRecord},
};
use rand::Rng;
use tracing::info;

pub const DEFAULT_QUERY: &str = "ocean data";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A freshly generated profile. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Display-only; not unique and not derived from the seed.
    pub profile_id: u32,
    pub coordinate: Coordinate,
    pub location_description: String,
    pub generated_at: NaiveDateTime,
    pub depth_levels: Vec<DepthLevel>,
    pub narrative: String,
}

impl Profile {
    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            profile_id: self.profile_id,
            lat: self.coordinate.lat,
            lon: self.coordinate.lon,
            time: self.generated_at.format(TIMESTAMP_FORMAT).to_string(),
            depth_levels: self.depth_levels.clone(),
            query_explain: self.narrative.clone(),
        }
    }
}

/// A fluent builder for a single [`Profile`].
///
/// Only the query is normally needed. Tests and the CLI can pin the
/// coordinate, timestamp or display id.
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    query: Option<String>,
    coordinates: Option<(f64, f64)>,
    generated_at: Option<NaiveDateTime>,
    profile_id: Option<u32>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Skips text resolution and uses this position instead.
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.coordinates = Some((lat, lon));
        self
    }

    pub fn with_timestamp(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn with_profile_id(mut self, profile_id: u32) -> Self {
        self.profile_id = Some(profile_id);
        self
    }

    /// # Errors
    ///
    /// `InvalidCoordinate` if pinned coordinates are out of range. Text
    /// queries themselves never fail.
    pub fn build(self) -> Result<Profile, FloatChatError> {
        let query = self.query.unwrap_or_else(|| DEFAULT_QUERY.to_string());
        let query_lower = query.to_lowercase();

        let Resolution {
            coordinate,
            description,
            ..
        } = match self.coordinates {
            Some((lat, lon)) => location::from_coordinates(lat, lon)?,
            None => location::resolve(&query),
        };

        let seed = DeterministicSeed::derive(coordinate.lat, coordinate.lon, &query_lower);
        let depth_levels = synthesis::synthesize(coordinate, &query_lower, seed);
        let narrative = narrative::narrate(
            &depth_levels,
            &description,
            coordinate.lat,
            coordinate.lon,
            &query,
        )?;

        let profile = Profile {
            profile_id: self
                .profile_id
                .unwrap_or_else(|| rand::thread_rng().gen_range(1000..=9999)),
            coordinate,
            location_description: description,
            generated_at: self.generated_at.unwrap_or_else(|| Local::now().naive_local()),
            depth_levels,
            narrative,
        };

        info!(
            profile_id = profile.profile_id,
            levels = profile.depth_levels.len(),
            location = %profile.location_description,
            "Generated profile"
        );
        Ok(profile)
    }
}

/// Shorthand for `ProfileBuilder::new().with_query(query).build()`.
pub fn generate_profile(query: &str) -> Result<Profile, FloatChatError> {
    ProfileBuilder::new().with_query(query).build()
}
