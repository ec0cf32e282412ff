//! Reproducible generator construction.
//!
//! Every profile gets its own `StdRng`, seeded from the rounded coordinate and
//! the lower-cased query. Nothing is shared between calls, so concurrent
//! requests cannot disturb each other's draw sequence.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeterministicSeed(u64);

impl DeterministicSeed {
    /// Derives the seed from `(round(lat, 2), round(lon, 2), query_lower)`.
    pub fn derive(lat: f64, lon: f64, query_lower: &str) -> Self {
        let key = format!(
            "{:.2}|{:.2}|{}",
            normalize(round_to(lat, 2)),
            normalize(round_to(lon, 2)),
            query_lower
        );
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();

        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(head))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// A fresh generator positioned at the start of this seed's stream.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.0)
    }
}

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// -0.0 and 0.0 must key the same stream.
fn normalize(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
