//! Whole-pipeline properties: reproducibility, physical bounds, level
//! layout, resolution precedence and agreement between prose and numbers.

use floatchat_core::{
    location::{self, ResolutionSource},
    narrative::{self, ProfileMetrics},
    pipeline::{generate_profile, ProfileBuilder},
    seed::DeterministicSeed,
    synthesis::{self, RegionalBand, DETAILED_PRESSURES, STANDARD_PRESSURES},
};
use floatchat_schemas::{coordinate::Coordinate, profile::DepthLevel};

const QUERIES: [&str; 10] = [
    "temperature profile near equator",
    "Mumbai salinity",
    "show me the pacific",
    "atlantic high-res profile",
    "Arabian Sea detailed",
    "lat -65 lon 20",
    "lat 72 lon -150 high resolution",
    "45.5S 170.2E",
    "what about the ocean?",
    "zzzz",
];

fn pressures(levels: &[DepthLevel]) -> Vec<f64> {
    levels.iter().map(|l| l.pressure).collect()
}

// ═══════════════════════════════════════════════════════════════════
// Determinism
// ═══════════════════════════════════════════════════════════════════

#[test]
fn identical_queries_produce_identical_profiles() {
    for query in QUERIES {
        let a = generate_profile(query).unwrap();
        let b = generate_profile(query).unwrap();
        assert_eq!(a.coordinate, b.coordinate, "{query}");
        assert_eq!(a.depth_levels.len(), b.depth_levels.len());
        for (x, y) in a.depth_levels.iter().zip(&b.depth_levels) {
            assert_eq!(x.temperature.to_bits(), y.temperature.to_bits());
            assert_eq!(x.salinity.to_bits(), y.salinity.to_bits());
        }
        assert_eq!(a.narrative, b.narrative, "{query}");
    }
}

#[test]
fn query_case_does_not_change_profile() {
    let a = generate_profile("PACIFIC Temperature").unwrap();
    let b = generate_profile("pacific temperature").unwrap();
    assert_eq!(a.depth_levels, b.depth_levels);
}

#[test]
fn different_queries_at_same_place_differ() {
    let a = generate_profile("mumbai salinity").unwrap();
    let b = generate_profile("mumbai temperature").unwrap();
    assert_eq!(a.coordinate, b.coordinate);
    assert_ne!(a.depth_levels, b.depth_levels);
}

#[test]
fn concurrent_calls_match_sequential_calls() {
    let expected: Vec<_> = QUERIES
        .iter()
        .map(|q| generate_profile(q).unwrap().depth_levels)
        .collect();

    let handles: Vec<_> = QUERIES
        .iter()
        .map(|q| {
            let q = q.to_string();
            std::thread::spawn(move || generate_profile(&q).unwrap().depth_levels)
        })
        .collect();

    for (handle, expected) in handles.into_iter().zip(expected) {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Bounds and layout
// ═══════════════════════════════════════════════════════════════════

#[test]
fn every_latitude_respects_bounds() {
    let mut lat = -90.0;
    while lat <= 90.0 {
        for lon in [-179.0, -140.0, 0.0, 65.0, 179.0] {
            for query in ["arabian pacific", "detailed", "plain"] {
                let coordinate = Coordinate { lat, lon };
                let seed = DeterministicSeed::derive(lat, lon, query);
                for level in synthesis::synthesize(coordinate, query, seed) {
                    assert!(level.temperature >= 1.5, "{lat} {lon} {query}: {level:?}");
                    assert!((32.0..=37.5).contains(&level.salinity), "{lat} {lon} {query}: {level:?}");
                }
            }
        }
        lat += 2.5;
    }
}

#[test]
fn standard_queries_use_eight_levels() {
    let profile = generate_profile("mumbai salinity").unwrap();
    assert_eq!(pressures(&profile.depth_levels), STANDARD_PRESSURES.to_vec());
}

#[test]
fn detail_keywords_use_eleven_levels() {
    for query in ["detailed pacific", "High-Res atlantic", "high resolution please"] {
        let profile = generate_profile(query).unwrap();
        assert_eq!(pressures(&profile.depth_levels), DETAILED_PRESSURES.to_vec(), "{query}");
    }
}

#[test]
fn pressures_strictly_increase() {
    for query in QUERIES {
        let levels = generate_profile(query).unwrap().depth_levels;
        assert!(levels.windows(2).all(|w| w[0].pressure < w[1].pressure), "{query}");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Resolution precedence
// ═══════════════════════════════════════════════════════════════════

#[test]
fn explicit_coordinates_win_over_place_names() {
    let profile = generate_profile("lat 12.9 lon 77.6 near arabian sea").unwrap();
    assert_eq!(profile.coordinate, Coordinate { lat: 12.9, lon: 77.6 });
    assert_eq!(profile.location_description, "at 12.900°N, 77.600°E");
}

#[test]
fn first_place_in_table_wins() {
    let profile = generate_profile("mumbai pacific").unwrap();
    assert_eq!(profile.coordinate, Coordinate { lat: 19.0760, lon: 72.8777 });
}

#[test]
fn fallback_positions_are_legal() {
    for i in 0..200 {
        let query = format!("unmapped request number {i}");
        let resolution = location::resolve(&query);
        assert_eq!(resolution.source, ResolutionSource::Fallback);
        let Coordinate { lat, lon } = resolution.coordinate;
        assert!((-60.0..=60.0).contains(&lat));
        assert!((-180.0..=180.0).contains(&lon));
        assert_eq!((lat * 1000.0).round() / 1000.0, lat);
        assert_eq!((lon * 1000.0).round() / 1000.0, lon);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Narrative agrees with the numbers
// ═══════════════════════════════════════════════════════════════════

fn between<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let from = text.find(start).expect("start marker") + start.len();
    let to = from + text[from..].find(end).expect("end marker");
    &text[from..to]
}

#[test]
fn narrative_metrics_match_depth_levels() {
    for query in QUERIES {
        let profile = generate_profile(query).unwrap();
        let levels = &profile.depth_levels;
        let surface = levels[0];
        let deepest = levels[levels.len() - 1];

        let gradient = (surface.temperature - deepest.temperature) / (deepest.pressure - surface.pressure);
        let max = levels.iter().map(|l| l.salinity).fold(f64::MIN, f64::max);
        let min = levels.iter().map(|l| l.salinity).fold(f64::MAX, f64::min);

        let text = &profile.narrative;
        assert_eq!(between(text, "gradient of ", "°C/meter"), format!("{:.3}", gradient), "{query}");
        assert_eq!(between(text, "Salinity range = ", " PSU"), format!("{:.2}", max - min), "{query}");
        assert_eq!(
            between(text, "ΔT = ", "°C"),
            format!("{:.1}", surface.temperature - deepest.temperature),
            "{query}"
        );
    }
}

#[test]
fn rendered_report_is_pure() {
    let profile = generate_profile("pacific").unwrap();
    let Coordinate { lat, lon } = profile.coordinate;
    let again = narrative::narrate(&profile.depth_levels, &profile.location_description, lat, lon, "pacific").unwrap();
    assert_eq!(again, profile.narrative);
}

// ═══════════════════════════════════════════════════════════════════
// Worked example
// ═══════════════════════════════════════════════════════════════════

#[test]
fn equator_query_end_to_end() {
    let query = "temperature profile near equator";
    let resolution = location::resolve(query);
    assert_eq!(resolution.coordinate, Coordinate { lat: 0.0, lon: 78.0 });
    assert_eq!(resolution.description, "near Equator");
    assert_eq!(RegionalBand::classify(resolution.coordinate.lat), RegionalBand::Tropical);

    let profile = ProfileBuilder::new().with_query(query).build().unwrap();
    assert_eq!(
        pressures(&profile.depth_levels),
        vec![5.0, 15.0, 30.0, 50.0, 75.0, 100.0, 125.0, 150.0]
    );

    let levels = &profile.depth_levels;
    assert!(levels.iter().all(|l| l.temperature >= 1.5));
    assert!(levels[0].temperature > levels[levels.len() - 1].temperature);
    // Surface salinity noise is at most 0.1 on top of the tropical range.
    assert!(levels[0].salinity >= 34.4 && levels[0].salinity <= 35.6);

    let metrics = ProfileMetrics::from_levels(levels).unwrap();
    assert!(metrics.temp_gradient > 0.0);
    assert!(profile.narrative.contains("Oceanographic Analysis for near Equator"));
    assert!(profile.narrative.contains("trade wind dynamics"));
}
