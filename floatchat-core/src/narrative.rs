//! Prose analysis of a generated profile.
//!
//! [`analyze`] makes every decision and returns a [`NarrativeReport`];
//! [`NarrativeReport::render`] only formats it. No randomness is involved.

use crate::error::FloatChatError;
use crate::format::{display_float, title_case};
use floatchat_schemas::profile::DepthLevel;
use std::fmt;

const STRATIFIED_GRADIENT: f64 = 0.1;
/// Level checked for the oxygen remark: 50 dbar on the standard pressure set.
const OXYGEN_LEVEL_INDEX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterMass {
    TropicalSurface,
    TemperateSubpolar,
    ArabianSeaSurface,
    MixedOceanic,
}

impl WaterMass {
    fn classify(surface: &DepthLevel, lat: f64, lon: f64) -> Self {
        if surface.temperature > 24.0 && lat < 30.0 && lat > -30.0 {
            Self::TropicalSurface
        } else if surface.temperature < 15.0 && lat.abs() > 40.0 {
            Self::TemperateSubpolar
        } else if surface.temperature > 20.0 && 50.0 < lon && lon < 80.0 && 10.0 < lat && lat < 25.0 {
            Self::ArabianSeaSurface
        } else {
            Self::MixedOceanic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TropicalSurface => "tropical surface waters",
            Self::TemperateSubpolar => "temperate/subpolar waters",
            Self::ArabianSeaSurface => "Arabian Sea surface waters",
            Self::MixedOceanic => "mixed oceanic waters",
        }
    }

    fn climate_note(self) -> &'static str {
        match self {
            Self::TropicalSurface => "This indicates warm tropical conditions typical of low latitudes.",
            Self::TemperateSubpolar => "These cooler temperatures suggest mid to high latitude conditions.",
            Self::ArabianSeaSurface => {
                "Characteristic of monsoon-influenced regions with seasonal variability."
            }
            Self::MixedOceanic => "Represents transitional oceanographic conditions.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermoclineStrength {
    Strong,
    Moderate,
    Weak,
}

impl ThermoclineStrength {
    fn classify(temp_gradient: f64) -> Self {
        if temp_gradient > 0.15 {
            Self::Strong
        } else if temp_gradient > 0.08 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Strong => "strong thermocline - rapid temperature decrease with depth indicates well-stratified waters, typical during warm seasons",
            Self::Moderate => "moderate thermocline - gradual temperature change suggests seasonal mixing",
            Self::Weak => "weak thermocline - minimal temperature gradient may indicate recent mixing or winter conditions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalinityVariation {
    MixedSources,
    Evaporative,
    Freshened,
    OpenOcean,
}

impl SalinityVariation {
    fn classify(salinity_range: f64, surface_salinity: f64) -> Self {
        if salinity_range > 0.5 {
            Self::MixedSources
        } else if surface_salinity > 35.5 {
            Self::Evaporative
        } else if surface_salinity < 34.0 {
            Self::Freshened
        } else {
            Self::OpenOcean
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::MixedSources => "significant salinity variation suggests influence from freshwater input or different water masses",
            Self::Evaporative => "high surface salinity indicates strong evaporation, typical of arid coastal regions",
            Self::Freshened => "lower salinity suggests freshwater influence from rivers or high precipitation",
            Self::OpenOcean => "typical oceanic salinity range indicates normal open-ocean conditions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiologicalOutlook {
    WarmProductive,
    TemperateSpecies,
    CoolUpwelling,
}

impl BiologicalOutlook {
    fn classify(surface: &DepthLevel) -> Self {
        if surface.temperature > 22.0 && surface.salinity > 34.0 {
            Self::WarmProductive
        } else if 15.0 < surface.temperature && surface.temperature < 22.0 {
            Self::TemperateSpecies
        } else {
            Self::CoolUpwelling
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::WarmProductive => "🐠 These warm, saline conditions support high marine productivity and diverse ecosystems.",
            Self::TemperateSpecies => "🦈 Moderate temperatures create favorable conditions for temperate marine species.",
            Self::CoolUpwelling => "🐋 Cooler conditions typical of nutrient-rich upwelling zones that support large marine fauna.",
        }
    }
}

/// Extra regional colour, picked from keywords in the user's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationContext {
    Monsoon,
    Equatorial,
    Enso,
    ArabianProductivity,
}

impl LocationContext {
    /// Rules run top to bottom; the first keyword hit wins.
    const RULES: [(&'static [&'static str], LocationContext); 4] = [
        (&["mumbai", "india"], LocationContext::Monsoon),
        (&["equator"], LocationContext::Equatorial),
        (&["pacific"], LocationContext::Enso),
        (&["arabian"], LocationContext::ArabianProductivity),
    ];

    pub fn classify(query: &str) -> Option<Self> {
        let query_lower = query.to_lowercase();
        Self::RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| query_lower.contains(k)))
            .map(|(_, context)| *context)
    }

    fn sentence(self) -> &'static str {
        match self {
            Self::Monsoon => "This Arabian Sea location experiences strong monsoon influences, with seasonal temperature and salinity changes driven by southwest monsoon currents.",
            Self::Equatorial => "Equatorial waters show characteristic upwelling patterns and are influenced by trade wind dynamics.",
            Self::Enso => "Pacific waters here may be influenced by ENSO patterns and show seasonal El Niño/La Niña effects.",
            Self::ArabianProductivity => "The Arabian Sea is known for intense seasonal productivity during monsoon upwelling periods.",
        }
    }
}

/// Numbers derived directly from the depth levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileMetrics {
    pub surface: DepthLevel,
    pub middle: DepthLevel,
    pub deepest: DepthLevel,
    /// °C per dbar between the first and last level; 0 for a single level.
    pub temp_gradient: f64,
    pub salinity_range: f64,
}

impl ProfileMetrics {
    pub fn from_levels(levels: &[DepthLevel]) -> Result<Self, FloatChatError> {
        let surface = *levels.first().ok_or(FloatChatError::EmptyProfile)?;
        let deepest = *levels.last().ok_or(FloatChatError::EmptyProfile)?;
        let middle = levels[levels.len() / 2];

        let span = deepest.pressure - surface.pressure;
        let temp_gradient = if span == 0.0 {
            0.0
        } else {
            (surface.temperature - deepest.temperature) / span
        };

        let max_salinity = levels.iter().map(|l| l.salinity).fold(f64::MIN, f64::max);
        let min_salinity = levels.iter().map(|l| l.salinity).fold(f64::MAX, f64::min);

        Ok(Self {
            surface,
            middle,
            deepest,
            temp_gradient,
            salinity_range: max_salinity - min_salinity,
        })
    }

    pub fn temperature_drop(&self) -> f64 {
        self.surface.temperature - self.deepest.temperature
    }

    pub fn is_stratified(&self) -> bool {
        self.temp_gradient > STRATIFIED_GRADIENT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeReport {
    pub location_description: String,
    pub metrics: ProfileMetrics,
    pub water_mass: WaterMass,
    pub thermocline: ThermoclineStrength,
    pub salinity: SalinityVariation,
    pub biology: BiologicalOutlook,
    /// Set when the fourth level of a profile deeper than four levels is below 10 °C.
    pub oxygenated_mid_depth: bool,
    pub context: Option<LocationContext>,
}

/// Classifies a profile. Fails only on an empty level list.
pub fn analyze(
    levels: &[DepthLevel],
    location_description: &str,
    lat: f64,
    lon: f64,
    query: &str,
) -> Result<NarrativeReport, FloatChatError> {
    let metrics = ProfileMetrics::from_levels(levels)?;

    Ok(NarrativeReport {
        location_description: location_description.to_string(),
        water_mass: WaterMass::classify(&metrics.surface, lat, lon),
        thermocline: ThermoclineStrength::classify(metrics.temp_gradient),
        salinity: SalinityVariation::classify(metrics.salinity_range, metrics.surface.salinity),
        biology: BiologicalOutlook::classify(&metrics.surface),
        oxygenated_mid_depth: levels.len() > 4
            && levels[OXYGEN_LEVEL_INDEX].temperature < 10.0,
        context: LocationContext::classify(query),
        metrics,
    })
}

/// [`analyze`] followed by [`NarrativeReport::render`].
pub fn narrate(
    levels: &[DepthLevel],
    location_description: &str,
    lat: f64,
    lon: f64,
    query: &str,
) -> Result<String, FloatChatError> {
    Ok(analyze(levels, location_description, lat, lon, query)?.render())
}

impl NarrativeReport {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NarrativeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        let (structure, outlook, focus) = if m.is_stratified() {
            (
                "strong stratification",
                "stable oceanographic conditions",
                "thermal stratification and nutrient distribution",
            )
        } else {
            (
                "moderate mixing",
                "active mixing processes",
                "vertical mixing and ecosystem dynamics",
            )
        };
        let oxygen = if self.oxygenated_mid_depth {
            " The cooler mid-depth waters (around 70-90m) likely contain higher dissolved oxygen levels."
        } else {
            ""
        };

        writeln!(f, "🌊 **Oceanographic Analysis for {}**", self.location_description)?;
        writeln!(f)?;
        writeln!(f, "**Water Mass Classification**: {}", title_case(self.water_mass.label()))?;
        writeln!(f, "{}", self.water_mass.climate_note())?;
        writeln!(f)?;
        writeln!(
            f,
            "**Temperature Profile**: Surface temperature of {}°C decreasing to {}°C at {}m depth shows a {}.",
            display_float(m.surface.temperature),
            display_float(m.deepest.temperature),
            display_float(m.deepest.pressure),
            self.thermocline.description()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "**Salinity Characteristics**: {} PSU at surface - {}.",
            display_float(m.surface.salinity),
            self.salinity.description()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "**Vertical Structure**: The temperature gradient of {:.3}°C/meter indicates {}.{}",
            m.temp_gradient, structure, oxygen
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.biology.description())?;
        writeln!(f)?;
        writeln!(
            f,
            "**Research Implications**: This profile suggests {}, important for understanding {}.",
            outlook, focus
        )?;
        writeln!(f)?;
        // The context block is always present, blank when no keyword matched.
        if let Some(context) = self.context {
            write!(f, " {}", context.sentence())?;
        }
        writeln!(f)?;
        writeln!(f)?;
        write!(
            f,
            "📊 **Key Metrics**: ΔT = {:.1}°C, Salinity range = {:.2} PSU",
            m.temperature_drop(),
            m.salinity_range
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(pressure: f64, temperature: f64, salinity: f64) -> DepthLevel {
        DepthLevel { pressure, temperature, salinity }
    }

    fn tropical_levels() -> Vec<DepthLevel> {
        vec![
            level(5.0, 28.0, 35.0),
            level(15.0, 27.8, 35.02),
            level(30.0, 26.0, 35.1),
            level(50.0, 23.5, 35.15),
            level(75.0, 19.0, 35.12),
            level(100.0, 13.6, 34.95),
            level(125.0, 13.1, 34.9),
            level(150.0, 12.6, 34.98),
        ]
    }

    #[test]
    fn empty_profile_is_an_error() {
        let err = narrate(&[], "nowhere", 0.0, 0.0, "q").unwrap_err();
        assert!(matches!(err, FloatChatError::EmptyProfile));
    }

    #[test]
    fn single_level_has_zero_gradient() {
        let m = ProfileMetrics::from_levels(&[level(5.0, 20.0, 35.0)]).unwrap();
        assert_eq!(m.temp_gradient, 0.0);
        assert_eq!(m.salinity_range, 0.0);
    }

    #[test]
    fn metrics_use_first_middle_last() {
        let levels = tropical_levels();
        let m = ProfileMetrics::from_levels(&levels).unwrap();
        assert_eq!(m.surface.pressure, 5.0);
        assert_eq!(m.middle.pressure, 75.0);
        assert_eq!(m.deepest.pressure, 150.0);
        assert!((m.temp_gradient - (28.0 - 12.6) / 145.0).abs() < 1e-12);
        assert!((m.salinity_range - 0.25).abs() < 1e-9);
    }

    #[test]
    fn tropical_report_tags() {
        let report = analyze(&tropical_levels(), "near Equator", 0.0, 78.0, "near equator").unwrap();
        assert_eq!(report.water_mass, WaterMass::TropicalSurface);
        assert_eq!(report.thermocline, ThermoclineStrength::Moderate);
        assert_eq!(report.salinity, SalinityVariation::OpenOcean);
        assert_eq!(report.biology, BiologicalOutlook::WarmProductive);
        assert_eq!(report.context, Some(LocationContext::Equatorial));
        assert!(!report.oxygenated_mid_depth);
    }

    #[test]
    fn cold_mid_depth_adds_oxygen_remark() {
        let levels: Vec<_> = (0..8)
            .map(|i| level(5.0 + 20.0 * i as f64, 9.0 - i as f64 * 0.5, 34.0))
            .collect();
        let report = analyze(&levels, "x", 60.0, 0.0, "q").unwrap();
        assert!(report.oxygenated_mid_depth);
        assert_eq!(report.water_mass, WaterMass::TemperateSubpolar);
        assert!(report.render().contains("dissolved oxygen"));
    }

    #[test]
    fn oxygen_remark_reads_fourth_level_not_middle() {
        // Middle level (75 dbar) is below 10 °C but the 50 dbar level is not.
        let temps = [15.0, 14.8, 13.0, 11.0, 9.5, 9.0, 8.5, 8.0];
        let pressures = [5.0, 15.0, 30.0, 50.0, 75.0, 100.0, 125.0, 150.0];
        let levels: Vec<_> = pressures
            .iter()
            .zip(temps)
            .map(|(&p, t)| level(p, t, 34.5))
            .collect();
        let report = analyze(&levels, "x", 45.0, 0.0, "q").unwrap();
        assert!(report.metrics.middle.temperature < 10.0);
        assert!(!report.oxygenated_mid_depth);
        assert!(!report.render().contains("dissolved oxygen"));
    }

    #[test]
    fn short_profile_never_gets_oxygen_remark() {
        let levels: Vec<_> = (0..4).map(|i| level(5.0 + 10.0 * i as f64, 5.0, 34.0)).collect();
        assert!(!analyze(&levels, "x", 60.0, 0.0, "q").unwrap().oxygenated_mid_depth);
    }

    #[test]
    fn context_block_is_blank_without_a_match() {
        let text = narrate(&tropical_levels(), "somewhere", 10.0, 10.0, "north sea").unwrap();
        assert!(text.contains("nutrient distribution.\n\n\n\n📊 **Key Metrics**"));
    }

    #[test]
    fn context_sentence_has_leading_space() {
        let text = narrate(&tropical_levels(), "near Equator", 0.0, 78.0, "equator").unwrap();
        assert!(text.contains("\n\n Equatorial waters show characteristic upwelling patterns"));
        assert!(text.contains("trade wind dynamics.\n\n📊 **Key Metrics**"));
    }

    #[test]
    fn salinity_tags_follow_thresholds() {
        assert_eq!(SalinityVariation::classify(0.6, 35.0), SalinityVariation::MixedSources);
        assert_eq!(SalinityVariation::classify(0.2, 35.6), SalinityVariation::Evaporative);
        assert_eq!(SalinityVariation::classify(0.2, 33.9), SalinityVariation::Freshened);
        assert_eq!(SalinityVariation::classify(0.5, 35.5), SalinityVariation::OpenOcean);
    }

    #[test]
    fn arabian_water_mass_needs_cooler_surface() {
        // Above 24 °C the tropical rule fires first.
        assert_eq!(
            WaterMass::classify(&level(5.0, 25.0, 36.0), 15.0, 65.0),
            WaterMass::TropicalSurface
        );
        assert_eq!(
            WaterMass::classify(&level(5.0, 22.0, 36.0), 15.0, 65.0),
            WaterMass::ArabianSeaSurface
        );
    }

    #[test]
    fn context_rules_keep_order() {
        assert_eq!(LocationContext::classify("India and the Pacific"), Some(LocationContext::Monsoon));
        assert_eq!(LocationContext::classify("equatorial pacific"), Some(LocationContext::Equatorial));
        assert_eq!(LocationContext::classify("ARABIAN sea"), Some(LocationContext::ArabianProductivity));
        assert_eq!(LocationContext::classify("north sea"), None);
    }

    #[test]
    fn render_interpolates_metrics() {
        let text = narrate(&tropical_levels(), "near Equator", 0.0, 78.0, "equator").unwrap();
        assert!(text.starts_with("🌊 **Oceanographic Analysis for near Equator**"));
        assert!(text.contains("**Water Mass Classification**: Tropical Surface Waters"));
        assert!(text.contains("Surface temperature of 28.0°C decreasing to 12.6°C at 150.0m depth"));
        assert!(text.contains("35.0 PSU at surface"));
        assert!(text.contains("gradient of 0.106°C/meter indicates strong stratification"));
        assert!(text.contains("trade wind dynamics"));
        assert!(text.ends_with("ΔT = 15.4°C, Salinity range = 0.25 PSU"));
    }
}
