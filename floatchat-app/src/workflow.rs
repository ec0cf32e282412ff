use crate::plotting;
use anyhow::{Context, Result};
use floatchat_core::{
    chat::{self, ChatReply},
    export::{self, ProfileCsvWriter},
    pipeline::{Profile, ProfileBuilder},
};
use std::{fs, path::{Path, PathBuf}};
use tracing::{info, warn};

/// Builds a profile from query text, or from pinned coordinates when both are given.
pub fn build_profile(query: &str, coordinates: Option<(f64, f64)>) -> Result<Profile> {
    let mut builder = ProfileBuilder::new().with_query(query);
    if let Some((lat, lon)) = coordinates {
        builder = builder.with_coordinates(lat, lon);
    }
    builder
        .build()
        .with_context(|| format!("Failed to generate a profile for '{}'", query))
}

/// The `POST /query` payload for `profile`, as JSON text.
pub fn render_query_response(profile: &Profile, pretty: bool) -> Result<String> {
    let response = vec![profile.to_record()];
    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(json)
}

pub fn run_chat(message: &str) -> Result<String> {
    match chat::respond(message)? {
        ChatReply::Profile(profile) => Ok(format!(
            "{}\n\n{}",
            profile.narrative,
            format_level_table(&profile)
        )),
        ChatReply::OffTopic(reply) => Ok(reply.to_string()),
    }
}

/// Files written by [`export_profile`].
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub run_dir: PathBuf,
    pub csv: PathBuf,
    pub json: PathBuf,
    /// `None` when the chart could not be drawn, e.g. no usable system font.
    pub chart: Option<PathBuf>,
}

/// Writes CSV, JSON and a chart for `profile` into a new timestamped run directory.
pub fn export_profile(profile: &Profile, output_dir: &str) -> Result<ExportedFiles> {
    let run_dir = Path::new(output_dir).join(format!(
        "profile_{}_{}",
        profile.profile_id,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create output directory: {}", run_dir.display()))?;

    let csv = run_dir.join("depth_levels.csv");
    let csv_str = csv.to_str().context("Output path is not valid UTF-8")?;
    let mut writer = ProfileCsvWriter::new(csv_str)?;
    writer.write_levels(&profile.depth_levels)?;

    let json = run_dir.join("profile.json");
    export::write_record_json(&json, &profile.to_record())?;

    // Chart from the CSV on disk, so the picture matches what was exported.
    let levels = export::read_levels(csv_str)?;
    let chart_path = run_dir.join("profile.png");
    let chart = match plotting::plot_profile(
        &chart_path,
        &levels,
        &format!("Ocean Data Profile {}", profile.location_description),
    ) {
        Ok(()) => Some(chart_path),
        Err(e) => {
            warn!("Skipping chart: {:#}", e);
            None
        }
    };

    info!("Exported profile {} to '{}'", profile.profile_id, run_dir.display());
    Ok(ExportedFiles {
        run_dir,
        csv,
        json,
        chart,
    })
}

pub fn format_level_table(profile: &Profile) -> String {
    let mut table = String::from("| Pressure (dbar) | Temperature (°C) | Salinity (PSU) |\n");
    table.push_str("|-----------------|------------------|----------------|\n");
    for level in &profile.depth_levels {
        table.push_str(&format!(
            "| {:>15.1} | {:>16.2} | {:>14.2} |\n",
            level.pressure, level.temperature, level.salinity
        ));
    }
    table
}

pub fn print_summary_report(profile: &Profile, files: &ExportedFiles) {
    println!("\n--- [Profile Summary] ---");
    println!("========================================");
    println!("Profile ID:   {}", profile.profile_id);
    println!(
        "Location:     {} ({:.3}, {:.3})",
        profile.location_description, profile.coordinate.lat, profile.coordinate.lon
    );
    println!("Generated at: {}", profile.to_record().time);
    println!("Depth levels: {}", profile.depth_levels.len());
    println!("----------------------------------------");
    print!("{}", format_level_table(profile));
    println!("----------------------------------------");
    println!("CSV:   {}", files.csv.display());
    println!("JSON:  {}", files.json.display());
    match &files.chart {
        Some(chart) => println!("Chart: {}", chart.display()),
        None => println!("Chart: (not rendered)"),
    }
    println!("========================================");
}
