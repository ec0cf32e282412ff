//! Renders temperature and salinity against depth.

use anyhow::{Context, Result};
use floatchat_schemas::profile::DepthLevel;
use plotters::prelude::*;
use std::path::Path;

const TEMPERATURE_COLOR: RGBColor = RGBColor(255, 107, 107);
const SALINITY_COLOR: RGBColor = RGBColor(78, 205, 196);

/// Writes a two-panel PNG: temperature vs depth on the left, salinity vs
/// depth on the right. Depth increases downward. Fails without touching
/// `path` when there are no levels.
pub fn plot_profile(path: &Path, levels: &[DepthLevel], title: &str) -> Result<()> {
    if levels.is_empty() {
        anyhow::bail!("No depth levels to plot");
    }

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 30))?;
    let panels = root.split_evenly((1, 2));

    let max_pressure = levels.iter().map(|l| l.pressure).fold(0.0, f64::max);

    draw_panel(
        &panels[0],
        levels,
        "Temperature vs Depth",
        "Temperature (°C)",
        |l| l.temperature,
        TEMPERATURE_COLOR,
        max_pressure,
    )?;
    draw_panel(
        &panels[1],
        levels,
        "Salinity vs Depth",
        "Salinity (PSU)",
        |l| l.salinity,
        SALINITY_COLOR,
        max_pressure,
    )?;

    root.present()
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    levels: &[DepthLevel],
    caption: &str,
    x_desc: &str,
    value: impl Fn(&DepthLevel) -> f64,
    color: RGBColor,
    max_pressure: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let min_x = levels.iter().map(&value).fold(f64::MAX, f64::min);
    let max_x = levels.iter().map(&value).fold(f64::MIN, f64::max);
    let pad = ((max_x - min_x) * 0.1).max(0.1);

    // Pressure is plotted negated so that deeper samples sit lower.
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((min_x - pad)..(max_x + pad), -(max_pressure * 1.05)..0f64)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Depth (dbar)")
        .y_label_formatter(&|y| format!("{:.0}", -y))
        .draw()?;

    chart.draw_series(LineSeries::new(
        levels.iter().map(|l| (value(l), -l.pressure)),
        color.stroke_width(3),
    ))?;
    chart.draw_series(
        levels
            .iter()
            .map(|l| Circle::new((value(l), -l.pressure), 4, color.filled())),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_levels_fail_and_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let err = plot_profile(&path, &[], "Empty").unwrap_err();
        assert!(err.to_string().contains("No depth levels"));
        assert!(!path.exists());
    }
}
