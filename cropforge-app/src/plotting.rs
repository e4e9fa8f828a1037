//! Charts for batch runs.

use anyhow::Result;
use cropforge_core::analysis::BatchSummary;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Draws a bar chart of how often each crop was recommended.
///
/// Returns the written file, or `None` when the summary has nothing to plot.
pub fn plot_crop_distribution(output_dir: &Path, summary: &BatchSummary) -> Result<Option<PathBuf>> {
    if summary.crop_counts.is_empty() {
        log::warn!("[Plotting] No recommendations to plot");
        return Ok(None);
    }

    let path = output_dir.join("crop_distribution.png");
    draw_crop_bars(&path, summary)?;
    log::info!("[Plotting] Crop distribution saved to {:?}", path);
    Ok(Some(path))
}

fn draw_crop_bars(path: &Path, summary: &BatchSummary) -> Result<()> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let crops: Vec<&str> = summary.crop_counts.keys().map(String::as_str).collect();
    let max_count = summary.crop_counts.values().copied().max().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Recommended Crops", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0..crops.len()).into_segmented(), 0..max_count + 1)?;

    let label = |segment: &SegmentValue<usize>| match segment {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            crops.get(*i).map(|crop| crop.to_string()).unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(crops.len())
        .x_label_formatter(&label)
        .x_desc("Crop")
        .y_desc("Samples")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(GREEN.filled())
            .margin(10)
            .data(summary.crop_counts.values().enumerate().map(|(i, count)| (i, *count))),
    )?;

    root.present()?;
    Ok(())
}
