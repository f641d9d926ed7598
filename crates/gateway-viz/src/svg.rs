//! SVG chart output with plotters

use crate::binning::{fixed_width_bins, freedman_diaconis_bins, Bin};
use crate::traits::{Marker, ShareBar, SurveyVisualizer};
use gateway_core::{Error, Result};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

const SERIES_COLORS: [RGBColor; 5] = [BLUE, RED, GREEN, MAGENTA, CYAN];

/// Visualizer that writes one SVG file per chart into a directory
///
/// File names are derived from the chart title, so recording two charts
/// with the same title overwrites the first.
#[derive(Debug, Clone)]
pub struct SvgVisualizer {
    dir: PathBuf,
    size: (u32, u32),
}

impl SvgVisualizer {
    /// Create the visualizer, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            size: (800, 600),
        })
    }

    /// Set the chart size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Output path of the chart titled `title`
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.svg", slug(title)))
    }

    fn finish(&self, title: &str, drawn: DrawResult) -> Result<()> {
        drawn.map_err(|e| Error::Render(format!("{title}: {e}")))?;
        info!(path = %self.path_for(title).display(), "chart written");
        Ok(())
    }

    fn draw_counts(&self, path: &Path, title: &str, counts: &[(String, usize)]) -> DrawResult {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let n = counts.len().max(1);
        let y_max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1) as f64 * 1.1;
        let labels: Vec<&str> = counts.iter().map(|(label, _)| label.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x| category_label(&labels, *x))
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], BLUE.filled())
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_histogram(
        &self,
        path: &Path,
        title: &str,
        bins: &[Bin],
        marker: Option<Marker>,
    ) -> DrawResult {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut lo = bins.first().map_or(0.0, |b| b.left);
        let mut hi = bins.last().map_or(1.0, |b| b.right);
        if let Some(m) = marker {
            lo = lo.min(m.value());
            hi = hi.max(m.value());
        }
        if hi - lo < 1e-10 {
            lo -= 0.5;
            hi += 0.5;
        }
        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(lo..hi, 0f64..y_max)?;
        chart.configure_mesh().disable_x_mesh().draw()?;

        chart.draw_series(bins.iter().map(|b| {
            let (left, right) = if b.width() > 0.0 {
                (b.left, b.right)
            } else {
                (b.left - 0.25, b.right + 0.25)
            };
            Rectangle::new([(left, 0.0), (right, b.count as f64)], BLUE.mix(0.6).filled())
        }))?;

        if let Some(m) = marker {
            let v = m.value();
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(v, 0.0), (v, y_max)],
                    RED.stroke_width(2),
                )))?
                .label(format!("{} = {:.2}", m.label(), v))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    fn draw_shares(&self, path: &Path, title: &str, bars: &[ShareBar]) -> DrawResult {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let groups = first_seen(bars.iter().map(|b| b.group.as_str()));
        let series = first_seen(bars.iter().map(|b| b.series.as_str()));
        let n = groups.len().max(1);
        let width = 0.8 / series.len().max(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..1.05f64)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x| category_label(&groups, *x))
            .y_desc("prop")
            .draw()?;

        for (si, name) in series.iter().enumerate() {
            let color = SERIES_COLORS[si % SERIES_COLORS.len()];
            chart
                .draw_series(bars.iter().filter(|b| b.series == *name).filter_map(|b| {
                    let gi = groups.iter().position(|g| *g == b.group)?;
                    let left = gi as f64 - 0.4 + si as f64 * width;
                    Some(Rectangle::new(
                        [(left, 0.0), (left + width, b.proportion)],
                        color.filled(),
                    ))
                }))?
                .label(name.to_string())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl SurveyVisualizer for SvgVisualizer {
    fn record_counts(&self, title: &str, counts: &[(String, usize)]) -> Result<()> {
        let path = self.path_for(title);
        self.finish(title, self.draw_counts(&path, title, counts))
    }

    fn record_distribution(
        &self,
        title: &str,
        values: &[f64],
        marker: Option<Marker>,
        bins: Option<usize>,
    ) -> Result<()> {
        let num_bins = bins.unwrap_or_else(|| freedman_diaconis_bins(values));
        let hist = fixed_width_bins(values, num_bins);
        debug!(title, values = values.len(), bins = hist.len(), "binned distribution");

        let path = self.path_for(title);
        self.finish(title, self.draw_histogram(&path, title, &hist, marker))
    }

    fn record_shares(&self, title: &str, bars: &[ShareBar]) -> Result<()> {
        let path = self.path_for(title);
        self.finish(title, self.draw_shares(&path, title, bars))
    }
}

/// Label of the category centered on `x`, empty between categories
fn category_label(labels: &[&str], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels
        .get(index as usize)
        .map(|label| label.to_string())
        .unwrap_or_default()
}

/// Distinct values in order of first appearance
fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// File-name form of a chart title
fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    let trimmed = out.trim_end_matches('_');
    if trimmed.is_empty() {
        "chart".to_string()
    } else {
        trimmed.to_string()
    }
}
