//! Per-operation cost distributions
//!
//! One facet per operation: the histogram as a filled step outline, a KDE
//! curve scaled to counts and vertical markers for mean, median and binned
//! mode.

use super::{base_chart, render_html, write_html, FacetLayout};
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::estimate::{gaussian_kde, trim_to_quantiles, Histogram, Summary};
use charming::component::Legend;
use charming::element::{AreaStyle, ItemStyle, LineStyle, LineStyleType};
use charming::series::Line;
use charming::Chart;
use std::path::Path;

const TITLE: &str = "Instruction Cost Distribution per Opcode";
const X_LABEL: &str = "instruction_delta_per_op";
const Y_LABEL: &str = "Count";

const CELL_WIDTH: f64 = 300.0;
const CELL_HEIGHT: f64 = 230.0;
const KDE_POINTS: usize = 120;

const MEAN: &str = "Mean";
const MEDIAN: &str = "Median";
const MODE: &str = "Binned mode";

/// Everything drawn in one distribution facet
#[derive(Debug, Clone)]
pub struct DistributionFacet {
    pub operation: String,
    pub summary: Summary,
    pub histogram: Histogram,
    /// KDE evaluated over the histogram range, in count units
    pub kde: Vec<(f64, f64)>,
}

impl DistributionFacet {
    fn build(operation: &str, values: &[f64], config: &AnalysisConfig) -> Result<Self> {
        let summary = Summary::of(values, &config.bin_rule())?;
        let histogram = Histogram::new(values, config.display_bins)?;

        let lo = histogram.edges[0];
        let hi = histogram.edges[histogram.bins()];
        let step = (hi - lo) / (KDE_POINTS - 1) as f64;
        let grid: Vec<f64> = (0..KDE_POINTS).map(|i| lo + step * i as f64).collect();
        let scale = summary.count as f64 * histogram.bin_width();
        let kde = grid
            .iter()
            .zip(gaussian_kde(values, &grid))
            .map(|(&x, density)| (x, density * scale))
            .collect();

        Ok(Self {
            operation: operation.to_string(),
            summary,
            histogram,
            kde,
        })
    }

    /// Histogram outline: up and across each bin, closed on the baseline
    fn outline(&self) -> Vec<Vec<f64>> {
        let hist = &self.histogram;
        let mut points = vec![vec![hist.edges[0], 0.0]];
        for (i, &count) in hist.counts.iter().enumerate() {
            points.push(vec![hist.edges[i], count as f64]);
            points.push(vec![hist.edges[i + 1], count as f64]);
        }
        points.push(vec![hist.edges[hist.bins()], 0.0]);
        points
    }

    fn peak(&self) -> f64 {
        self.kde
            .iter()
            .map(|&(_, y)| y)
            .fold(self.histogram.max_count() as f64, f64::max)
    }

    fn draw(&self, layout: &FacetLayout, chart: Chart, index: usize) -> Chart {
        let axis = index as f64;
        let on_facet = |line: Line| line.x_axis_index(axis).y_axis_index(axis);

        let mut chart = layout
            .add_facet(chart, index, &self.operation, X_LABEL, Y_LABEL)
            .series(on_facet(
                Line::new()
                    .data(self.outline())
                    .show_symbol(false)
                    .line_style(LineStyle::new().width(1).color("steelblue"))
                    .area_style(AreaStyle::new().color("steelblue").opacity(0.45)),
            ));

        if !self.kde.is_empty() {
            let kde: Vec<Vec<f64>> = self.kde.iter().map(|&(x, y)| vec![x, y]).collect();
            chart = chart.series(on_facet(
                Line::new()
                    .data(kde)
                    .show_symbol(false)
                    .line_style(LineStyle::new().width(2).color("navy")),
            ));
        }

        let top = self.peak() * 1.05;
        for (name, x, color, style) in [
            (MEAN, self.summary.mean, "blue", LineStyleType::Dashed),
            (MEDIAN, self.summary.median, "orange", LineStyleType::Solid),
            (MODE, self.summary.binned_mode, "green", LineStyleType::Dotted),
        ] {
            chart = chart.series(on_facet(
                Line::new()
                    .name(name)
                    .data(vec![vec![x, 0.0], vec![x, top]])
                    .show_symbol(false)
                    .item_style(ItemStyle::new().color(color))
                    .line_style(LineStyle::new().width(2).color(color).type_(style)),
            ));
        }
        chart
    }
}

/// Histogram facet grid over all operations of a dataset
#[derive(Debug, Clone)]
pub struct DistributionReport {
    facets: Vec<DistributionFacet>,
    skipped: Vec<String>,
    columns: usize,
}

impl DistributionReport {
    /// Trim each operation to the configured quantile range and summarize it
    ///
    /// Operations that cannot be trimmed or summarized (no finite samples,
    /// for one) are logged and left out.
    pub fn build(dataset: &Dataset, config: &AnalysisConfig) -> Result<Self> {
        let mut facets = Vec::new();
        let mut skipped = Vec::new();

        for (operation, values) in dataset.group_by_operation() {
            let facet = trim_to_quantiles(&values, config.lower_quantile, config.upper_quantile)
                .and_then(|trimmed| DistributionFacet::build(&operation, &trimmed, config));
            match facet {
                Ok(facet) => facets.push(facet),
                Err(e) => {
                    tracing::warn!(%operation, error = %e, "skipping distribution facet");
                    skipped.push(operation);
                }
            }
        }

        Ok(Self {
            facets,
            skipped,
            columns: config.distribution_columns,
        })
    }

    pub fn facets(&self) -> &[DistributionFacet] {
        &self.facets
    }

    /// Operations left out of the grid
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    fn layout(&self) -> FacetLayout {
        FacetLayout::new(self.columns, CELL_WIDTH, CELL_HEIGHT)
    }

    pub fn to_chart(&self) -> Chart {
        let note = (!self.skipped.is_empty())
            .then(|| format!("Skipped: {}", self.skipped.join(", ")));
        let layout = self.layout();

        let chart = self
            .facets
            .iter()
            .enumerate()
            .fold(base_chart(TITLE, note.as_deref()), |chart, (index, facet)| {
                facet.draw(&layout, chart, index)
            });

        chart.legend(
            Legend::new()
                .data(vec![MEAN.to_string(), MEDIAN.to_string(), MODE.to_string()])
                .top("52")
                .left("center"),
        )
    }

    pub fn to_html(&self) -> Result<String> {
        render_html(&self.to_chart(), TITLE, self.layout().canvas(self.facets.len()))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_html(
            &self.to_chart(),
            TITLE,
            self.layout().canvas(self.facets.len()),
            path,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Sample;

    fn sample(operation: &str, delta_per_op: f64) -> Sample {
        Sample {
            operation: operation.to_string(),
            input_size: None,
            delta_per_op,
        }
    }

    fn dataset() -> Dataset {
        let mut samples = Vec::new();
        for i in 0..40 {
            samples.push(sample("ADD", 21.0 + f64::from(i % 5) * 0.1));
            samples.push(sample("MUL", 30.0 + f64::from(i % 7) * 0.2));
        }
        samples.push(sample("ADD", 900.0));
        Dataset::new(samples)
    }

    #[test]
    fn test_one_facet_per_operation() {
        let report = DistributionReport::build(&dataset(), &AnalysisConfig::default()).unwrap();
        let names: Vec<&str> = report.facets().iter().map(|f| f.operation.as_str()).collect();
        assert_eq!(names, vec!["ADD", "MUL"]);
        assert!(report.skipped().is_empty());
    }

    #[test]
    fn test_facet_markers_inside_histogram_range() {
        let report = DistributionReport::build(&dataset(), &AnalysisConfig::default()).unwrap();
        for facet in report.facets() {
            let lo = facet.histogram.edges[0];
            let hi = facet.histogram.edges[facet.histogram.bins()];
            for marker in [facet.summary.median, facet.summary.binned_mode] {
                assert!(marker >= lo && marker <= hi, "{}: {marker}", facet.operation);
            }
            assert_eq!(facet.histogram.bins(), 25);
        }
    }

    #[test]
    fn test_trim_removes_spike_from_facet() {
        let report = DistributionReport::build(&dataset(), &AnalysisConfig::default()).unwrap();
        let add = &report.facets()[0];
        assert!(add.summary.max < 22.0);
    }

    #[test]
    fn test_operation_without_finite_samples_is_skipped() {
        let mut samples: Vec<Sample> = [21.0, 21.01, 21.02]
            .into_iter()
            .map(|v| sample("ADD", v))
            .collect();
        samples.push(sample("BAD", f64::NAN));
        samples.push(sample("BAD", f64::NAN));

        let report =
            DistributionReport::build(&Dataset::new(samples), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.facets().len(), 1);
        assert_eq!(report.facets()[0].operation, "ADD");
        assert_eq!(report.skipped(), ["BAD".to_string()]);
        assert!(report.to_chart().to_string().contains("Skipped: BAD"));
    }

    #[test]
    fn test_kde_scaled_to_counts() {
        let report = DistributionReport::build(&dataset(), &AnalysisConfig::default()).unwrap();
        let mul = &report.facets()[1];
        assert_eq!(mul.kde.len(), KDE_POINTS);
        let peak = mul.kde.iter().map(|p| p.1).fold(0.0, f64::max);
        // Same order of magnitude as the tallest bar
        assert!(peak > 1.0 && peak < 10.0 * mul.histogram.max_count() as f64);
    }

    #[test]
    fn test_outline_closes_on_baseline() {
        let report = DistributionReport::build(&dataset(), &AnalysisConfig::default()).unwrap();
        let facet = &report.facets()[0];
        let outline = facet.outline();
        assert_eq!(outline.len(), 2 * facet.histogram.bins() + 2);
        assert_eq!(outline.first().unwrap()[1], 0.0);
        assert_eq!(outline.last().unwrap()[1], 0.0);
        let tallest = outline.iter().map(|p| p[1]).fold(0.0, f64::max);
        assert_eq!(tallest, facet.histogram.max_count() as f64);
    }

    #[test]
    fn test_chart_has_legend_and_markers() {
        let report = DistributionReport::build(&dataset(), &AnalysisConfig::default()).unwrap();
        let options = report.to_chart().to_string();
        // Legend entry plus one marker per facet
        assert_eq!(options.matches("\"Binned mode\"").count(), 3);
        assert!(options.contains("\"MUL\""));
        assert!(options.contains("\"instruction_delta_per_op\""));
        assert!(options.contains("dotted"));
    }

    #[test]
    fn test_html_canvas_fits_columns() {
        let report = DistributionReport::build(&dataset(), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.layout().canvas(2), (600, 320));
        let html = report.to_html().unwrap();
        assert!(html.contains(TITLE));
        assert!(html.contains("echarts"));
    }

    #[test]
    fn test_empty_dataset_gives_empty_chart() {
        let report =
            DistributionReport::build(&Dataset::default(), &AnalysisConfig::default()).unwrap();
        assert!(report.facets().is_empty());
        assert!(report.to_html().unwrap().contains(TITLE));
    }
}
