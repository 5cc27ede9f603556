//! Cost vs input size per operation
//!
//! One facet per size-dependent operation: mean cost per input size joined by
//! a line, with the confidence interval drawn as a shaded band.

use super::{base_chart, render_html, write_html, FacetLayout};
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::estimate::MeanInterval;
use crate::scaling::{scaling_series, ScalingSeries};
use charming::component::Legend;
use charming::element::{AreaStyle, ItemStyle, LineStyle};
use charming::series::Line;
use charming::Chart;
use std::path::Path;

const TITLE: &str = "Instruction Cost vs Input Size per Opcode";
const X_LABEL: &str = "Input Size";
const Y_LABEL: &str = "Instruction Cost";

const CELL_WIDTH: f64 = 340.0;
const CELL_HEIGHT: f64 = 240.0;

const MEAN: &str = "Mean";
const INTERVAL: &str = "Confidence interval";

/// Line-plot facet grid of mean cost against input size
#[derive(Debug, Clone)]
pub struct ScalingReport {
    series: Vec<ScalingSeries>,
    columns: usize,
}

impl ScalingReport {
    pub fn build(dataset: &Dataset, config: &AnalysisConfig) -> Result<Self> {
        let series = scaling_series(dataset, config)?;
        if series.is_empty() {
            tracing::warn!("no sized samples within the plot limit");
        }
        Ok(Self {
            series,
            columns: config.scaling_columns,
        })
    }

    pub fn series(&self) -> &[ScalingSeries] {
        &self.series
    }

    fn layout(&self) -> FacetLayout {
        FacetLayout::new(self.columns, CELL_WIDTH, CELL_HEIGHT)
    }

    pub fn to_chart(&self) -> Chart {
        let layout = self.layout();
        let chart = self
            .series
            .iter()
            .enumerate()
            .fold(base_chart(TITLE, None), |chart, (index, series)| {
                draw_facet(&layout, chart, index, series)
            });

        chart.legend(
            Legend::new()
                .data(vec![MEAN.to_string(), INTERVAL.to_string()])
                .top("44")
                .left("center"),
        )
    }

    pub fn to_html(&self) -> Result<String> {
        render_html(&self.to_chart(), TITLE, self.layout().canvas(self.series.len()))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write_html(
            &self.to_chart(),
            TITLE,
            self.layout().canvas(self.series.len()),
            path,
        )
    }
}

/// The band is the lower bound stacked with the interval width; only the
/// width is filled.
fn draw_facet(layout: &FacetLayout, chart: Chart, index: usize, series: &ScalingSeries) -> Chart {
    let axis = index as f64;
    let stack = format!("ci-{index}");
    let on_facet = |line: Line| line.x_axis_index(axis).y_axis_index(axis);

    let column = |value: fn(&MeanInterval) -> f64| -> Vec<Vec<f64>> {
        series
            .points
            .iter()
            .map(|p| vec![p.input_size as f64, value(&p.interval)])
            .collect()
    };

    layout
        .add_facet(chart, index, &series.operation, X_LABEL, Y_LABEL)
        .series(on_facet(
            Line::new()
                .data(column(|ci| ci.lower))
                .stack(stack.as_str())
                .show_symbol(false)
                .line_style(LineStyle::new().width(0)),
        ))
        .series(on_facet(
            Line::new()
                .name(INTERVAL)
                .data(column(|ci| ci.upper - ci.lower))
                .stack(stack.as_str())
                .show_symbol(false)
                .item_style(ItemStyle::new().color("steelblue"))
                .line_style(LineStyle::new().width(0))
                .area_style(AreaStyle::new().color("steelblue").opacity(0.25)),
        ))
        .series(on_facet(
            Line::new()
                .name(MEAN)
                .data(column(|ci| ci.mean))
                .item_style(ItemStyle::new().color("navy"))
                .line_style(LineStyle::new().width(2).color("navy")),
        ))
}
