//! HTML diagnostic reports
//!
//! Each report is a single ECharts chart rendered to a standalone HTML page
//! with `charming`. Facets are laid out as a grid of chart grids, one axis
//! pair per operation.

mod distribution;
mod scaling;

pub use distribution::{DistributionFacet, DistributionReport};
pub use scaling::ScalingReport;

use crate::error::{AnalysisError, Result};
use charming::component::{Axis, Grid, Title};
use charming::element::{AxisType, NameLocation};
use charming::{Chart, HtmlRenderer};
use std::path::Path;

const HEADER_HEIGHT: f64 = 90.0;
const GRID_INSET_LEFT: f64 = 60.0;
const GRID_INSET_RIGHT: f64 = 20.0;
const GRID_INSET_TOP: f64 = 36.0;
const GRID_INSET_BOTTOM: f64 = 46.0;

fn px(value: f64) -> String {
    format!("{value:.0}")
}

/// Placement of facets on a fixed-size cell grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetLayout {
    pub columns: usize,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl FacetLayout {
    pub fn new(columns: usize, cell_width: f64, cell_height: f64) -> Self {
        Self {
            columns: columns.max(1),
            cell_width,
            cell_height,
        }
    }

    /// Rows needed for `facets` facets
    pub fn rows(&self, facets: usize) -> usize {
        facets.div_ceil(self.columns)
    }

    /// Canvas size in pixels for `facets` facets
    pub fn canvas(&self, facets: usize) -> (u64, u64) {
        let columns = self.columns.min(facets.max(1));
        let width = columns as f64 * self.cell_width;
        let height = HEADER_HEIGHT + self.rows(facets).max(1) as f64 * self.cell_height;
        (width as u64, height as u64)
    }

    /// Top-left pixel corner of facet `index`
    pub fn origin(&self, index: usize) -> (f64, f64) {
        let column = index % self.columns;
        let row = index / self.columns;
        (
            column as f64 * self.cell_width,
            HEADER_HEIGHT + row as f64 * self.cell_height,
        )
    }

    /// Add facet `index` to `chart`: its grid, a title and a value axis pair
    ///
    /// Series drawn into the facet use `index` as both axis indices.
    pub fn add_facet(
        &self,
        chart: Chart,
        index: usize,
        title: &str,
        x_label: &str,
        y_label: &str,
    ) -> Chart {
        let (left, top) = self.origin(index);
        let grid = index as f64;

        chart
            .grid(
                Grid::new()
                    .left(px(left + GRID_INSET_LEFT).as_str())
                    .top(px(top + GRID_INSET_TOP).as_str())
                    .width(px(self.cell_width - GRID_INSET_LEFT - GRID_INSET_RIGHT).as_str())
                    .height(px(self.cell_height - GRID_INSET_TOP - GRID_INSET_BOTTOM).as_str()),
            )
            .title(
                Title::new()
                    .text(title)
                    .left(px(left + GRID_INSET_LEFT).as_str())
                    .top(px(top + 6.0).as_str()),
            )
            .x_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .grid_index(grid)
                    .scale(true)
                    .name(x_label)
                    .name_location(NameLocation::Middle)
                    .name_gap(25),
            )
            .y_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .grid_index(grid)
                    .name(y_label)
                    .name_location(NameLocation::Middle)
                    .name_gap(42),
            )
    }
}

/// Empty chart with the page-level title
pub fn base_chart(title: &str, subtitle: Option<&str>) -> Chart {
    let mut heading = Title::new().text(title).left("center").top("8");
    if let Some(subtitle) = subtitle {
        heading = heading.subtext(subtitle);
    }
    Chart::new().background_color("white").title(heading)
}

/// Render `chart` as a standalone HTML page
pub fn render_html(chart: &Chart, title: &str, size: (u64, u64)) -> Result<String> {
    HtmlRenderer::new(title.to_string(), size.0, size.1)
        .render(chart)
        .map_err(|e| AnalysisError::Chart(format!("{e:?}")))
}

/// Write `chart` as a standalone HTML page to `path`
pub fn write_html(
    chart: &Chart,
    title: &str,
    size: (u64, u64),
    path: impl AsRef<Path>,
) -> Result<()> {
    let html = render_html(chart, title, size)?;
    std::fs::write(path.as_ref(), html)?;
    tracing::info!(path = %path.as_ref().display(), "wrote report");
    Ok(())
}
