use std::fmt::Display;
use std::path::Path;
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::register_font;
use tracing::{debug, warn};

use super::charting::{
    average_label, chart_title, compute_x_bounds, format_label, SERIES_LABEL, X_AXIS_TITLE,
    Y_AXIS_TITLE, Y_BOUNDS,
};
use super::TrendRenderer;
use crate::error::RenderError;
use crate::trend::UserTrend;

/// Covers Latin, Greek and Cyrillic; other scripts in user ids render as missing glyphs
static CHART_FONT: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");
const FONT_FAMILY: &str = "sans-serif";

const MARGIN: u32 = 20;
const CAPTION_SIZE: u32 = 28;
const LABEL_SIZE: u32 = 16;
const SERIES_COLOR: RGBColor = RGBColor(128, 0, 128);
const AVERAGE_COLOR: RGBColor = RGBColor(0, 128, 0);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);
/// Dashes in the average line, separated by gaps of equal length
const DASH_COUNT: usize = 25;

/// Bitmap line chart of a trend: titled, labelled axes, series with point markers,
/// a dashed overall-average line and a legend naming both.
///
/// An empty trend still produces a chart (axes only) and never an average line or legend entry.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    width: u32,
    height: u32,
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self::new(1200, 600)
    }
}

fn backend_error<E: Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// Registers the embedded font with plotters once per process
fn register_chart_font() -> Result<(), RenderError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, CHART_FONT).is_ok());
    if registered {
        Ok(())
    } else {
        Err(RenderError::Backend("embedded chart font could not be loaded".to_string()))
    }
}

/// Alternating segments covering `[start, end]` at height `y`
fn dash_segments(start: f64, end: f64, y: f64) -> Vec<Vec<(f64, f64)>> {
    let dash = (end - start) / (DASH_COUNT * 2 - 1) as f64;
    if dash <= 0.0 {
        return Vec::new();
    }

    (0..DASH_COUNT)
        .map(|i| {
            let x = start + (i * 2) as f64 * dash;
            vec![(x, y), ((x + dash).min(end), y)]
        })
        .collect()
}

impl TrendRenderer for PngRenderer {
    fn render(&self, trend: &UserTrend, target: &Path) -> Result<(), RenderError> {
        register_chart_font()?;

        let coords = trend.plottable();
        let (x_min, x_max) = compute_x_bounds(&coords);
        if coords.len() < trend.points.len() {
            debug!(
                user_id = %trend.user_id,
                skipped = trend.points.len() - coords.len(),
                "points without a sequence index are not plotted"
            );
        }

        let root = BitMapBackend::new(target, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(chart_title(&trend.user_id), (FONT_FAMILY, CAPTION_SIZE))
            .margin(MARGIN)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, Y_BOUNDS[0]..Y_BOUNDS[1])
            .map_err(backend_error)?;

        let label_formatter = |v: &f64| format_label(*v);
        chart
            .configure_mesh()
            .x_desc(X_AXIS_TITLE)
            .y_desc(Y_AXIS_TITLE)
            .x_label_formatter(&label_formatter)
            .y_label_formatter(&label_formatter)
            .y_labels(5)
            .label_style((FONT_FAMILY, LABEL_SIZE))
            .axis_desc_style((FONT_FAMILY, LABEL_SIZE))
            .bold_line_style(GRID_COLOR)
            .light_line_style(WHITE)
            .draw()
            .map_err(backend_error)?;

        chart
            .draw_series(LineSeries::new(
                coords.iter().copied(),
                SERIES_COLOR.stroke_width(2),
            ))
            .map_err(backend_error)?
            .label(SERIES_LABEL)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SERIES_COLOR.stroke_width(2)));
        chart
            .draw_series(
                coords
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, SERIES_COLOR.filled())),
            )
            .map_err(backend_error)?;

        match trend.overall_average {
            Some(average) => {
                chart
                    .draw_series(
                        dash_segments(x_min, x_max, average)
                            .into_iter()
                            .map(|segment| PathElement::new(segment, AVERAGE_COLOR.stroke_width(2))),
                    )
                    .map_err(backend_error)?
                    .label(average_label(average))
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 8, y)], AVERAGE_COLOR.stroke_width(2))
                    });
            }
            None => warn!(
                user_id = %trend.user_id,
                "no scored entries, rendering chart without an overall average"
            ),
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, LABEL_SIZE))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(backend_error)?;

        root.present().map_err(backend_error)?;
        Ok(())
    }
}
