pub mod charting;
pub mod png;
pub mod terminal;

use std::path::Path;

use crate::error::RenderError;
use crate::trend::UserTrend;

pub use png::PngRenderer;

/// Chart output boundary: turns a finished trend into an artifact at `target`
pub trait TrendRenderer {
    fn render(&self, trend: &UserTrend, target: &Path) -> Result<(), RenderError>;
}
