use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::artifact::{ensure_output_dir, TrendArtifactNamer};
use crate::error::TrendError;
use crate::input::validate_user_id;
use crate::render::TrendRenderer;
use crate::time_series::TrendPoint;
use crate::tokenizer::Tokenizer;
use crate::trend::{Entry, UserTrend, UserTrendAggregator};
use crate::util::{max, min, std_dev};
use crate::vocabulary::VocabularyIndex;

/// Everything needed to turn a user's entries into a chart
pub struct TrendContext<'a> {
    pub vocabulary: &'a VocabularyIndex,
    pub tokenizer: &'a dyn Tokenizer,
    pub renderer: &'a dyn TrendRenderer,
    pub namer: TrendArtifactNamer,
    pub write_summary: bool,
}

/// Descriptive statistics of a trend, written next to its chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub user_id: String,
    pub total_entries: usize,
    pub scored_entries: usize,
    pub overall_average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std_dev: Option<f64>,
    pub points: Vec<TrendPoint>,
    pub generated_at: DateTime<Local>,
}

impl TrendSummary {
    pub fn from_trend(trend: &UserTrend, generated_at: DateTime<Local>) -> Self {
        let scores = trend.scores();
        Self {
            user_id: trend.user_id.clone(),
            total_entries: trend.total_entries,
            scored_entries: trend.points.len(),
            overall_average: trend.overall_average,
            min: min(&scores),
            max: max(&scores),
            std_dev: std_dev(&scores),
            points: trend.points.clone(),
            generated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub chart_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub trend: UserTrend,
}

/// Build, render and optionally summarize one user's trend
pub fn generate_report(
    user_id: &str,
    entries: &[Entry],
    ctx: &TrendContext,
) -> Result<TrendReport, TrendError> {
    validate_user_id(user_id)?;

    let output_dir = ctx.namer.output_dir();
    ensure_output_dir(output_dir).map_err(|source| TrendError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let trend = UserTrendAggregator::new(ctx.vocabulary, ctx.tokenizer).build(user_id, entries);

    let chart_path = ctx.namer.path(user_id);
    ctx.renderer.render(&trend, &chart_path)?;

    let summary_path = if ctx.write_summary {
        let path = ctx.namer.summary_path(user_id);
        write_summary(&TrendSummary::from_trend(&trend, Local::now()), &path)?;
        Some(path)
    } else {
        None
    };

    info!(
        user_id,
        scored = trend.points.len(),
        total = trend.total_entries,
        path = %chart_path.display(),
        "rendered difficulty trend"
    );

    Ok(TrendReport {
        chart_path,
        summary_path,
        trend,
    })
}

/// Build and render one user's trend, returning the chart path
pub fn generate_difficulty_trend(
    user_id: &str,
    entries: &[Entry],
    ctx: &TrendContext,
) -> Result<PathBuf, TrendError> {
    generate_report(user_id, entries, ctx).map(|report| report.chart_path)
}

fn write_summary(summary: &TrendSummary, path: &Path) -> Result<(), TrendError> {
    let data = serde_json::to_vec_pretty(summary)?;
    fs::write(path, data).map_err(|source| TrendError::Summary {
        path: path.to_path_buf(),
        source,
    })
}
