use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::scoring::SentenceScorer;
use crate::time_series::TrendPoint;
use crate::tokenizer::Tokenizer;
use crate::util::mean;
use crate::vocabulary::VocabularyIndex;

/// One logged sentence of a user
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub sequence_index: Option<f64>,
    pub text: String,
}

impl Entry {
    pub fn new(sequence_index: impl Into<Option<f64>>, text: impl Into<String>) -> Self {
        Self {
            sequence_index: sequence_index.into().and_then(normalize_index),
            text: text.into(),
        }
    }

    /// Build from an untyped index field; anything non-numeric becomes a missing index
    pub fn from_raw(raw_index: &str, text: impl Into<String>) -> Self {
        Self::new(coerce_sequence_index(raw_index), text)
    }
}

/// Finite indices only, with `-0` folded into `0`
fn normalize_index(value: f64) -> Option<f64> {
    value.is_finite().then_some(value + 0.0)
}

/// Lenient numeric parse of a sequence index field. NaN and infinities count as missing.
pub fn coerce_sequence_index(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().and_then(normalize_index)
}

/// Ascending by index, entries without an index after all indexed ones.
/// Numerically equal indices compare equal, so a stable sort keeps their input order.
pub fn compare_sequence_index(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.and_then(normalize_index);
    let b = b.and_then(normalize_index);
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorted, filtered difficulty series of one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTrend {
    pub user_id: String,
    pub total_entries: usize,
    pub points: Vec<TrendPoint>,
    /// Mean of the retained scores, `None` when nothing was retained
    pub overall_average: Option<f64>,
}

impl UserTrend {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.score).collect()
    }

    /// Points that can be placed on an x axis
    pub fn plottable(&self) -> Vec<(f64, f64)> {
        self.points.iter().filter_map(TrendPoint::coords).collect()
    }
}

pub struct UserTrendAggregator<'a> {
    scorer: SentenceScorer<'a>,
    tokenizer: &'a dyn Tokenizer,
}

impl<'a> UserTrendAggregator<'a> {
    pub fn new(vocabulary: &'a VocabularyIndex, tokenizer: &'a dyn Tokenizer) -> Self {
        Self {
            scorer: SentenceScorer::new(vocabulary),
            tokenizer,
        }
    }

    /// Score every entry, drop the unscored ones and order the rest by sequence index.
    /// The sort is stable, so entries sharing an index keep their input order.
    pub fn build(&self, user_id: &str, entries: &[Entry]) -> UserTrend {
        let mut ordered: Vec<&Entry> = entries.iter().collect();
        ordered.sort_by(|a, b| compare_sequence_index(a.sequence_index, b.sequence_index));

        let points: Vec<TrendPoint> = ordered
            .into_iter()
            .filter_map(|entry| {
                let tokens = self.tokenizer.tokenize(&entry.text);
                let score = self.scorer.compute(&tokens);
                debug!(
                    user_id,
                    sequence_index = ?entry.sequence_index,
                    tokens = tokens.len(),
                    score = ?score,
                    "scored entry"
                );
                score.map(|score| TrendPoint::new(entry.sequence_index, score))
            })
            .collect();

        let scores: Vec<f64> = points.iter().map(|p| p.score).collect();

        UserTrend {
            user_id: user_id.to_string(),
            total_entries: entries.len(),
            overall_average: mean(&scores),
            points,
        }
    }
}
