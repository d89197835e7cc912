use serde::Serialize;

/// One retained entry of a difficulty trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub sequence_index: Option<f64>,
    pub score: f64,
}

impl TrendPoint {
    pub fn new(sequence_index: Option<f64>, score: f64) -> Self {
        Self {
            sequence_index,
            score,
        }
    }

    /// Chart coordinates, absent when the entry has no usable sequence index
    pub fn coords(&self) -> Option<(f64, f64)> {
        self.sequence_index
            .filter(|x| x.is_finite())
            .map(|x| (x, self.score))
    }
}

impl From<(f64, f64)> for TrendPoint {
    fn from(v: (f64, f64)) -> Self {
        TrendPoint {
            sequence_index: Some(v.0),
            score: v.1,
        }
    }
}
