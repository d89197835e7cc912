// Library surface for the CLI and integration tests.
// Logging is initialized by the binary only.
pub mod app_dirs;
pub mod artifact;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod report;
pub mod scoring;
pub mod time_series;
pub mod tokenizer;
pub mod trend;
pub mod util;
pub mod vocabulary;

pub use artifact::TrendArtifactNamer;
pub use error::{InputError, RenderError, TrendError, VocabularyError};
pub use report::{generate_difficulty_trend, generate_report, TrendContext, TrendReport};
pub use scoring::{compute_sentence_score, SentenceScorer};
pub use trend::{Entry, UserTrend, UserTrendAggregator};
pub use vocabulary::{Tier, VocabularyIndex};
