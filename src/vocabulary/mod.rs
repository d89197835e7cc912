pub mod index;
pub mod tier;

pub use index::VocabularyIndex;
pub use tier::{score_label, Tier, UnknownTier};
