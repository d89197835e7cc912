use crate::tokenizer::Tokenizer;
use crate::util::mean;
use crate::vocabulary::{Tier, VocabularyIndex};

/// One token of a scored sentence with its resolved tier, if any
#[derive(Debug, Clone, PartialEq)]
pub struct TokenScore {
    pub token: String,
    pub tier: Option<Tier>,
}

impl TokenScore {
    pub fn score(&self) -> Option<u8> {
        self.tier.map(Tier::score)
    }
}

/// Averages the tier scores of the recognized tokens in a sentence
#[derive(Debug, Clone, Copy)]
pub struct SentenceScorer<'a> {
    vocabulary: &'a VocabularyIndex,
}

impl<'a> SentenceScorer<'a> {
    pub fn new(vocabulary: &'a VocabularyIndex) -> Self {
        Self { vocabulary }
    }

    /// Mean tier score of the recognized tokens, `None` when no token is recognized.
    /// Unknown tokens do not count toward the mean.
    pub fn compute<S: AsRef<str>>(&self, tokens: &[S]) -> Option<f64> {
        let scores: Vec<f64> = tokens
            .iter()
            .filter_map(|token| self.vocabulary.lookup(token.as_ref()))
            .map(|tier| f64::from(tier.score()))
            .collect();

        mean(&scores)
    }

    pub fn explain<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<TokenScore> {
        tokens
            .iter()
            .map(|token| TokenScore {
                token: token.as_ref().to_string(),
                tier: self.vocabulary.lookup(token.as_ref()),
            })
            .collect()
    }
}

/// Tokenize `sentence` and score it
pub fn compute_sentence_score(
    sentence: &str,
    tokenizer: &dyn Tokenizer,
    vocabulary: &VocabularyIndex,
) -> Option<f64> {
    let tokens = tokenizer.tokenize(sentence);
    SentenceScorer::new(vocabulary).compute(&tokens)
}
