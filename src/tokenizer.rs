use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::vocabulary::VocabularyIndex;

/// Word segmentation boundary: raw text in, ordered word tokens out
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Greedy forward longest-match segmentation against a vocabulary.
///
/// Characters that start no known word are collected into runs, so "学生" stays
/// one unknown token. Whitespace and punctuation end a token and are dropped.
///
/// Matching knows no word boundaries beyond the vocabulary itself: a known word inside an
/// unknown one is split out and scored, e.g. "少ない" yields "少" and "ない", and "です"
/// yields "で" and "す". Use [`WhitespaceTokenizer`] on pre-segmented text to avoid this.
pub struct LongestMatchTokenizer<'a> {
    vocabulary: &'a VocabularyIndex,
}

impl<'a> LongestMatchTokenizer<'a> {
    pub fn new(vocabulary: &'a VocabularyIndex) -> Self {
        Self { vocabulary }
    }

    fn longest_match(&self, chars: &[char]) -> Option<(String, usize)> {
        let limit = self.vocabulary.max_word_chars().min(chars.len());
        (1..=limit).rev().find_map(|len| {
            let candidate: String = chars[..len].iter().collect();
            self.vocabulary
                .contains(&candidate)
                .then_some((candidate, len))
        })
    }
}

impl Tokenizer for LongestMatchTokenizer<'_> {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut unknown_run = String::new();
        let mut pos = 0;

        while pos < chars.len() {
            let c = chars[pos];
            if is_separator(c) {
                flush_run(&mut unknown_run, &mut tokens);
                pos += 1;
                continue;
            }

            match self.longest_match(&chars[pos..]) {
                Some((word, len)) => {
                    flush_run(&mut unknown_run, &mut tokens);
                    tokens.push(word);
                    pos += len;
                }
                None => {
                    unknown_run.push(c);
                    pos += 1;
                }
            }
        }
        flush_run(&mut unknown_run, &mut tokens);

        tokens
    }
}

/// For text that is already segmented, one token per whitespace-separated word
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TokenizerKind {
    #[default]
    LongestMatch,
    Whitespace,
}

impl TokenizerKind {
    pub fn build<'a>(self, vocabulary: &'a VocabularyIndex) -> Box<dyn Tokenizer + 'a> {
        match self {
            TokenizerKind::LongestMatch => Box::new(LongestMatchTokenizer::new(vocabulary)),
            TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
        }
    }
}

fn flush_run(run: &mut String, tokens: &mut Vec<String>) {
    if !run.is_empty() {
        tokens.push(std::mem::take(run));
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(
            c,
            '。' | '、' | '，' | '．' | '！' | '？' | '・' | '…' | '「' | '」' | '『' | '』' | '（' | '）'
                | '〜' | '～'
        )
}
