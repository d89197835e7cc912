use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use super::tier::Tier;
use crate::error::VocabularyError;

static VOCABULARY_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/vocabulary/data");

const BUILTIN_FILE: &str = "jlpt.json";

#[derive(Deserialize, Debug)]
struct VocabularyFile {
    name: String,
    levels: Vec<LevelEntry>,
}

#[derive(Deserialize, Debug)]
struct LevelEntry {
    tier: String,
    #[serde(default)]
    words: Vec<String>,
}

/// Read-only word to tier table.
///
/// Words listed under several tiers resolve to the first tier in [`Tier::PRIORITY`],
/// independent of the order the source file lists them in.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    name: String,
    words: HashMap<String, Tier>,
    max_word_chars: usize,
}

impl VocabularyIndex {
    /// The embedded JLPT table, parsed on first use and shared for the rest of the process
    pub fn builtin() -> &'static VocabularyIndex {
        static BUILTIN: OnceLock<VocabularyIndex> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let file = VOCABULARY_DIR
                .get_file(BUILTIN_FILE)
                .expect("Builtin vocabulary file not found");
            let source = file
                .contents_utf8()
                .expect("Unable to interpret vocabulary file as a string");
            Self::from_json_str(source).expect("Unable to deserialize builtin vocabulary json")
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    pub fn from_json_str(source: &str) -> Result<Self, VocabularyError> {
        let file: VocabularyFile = from_str(source)?;
        let mut levels = Vec::with_capacity(file.levels.len());
        for level in file.levels {
            levels.push((level.tier.parse::<Tier>()?, level.words));
        }
        Ok(Self::from_levels(file.name, levels))
    }

    pub fn from_levels<I, W, S>(name: impl Into<String>, levels: I) -> Self
    where
        I: IntoIterator<Item = (Tier, W)>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut by_tier: BTreeMap<Tier, Vec<String>> = BTreeMap::new();
        for (tier, words) in levels {
            by_tier
                .entry(tier)
                .or_default()
                .extend(words.into_iter().map(Into::into));
        }

        let mut words = HashMap::new();
        for tier in Tier::PRIORITY {
            for word in by_tier.remove(&tier).unwrap_or_default() {
                let word = word.trim();
                if word.is_empty() {
                    continue;
                }
                words.entry(word.to_string()).or_insert(tier);
            }
        }

        let max_word_chars = words.keys().map(|w| w.chars().count()).max().unwrap_or(0);

        Self {
            name: name.into(),
            words,
            max_word_chars,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup(&self, word: &str) -> Option<Tier> {
        self.words.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length in characters of the longest known word
    pub fn max_word_chars(&self) -> usize {
        self.max_word_chars
    }

    /// Words resolved to `tier`, sorted
    pub fn words_in(&self, tier: Tier) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .words
            .iter()
            .filter(|(_, t)| **t == tier)
            .map(|(w, _)| w.as_str())
            .collect();
        words.sort_unstable();
        words
    }
}
