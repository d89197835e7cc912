use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "static/jlpt_difficulty";

/// Deterministic artifact paths under one output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendArtifactNamer {
    output_dir: PathBuf,
}

impl TrendArtifactNamer {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output_dir>/jlpt_trend_<user_id>.png`
    pub fn path(&self, user_id: &str) -> PathBuf {
        self.output_dir.join(format!("jlpt_trend_{user_id}.png"))
    }

    /// `<output_dir>/jlpt_trend_<user_id>.json`
    pub fn summary_path(&self, user_id: &str) -> PathBuf {
        self.output_dir.join(format!("jlpt_trend_{user_id}.json"))
    }
}

impl Default for TrendArtifactNamer {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

/// Create `dir` and its parents if missing. An existing directory, including one
/// created concurrently by another process, is not an error.
pub fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}
