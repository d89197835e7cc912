use std::fs::File;
use std::io::Read;
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::error::InputError;
use crate::trend::Entry;

/// Accepted header names per column, first match wins
const SEQUENCE_COLUMNS: [&str; 2] = ["sequence_index", "句數"];
const TEXT_COLUMNS: [&str; 2] = ["text", "內容"];
const USER_COLUMNS: [&str; 1] = ["user_id"];

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub user_id: Option<String>,
    pub entry: Entry,
}

/// Parsed sentence log, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct EntryLog {
    records: Vec<LogRecord>,
    has_user_column: bool,
}

impl EntryLog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InputError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h == *name))
        };
        let sequence_col = find(&SEQUENCE_COLUMNS[..])
            .ok_or_else(|| InputError::MissingColumn(SEQUENCE_COLUMNS[0].to_string()))?;
        let text_col =
            find(&TEXT_COLUMNS[..]).ok_or_else(|| InputError::MissingColumn(TEXT_COLUMNS[0].to_string()))?;
        let user_col = find(&USER_COLUMNS[..]);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or("");
            records.push(LogRecord {
                user_id: user_col.map(|idx| field(idx).to_string()),
                entry: Entry::from_raw(field(sequence_col), field(text_col)),
            });
        }
        debug!(records = records.len(), has_user_column = user_col.is_some(), "read sentence log");

        Ok(Self {
            records,
            has_user_column: user_col.is_some(),
        })
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn has_user_column(&self) -> bool {
        self.has_user_column
    }

    /// Entries of one user. A log without a user column belongs entirely to whoever asks.
    pub fn entries_for(&self, user_id: &str) -> Vec<Entry> {
        self.records
            .iter()
            .filter(|r| !self.has_user_column || r.user_id.as_deref() == Some(user_id))
            .map(|r| r.entry.clone())
            .collect()
    }

    /// Entries grouped per user, users in order of first appearance
    pub fn by_user(&self) -> Result<Vec<(String, Vec<Entry>)>, InputError> {
        if !self.has_user_column {
            return Err(InputError::MissingColumn(USER_COLUMNS[0].to_string()));
        }

        let mut groups = self
            .records
            .iter()
            .into_group_map_by(|r| r.user_id.clone().unwrap_or_default());

        Ok(self
            .records
            .iter()
            .map(|r| r.user_id.clone().unwrap_or_default())
            .unique()
            .filter_map(|user| {
                groups.remove(&user).map(|records| {
                    let entries = records.into_iter().map(|r| r.entry.clone()).collect();
                    (user, entries)
                })
            })
            .collect())
    }
}

/// User ids end up in file names, so path separators and empty ids are rejected
pub fn validate_user_id(user_id: &str) -> Result<(), InputError> {
    let invalid = user_id.trim().is_empty()
        || user_id == "."
        || user_id == ".."
        || user_id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(InputError::InvalidUserId(user_id.to_string()));
    }
    Ok(())
}
