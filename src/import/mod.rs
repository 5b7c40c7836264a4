//! Response files: CSV (`question_id,response`) or a JSON object of answers.

mod parser;

use std::collections::btree_map::Entry;
use std::fmt;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::engine::{QuestionId, ResponseSet};
use parser::ResponseEntry;

#[derive(Debug)]
pub enum ResponseImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    DuplicateQuestion(QuestionId),
    BlankQuestion,
}

impl fmt::Display for ResponseImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseImportError::Io(err) => write!(f, "failed to read response file: {err}"),
            ResponseImportError::Csv(err) => write!(f, "invalid response CSV data: {err}"),
            ResponseImportError::Json(err) => write!(f, "invalid response JSON data: {err}"),
            ResponseImportError::DuplicateQuestion(question) => {
                write!(f, "question `{question}` is answered more than once")
            }
            ResponseImportError::BlankQuestion => {
                write!(f, "a response row has an empty question id")
            }
        }
    }
}

impl std::error::Error for ResponseImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseImportError::Io(err) => Some(err),
            ResponseImportError::Csv(err) => Some(err),
            ResponseImportError::Json(err) => Some(err),
            ResponseImportError::DuplicateQuestion(_) | ResponseImportError::BlankQuestion => None,
        }
    }
}

impl From<std::io::Error> for ResponseImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ResponseImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ResponseImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Reads answers into a `ResponseSet`.
///
/// Only the file shape is checked here. Whether a question belongs to a lens and
/// whether its value fits the lens's scale is decided by `aggregate_responses`.
pub struct ResponseImporter;

impl ResponseImporter {
    /// `.json` files are read as JSON; anything else as CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ResponseSet, ResponseImportError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let file = std::fs::File::open(path)?;

        debug!(path = %path.display(), json = is_json, "importing responses");
        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_csv_reader(file)
        }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<ResponseSet, ResponseImportError> {
        collect(parser::parse_csv(reader)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<ResponseSet, ResponseImportError> {
        collect(parser::parse_json(reader)?)
    }
}

fn collect(entries: Vec<ResponseEntry>) -> Result<ResponseSet, ResponseImportError> {
    let mut responses = ResponseSet::new();
    for entry in entries {
        let question = entry.question_id.trim();
        if question.is_empty() {
            return Err(ResponseImportError::BlankQuestion);
        }
        match responses.entry(QuestionId::from(question)) {
            Entry::Vacant(slot) => {
                slot.insert(entry.response);
            }
            Entry::Occupied(slot) => {
                return Err(ResponseImportError::DuplicateQuestion(slot.key().clone()));
            }
        }
    }
    Ok(responses)
}
