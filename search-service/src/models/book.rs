use crate::models::responses::MatchResult;
use serde::{Deserialize, Serialize};

/// One line of scanned text at a page/line coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    #[serde(alias = "Page")]
    pub page: u32,
    #[serde(alias = "Line")]
    pub line: u32,
    #[serde(alias = "Text")]
    pub text: String,
}

/// A scanned book. `identifier` is an opaque code (usually an ISBN) and is
/// not required to be unique across a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(alias = "ISBN")]
    pub identifier: String,
    #[serde(default, alias = "Title")]
    pub title: String,
    #[serde(alias = "Content")]
    pub content: Vec<ContentEntry>,
}

impl BookRecord {
    /// Yields a match for every content entry whose text contains `term`,
    /// in content order. Case-sensitive, no normalization.
    pub fn matches<'a>(&'a self, term: &'a str) -> impl Iterator<Item = MatchResult> + 'a {
        self.content
            .iter()
            .filter(move |entry| entry.text.contains(term))
            .map(move |entry| MatchResult {
                identifier: self.identifier.clone(),
                page: entry.page,
                line: entry.line,
            })
    }
}

/// Borrowed form of [`ContentEntry`], read straight out of a parsed JSON
/// document without copying the text.
#[derive(Debug, Deserialize)]
pub struct EntryView<'a> {
    #[serde(alias = "Page")]
    pub page: u32,
    #[serde(alias = "Line")]
    pub line: u32,
    #[serde(borrow, alias = "Text")]
    pub text: &'a str,
}

/// Borrowed form of [`BookRecord`]. Accepts the same shapes and rejects the
/// same malformed records.
#[derive(Debug, Deserialize)]
pub struct BookView<'a> {
    #[serde(borrow, alias = "ISBN")]
    pub identifier: &'a str,
    #[serde(default, borrow, alias = "Title")]
    pub title: &'a str,
    #[serde(borrow, alias = "Content")]
    pub content: Vec<EntryView<'a>>,
}

impl<'a> BookView<'a> {
    pub fn matches<'t>(&'t self, term: &'t str) -> impl Iterator<Item = MatchResult> + 't {
        self.content
            .iter()
            .filter(move |entry| entry.text.contains(term))
            .map(move |entry| MatchResult {
                identifier: self.identifier.to_string(),
                page: entry.page,
                line: entry.line,
            })
    }
}
