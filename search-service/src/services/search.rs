use crate::models::book::{BookRecord, BookView};
use crate::models::responses::{MatchResult, SearchResponse};
use crate::services::validation::{active_collection, active_term};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Malformed book record at index {index}: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Finds every content entry whose text contains `term`.
///
/// Results follow book order, then content order within a book. An empty
/// term matches nothing.
pub fn find_matches(term: &str, books: &[BookRecord]) -> Vec<MatchResult> {
    if term.is_empty() {
        return Vec::new();
    }

    books.iter().flat_map(|book| book.matches(term)).collect()
}

fn view_book(index: usize, entry: &Value) -> Result<BookView<'_>, SearchError> {
    BookView::deserialize(entry).map_err(|source| SearchError::MalformedRecord { index, source })
}

/// Matches directly against the JSON document. Every record is checked
/// before the first match is taken, and only one book's entry list is alive
/// at a time, so memory grows with the number of matches.
fn match_entries(term: &str, entries: &[Value]) -> Result<Vec<MatchResult>, SearchError> {
    for (index, entry) in entries.iter().enumerate() {
        view_book(index, entry)?;
    }

    let mut results = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        results.extend(view_book(index, entry)?.matches(term));
    }

    Ok(results)
}

/// Searches `books` for `search_term` and echoes the term back unchanged.
///
/// A term that is not a non-empty string, or a `books` value that is not an
/// array, yields an empty result list without error. Once both are active,
/// any record that does not have the book shape fails the whole search.
pub fn search(search_term: Value, books: &Value) -> Result<SearchResponse, SearchError> {
    let results = match (active_term(&search_term), active_collection(books)) {
        (Some(term), Some(entries)) => {
            let results = match_entries(term, entries)?;
            debug!(
                "Term {:?} matched {} lines across {} books",
                term,
                results.len(),
                entries.len()
            );
            results
        }
        _ => {
            debug!("Inactive search input, skipping traversal");
            Vec::new()
        }
    };

    Ok(SearchResponse {
        search_term,
        results,
    })
}
