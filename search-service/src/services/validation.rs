use serde_json::Value;

/// Returns the term to search for, or `None` when the supplied value is not
/// a non-empty string.
pub fn active_term(value: &Value) -> Option<&str> {
    match value {
        Value::String(term) if !term.is_empty() => Some(term.as_str()),
        _ => None,
    }
}

/// Returns the book entries when the supplied value is a JSON array.
pub fn active_collection(value: &Value) -> Option<&[Value]> {
    value.as_array().map(Vec::as_slice)
}
