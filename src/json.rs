//! Reading documents from and writing results to REST API JSON payloads.
//!
//! Field names follow the API (`line_items`, `tax_name1`, `line_total`, ...).
//! Unknown fields are ignored, missing ones default. Amounts are accepted as
//! JSON numbers or strings and written back as strings.

use crate::core::{Document, DocumentKind, DocumentSummary, LineItem, SumError};

/// Parse a document payload, treating it as an invoice unless it carries a
/// `kind` field.
pub fn document_from_json(json: &str) -> Result<Document, SumError> {
    serde_json::from_str(json).map_err(|e| SumError::Json(e.to_string()))
}

/// Parse a payload for a known entity kind, overriding any `kind` field.
pub fn document_from_json_as(kind: DocumentKind, json: &str) -> Result<Document, SumError> {
    let mut document = document_from_json(json)?;
    document.kind = kind;
    Ok(document)
}

/// Serialize computed lines in the shape the API expects back.
pub fn line_items_to_json(items: &[LineItem]) -> Result<String, SumError> {
    serde_json::to_string(items).map_err(|e| SumError::Json(e.to_string()))
}

/// Serialize both passes, pretty-printed.
pub fn summary_to_json(summary: &DocumentSummary) -> Result<String, SumError> {
    serde_json::to_string_pretty(summary).map_err(|e| SumError::Json(e.to_string()))
}
