//! Source side: paginated reading and entry normalization.
//!
//! Records come back from the content API either flat (`{"id": 1, "name": ..}`)
//! or with their fields nested under `attributes`. Both shapes normalize into
//! the same [`Entry`].

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Key under which the match value is copied into every entry.
pub const MATCH_FIELD_KEY: &str = "match_field";

/// Read published records from a source content API.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Fetch one page (1-based) of published records with relations populated.
    ///
    /// An empty vector means there are no more pages.
    async fn fetch_page(&self, collection: &str, page: usize, page_size: usize)
        -> Result<Vec<Value>>;
}

/// A normalized source entry.
///
/// Always carries `id` and [`MATCH_FIELD_KEY`] alongside the record's own
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    fields: Map<String, Value>,
}

/// Why a fetched record was not turned into an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Attributes missing, empty, or not an object.
    InvalidAttributes,
    /// Match attribute absent or falsy.
    MissingMatchValue(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidAttributes => write!(f, "invalid or empty attributes"),
            SkipReason::MissingMatchValue(field) => write!(f, "missing or null '{}'", field),
        }
    }
}

impl Entry {
    /// Normalize a raw API record.
    pub fn from_record(record: &Value, match_field: &str) -> std::result::Result<Self, SkipReason> {
        let attributes = match record.get("attributes") {
            Some(nested) => nested,
            None => record,
        };

        let mut fields = match attributes {
            Value::Object(map) if !map.is_empty() => map.clone(),
            _ => return Err(SkipReason::InvalidAttributes),
        };

        let id = record.get("id").cloned().unwrap_or(Value::Null);
        fields.insert("id".to_string(), id);

        let match_value = fields.get(match_field).cloned().unwrap_or(Value::Null);
        if !is_truthy(&match_value) {
            return Err(SkipReason::MissingMatchValue(match_field.to_string()));
        }
        fields.insert(MATCH_FIELD_KEY.to_string(), match_value);

        Ok(Self { fields })
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn match_value(&self) -> &Value {
        self.fields.get(MATCH_FIELD_KEY).unwrap_or(&Value::Null)
    }

    /// The match value as plain text, used in filters and the report.
    pub fn label(&self) -> String {
        value_text(self.match_value())
    }
}

/// Render a JSON value the way it appears in a query string or CSV cell.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Fetch every published entry of `collection`, page by page.
///
/// Stops at the first empty page. Records that fail normalization are logged
/// and skipped; any request error aborts.
pub async fn fetch_entries<S>(
    source: &S,
    collection: &str,
    match_field: &str,
    page_size: usize,
) -> Result<Vec<Entry>>
where
    S: SourceReader + ?Sized,
{
    let mut entries = Vec::new();
    let mut page = 1;

    loop {
        let records = source.fetch_page(collection, page, page_size).await?;
        if records.is_empty() {
            debug!("Page {} of {} is empty, stopping", page, collection);
            break;
        }
        debug!("Sample entry structure: {}", records[0]);

        let mut kept = 0;
        for record in &records {
            let id = record.get("id").map(value_text).unwrap_or_default();
            match Entry::from_record(record, match_field) {
                Ok(entry) => {
                    debug!("Entry ID {} - match field '{}': {}", id, match_field, entry.label());
                    entries.push(entry);
                    kept += 1;
                }
                Err(reason) => warn!("Entry ID {} - {}, skipping", id, reason),
            }
        }

        info!(
            "Fetched page {} of {}: {} records, {} kept",
            page,
            collection,
            records.len(),
            kept
        );
        page += 1;
    }

    Ok(entries)
}
