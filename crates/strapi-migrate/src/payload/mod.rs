//! Payload sanitizing: reduce a source entry to the fields the destination accepts.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{MigrateError, Result};
use crate::source::Entry;

/// Fields sent to the destination when no override is configured.
pub const DEFAULT_PAYLOAD_FIELDS: &[&str] = &["agendaFormatName", "agendaFormatOrder"];

/// Selects a fixed set of fields from an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSanitizer {
    fields: Vec<String>,
}

impl Default for PayloadSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_PAYLOAD_FIELDS.iter().map(|f| f.to_string()).collect())
    }
}

impl PayloadSanitizer {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Copy the configured fields out of `entry`, in configured order.
    ///
    /// A configured field absent from the entry is an error; a present
    /// `null` is passed through.
    pub fn sanitize(&self, entry: &Entry) -> Result<Map<String, Value>> {
        let mut payload = Map::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = entry
                .get(field)
                .ok_or_else(|| MigrateError::MissingField {
                    entry: entry.label(),
                    field: field.clone(),
                })?;
            payload.insert(field.clone(), value.clone());
        }
        debug!("Payload for {}: {}", entry.label(), serde_json::Value::Object(payload.clone()));
        Ok(payload)
    }

    /// Sanitize and wrap as the `{"data": {...}}` request body.
    pub fn body(&self, entry: &Entry) -> Result<Value> {
        Ok(wrap_data(self.sanitize(entry)?))
    }
}

/// Wrap a payload in the API's `data` envelope.
pub fn wrap_data(payload: Map<String, Value>) -> Value {
    json!({ "data": payload })
}
