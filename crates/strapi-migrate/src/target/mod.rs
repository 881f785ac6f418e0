//! Destination side: match lookup and create/update writes.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::error::{MigrateError, Result};
use crate::source::value_text;

/// A destination entry that matched a source entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingEntry {
    /// Destination-assigned identifier used as the update target.
    pub document_id: String,
}

/// Write entries to a destination content API.
#[async_trait]
pub trait TargetWriter: Send + Sync {
    /// Look up an entry whose `match_field` equals `match_value`.
    async fn find_existing(
        &self,
        collection: &str,
        match_field: &str,
        match_value: &str,
    ) -> Result<Option<ExistingEntry>>;

    /// `POST {collection}` with a `{"data": ..}` body.
    async fn create_entry(&self, collection: &str, body: &Value) -> Result<()>;

    /// `PUT {collection}/{document_id}` with a `{"data": ..}` body.
    async fn update_entry(&self, collection: &str, document_id: &str, body: &Value) -> Result<()>;
}

/// What the upsert executor will do for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertAction {
    Create,
    Update { document_id: String },
}

impl From<Option<ExistingEntry>> for UpsertAction {
    fn from(existing: Option<ExistingEntry>) -> Self {
        match existing {
            Some(e) => UpsertAction::Update {
                document_id: e.document_id,
            },
            None => UpsertAction::Create,
        }
    }
}

/// Pick the match out of a lookup's `data` array.
///
/// The first result wins. `documentId` is read from the top level, or from
/// `attributes` for nested responses.
pub fn first_match(results: &[Value], match_value: &str) -> Result<Option<ExistingEntry>> {
    let Some(first) = results.first() else {
        return Ok(None);
    };

    if results.len() > 1 {
        warn!(
            "{} destination entries match '{}', using the first",
            results.len(),
            match_value
        );
    }

    let document_id = first
        .get("documentId")
        .or_else(|| first.get("attributes").and_then(|a| a.get("documentId")))
        .map(value_text)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| MigrateError::MissingDocumentId(match_value.to_string()))?;

    Ok(Some(ExistingEntry { document_id }))
}
