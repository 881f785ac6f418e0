//! Migration orchestrator - main workflow coordinator.
//!
//! A run has three phases, executed strictly in order with one request in
//! flight at a time:
//!
//! 1. fetch every published source entry (any error aborts the run),
//! 2. upsert each entry into the destination (errors are recorded per entry),
//! 3. write the CSV report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::client::ApiClient;
use crate::config::{Config, MigrationConfig};
use crate::error::Result;
use crate::payload::PayloadSanitizer;
use crate::report::{Action, Report, ReportRow};
use crate::source::{fetch_entries, Entry, SourceReader};
use crate::target::{TargetWriter, UpsertAction};

/// Migration orchestrator.
pub struct Orchestrator<S = ApiClient, T = ApiClient> {
    migration: MigrationConfig,
    sanitizer: PayloadSanitizer,
    source: S,
    target: T,
}

/// Result of a migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationResult {
    /// Unique run identifier.
    pub run_id: String,

    /// Collection that was migrated.
    pub collection: String,

    /// Field used for matching.
    pub match_field: String,

    /// Final status: `completed` or `completed_with_failures`.
    pub status: String,

    /// Whether mutating requests were suppressed.
    pub dry_run: bool,

    /// When the migration started.
    pub started_at: DateTime<Utc>,

    /// When the migration completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Entries fetched from the source (one report row each).
    pub entries_total: usize,

    /// Entries created (or that would be, in dry-run mode).
    pub created: usize,

    /// Entries updated (or that would be, in dry-run mode).
    pub updated: usize,

    /// Entries that failed.
    pub failed: usize,

    /// Where the report was written.
    pub report_path: PathBuf,
}

impl MigrationResult {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Orchestrator {
    /// Create an orchestrator talking HTTP to the configured endpoints.
    pub fn new(config: Config) -> Result<Self> {
        let source = ApiClient::new(config.source.clone())?;
        let target = ApiClient::new(config.destination.clone())?;
        Ok(Self::with_clients(config.migration, source, target))
    }
}

impl<S, T> Orchestrator<S, T>
where
    S: SourceReader,
    T: TargetWriter,
{
    /// Create an orchestrator over arbitrary source and target implementations.
    pub fn with_clients(migration: MigrationConfig, source: S, target: T) -> Self {
        let sanitizer = PayloadSanitizer::new(migration.get_payload_fields());
        Self {
            migration,
            sanitizer,
            source,
            target,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Run the migration and write the report.
    pub async fn run(&self) -> Result<MigrationResult> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let collection = &self.migration.collection;

        info!("Starting migration run: {}", run_id);

        info!("Phase 1: Fetching published entries from {}", collection);
        let entries = fetch_entries(
            &self.source,
            collection,
            &self.migration.match_field,
            self.migration.get_page_size(),
        )
        .await?;
        info!("Total published entries fetched: {}", entries.len());

        info!(
            "Phase 2: Upserting {} entries (dry run: {})",
            entries.len(),
            self.migration.dry_run
        );
        let report = self.migrate_entries(&entries).await;

        let report_path = self.migration.get_report_path();
        info!("Phase 3: Writing report");
        report.write_csv(&report_path)?;

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;
        let failed = report.count(Action::Failed);

        let result = MigrationResult {
            run_id,
            collection: collection.clone(),
            match_field: self.migration.match_field.clone(),
            status: if failed > 0 {
                "completed_with_failures".to_string()
            } else {
                "completed".to_string()
            },
            dry_run: self.migration.dry_run,
            started_at,
            completed_at,
            duration_seconds: duration,
            entries_total: report.len(),
            created: report.count(Action::Created),
            updated: report.count(Action::Updated),
            failed,
            report_path,
        };

        info!(
            "Migration {}: {} entries ({} created, {} updated, {} failed) in {:.1}s",
            result.status,
            result.entries_total,
            result.created,
            result.updated,
            result.failed,
            result.duration_seconds
        );

        Ok(result)
    }

    /// Upsert every entry in order, producing exactly one row per entry.
    pub async fn migrate_entries(&self, entries: &[Entry]) -> Report {
        let mut report = Report::new();
        for entry in entries {
            report.push(self.migrate_entry(entry).await);
        }
        report
    }

    /// Upsert one entry, converting any error into a `failed` row.
    pub async fn migrate_entry(&self, entry: &Entry) -> ReportRow {
        let label = entry.label();
        let dry_run = self.migration.dry_run;
        info!("Processing entry: {}", label);

        match self.upsert(entry, &label).await {
            Ok(action) => ReportRow::success(label, action, dry_run),
            Err(e) => {
                error!("Failed to migrate {}: {}", label, e);
                ReportRow::failure(label, e.to_string(), dry_run)
            }
        }
    }

    async fn upsert(&self, entry: &Entry, match_value: &str) -> Result<Action> {
        let collection = &self.migration.collection;
        let body = self.sanitizer.body(entry)?;

        let existing = self
            .target
            .find_existing(collection, &self.migration.match_field, match_value)
            .await?;

        match UpsertAction::from(existing) {
            UpsertAction::Update { document_id } => {
                info!("Updating existing entry: {} ({})", match_value, document_id);
                if self.migration.dry_run {
                    debug!("Dry run: skipping PUT {}/{}", collection, document_id);
                } else {
                    self.target
                        .update_entry(collection, &document_id, &body)
                        .await?;
                }
                Ok(Action::Updated)
            }
            UpsertAction::Create => {
                info!("Creating new entry: {}", match_value);
                if self.migration.dry_run {
                    debug!("Dry run: skipping POST {}", collection);
                } else {
                    self.target.create_entry(collection, &body).await?;
                }
                Ok(Action::Created)
            }
        }
    }
}
