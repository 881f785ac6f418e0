//! # strapi-migrate
//!
//! Idempotent migration of published entries between two Strapi-style
//! content APIs.
//!
//! Entries are read page by page from the source, matched against the
//! destination by a configurable field, and then created or updated. Every
//! processed entry gets one row in a CSV report:
//!
//! - **Upsert by match field**: `PUT` when the destination already has the
//!   entry, `POST` otherwise
//! - **Dry run**: compute the actions without issuing writes
//! - **Per-entry failures**: a failing entry is reported, the batch continues
//!
//! ## Example
//!
//! ```rust,no_run
//! use strapi_migrate::{Config, MigrationConfig, Orchestrator};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> strapi_migrate::Result<()> {
//!     Config::load_env_file(".strapi.env")?;
//!     let config = Config::from_env(MigrationConfig::new("agenda-formats", "agendaFormatName"))?;
//!     let result = Orchestrator::new(config)?.run().await?;
//!     println!("Migrated {} entries", result.entries_total);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod payload;
pub mod report;
pub mod source;
pub mod target;

// Re-exports for convenient access
pub use client::ApiClient;
pub use config::{Config, EndpointConfig, MigrationConfig};
pub use error::{MigrateError, Result};
pub use orchestrator::{MigrationResult, Orchestrator};
pub use payload::PayloadSanitizer;
pub use report::{Action, Report, ReportRow};
pub use source::{Entry, SourceReader};
pub use target::{ExistingEntry, TargetWriter, UpsertAction};
