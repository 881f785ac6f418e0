//! Configuration type definitions.

use std::fmt;
use std::path::PathBuf;

use crate::payload::DEFAULT_PAYLOAD_FIELDS;

/// Environment variable holding the source API base URL.
pub const SOURCE_API_VAR: &str = "SOURCE_API";
/// Environment variable holding the source API bearer token.
pub const SOURCE_TOKEN_VAR: &str = "SOURCE_TOKEN";
/// Environment variable holding the destination API base URL.
pub const DEST_API_VAR: &str = "DEST_API";
/// Environment variable holding the destination API bearer token.
pub const DEST_TOKEN_VAR: &str = "DEST_TOKEN";

/// Default dotenv file consulted before reading the environment.
pub const DEFAULT_ENV_FILE: &str = ".strapi.env";

/// Default report file name.
pub const DEFAULT_REPORT_FILE: &str = "migration_report.csv";

/// Default number of entries requested per source page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Root configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source content API (read side).
    pub source: EndpointConfig,

    /// Destination content API (write side).
    pub destination: EndpointConfig,

    /// Migration behavior configuration.
    pub migration: MigrationConfig,
}

/// Base URL and credentials for one content API instance.
#[derive(Clone)]
pub struct EndpointConfig {
    /// Base URL without the `/api` suffix, e.g. `https://cms.example.com`.
    pub base_url: String,

    /// Bearer token sent with every request.
    pub token: String,
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Build `{base_url}/api/{path}`, tolerating a trailing slash on the base.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Migration behavior configuration.
/// Optional fields distinguish "not set" (use default) from "explicitly set".
#[derive(Debug, Clone, Default)]
pub struct MigrationConfig {
    /// Collection to migrate (plural API id, e.g. `agenda-formats`).
    pub collection: String,

    /// Attribute used to correlate source and destination entries.
    pub match_field: String,

    /// Compute actions without issuing POST/PUT requests.
    pub dry_run: bool,

    /// Entries per source page (default: 100).
    pub page_size: Option<usize>,

    /// Fields copied into the destination payload.
    pub payload_fields: Option<Vec<String>>,

    /// Where the CSV report is written (default: `migration_report.csv`).
    pub report_path: Option<PathBuf>,
}

impl MigrationConfig {
    pub fn new(collection: impl Into<String>, match_field: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            match_field: match_field.into(),
            ..Default::default()
        }
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn get_payload_fields(&self) -> Vec<String> {
        match &self.payload_fields {
            Some(fields) => fields.clone(),
            None => DEFAULT_PAYLOAD_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn get_report_path(&self) -> PathBuf {
        self.report_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE))
    }
}
