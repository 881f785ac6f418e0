//! HTTP client for a Strapi-style content REST API.
//!
//! One [`ApiClient`] wraps one endpoint (base URL + bearer token) and
//! implements both [`SourceReader`] and [`TargetWriter`], so the same type
//! serves the source and destination instances.
//!
//! Every non-2xx response becomes [`MigrateError::Http`]; transport failures
//! become [`MigrateError::Network`]. Nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::EndpointConfig;
use crate::error::{MigrateError, Result};
use crate::source::SourceReader;
use crate::target::{first_match, ExistingEntry, TargetWriter};

/// Content API client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoint: EndpointConfig,
}

impl ApiClient {
    /// Create a client with reqwest's default timeouts.
    pub fn new(endpoint: EndpointConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("strapi-migrate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, endpoint })
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = self.endpoint.api_url(path);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| MigrateError::Config(format!("invalid API URL '{}': {}", raw, e)))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.endpoint.token)
    }

    /// Send a request and turn non-success statuses into typed errors.
    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Response> {
        debug!("{} {}", method, url);
        let mut request = self.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(MigrateError::http(method.as_str(), url.as_str(), status.as_u16(), text))
    }

    /// GET a list endpoint and return its `data` array.
    async fn get_data(&self, url: Url) -> Result<Vec<Value>> {
        let response = self.send(Method::GET, url.clone(), None).await?;
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| MigrateError::invalid_response(url.as_str(), e.to_string()))?;

        match body.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(MigrateError::invalid_response(
                url.as_str(),
                format!("expected 'data' to be an array, got {}", other),
            )),
        }
    }
}

#[async_trait]
impl SourceReader for ApiClient {
    async fn fetch_page(
        &self,
        collection: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Value>> {
        let page_size = page_size.to_string();
        let page = page.to_string();
        let url = self.url(
            collection,
            &[
                ("pagination[pageSize]", page_size.as_str()),
                ("pagination[page]", page.as_str()),
                ("filters[publishedAt][$notNull]", "true"),
                ("populate", "*"),
            ],
        )?;
        self.get_data(url).await
    }
}

#[async_trait]
impl TargetWriter for ApiClient {
    async fn find_existing(
        &self,
        collection: &str,
        match_field: &str,
        match_value: &str,
    ) -> Result<Option<ExistingEntry>> {
        let filter = format!("filters[{}][$eq]", match_field);
        let url = self.url(collection, &[(filter.as_str(), match_value)])?;
        let results = self.get_data(url).await?;
        debug!("Existing entry data for '{}': {} results", match_value, results.len());
        first_match(&results, match_value)
    }

    async fn create_entry(&self, collection: &str, body: &Value) -> Result<()> {
        let url = self.url(collection, &[])?;
        self.send(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    async fn update_entry(&self, collection: &str, document_id: &str, body: &Value) -> Result<()> {
        if matches!(document_id, "" | "." | "..") {
            return Err(MigrateError::invalid_response(
                self.endpoint.api_url(collection),
                format!("unusable documentId '{}'", document_id),
            ));
        }

        // The id is pushed as a single percent-encoded segment so reserved
        // characters can never leave `{collection}/`.
        let mut url = self.url(collection, &[])?;
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|()| MigrateError::Config(format!("API URL '{}' cannot take a path", base)))?
            .push(document_id);
        self.send(Method::PUT, url, Some(body)).await?;
        Ok(())
    }
}
