//! REST client for the terminology service

use crate::error::{Error, Result};
use crate::models::{Concept, ConceptSearchResponse};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`TerminologyClient`].
#[derive(Clone, Serialize, Deserialize)]
pub struct TerminologyClientConfig {
    /// REST root of the service, e.g. `https://host/openmrs/ws/rest/v1`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl TerminologyClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            username: None,
            password: None,
        }
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl std::fmt::Debug for TerminologyClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminologyClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Client for the concept and patient-identifier-type endpoints.
#[derive(Debug, Clone)]
pub struct TerminologyClient {
    client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl TerminologyClient {
    /// Create a client from connection settings.
    pub fn new(config: TerminologyClientConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| Error::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
        })
    }

    /// Create a client with default settings for the given REST root.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(TerminologyClientConfig::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search concepts by a comma-separated reference list (UUIDs or `source:code` pairs).
    pub async fn search_concepts(
        &self,
        references: &str,
        representation: &str,
    ) -> Result<Vec<Concept>> {
        let url = format!("{}/concept", self.base_url);
        tracing::debug!(references, "Searching concepts");

        let response = self
            .get(&url)
            .query(&[("references", references), ("v", representation)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                status = response.status().as_u16(),
                references,
                "Concept search failed"
            );
            return Err(Error::Status {
                endpoint: url,
                status: response.status().as_u16(),
            });
        }

        let body: ConceptSearchResponse = response.json().await?;
        Ok(body.results)
    }

    /// Fetch a patient identifier type by id. `None` when the service has no such type.
    pub async fn patient_identifier_type(&self, identifier_type: &str) -> Result<Option<Value>> {
        let url = format!(
            "{}/patientidentifiertype/{}",
            self.base_url,
            urlencoding::encode(identifier_type)
        );
        tracing::debug!(identifier_type, "Fetching patient identifier type");

        let response = self.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(Error::Status {
                endpoint: url,
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str::<Value>(&text)?;
        Ok((!is_falsy(&value)).then_some(value))
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.username {
            Some(username) => request.basic_auth(username, self.password.as_ref()),
            None => request,
        }
    }
}

/// `null`, `false`, `0` and `""` carry no identifier type.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
