use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::types::{AccessToken, BackendConfig, Event};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to read trusted CA file {path}: {source}")]
    ReadCa {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Credentials attached to every event query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Bearer(String),
    ApiKey(String),
}

impl Session {
    pub fn authorization(&self) -> String {
        match self {
            Session::Bearer(token) => format!("Bearer {}", token),
            Session::ApiKey(key) => format!("Key {}", key),
        }
    }
}

pub struct SensuClient {
    http: reqwest::Client,
    base_url: String,
    config: BackendConfig,
}

impl SensuClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs));

        // Extra roots only matter for TLS endpoints
        if config.is_https() {
            if let Some(path) = config.trusted_ca_file.as_deref() {
                let pem = std::fs::read(path).map_err(|source| BackendError::ReadCa {
                    path: path.to_string(),
                    source,
                })?;
                builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
            }
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url(),
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Acquires a session. An API key is used as-is; otherwise the user and
    /// password are exchanged for an access token at `/auth`.
    pub async fn authenticate(&self) -> Result<Session, BackendError> {
        if let Some(key) = &self.config.api_key {
            debug!("using API key authentication");
            return Ok(Session::ApiKey(key.clone()));
        }

        let url = format!("{}/auth", self.base_url);
        debug!("authenticate URL: {}", url);
        let res = self
            .http
            .get(&url)
            .basic_auth(&self.config.api_user, Some(&self.config.api_pass))
            .send()
            .await?;
        let token: AccessToken = read_json(&url, res).await?;

        match expiry(&token) {
            Some(at) if at <= Utc::now() => warn!("access token already expired at {}", at),
            Some(at) => debug!("access token expires at {}", at),
            None => {}
        }

        Ok(Session::Bearer(token.access_token))
    }

    pub async fn list_events(&self, session: &Session, namespace: &str) -> Result<Vec<Event>, BackendError> {
        let url = format!("{}/api/core/v2/namespaces/{}/events", self.base_url, namespace);
        debug!("listing events: {}", url);
        let res = self
            .http
            .get(&url)
            .header(AUTHORIZATION, session.authorization())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        read_json(&url, res).await
    }
}

fn expiry(token: &AccessToken) -> Option<DateTime<Utc>> {
    if token.expires_at <= 0 {
        return None;
    }
    Utc.timestamp_opt(token.expires_at, 0).single()
}

async fn read_json<T>(url: &str, res: reqwest::Response) -> Result<T, BackendError>
where
    T: serde::de::DeserializeOwned,
{
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        error!("request to {} failed: {} - {}", url, status, body);
        return Err(BackendError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|source| BackendError::Decode {
        url: url.to_string(),
        source,
    })
}
