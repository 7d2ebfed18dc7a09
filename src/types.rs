use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

use crate::parsing::LabelSelector;

#[derive(Debug, Clone)]
pub struct Config {
    pub namespaces: Vec<String>,
    pub check_labels: LabelSelector,
    pub entity_labels: LabelSelector,
    pub thresholds: ThresholdConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_host: String,
    pub api_port: u16,
    pub api_user: String,
    pub api_pass: String,
    pub api_key: Option<String>,
    pub trusted_ca_file: Option<String>,
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.api_host.trim_end_matches('/'), self.api_port)
    }

    pub fn is_https(&self) -> bool {
        self.api_host.starts_with("https://")
    }
}

/// Alerting thresholds. A value of `0` disables that threshold.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    pub warn_percent: u32,
    pub crit_percent: u32,
    pub warn_count: u32,
    pub crit_count: u32,
}

impl ThresholdConfig {
    pub fn enabled(value: u32) -> Option<u32> {
        (value != 0).then_some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Status::Ok,
            1 => Status::Warning,
            2 => Status::Critical,
            _ => Status::Unknown,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Warning => write!(f, "WARNING"),
            Status::Critical => write!(f, "CRITICAL"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckRecord {
    #[serde(rename = "metadata", alias = "objectMeta", default)]
    pub meta: ObjectMeta,
    #[serde(default)]
    pub status: i64,
}

impl CheckRecord {
    pub fn status(&self) -> Status {
        Status::from_code(self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "metadata", alias = "objectMeta", default)]
    pub meta: ObjectMeta,
}

/// A single event as returned by `/api/core/v2/namespaces/{ns}/events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub check: CheckRecord,
    #[serde(default)]
    pub entity: EntityRecord,
}

/// Token pair returned by the backend's `/auth` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
