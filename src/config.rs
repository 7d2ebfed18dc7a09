use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;

use crate::parsing::{parse_namespaces, LabelSelector};
use crate::types::{BackendConfig, Config, ThresholdConfig};

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    // Must be present, but an empty filter is allowed and selects everything.
    let check_labels = env
        .get_var("CHECK_LABELS")
        .ok_or_else(|| anyhow!("CHECK_LABELS must be set (e.g. 'aggregate=web')"))?;
    let entity_labels = env.get_var("ENTITY_LABELS").unwrap_or_default();

    let namespaces = parse_namespaces(&env.get_var("NAMESPACES").unwrap_or_else(|| "default".to_string()));
    if namespaces.is_empty() {
        return Err(anyhow!("NAMESPACES must name at least one namespace (comma-separated)"));
    }

    let thresholds = ThresholdConfig {
        warn_percent: threshold(env, "WARN_PERCENT")?,
        crit_percent: threshold(env, "CRIT_PERCENT")?,
        warn_count: threshold(env, "WARN_COUNT")?,
        crit_count: threshold(env, "CRIT_COUNT")?,
    };

    let api_port: u16 = env.get_var("API_PORT")
        .unwrap_or_else(|| "8080".to_string())
        .trim()
        .parse()
        .context("Invalid API_PORT")?;

    let request_timeout_secs: u64 = env.get_var("REQUEST_TIMEOUT_SECS")
        .unwrap_or_else(|| "10".to_string())
        .parse()
        .unwrap_or(10);

    let backend = BackendConfig {
        api_host: env.get_var("API_HOST").unwrap_or_else(|| "http://127.0.0.1".to_string()),
        api_port,
        api_user: env.get_var("API_USER").unwrap_or_else(|| "admin".to_string()),
        api_pass: env.get_var("API_PASS").unwrap_or_else(|| "P@ssw0rd!".to_string()),
        api_key: non_empty(env.get_var("API_KEY")),
        trusted_ca_file: non_empty(env.get_var("TRUSTED_CA_FILE")),
        request_timeout_secs,
    };

    Ok(Config {
        namespaces,
        check_labels: LabelSelector::parse(&check_labels),
        entity_labels: LabelSelector::parse(&entity_labels),
        thresholds,
        backend,
    })
}

fn threshold<E: EnvironmentProvider>(env: &E, key: &str) -> Result<u32> {
    match env.get_var(key) {
        Some(v) if !v.trim().is_empty() => v.trim().parse().with_context(|| format!("Invalid {}", key)),
        _ => Ok(0),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
