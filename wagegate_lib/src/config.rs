//! Gateway configuration loaded from `WAGEGATE_*` environment variables.

use std::time::Duration;

use datausa_api::{ClientConfig, DEFAULT_DATA_URL, DEFAULT_SEARCH_URL};

const DEFAULT_PORT: u16 = 4322;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PROBE_DELAY_MS: u64 = 500;
const DEFAULT_REFERENCE_YEAR: &str = "2022";

/// Runtime settings for the gateway.
///
/// Unset or unparseable variables fall back to their defaults.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin; `None` allows any origin.
    pub allowed_origin: Option<String>,
    pub search_url: String,
    pub data_url: String,
    pub request_timeout: Duration,
    /// Probe every occupation for wage data while building the catalog.
    pub validate_catalog: bool,
    /// Pause between consecutive validation probes.
    pub probe_delay: Duration,
    /// Year used for the default state-by-state view.
    pub reference_year: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            allowed_origin: None,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            validate_catalog: false,
            probe_delay: Duration::from_millis(DEFAULT_PROBE_DELAY_MS),
            reference_year: DEFAULT_REFERENCE_YEAR.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            host: text("WAGEGATE_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "WAGEGATE_PORT").unwrap_or(defaults.port),
            allowed_origin: text("WAGEGATE_ALLOWED_ORIGIN").filter(|v| v != "*"),
            search_url: text("WAGEGATE_SEARCH_URL").unwrap_or(defaults.search_url),
            data_url: text("WAGEGATE_DATA_URL").unwrap_or(defaults.data_url),
            request_timeout: parsed(&lookup, "WAGEGATE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            validate_catalog: lookup("WAGEGATE_VALIDATE_CATALOG")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.validate_catalog),
            probe_delay: parsed(&lookup, "WAGEGATE_PROBE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.probe_delay),
            reference_year: text("WAGEGATE_REFERENCE_YEAR").unwrap_or(defaults.reference_year),
        }
    }

    /// Upstream client settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            search_url: self.search_url.clone(),
            data_url: self.data_url.clone(),
            timeout: self.request_timeout,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|val| val.trim().parse::<T>().ok())
}

/// Accepts the usual spellings of a boolean flag.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
