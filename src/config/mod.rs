/// Application configuration module
use std::env;
use std::time::Duration;

pub const DEFAULT_API_HOST: &str = "api.nasa.gov";
pub const DEFAULT_API_PATH: &str = "/planetary/apod";
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub nasa_api_key: String,
    pub api_host: String,
    pub api_path: String,
    pub http_timeout_seconds: u64,
}

/// Static upstream credential, fixed for the process lifetime
#[derive(Clone)]
pub struct Credential {
    api_key: String,
    host: String,
    path: String,
}

impl Credential {
    pub fn new(
        api_key: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

// Keep the key out of logs and panics.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"***")
            .field("host", &self.host)
            .field("path", &self.path)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let nasa_api_key = env::var("NASA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string());
        let api_host = env::var("APOD_API_HOST").unwrap_or_else(|_| DEFAULT_API_HOST.to_string());
        let api_path = env::var("APOD_API_PATH").unwrap_or_else(|_| DEFAULT_API_PATH.to_string());

        if api_key_is_blank(&nasa_api_key) {
            anyhow::bail!("NASA_API_KEY must not be empty");
        }

        Ok(Self {
            nasa_api_key,
            api_host,
            api_path,
            http_timeout_seconds: env_u64("HTTP_TIMEOUT_SECONDS", DEFAULT_HTTP_TIMEOUT_SECONDS),
        })
    }

    pub fn credential(&self) -> Credential {
        Credential::new(&self.nasa_api_key, &self.api_host, &self.api_path)
    }

    /// Request deadline; a zero setting falls back to the default
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(positive_or(
            self.http_timeout_seconds,
            DEFAULT_HTTP_TIMEOUT_SECONDS,
        ))
    }
}

fn api_key_is_blank(key: &str) -> bool {
    key.trim().is_empty()
}

fn positive_or(value: u64, default: u64) -> u64 {
    if value == 0 {
        default
    } else {
        value
    }
}

fn parse_positive_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    parse_positive_u64(env::var(key).ok().as_deref(), default)
}
