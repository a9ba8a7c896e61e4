/// External API clients module
use crate::config::{AppConfig, Credential};
use crate::domain::{Apod, ApodPayload, ResultShape};
use crate::errors::{FetchError, FetchResult};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Query parameter carrying the credential, always set by the client
pub const API_KEY_PARAM: &str = "api_key";

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        Self::with_user_agent(timeout, "apod-feed/0.1")
    }

    /// Build failures are configuration faults, not transport ones
    pub fn with_user_agent(timeout: Duration, user_agent: &str) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Config(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Typed client for the APOD endpoint
pub struct ApodClient {
    http_client: HttpClient,
    credential: Credential,
    base_url: Url,
}

impl ApodClient {
    /// Client for `https://{host}{path}`; the scheme is not configurable
    pub fn new(credential: Credential, timeout: Duration) -> FetchResult<Self> {
        Self::build("https", credential, timeout)
    }

    /// Plain-http client for loopback upstreams in tests
    #[cfg(test)]
    pub(crate) fn with_scheme(
        scheme: &str,
        credential: Credential,
        timeout: Duration,
    ) -> FetchResult<Self> {
        Self::build(scheme, credential, timeout)
    }

    fn build(scheme: &str, credential: Credential, timeout: Duration) -> FetchResult<Self> {
        let base_url = Url::parse(&format!("{}://{}", scheme, credential.host()))
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", credential.host(), e)))?;
        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err(FetchError::InvalidEndpoint(credential.host().to_string()));
        }
        if !credential.path().starts_with('/') {
            return Err(FetchError::InvalidEndpoint(format!(
                "path must be absolute: {}",
                credential.path()
            )));
        }

        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            credential,
            base_url,
        })
    }

    pub fn from_config(config: &AppConfig) -> FetchResult<Self> {
        Self::new(config.credential(), config.http_timeout())
    }

    /// Compose the signed request URL; the credential's key replaces any caller-supplied one
    pub fn build_url(&self, path: &str, params: &BTreeMap<String, String>) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter().filter(|(k, _)| k.as_str() != API_KEY_PARAM) {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(API_KEY_PARAM, self.credential.api_key());
        }
        url
    }

    /// Single GET on `path`, decoding a 200 body into `T`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> FetchResult<T> {
        let url = self.build_url(path, params);
        debug!("GET {} ({} query params)", path, params.len());

        let resp = self.http_client.get_client().get(url).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            debug!("{} answered with status {}", path, status);
            return Err(FetchError::EmptyResult { status });
        }

        let body = resp.bytes().await?;
        let model = serde_json::from_slice(&body)?;
        Ok(model)
    }

    /// Ranged query, upstream answers with an array
    pub async fn fetch_list(&self, params: &BTreeMap<String, String>) -> FetchResult<Vec<Apod>> {
        self.fetch(self.credential.path(), params).await
    }

    /// Single-date query, upstream answers with one object
    pub async fn fetch_single(&self, params: &BTreeMap<String, String>) -> FetchResult<Apod> {
        self.fetch(self.credential.path(), params).await
    }

    pub async fn fetch_shape(
        &self,
        shape: ResultShape,
        params: &BTreeMap<String, String>,
    ) -> FetchResult<ApodPayload> {
        match shape {
            ResultShape::List => self.fetch_list(params).await.map(ApodPayload::List),
            ResultShape::Single => self.fetch_single(params).await.map(ApodPayload::Single),
        }
    }
}
