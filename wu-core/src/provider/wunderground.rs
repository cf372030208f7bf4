use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{Credential, Query, WeatherDocument};

use super::{FetchError, WeatherSource};

pub const DEFAULT_BASE_URL: &str = "http://api.wunderground.com/api";

#[derive(Debug, Clone)]
pub struct WundergroundClient {
    credential: Credential,
    base_url: String,
    http: Client,
}

impl WundergroundClient {
    pub fn new(credential: Credential) -> Self {
        Self::with_base_url(credential, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credential: Credential, base_url: impl Into<String>) -> Self {
        Self {
            credential,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, query: &Query) -> String {
        build_url(&self.base_url, &self.credential, &query.features, &query.location)
    }
}

/// `<base>/<key>/<feature>/.../q/<location>.json`
///
/// Features keep their order and duplicates. The location is inserted as-is since it is
/// itself a path such as `PA/Philadelphia`.
pub fn build_url(base: &str, credential: &Credential, features: &[String], location: &str) -> String {
    format!(
        "{}/{}/{}/q/{}.json",
        base.trim_end_matches('/'),
        credential.expose(),
        features.join("/"),
        location
    )
}

#[async_trait]
impl WeatherSource for WundergroundClient {
    async fn fetch(&self, query: &Query) -> Result<WeatherDocument, FetchError> {
        let url = self.url_for(query);
        log::debug!("Calling API using url {url}");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(FetchError::Decode)?;

        if log::log_enabled!(log::Level::Trace) {
            let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.clone());
            log::trace!("Result:\n{pretty}\n");
        }

        Ok(WeatherDocument::new(value))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
