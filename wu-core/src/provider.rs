use crate::{
    Config, Credential, Query, WeatherDocument, diagnostics::Diagnostics,
    provider::wunderground::WundergroundClient, template::Template,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod wunderground;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach the weather API")]
    Network(#[source] reqwest::Error),

    #[error("Weather API request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse weather API JSON")]
    Decode(#[source] serde_json::Error),
}

/// Anything that can answer a [`Query`] with a raw weather document.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, query: &Query) -> Result<WeatherDocument, FetchError>;
}

/// Build the Weather Underground client for `credential`, honoring a configured base URL.
pub fn source_from_config(credential: Credential, config: &Config) -> Box<dyn WeatherSource> {
    let client = match config.base_url.as_deref() {
        Some(base) => WundergroundClient::with_base_url(credential, base),
        None => WundergroundClient::new(credential),
    };

    Box::new(client)
}

/// Fetch `query` from `source` and render `template` against the result.
pub async fn format_report(
    source: &dyn WeatherSource,
    query: &Query,
    template: &str,
    diagnostics: &dyn Diagnostics,
) -> Result<String, FetchError> {
    let template = Template::parse(template);
    log::debug!(
        "format_report(features: {:?}, location: {}, fields: {:?})",
        query.features,
        query.location,
        template.fields()
    );

    let document = source.fetch(query).await?;

    Ok(template.render(&document, diagnostics))
}
