//! Bracket-token templates rendered against a [`WeatherDocument`].
//!
//! A token is `[` up to the next `]`. Field names resolve under `current_observation`,
//! except names prefixed with `display_location_`, which resolve under
//! `current_observation.display_location` with the prefix stripped.

use std::{collections::HashMap, sync::LazyLock};

use regex::{Captures, Regex};
use serde_json::Value;

use crate::{diagnostics::Diagnostics, model::WeatherDocument};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("token pattern is valid"));

const OBSERVATION: &str = "current_observation";
const DISPLAY_LOCATION: &str = "display_location";
const DISPLAY_LOCATION_PREFIX: &str = "display_location_";

/// A template with its distinct field names, in order of first appearance.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    source: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Template<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut fields: Vec<&str> = Vec::new();

        for caps in TOKEN.captures_iter(source) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            if !fields.contains(&name) {
                fields.push(name);
            }
        }

        Self { source, fields }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// Substitute every resolvable token.
    ///
    /// If the document reports an API error the template comes back untouched and the
    /// error goes to `diagnostics`. Unresolvable fields keep their literal token and are
    /// reported once per distinct name.
    pub fn render(&self, document: &WeatherDocument, diagnostics: &dyn Diagnostics) -> String {
        if let Some(err) = document.api_error() {
            diagnostics.api_error(&err.kind, &err.description);
            return self.source.to_owned();
        }

        if self.fields.is_empty() {
            return self.source.to_owned();
        }

        let resolved: HashMap<&str, String> = self
            .fields
            .iter()
            .filter_map(|&field| match resolve(document, field) {
                Some(value) => Some((field, value)),
                None => {
                    diagnostics.unresolved_field(field);
                    None
                }
            })
            .collect();

        TOKEN
            .replace_all(self.source, |caps: &Captures<'_>| match resolved.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_owned(),
            })
            .into_owned()
    }
}

/// Parse `template` and render it in one go.
pub fn render(template: &str, document: &WeatherDocument, diagnostics: &dyn Diagnostics) -> String {
    Template::parse(template).render(document, diagnostics)
}

fn resolve(document: &WeatherDocument, field: &str) -> Option<String> {
    let value = match field.strip_prefix(DISPLAY_LOCATION_PREFIX) {
        Some(subfield) => document.lookup(&[OBSERVATION, DISPLAY_LOCATION, subfield]),
        None => document.lookup(&[OBSERVATION, field]),
    }?;

    Some(to_text(value))
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
