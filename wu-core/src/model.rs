use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to ask the API for: an ordered list of features and a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub features: Vec<String>,
    pub location: String,
}

impl Query {
    pub fn new<I, S>(features: I, location: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
            location: location.into(),
        }
    }
}

/// Error reported by the API inside an otherwise valid response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: String,
    pub description: String,
}

/// Raw JSON returned by the API. Kept untyped: templates may reference any field.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDocument(Value);

impl WeatherDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `response.error`, if present.
    pub fn api_error(&self) -> Option<ApiError> {
        let error = self.0.get("response")?.get("error")?;

        let text = |key: &str| error.get(key).and_then(Value::as_str).map(str::to_owned);

        Some(ApiError {
            kind: text("type").unwrap_or_else(|| "unknown".to_string()),
            description: text("description").unwrap_or_default(),
        })
    }

    /// Walk `path` from the document root. A JSON `null` counts as missing.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.0, |node, key| node.get(*key))
            .filter(|value| !value.is_null())
    }
}

impl From<Value> for WeatherDocument {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_reads_type_and_description() {
        let doc = WeatherDocument::new(json!({
            "response": {
                "error": { "type": "keynotfound", "description": "this key does not exist" }
            }
        }));

        let err = doc.api_error().expect("error shape should be detected");
        assert_eq!(err.kind, "keynotfound");
        assert_eq!(err.description, "this key does not exist");
    }

    #[test]
    fn api_error_tolerates_missing_details() {
        let doc = WeatherDocument::new(json!({ "response": { "error": {} } }));

        let err = doc.api_error().expect("bare error object still counts");
        assert_eq!(err.kind, "unknown");
        assert_eq!(err.description, "");
    }

    #[test]
    fn success_document_has_no_api_error() {
        let doc = WeatherDocument::new(json!({
            "response": { "version": "0.1" },
            "current_observation": { "weather": "Clear" }
        }));

        assert!(doc.api_error().is_none());
    }

    #[test]
    fn lookup_walks_nested_keys() {
        let doc = WeatherDocument::new(json!({
            "current_observation": { "display_location": { "full": "Philadelphia, PA" } }
        }));

        let full = doc.lookup(&["current_observation", "display_location", "full"]);
        assert_eq!(full, Some(&json!("Philadelphia, PA")));
        assert!(doc.lookup(&["current_observation", "nope"]).is_none());
        assert!(doc.lookup(&["current_observation", "display_location", "full", "x"]).is_none());
    }

    #[test]
    fn lookup_treats_null_as_missing() {
        let doc = WeatherDocument::new(json!({ "current_observation": { "wind_gust_mph": null } }));

        assert!(doc.lookup(&["current_observation", "wind_gust_mph"]).is_none());
    }

    #[test]
    fn query_keeps_feature_order_and_duplicates() {
        let query = Query::new(["conditions", "astronomy", "conditions"], "PA/Philadelphia");

        assert_eq!(query.features, vec!["conditions", "astronomy", "conditions"]);
        assert_eq!(query.location, "PA/Philadelphia");
    }
}
