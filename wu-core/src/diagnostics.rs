//! Out-of-band reporting for the template engine.
//!
//! Rendering never fails; problems it runs into are handed to a [`Diagnostics`] sink
//! instead of being embedded in the output. The binary wires this to `log` through
//! [`LogDiagnostics`]; tests can record the calls.

use std::fmt::Debug;

pub trait Diagnostics: Send + Sync + Debug {
    /// The document carried `response.error`; nothing was substituted.
    fn api_error(&self, kind: &str, description: &str);

    /// A template field could not be resolved and was left as-is.
    fn unresolved_field(&self, field: &str);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn api_error(&self, kind: &str, description: &str) {
        log::error!("Weather Underground API error: [{kind}] \"{description}\"");
    }

    fn unresolved_field(&self, field: &str) {
        log::warn!("Invalid parameter in template \"{field}\"");
    }
}
