//! A single site entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ttl::Ttl;

const FIELD_NAME: &str = "name";
const FIELD_API: &str = "api";
const FIELD_TTL: &str = "ttl";

/// One named network endpoint from a subscription.
///
/// The entry is kept as an opaque JSON object: only `name`, `api` and the
/// `ttl` annotation are interpreted, every other field is carried through
/// untouched and in its original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Site(Map<String, Value>);

impl Site {
    pub fn new(fields: Map<String, Value>) -> Self {
        Site(fields)
    }

    /// Display name, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get(FIELD_NAME).and_then(Value::as_str)
    }

    /// Endpoint URL, if present and a string.
    ///
    /// This is the site's identity for deduplication.
    pub fn api(&self) -> Option<&str> {
        self.0.get(FIELD_API).and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: &str) {
        self.0
            .insert(FIELD_NAME.to_string(), Value::from(name.to_string()));
    }

    pub fn ttl(&self) -> Option<Ttl> {
        self.0.get(FIELD_TTL).and_then(Ttl::from_value)
    }

    pub fn set_ttl(&mut self, ttl: Ttl) {
        self.0.insert(FIELD_TTL.to_string(), ttl.to_value());
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Short label for log lines: the name, falling back to the endpoint.
    pub fn label(&self) -> &str {
        self.name().or_else(|| self.api()).unwrap_or("<unnamed>")
    }
}

impl From<Map<String, Value>> for Site {
    fn from(fields: Map<String, Value>) -> Self {
        Site(fields)
    }
}
