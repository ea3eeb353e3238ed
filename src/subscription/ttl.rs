//! Latency annotation attached to every selected site.

use std::fmt;

use serde_json::Value;

/// String written for the untested sentinel.
const UNTESTED_MARKER: &str = "infinite";

/// Measured (or sentinel) latency of a site in milliseconds.
///
/// `Untested` orders after every numeric value, so sites that were kept
/// without a measurement always rank last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ttl {
    /// A latency in milliseconds (measured, or a fixed sentinel such as 9999)
    Millis(u64),
    /// No measurement was taken because the probe budget ran out
    Untested,
}

impl Ttl {
    /// JSON representation: an integer, or `"infinite"` for `Untested`.
    pub fn to_value(self) -> Value {
        match self {
            Ttl::Millis(ms) => Value::from(ms),
            Ttl::Untested => Value::from(UNTESTED_MARKER),
        }
    }

    /// Parses the JSON representation produced by [`Ttl::to_value`].
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(Ttl::Millis),
            Value::String(s) if s == UNTESTED_MARKER => Some(Ttl::Untested),
            _ => None,
        }
    }

    pub fn is_untested(self) -> bool {
        matches!(self, Ttl::Untested)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ttl::Millis(ms) => write!(f, "{}ms", ms),
            Ttl::Untested => f.write_str("untested"),
        }
    }
}
