//! Probe result types.

use std::fmt;

/// Why a probe produced no measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeFailure {
    /// No response within the probe timeout
    Timeout,
    /// TCP/TLS connection could not be established
    Connect,
    /// The request could not be built or sent (e.g. malformed endpoint URL)
    Request,
    /// Any other network-level error
    Other,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProbeFailure::Timeout => "timeout",
            ProbeFailure::Connect => "connect",
            ProbeFailure::Request => "request",
            ProbeFailure::Other => "other",
        })
    }
}

/// Latency verdict for one site.
///
/// A failed probe is a verdict, not an error: it feeds the selection policy
/// like any measurement does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// Round-trip time in milliseconds
    Measured(u64),
    /// The probe failed
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    pub fn latency_ms(self) -> Option<u64> {
        match self {
            ProbeOutcome::Measured(ms) => Some(ms),
            ProbeOutcome::Failed(_) => None,
        }
    }
}
