use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the gridseries workspace.
///
/// Distinguishes request validation failures, the recoverable upstream
/// "no data in range" condition, provider-tagged transport failures carrying an
/// HTTP-style status, and an aggregate for multi-fetch attempts.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GridError {
    /// The requested capability is not implemented by any registered connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "network-data").
        capability: String,
    },

    /// Issues with the returned upstream payload (wrong shape, unparseable values).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid request argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The upstream provider rejected or failed the call.
    #[error("{connector} failed{}: {msg}", status_suffix(.status))]
    Provider {
        /// Connector name that failed.
        connector: String,
        /// HTTP-style status reported by the provider, when it gave one.
        status: Option<u16>,
        /// Human-readable error message.
        msg: String,
    },

    /// The provider had no data for the requested range.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing data, e.g. "market price for NEM".
        what: String,
    },

    /// Several upstream calls failed; contains the individual failures.
    ///
    /// The router sends each fetch to a single connector and never builds one
    /// itself. A connector that tries several endpoints for one request may
    /// return it; it counts as "no data" only when every member does.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<GridError>),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl GridError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `Provider` error with the connector name, optional status and message.
    pub fn provider(connector: impl Into<String>, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Provider {
            connector: connector.into(),
            status,
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing data.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true for the recoverable "no data in range" condition.
    ///
    /// Aggregates qualify only when every inner failure is itself a no-data error.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::AllProvidersFailed(inner) => {
                !inner.is_empty() && inner.iter().all(Self::is_no_data)
            }
            _ => false,
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Capability absence and no-data conditions are not actionable. Aggregates
    /// are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } => false,
            Self::AllProvidersFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// HTTP-style status code a service layer should answer with.
    ///
    /// Provider failures keep the status the provider reported and fall back to 500.
    /// Aggregates report the status of their first actionable member.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArg(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Unsupported { .. } => 501,
            Self::Provider { status, .. } => status.unwrap_or(500),
            Self::AllProvidersFailed(inner) => inner
                .iter()
                .find(|e| e.is_actionable())
                .or_else(|| inner.first())
                .map_or(500, Self::status_code),
            Self::Data(_) | Self::Other(_) => 500,
        }
    }
}
