//! Device failure classification

use thiserror::Error;

/// Why a device request failed.
///
/// Every variant is local to the request that produced it; none of them
/// invalidate the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Transport failure, connection refused, or timeout
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// The device answered with a non-2xx status
    #[error("device rejected the request (HTTP {status})")]
    Rejected { status: u16 },

    /// The body could not be decoded, had the wrong length, or held an
    /// out-of-range channel value
    #[error("malformed device response: {0}")]
    MalformedResponse(String),
}

impl DeviceError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Classify a reqwest failure.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Unreachable("request timed out".to_string())
        } else if let Some(status) = err.status() {
            Self::Rejected {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }

    /// Short label for status messages
    pub fn summary(&self) -> String {
        match self {
            DeviceError::Unreachable(_) => "device unreachable".to_string(),
            DeviceError::Rejected { status } => format!("rejected (HTTP {status})"),
            DeviceError::MalformedResponse(_) => "bad response".to_string(),
        }
    }
}
