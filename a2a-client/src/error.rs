//! Error types for A2A client operations

use thiserror::Error;

/// Main error type for A2A client operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Network communication error
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// Remote agent answered with a JSON-RPC error envelope
    #[error("Remote agent error: {message}")]
    RemoteAgentError { message: String, code: Option<i32> },

    /// Invalid configuration or parameters
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl A2AError {
    /// Whether the connection to the agent itself failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, A2AError::NetworkError { .. })
    }

    /// Whether a payload arrived but could not be decoded.
    ///
    /// On a stream this affects only the one frame; later frames may still be valid.
    pub fn is_decode(&self) -> bool {
        matches!(self, A2AError::SerializationError { .. })
    }
}

/// Convenience type alias for Results with A2AError
pub type A2AResult<T> = std::result::Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(error: reqwest::Error) -> Self {
        A2AError::NetworkError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for A2AError {
    fn from(error: serde_json::Error) -> Self {
        A2AError::SerializationError {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_not_transport_errors() {
        let decode = A2AError::SerializationError {
            message: "expected value".to_string(),
        };
        let network = A2AError::NetworkError {
            message: "reset".to_string(),
        };

        assert!(decode.is_decode());
        assert!(!decode.is_transport());
        assert!(network.is_transport());
        assert!(!network.is_decode());
    }
}
