//! Client error types

use snapclass_cart::CheckoutError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (transport level, no response)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required
    #[error("Authentication required")]
    NotAuthenticated,

    /// Non-success response from the backend
    #[error("Server rejected request ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    /// Successful response whose body failed to decode
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for CheckoutError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotAuthenticated => CheckoutError::NotAuthenticated,
            ClientError::ServerRejected { status, message } => {
                CheckoutError::ServerRejected { status, message }
            }
            other => CheckoutError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_maps_to_checkout_not_authenticated() {
        let err: CheckoutError = ClientError::NotAuthenticated.into();
        assert!(matches!(err, CheckoutError::NotAuthenticated));
    }

    #[test]
    fn test_rejection_keeps_status_and_message() {
        let err: CheckoutError = ClientError::ServerRejected {
            status: 422,
            message: "amount mismatch".to_string(),
        }
        .into();
        match err {
            CheckoutError::ServerRejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "amount mismatch");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_maps_to_network_error() {
        let err: CheckoutError =
            ClientError::InvalidResponse("missing field `order_id`".to_string()).into();
        match err {
            CheckoutError::Network(message) => {
                assert!(message.contains("missing field `order_id`"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
