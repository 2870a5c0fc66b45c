use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Please upload a file first!")]
    NoFileSelected,

    /// The request never produced a response (connect failure, timeout, reset).
    #[error("Backend request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A response arrived but its body was not the JSON we expected.
    #[error("Backend returned an undecodable body (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// True when the backend answered, whatever the answer was.
    pub fn response_received(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NoFileSelected => AppError::BadRequest(anyhow::anyhow!(err.to_string())),
            ClientError::Network(e) => AppError::ServiceUnavailable(e.to_string()),
            decode @ ClientError::Decode { .. } => AppError::BadGateway(decode.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn decode_error() -> ClientError {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        ClientError::Decode {
            status: 500,
            source,
        }
    }

    #[test]
    fn only_decode_failures_count_as_answered() {
        assert!(decode_error().response_received());
        assert!(!ClientError::NoFileSelected.response_received());
    }

    #[test]
    fn maps_to_http_errors() {
        let no_file: AppError = ClientError::NoFileSelected.into();
        assert_eq!(no_file.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(no_file.to_string(), "Bad request: Please upload a file first!");

        let decode: AppError = decode_error().into();
        assert_eq!(decode.status_code(), StatusCode::BAD_GATEWAY);
    }
}
