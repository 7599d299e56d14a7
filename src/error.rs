//! Error type shared by the envelope decoder and the client.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::models::netro::ErrorCode;

/// Everything a Netro call can fail with.
///
/// `Transport` and `Http` come from the HTTP layer, `Api` from an error
/// envelope the service returned with a 2xx status, `Decode` from a payload
/// that does not match the expected schema.
#[derive(Debug)]
pub enum NetroClientError {
    /// Connection, TLS, timeout or I/O failure.
    Transport(ureq::Error),
    /// Non-2xx HTTP status.
    Http { status: u16, body: String },
    /// Body was not JSON, or a request body could not be serialized.
    Json(serde_json::Error),
    /// First entry of an error envelope.
    Api { code: ErrorCode, message: String },
    /// JSON did not match the expected shape. `path` names the offending field.
    Decode { path: String, source: serde_json::Error },
    /// Invalid client configuration.
    Config(String),
}

impl NetroClientError {
    /// Error code reported by the service, if this is an application error.
    pub fn api_code(&self) -> Option<ErrorCode> {
        match self {
            NetroClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl Display for NetroClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NetroClientError::Transport(e) => write!(f, "transport error: {}", e),
            NetroClientError::Http { status, body } => write!(f, "http {}: {}", status, body),
            NetroClientError::Json(e) => write!(f, "json error: {}", e),
            NetroClientError::Api { code, message } => write!(f, "error code #{} -> {}", code, message),
            NetroClientError::Decode { path, source } => write!(f, "invalid field `{}`: {}", path, source),
            NetroClientError::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl Error for NetroClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NetroClientError::Transport(e) => Some(e),
            NetroClientError::Json(e) => Some(e),
            NetroClientError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NetroClientError {
    fn from(value: serde_json::Error) -> Self {
        NetroClientError::Json(value)
    }
}

impl From<ureq::Error> for NetroClientError {
    fn from(value: ureq::Error) -> Self {
        match value {
            ureq::Error::StatusCode(status) => NetroClientError::Http {
                status,
                body: String::new(),
            },
            other => NetroClientError::Transport(other),
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for NetroClientError {
    fn from(value: serde_path_to_error::Error<serde_json::Error>) -> Self {
        NetroClientError::Decode {
            path: value.path().to_string(),
            source: value.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_matches_service_format() {
        let err = NetroClientError::Api {
            code: ErrorCode::InvalidKey,
            message: "Invalid key".into(),
        };
        assert_eq!(err.to_string(), "error code #1 -> Invalid key");
        assert_eq!(err.api_code(), Some(ErrorCode::InvalidKey));
    }

    #[test]
    fn status_code_errors_map_to_http() {
        let err = NetroClientError::from(ureq::Error::StatusCode(503));
        assert!(matches!(err, NetroClientError::Http { status: 503, .. }));
        assert_eq!(err.api_code(), None);
    }

    #[test]
    fn decode_error_keeps_field_path() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Outer {
            inner: Inner,
        }
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Inner {
            count: u32,
        }

        let value = serde_json::json!({"inner": {"count": "three"}});
        let err: NetroClientError = serde_path_to_error::deserialize::<_, Outer>(value)
            .unwrap_err()
            .into();
        match err {
            NetroClientError::Decode { path, .. } => assert_eq!(path, "inner.count"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
