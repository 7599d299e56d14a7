//! Response envelope decoding.
//!
//! Every Netro response is either `{status, meta, data}` or
//! `{status, meta, errors}`. Decoding is a two-step probe: look for the
//! `errors` key, then decode the matching variant. Both steps run through
//! `serde_path_to_error` so schema mismatches name the field that failed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NetroClientError;
use crate::models::netro::{ErrorCode, ErrorData, Meta, ResponseStatus};

/// Successful response carrying an endpoint specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub status: ResponseStatus,
    pub meta: Meta,
    pub data: T,
}

/// Acknowledgement from command endpoints that return no useful payload.
pub type Ack = Response<Option<Value>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub meta: Meta,
    pub errors: Vec<ErrorData>,
}

impl ErrorResponse {
    /// The error surfaced to callers. Only the first reported error is kept.
    pub fn to_error(&self) -> NetroClientError {
        match self.errors.first() {
            Some(e) => NetroClientError::Api {
                code: e.code,
                message: e.message.clone(),
            },
            None => NetroClientError::Api {
                code: ErrorCode::Unknown,
                message: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(Response<T>),
    Error(ErrorResponse),
}

impl<T> Envelope<T> {
    pub fn meta(&self) -> &Meta {
        match self {
            Envelope::Success(r) => &r.meta,
            Envelope::Error(r) => &r.meta,
        }
    }

    pub fn into_result(self) -> Result<Response<T>, NetroClientError> {
        match self {
            Envelope::Success(r) => Ok(r),
            Envelope::Error(r) => Err(r.to_error()),
        }
    }
}

fn has_errors(raw: &Value) -> bool {
    raw.as_object().is_some_and(|o| o.contains_key("errors"))
}

/// Decode a raw response into the success or error variant.
pub fn decode<T: DeserializeOwned>(raw: Value) -> Result<Envelope<T>, NetroClientError> {
    if has_errors(&raw) {
        let err: ErrorResponse = serde_path_to_error::deserialize(raw)?;
        Ok(Envelope::Error(err))
    } else {
        let ok: Response<T> = serde_path_to_error::deserialize(raw)?;
        Ok(Envelope::Success(ok))
    }
}

/// Fail with the service's error if `raw` is an error envelope.
///
/// Used on the untyped path, where the payload is otherwise left alone.
pub fn check(raw: &Value) -> Result<(), NetroClientError> {
    if has_errors(raw) {
        let err: ErrorResponse = serde_path_to_error::deserialize(raw)?;
        return Err(err.to_error());
    }
    Ok(())
}
