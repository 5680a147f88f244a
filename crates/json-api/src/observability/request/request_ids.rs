//! Request IDs.
//!
//! Caller-supplied IDs are echoed back when they are short printable ASCII. Anything else is
//! replaced by a fresh UUIDv7.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    match header_value.map(|value| value.trim().to_string()) {
        Some(value) if is_acceptable(&value) => value,
        Some(value) if !value.is_empty() => {
            debug!(len = value.len(), "replacing malformed incoming request id");

            Uuid::now_v7().to_string()
        }
        _ => Uuid::now_v7().to_string(),
    }
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "could not encode request id header: {source}"),
    }
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}
