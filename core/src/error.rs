//! Normalized error type shared by the outbound client and the HTTP service.
//!
//! # Design
//! Every failure path, whether local (serialization, body reading), transport
//! level, or declared by the remote service, ends in exactly one
//! `ApplicationError`. Callers decide success or failure from the `Result`
//! alone; the `status` field is informational and may hold a 2xx code when a
//! successful response carried an undecodable body.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error shape surfaced to callers and, serialized, to HTTP clients as
/// `{"message": ..., "status": ..., "code": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApplicationError {
    pub message: String,
    pub status: u16,
    pub code: String,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>, status: u16, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            code: code.into(),
        }
    }

    /// Build an error whose `code` is derived from `status`.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(message, status, code_for_status(status))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_status(404, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::with_status(500, message)
    }
}

/// Machine-readable code for an error carrying an HTTP-like status.
///
/// Statuses outside 400-599 only reach an error through a remote response,
/// so they are classed as `upstream_error`.
pub fn code_for_status(status: u16) -> &'static str {
    match status {
        400 => "bad_request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not_found",
        409 => "conflict",
        415 => "unsupported_media_type",
        422 => "unprocessable_entity",
        429 => "too_many_requests",
        400..=499 => "client_error",
        502 => "bad_gateway",
        503 => "service_unavailable",
        500..=599 => "internal_server_error",
        _ => "upstream_error",
    }
}
