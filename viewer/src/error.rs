//! Unified error types for the Blurt viewer
//!
//! This module defines error types for each layer:
//! - `RpcError`: JSON-RPC transport and response-shape errors
//! - `FeedError`: Controller and service errors (wraps RPC errors)
//! - `AppError`: HTTP layer errors (rendered as HTML notifications)

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::feed::render_error_toast;

/// JSON-RPC client errors
///
/// Both the primary endpoint and the relay collapse into a single
/// `Transport` error, so callers never see which path failed.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl RpcError {
    /// HTTP status of the last attempt, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            RpcError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        RpcError::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Feed and profile errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Feed(FeedError::Validation(msg)) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Feed(FeedError::UserNotFound(name)) => {
                (StatusCode::NOT_FOUND, format!("User @{} not found", name))
            }
            AppError::Feed(FeedError::Rpc(e)) => {
                tracing::error!(status = ?e.status(), "Upstream error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to load posts. Please try again later.".to_string(),
                )
            }
        };

        (status, Html(render_error_toast(&message))).into_response()
    }
}
