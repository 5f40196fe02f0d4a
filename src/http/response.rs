//! Error responses.
//!
//! Failures map to a status code and a JSON body carrying the error text and
//! the dialog to show for it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::blockchain::BlockchainError;
use crate::donation::{DonationError, Notice};

/// Error returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    Donation(DonationError),
    BadRequest(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    notice: Notice,
}

impl From<DonationError> for ApiError {
    fn from(e: DonationError) -> Self {
        ApiError::Donation(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Donation(e) => match e {
                DonationError::EmptyAmount | DonationError::InvalidAmount(_) => {
                    StatusCode::BAD_REQUEST
                }
                DonationError::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                DonationError::UnsupportedNetwork(_) => StatusCode::CONFLICT,
                DonationError::UnknownDonation(_) => StatusCode::NOT_FOUND,
                DonationError::Blockchain(b) => match b {
                    BlockchainError::Timeout(_) | BlockchainError::ConfirmationTimeout { .. } => {
                        StatusCode::GATEWAY_TIMEOUT
                    }
                    BlockchainError::GasPriceTooHigh { .. }
                    | BlockchainError::NotAvailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    BlockchainError::Reverted(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::BAD_GATEWAY,
                },
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Donation(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.message();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %error, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %error, "Request rejected");
        }
        let body = ErrorBody {
            notice: Notice::error(error.clone()),
            error,
        };
        (status, Json(body)).into_response()
    }
}
