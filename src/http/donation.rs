//! Donation widget endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use alloy::primitives::TxHash;
use serde::Deserialize;

use crate::donation::service::{Balance, NetworkView, QuoteView};
use crate::donation::{DonateReply, DonationBackend, DonationRecord};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteBody {
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct DonateBody {
    #[serde(default)]
    pub amount: String,
    /// The donor accepted the confirmation prompt.
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn list_networks<B: DonationBackend>(
    State(state): State<AppState<B>>,
) -> Json<Vec<NetworkView>> {
    Json(state.service.networks())
}

pub async fn get_balance<B: DonationBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Balance>, ApiError> {
    Ok(Json(state.service.balance().await?))
}

pub async fn create_quote<B: DonationBackend>(
    State(state): State<AppState<B>>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<QuoteView>, ApiError> {
    Ok(Json(state.service.quote(&body.amount).await?))
}

pub async fn create_donation<B: DonationBackend>(
    State(state): State<AppState<B>>,
    Json(body): Json<DonateBody>,
) -> Result<Response, ApiError> {
    let reply = state.service.donate(&body.amount, body.confirmed).await?;
    let status = match reply {
        DonateReply::ConfirmationRequired { .. } => StatusCode::OK,
        DonateReply::Submitted { .. } => StatusCode::ACCEPTED,
    };
    Ok((status, Json(reply)).into_response())
}

pub async fn get_donation<B: DonationBackend>(
    State(state): State<AppState<B>>,
    Path(tx_hash): Path<String>,
) -> Result<Json<DonationRecord>, ApiError> {
    let tx_hash: TxHash = tx_hash
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid transaction hash '{}'", tx_hash)))?;
    Ok(Json(state.service.status(&tx_hash)?))
}
