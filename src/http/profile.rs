use axum::extract::State;
use axum::Json;

use crate::donation::DonationBackend;
use crate::http::server::AppState;
use crate::profile::Profile;

pub async fn get_profile<B: DonationBackend>(State(state): State<AppState<B>>) -> Json<Profile> {
    Json(state.profile.as_ref().clone())
}
