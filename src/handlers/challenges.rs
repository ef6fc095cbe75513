use axum::response::Json;
use tracing::debug;

use crate::{models::Challenge, services::ChallengeService};

pub async fn daily_challenge() -> Json<Challenge> {
    let challenge = ChallengeService::daily_challenge(chrono::Utc::now().date_naive());
    debug!("Returning daily challenge: {}", challenge.title);
    Json(challenge.clone())
}
