use axum::{extract::State, response::Json};
use tracing::debug;

use crate::{handlers::AppState, models::LeaderboardEntry, services::LeaderboardService};

pub async fn leaderboard(State(state): State<AppState>) -> Json<Vec<LeaderboardEntry>> {
    let board = LeaderboardService::leaderboard(&state.database).await;
    debug!("Returning leaderboard: {} users", board.len());
    Json(board)
}
