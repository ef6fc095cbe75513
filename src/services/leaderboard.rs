use crate::{database::Database, models::LeaderboardEntry};

pub struct LeaderboardService;

impl LeaderboardService {
    /// Users by streak, highest first. Ranks are positional: tied streaks get
    /// consecutive ranks in account-creation order.
    pub async fn leaderboard(database: &Database) -> Vec<LeaderboardEntry> {
        let mut users = database.list_users().await;
        users.sort_by(|a, b| b.streak.cmp(&a.streak));

        users
            .into_iter()
            .enumerate()
            .map(|(index, user)| LeaderboardEntry {
                rank: index + 1,
                name: user.name,
                streak: user.streak,
            })
            .collect()
    }
}
