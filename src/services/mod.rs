pub mod accounts;
pub mod challenges;
pub mod leaderboard;
pub mod submissions;
pub mod upload_receiver;

pub use accounts::*;
pub use challenges::*;
pub use leaderboard::*;
pub use submissions::*;
pub use upload_receiver::*;
