pub mod challenge;
pub mod submission;
pub mod user;

pub use challenge::*;
pub use submission::*;
pub use user::*;
