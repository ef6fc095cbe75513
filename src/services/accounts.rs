use tracing::info;

use crate::{
    database::Database,
    error::{AppError, Result},
    models::{AccountSummary, CreateAccountRequest, NewUser, PublicUser},
};

pub struct AccountService;

impl AccountService {
    /// Creates an account with a zero streak. Emails are unique; nothing else is.
    pub async fn create_account(
        database: &Database,
        request: CreateAccountRequest,
    ) -> Result<AccountSummary> {
        info!("Creating account for: {}", request.email);
        let user = database
            .add_user(NewUser {
                name: request.name,
                email: request.email,
                password: request.password,
            })
            .await?;
        info!(user_id = user.id, "Account created successfully for: {}", user.email);

        Ok(AccountSummary::from(&user))
    }

    pub async fn get_user(database: &Database, user_id: i64) -> Result<PublicUser> {
        database
            .find_user(user_id)
            .await
            .map(PublicUser::from)
            .ok_or(AppError::UserNotFound)
    }
}
