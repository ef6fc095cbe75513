//! JSON-document store for users and submissions.
//!
//! Both collections live in memory behind one lock and are loaded once at
//! start-up. Every mutation rewrites the affected document on disk. Write
//! failures are logged and swallowed, so memory can run ahead of disk until
//! the next successful write.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::{
    error::{AppError, Result},
    models::{NewSubmission, NewUser, Submission, User},
};

pub mod persist;

pub const USERS_FILE: &str = "users.json";
pub const SUBMISSIONS_FILE: &str = "submissions.json";

struct Collections {
    users: Vec<User>,
    submissions: Vec<Submission>,
    next_user_id: i64,
    next_submission_id: i64,
}

#[derive(Clone)]
pub struct Database {
    inner: Arc<RwLock<Collections>>,
    users_path: PathBuf,
    submissions_path: PathBuf,
}

impl Database {
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;

        let users_path = data_dir.join(USERS_FILE);
        let submissions_path = data_dir.join(SUBMISSIONS_FILE);

        let users: Vec<User> = load_or_empty(&users_path, "users").await;
        let submissions: Vec<Submission> = load_or_empty(&submissions_path, "submissions").await;

        let next_user_id = next_id(users.iter().map(|u| u.id), users.len());
        let next_submission_id = next_id(submissions.iter().map(|s| s.id), submissions.len());

        Ok(Self {
            inner: Arc::new(RwLock::new(Collections {
                users,
                submissions,
                next_user_id,
                next_submission_id,
            })),
            users_path,
            submissions_path,
        })
    }

    /// Inserts a user unless the email is taken. The uniqueness check and the
    /// id reservation happen under the same write lock as the push.
    pub async fn add_user(&self, new_user: NewUser) -> Result<User> {
        let mut collections = self.inner.write().await;

        if collections.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let id = collections.next_user_id;
        collections.next_user_id += 1;

        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            streak: 0,
            created_at: chrono::Utc::now(),
        };
        collections.users.push(user.clone());

        save_collection(&self.users_path, &collections.users, "users").await;
        Ok(user)
    }

    pub async fn add_submission(&self, new_submission: NewSubmission) -> Submission {
        let mut collections = self.inner.write().await;

        let id = collections.next_submission_id;
        collections.next_submission_id += 1;

        let submission = Submission {
            id,
            challenge_id: new_submission.challenge_id,
            user_id: new_submission.user_id,
            user_name: new_submission.user_name,
            photo_url: new_submission.photo_url,
            submitted_at: new_submission.submitted_at,
            timestamp: new_submission.timestamp,
        };
        collections.submissions.push(submission.clone());

        save_collection(&self.submissions_path, &collections.submissions, "submissions").await;
        debug!("Total submissions now: {}", collections.submissions.len());
        submission
    }

    /// Bumps a user's streak by one. `None` when no such user exists; nothing is
    /// written in that case.
    pub async fn increment_streak(&self, user_id: i64) -> Option<i64> {
        let mut collections = self.inner.write().await;

        let user = collections.users.iter_mut().find(|u| u.id == user_id)?;
        user.streak += 1;
        let streak = user.streak;

        save_collection(&self.users_path, &collections.users, "users").await;
        Some(streak)
    }

    pub async fn find_user(&self, user_id: i64) -> Option<User> {
        let collections = self.inner.read().await;
        collections.users.iter().find(|u| u.id == user_id).cloned()
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn list_submissions(&self) -> Vec<Submission> {
        self.inner.read().await.submissions.clone()
    }

    /// `(users, submissions)`
    pub async fn counts(&self) -> (usize, usize) {
        let collections = self.inner.read().await;
        (collections.users.len(), collections.submissions.len())
    }

    /// Rewrites both documents from memory.
    pub async fn save(&self) {
        let collections = self.inner.read().await;
        save_collection(&self.users_path, &collections.users, "users").await;
        save_collection(&self.submissions_path, &collections.submissions, "submissions").await;
    }
}

fn next_id(ids: impl Iterator<Item = i64>, len: usize) -> i64 {
    ids.max().unwrap_or(0).max(len as i64) + 1
}

async fn load_or_empty<T: serde::de::DeserializeOwned>(path: &Path, label: &str) -> Vec<T> {
    match persist::load_collection(path).await {
        Ok(records) => {
            info!("Loaded {} {} from {}", records.len(), label, path.display());
            records
        }
        Err(e) => {
            warn!("Error loading {}, starting empty: {:#}", label, e);
            Vec::new()
        }
    }
}

async fn save_collection<T: Serialize>(path: &Path, records: &[T], label: &str) {
    match persist::write_collection(path, records).await {
        Ok(()) => debug!("Saved {} to file", label),
        Err(e) => error!("Error saving {}: {:#}", label, e),
    }
}
