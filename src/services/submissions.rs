use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    database::Database,
    error::{AppError, Result},
    models::{NewSubmission, Submission, SubmissionForm, SubmissionView},
    services::upload_receiver::{IncomingFile, StoredUpload},
    storage::Storage,
    utils::{
        file::filename_from_url,
        time::local_time_of_day,
    },
};

const ANONYMOUS: &str = "Anonymous";

/// Raw text fields of an upload request, as they came off the wire.
#[derive(Debug, Default, Clone)]
pub struct SubmissionFields {
    pub challenge_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

pub struct SubmissionService;

impl SubmissionService {
    /// Checks an upload request before anything is written: a file must be
    /// present, then both ids must be present and integers.
    pub fn prepare(
        fields: SubmissionFields,
        file: Option<IncomingFile>,
    ) -> Result<(SubmissionForm, IncomingFile)> {
        let file = file.ok_or(AppError::NoFile)?;

        let challenge_id = required(fields.challenge_id.as_deref())?;
        let user_id = required(fields.user_id.as_deref())?;

        let form = SubmissionForm {
            challenge_id: parse_id("challengeId", challenge_id)?,
            user_id: parse_id("userId", user_id)?,
            user_name: fields
                .user_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| ANONYMOUS.to_string()),
        };

        Ok((form, file))
    }

    /// Records a submission for a stored upload and bumps the poster's streak.
    /// An unknown `user_id` still records the submission.
    pub async fn create_submission(
        database: &Database,
        form: SubmissionForm,
        upload: &StoredUpload,
    ) -> Submission {
        let now = Utc::now();
        let submission = database
            .add_submission(new_submission(form.clone(), upload.public_url.clone(), now))
            .await;
        info!(
            submission_id = submission.id,
            user_id = submission.user_id,
            "Submission saved: {}",
            submission.photo_url
        );

        match database.increment_streak(form.user_id).await {
            Some(streak) => info!(user_id = form.user_id, "Updated user streak: {}", streak),
            None => debug!(user_id = form.user_id, "No such user, streak unchanged"),
        }

        submission
    }

    /// Fabricated submission for exercising the feed without an upload.
    /// Leaves streaks alone.
    pub async fn create_test_submission(database: &Database) -> Submission {
        let form = SubmissionForm {
            challenge_id: 1,
            user_id: 1,
            user_name: "Test User".to_string(),
        };
        let submission = database
            .add_submission(new_submission(
                form,
                "/uploads/test-image.jpg".to_string(),
                Utc::now(),
            ))
            .await;
        info!(submission_id = submission.id, "Test submission created");
        submission
    }

    /// All submissions, newest first, each with a fresh file-existence check.
    /// Works on a copy; the stored order is untouched.
    pub async fn list_submissions(
        database: &Database,
        storage: &dyn Storage,
    ) -> Result<Vec<SubmissionView>> {
        let submissions = database.list_submissions().await;

        let mut views = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let file_exists = match filename_from_url(&submission.photo_url) {
                Some(name) => storage.exists(name).await?,
                None => false,
            };
            debug!(
                "Submission {}: {} - File exists: {}",
                submission.id, submission.photo_url, file_exists
            );
            views.push(SubmissionView {
                submission,
                file_exists,
            });
        }

        views.sort_by(|a, b| b.submission.submitted_at.cmp(&a.submission.submitted_at));
        Ok(views)
    }
}

fn new_submission(form: SubmissionForm, photo_url: String, now: DateTime<Utc>) -> NewSubmission {
    NewSubmission {
        challenge_id: form.challenge_id,
        user_id: form.user_id,
        user_name: form.user_name,
        photo_url,
        submitted_at: now,
        timestamp: local_time_of_day(&now),
    }
}

fn required(value: Option<&str>) -> Result<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingFields)
}

fn parse_id(field: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be an integer", field)))
}
