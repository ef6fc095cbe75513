use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::iso_millis;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub challenge_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub photo_url: String,
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
    pub timestamp: String,
}

/// Everything about a submission except the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub challenge_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub photo_url: String,
    pub submitted_at: DateTime<Utc>,
    pub timestamp: String,
}

/// Feed entry: the stored record plus whether its photo is still on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    #[serde(flatten)]
    pub submission: Submission,
    pub file_exists: bool,
}

/// Validated form fields of an upload request.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionForm {
    pub challenge_id: i64,
    pub user_id: i64,
    pub user_name: String,
}
