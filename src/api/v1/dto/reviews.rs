use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::review_repo::ReviewRow;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub title: String,
    pub review_text: String,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.review_text.trim().is_empty() {
            return Err("review_text is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub podcast_id: i64,
    pub created_user_id: i64,
    pub title: String,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for ReviewResponse {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            podcast_id: row.podcast_id,
            created_user_id: row.created_user_id,
            title: row.title,
            review_text: row.review_text,
            created_at: row.created_at,
        }
    }
}
