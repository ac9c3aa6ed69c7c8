use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub podcast_id: i64,
    pub created_user_id: i64,
    pub title: String,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    podcast_id: i64,
    created_user_id: i64,
    title: &str,
    review_text: &str,
) -> RepoResult<ReviewRow> {
    let row = sqlx::query_as::<_, ReviewRow>(
        r#"
        INSERT INTO reviews (podcast_id, created_user_id, title, review_text)
        VALUES ($1, $2, $3, $4)
        RETURNING id, podcast_id, created_user_id, title, review_text, created_at
        "#,
    )
    .bind(podcast_id)
    .bind(created_user_id)
    .bind(title)
    .bind(review_text)
    .fetch_one(db)
    .await?;

    Ok(row)
}
