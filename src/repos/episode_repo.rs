/*
 * Responsibility
 * - episodes CRUD (常に podcast_id とセットで引く)
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EpisodeRow {
    pub id: i64,
    pub podcast_id: i64,
    pub title: String,
    pub category: String,
    pub image_url: Option<String>,
    pub play_time: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct EpisodeChanges<'a> {
    pub title: Option<&'a str>,
    pub category: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub play_time: Option<i32>,
}

pub async fn list_by_podcast(db: &PgPool, podcast_id: i64) -> RepoResult<Vec<EpisodeRow>> {
    let rows = sqlx::query_as::<_, EpisodeRow>(
        r#"
        SELECT id, podcast_id, title, category, image_url, play_time, created_at, updated_at
        FROM episodes
        WHERE podcast_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(podcast_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    podcast_id: i64,
    title: &str,
    category: &str,
    image_url: Option<&str>,
    play_time: Option<i32>,
) -> RepoResult<EpisodeRow> {
    let row = sqlx::query_as::<_, EpisodeRow>(
        r#"
        INSERT INTO episodes (podcast_id, title, category, image_url, play_time)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, podcast_id, title, category, image_url, play_time, created_at, updated_at
        "#,
    )
    .bind(podcast_id)
    .bind(title)
    .bind(category)
    .bind(image_url)
    .bind(play_time)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    podcast_id: i64,
    episode_id: i64,
    changes: EpisodeChanges<'_>,
) -> RepoResult<Option<EpisodeRow>> {
    let row = sqlx::query_as::<_, EpisodeRow>(
        r#"
        UPDATE episodes
        SET
            title = COALESCE($3, title),
            category = COALESCE($4, category),
            image_url = COALESCE($5, image_url),
            play_time = COALESCE($6, play_time),
            updated_at = now()
        WHERE podcast_id = $1 AND id = $2
        RETURNING id, podcast_id, title, category, image_url, play_time, created_at, updated_at
        "#,
    )
    .bind(podcast_id)
    .bind(episode_id)
    .bind(changes.title)
    .bind(changes.category)
    .bind(changes.image_url)
    .bind(changes.play_time)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, podcast_id: i64, episode_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM episodes
        WHERE podcast_id = $1 AND id = $2
        "#,
    )
    .bind(podcast_id)
    .bind(episode_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
