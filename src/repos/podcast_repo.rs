/*
 * Responsibility
 * - podcasts CRUD + タイトル検索 (ページング)
 * - created_user_id の FK (CASCADE) 前提で削除挙動を意識
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoResult;

pub const SEARCH_PAGE_SIZE: i64 = 25;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PodcastRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub created_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<PodcastRow>> {
    let rows = sqlx::query_as::<_, PodcastRow>(
        r#"
        SELECT id, title, category, description, created_user_id, created_at, updated_at
        FROM podcasts
        ORDER BY id DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn list_by_creator(db: &PgPool, user_id: i64) -> RepoResult<Vec<PodcastRow>> {
    let rows = sqlx::query_as::<_, PodcastRow>(
        r#"
        SELECT id, title, category, description, created_user_id, created_at, updated_at
        FROM podcasts
        WHERE created_user_id = $1
        ORDER BY id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn list_subscribed(db: &PgPool, user_id: i64) -> RepoResult<Vec<PodcastRow>> {
    let rows = sqlx::query_as::<_, PodcastRow>(
        r#"
        SELECT p.id, p.title, p.category, p.description, p.created_user_id, p.created_at, p.updated_at
        FROM podcasts p
        JOIN subscriptions s ON s.podcast_id = p.id
        WHERE s.user_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Case-insensitive title search. `page` is 1-based.
pub async fn search(db: &PgPool, title: &str, page: i64) -> RepoResult<(Vec<PodcastRow>, i64)> {
    let pattern = format!("%{}%", escape_like(title));
    let offset = search_offset(page);

    let rows = sqlx::query_as::<_, PodcastRow>(
        r#"
        SELECT id, title, category, description, created_user_id, created_at, updated_at
        FROM podcasts
        WHERE title ILIKE $1
        ORDER BY id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(SEARCH_PAGE_SIZE)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM podcasts
        WHERE title ILIKE $1
        "#,
    )
    .bind(&pattern)
    .fetch_one(db)
    .await?;

    Ok((rows, total))
}

pub async fn create(
    db: &PgPool,
    title: &str,
    category: &str,
    description: Option<&str>,
    created_user_id: i64,
) -> RepoResult<PodcastRow> {
    let row = sqlx::query_as::<_, PodcastRow>(
        r#"
        INSERT INTO podcasts (title, category, description, created_user_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, category, description, created_user_id, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(category)
    .bind(description)
    .bind(created_user_id)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, podcast_id: i64) -> RepoResult<Option<PodcastRow>> {
    let row = sqlx::query_as::<_, PodcastRow>(
        r#"
        SELECT id, title, category, description, created_user_id, created_at, updated_at
        FROM podcasts
        WHERE id = $1
        "#,
    )
    .bind(podcast_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn exists(db: &PgPool, podcast_id: i64) -> RepoResult<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM podcasts WHERE id = $1)")
        .bind(podcast_id)
        .fetch_one(db)
        .await?;

    Ok(found)
}

pub async fn update(
    db: &PgPool,
    podcast_id: i64,
    title: &str,
    category: &str,
    description: Option<&str>,
) -> RepoResult<Option<PodcastRow>> {
    let row = sqlx::query_as::<_, PodcastRow>(
        r#"
        UPDATE podcasts
        SET
            title = $2,
            category = $3,
            description = $4,
            updated_at = now()
        WHERE id = $1
        RETURNING id, title, category, description, created_user_id, created_at, updated_at
        "#,
    )
    .bind(podcast_id)
    .bind(title)
    .bind(category)
    .bind(description)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, podcast_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM podcasts
        WHERE id = $1
        "#,
    )
    .bind(podcast_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

// `%` / `_` in user input are literals, not wildcards.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Largest page whose offset still fits in an `i64`.
pub const MAX_SEARCH_PAGE: i64 = i64::MAX / SEARCH_PAGE_SIZE;

// Pages past the end saturate to an offset no table reaches.
fn search_offset(page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(SEARCH_PAGE_SIZE)
}

pub fn total_pages(total_results: i64) -> i64 {
    (total_results + SEARCH_PAGE_SIZE - 1) / SEARCH_PAGE_SIZE
}
