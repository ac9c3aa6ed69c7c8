/*
 * Responsibility
 * - users / subscriptions テーブル向け SQLx 操作
 * - password のハッシュ化・照合は pgcrypto (crypt / gen_salt) に任せる
 * - UserDirectory (auth pipeline 用の lookup) の Postgres 実装
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::services::auth::identity::{Identity, Role, UnknownRole};
use crate::services::auth::UserDirectory;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn identity(&self) -> Result<Identity, UnknownRole> {
        Ok(Identity::new(self.id, self.role.parse()?))
    }
}

pub async fn create(db: &PgPool, email: &str, password: &str, role: Role) -> RepoResult<UserRow> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (email, password, role)
        VALUES ($1, crypt($2, gen_salt('bf')), $3)
        RETURNING id, email, role, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(password)
    .bind(role.as_str())
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, user_id: i64) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, role, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

// Returns the user only when both email and password match.
pub async fn find_by_login(db: &PgPool, email: &str, password: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, role, created_at, updated_at
        FROM users
        WHERE email = $1 AND password = crypt($2, password)
        "#,
    )
    .bind(email)
    .bind(password)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: i64,
    email: Option<&str>,
    password: Option<&str>,
) -> RepoResult<Option<UserRow>> {
    // email / password: None -> do not update
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET
            email = COALESCE($2, email),
            password = CASE
                WHEN $3::TEXT IS NULL THEN password
                ELSE crypt($3, gen_salt('bf'))
            END,
            updated_at = now()
        WHERE id = $1
        RETURNING id, email, role, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(password)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

/// Flip the subscription of `user_id` to `podcast_id`.
///
/// Returns `true` when the user is subscribed afterwards.
pub async fn toggle_subscription(db: &PgPool, user_id: i64, podcast_id: i64) -> RepoResult<bool> {
    let mut tx = db.begin().await?;

    let removed = sqlx::query(
        r#"
        DELETE FROM subscriptions
        WHERE user_id = $1 AND podcast_id = $2
        "#,
    )
    .bind(user_id)
    .bind(podcast_id)
    .execute(&mut *tx)
    .await?;

    let subscribed = if removed.rows_affected() > 0 {
        false
    } else {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (user_id, podcast_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(podcast_id)
        .execute(&mut *tx)
        .await?;
        true
    };

    tx.commit().await?;
    Ok(subscribed)
}

/// Postgres-backed `UserDirectory`.
#[derive(Clone, Debug)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_identity(&self, user_id: i64) -> Result<Option<Identity>, RepoError> {
        let Some(row) = get(&self.pool, user_id).await? else {
            return Ok(None);
        };

        match row.identity() {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                // CHECK constraint should make this unreachable; treat as no user.
                tracing::warn!(user_id, error = %e, "user row has an unknown role");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: 7,
            email: "host@example.com".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn identity_comes_from_id_and_role_column() {
        assert_eq!(row("Host").identity(), Ok(Identity::new(7, Role::Host)));
        assert_eq!(
            row("Listener").identity(),
            Ok(Identity::new(7, Role::Listener))
        );
    }

    #[test]
    fn unknown_role_column_does_not_yield_identity() {
        assert!(row("Admin").identity().is_err());
    }
}
