/*
 * Responsibility
 * - Users / login / subscriptions の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::UserRow;
use crate::services::auth::Role;

fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email is required");
    }
    if email.len() > 254 || !email.contains('@') {
        return Err("email is invalid");
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("password is required");
    }
    // bcrypt only looks at the first 72 bytes
    if password.len() > 72 {
        return Err("password must be <= 72 bytes");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl EditProfileRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_none() && self.password.is_none() {
            return Err("nothing to update");
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub podcast_id: i64,
    pub subscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_account_requires_email_and_password() {
        let req: CreateAccountRequest = serde_json::from_value(serde_json::json!({
            "email": "host@example.com",
            "password": "1234",
            "role": "Host"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.role, Role::Host);

        let bad = CreateAccountRequest {
            email: "not-an-email".into(),
            password: "1234".into(),
            role: Role::Listener,
        };
        assert_eq!(bad.validate(), Err("email is invalid"));
    }

    #[test]
    fn unknown_role_is_rejected_at_deserialization() {
        let parsed = serde_json::from_value::<CreateAccountRequest>(serde_json::json!({
            "email": "a@example.com",
            "password": "1234",
            "role": "Admin"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn edit_profile_needs_at_least_one_field() {
        let empty = EditProfileRequest {
            email: None,
            password: None,
        };
        assert_eq!(empty.validate(), Err("nothing to update"));

        let password_only = EditProfileRequest {
            email: None,
            password: Some("new".into()),
        };
        assert!(password_only.validate().is_ok());
    }
}
