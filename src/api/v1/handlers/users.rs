/*
 * Responsibility
 * - account / login / profile / subscription の handler
 * - 各 operation の名前と許可 role をここで宣言する (POLICIES)
 * - 呼び出し元の identity は CurrentUser で受ける (guard 通過後のみ)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            podcasts::PodcastResponse,
            users::{
                CreateAccountRequest, EditProfileRequest, LoginRequest, LoginResponse,
                SubscriptionResponse, UserResponse,
            },
        },
        extractors::CurrentUser,
        handlers::invalid,
    },
    error::AppError,
    repos::{error::RepoError, podcast_repo, user_repo},
    services::auth::policy::{ANY, LISTENER, OperationPolicy},
    state::AppState,
};

pub const CREATE_ACCOUNT: &str = "createAccount";
pub const LOGIN: &str = "login";
pub const ME: &str = "me";
pub const EDIT_PROFILE: &str = "editProfile";
pub const SEE_PROFILE: &str = "seeProfile";
pub const TOGGLE_SUBSCRIPTION: &str = "toggleSubscription";
pub const SUBSCRIPTIONS: &str = "subscriptions";

// createAccount / login are public: no entry.
pub const POLICIES: &[OperationPolicy] = &[
    OperationPolicy::new(ME, &[ANY]),
    OperationPolicy::new(EDIT_PROFILE, &[ANY]),
    OperationPolicy::new(SEE_PROFILE, &[ANY]),
    OperationPolicy::new(TOGGLE_SUBSCRIPTION, &[LISTENER]),
    OperationPolicy::new(SUBSCRIPTIONS, &[LISTENER]),
];

fn email_taken(e: RepoError) -> AppError {
    match e {
        RepoError::Conflict => {
            AppError::conflict("CONFLICT", "there is a user with that email already")
        }
        other => other.into(),
    }
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(invalid)?;

    let row = user_repo::create(&state.db, req.email.trim(), &req.password, req.role)
        .await
        .map_err(email_taken)?;

    tracing::info!(user_id = row.id, role = %row.role, "account created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // unknown email と wrong password は区別しない
    let row = user_repo::find_by_login(&state.db, req.email.trim(), &req.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = state.tokens.sign(row.id)?;
    Ok(Json(LoginResponse { token }))
}

pub async fn me(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let row = user_repo::get(&state.db, identity.id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row.into()))
}

pub async fn edit_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(req): Json<EditProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate().map_err(invalid)?;

    let email = req.email.as_deref().map(str::trim);
    let row = user_repo::update(&state.db, identity.id, email, req.password.as_deref())
        .await
        .map_err(email_taken)?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row.into()))
}

pub async fn see_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let row = user_repo::get(&state.db, user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row.into()))
}

pub async fn toggle_subscription(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(podcast_id): Path<i64>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    if !podcast_repo::exists(&state.db, podcast_id).await? {
        return Err(AppError::not_found("podcast"));
    }

    let subscribed = user_repo::toggle_subscription(&state.db, identity.id, podcast_id).await?;
    Ok(Json(SubscriptionResponse {
        podcast_id,
        subscribed,
    }))
}

pub async fn subscriptions(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<PodcastResponse>>, AppError> {
    let rows = podcast_repo::list_subscribed(&state.db, identity.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
