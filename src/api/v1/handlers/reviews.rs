use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::reviews::{CreateReviewRequest, ReviewResponse},
        extractors::CurrentUser,
        handlers::invalid,
    },
    error::AppError,
    repos::{podcast_repo, review_repo},
    services::auth::policy::{LISTENER, OperationPolicy},
    state::AppState,
};

pub const CREATE_REVIEW: &str = "createReview";

pub const POLICIES: &[OperationPolicy] = &[OperationPolicy::new(CREATE_REVIEW, &[LISTENER])];

pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(podcast_id): Path<i64>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    req.validate().map_err(invalid)?;

    if !podcast_repo::exists(&state.db, podcast_id).await? {
        return Err(AppError::not_found("podcast"));
    }

    let row = review_repo::create(
        &state.db,
        podcast_id,
        identity.id,
        &req.title,
        &req.review_text,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}
