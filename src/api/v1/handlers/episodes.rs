/*
 * Responsibility
 * - /podcasts/{podcast_id}/episodes 系 handler
 * - episode は常に親 podcast の配下で引く (podcast_id + episode_id)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::episodes::{CreateEpisodeRequest, EpisodeResponse, UpdateEpisodeRequest},
        handlers::invalid,
    },
    error::AppError,
    repos::{episode_repo, podcast_repo},
    services::auth::policy::{HOST, OperationPolicy},
    state::AppState,
};

pub const GET_EPISODES: &str = "getEpisodes";
pub const CREATE_EPISODE: &str = "createEpisode";
pub const UPDATE_EPISODE: &str = "updateEpisode";
pub const DELETE_EPISODE: &str = "deleteEpisode";

pub const POLICIES: &[OperationPolicy] = &[
    OperationPolicy::new(CREATE_EPISODE, &[HOST]),
    OperationPolicy::new(UPDATE_EPISODE, &[HOST]),
    OperationPolicy::new(DELETE_EPISODE, &[HOST]),
];

pub async fn get_episodes(
    State(state): State<AppState>,
    Path(podcast_id): Path<i64>,
) -> Result<Json<Vec<EpisodeResponse>>, AppError> {
    if !podcast_repo::exists(&state.db, podcast_id).await? {
        return Err(AppError::not_found("podcast"));
    }

    let rows = episode_repo::list_by_podcast(&state.db, podcast_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_episode(
    State(state): State<AppState>,
    Path(podcast_id): Path<i64>,
    Json(req): Json<CreateEpisodeRequest>,
) -> Result<(StatusCode, Json<EpisodeResponse>), AppError> {
    req.validate().map_err(invalid)?;

    if !podcast_repo::exists(&state.db, podcast_id).await? {
        return Err(AppError::not_found("podcast"));
    }

    let row = episode_repo::create(
        &state.db,
        podcast_id,
        &req.title,
        &req.category,
        req.image_url.as_deref(),
        req.play_time,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_episode(
    State(state): State<AppState>,
    Path((podcast_id, episode_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateEpisodeRequest>,
) -> Result<Json<EpisodeResponse>, AppError> {
    req.validate().map_err(invalid)?;

    let row = episode_repo::update(&state.db, podcast_id, episode_id, req.changes())
        .await?
        .ok_or(AppError::not_found("episode"))?;

    Ok(Json(row.into()))
}

pub async fn delete_episode(
    State(state): State<AppState>,
    Path((podcast_id, episode_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    if episode_repo::delete(&state.db, podcast_id, episode_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("episode"))
    }
}
