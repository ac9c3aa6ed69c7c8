/*
 * Responsibility
 * - /podcasts 系 handler
 * - 更新/削除は Host なら誰でも可 (所有者チェックはしない)
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::podcasts::{
            CreatePodcastRequest, PodcastDetailResponse, PodcastResponse, SearchPodcastsQuery,
            SearchPodcastsResponse, UpdatePodcastRequest,
        },
        extractors::CurrentUser,
        handlers::invalid,
    },
    error::AppError,
    repos::{episode_repo, podcast_repo},
    services::auth::policy::{HOST, LISTENER, OperationPolicy},
    state::AppState,
};

pub const GET_ALL_PODCASTS: &str = "getAllPodcasts";
pub const CREATE_PODCAST: &str = "createPodcast";
pub const SEARCH_PODCASTS: &str = "searchPodcasts";
pub const MY_PODCASTS: &str = "myPodcasts";
pub const GET_PODCAST: &str = "getPodcast";
pub const UPDATE_PODCAST: &str = "updatePodcast";
pub const DELETE_PODCAST: &str = "deletePodcast";

pub const POLICIES: &[OperationPolicy] = &[
    OperationPolicy::new(CREATE_PODCAST, &[HOST]),
    OperationPolicy::new(SEARCH_PODCASTS, &[LISTENER]),
    OperationPolicy::new(MY_PODCASTS, &[HOST, LISTENER]),
    OperationPolicy::new(GET_PODCAST, &[LISTENER]),
    OperationPolicy::new(UPDATE_PODCAST, &[HOST]),
    OperationPolicy::new(DELETE_PODCAST, &[HOST]),
];

pub async fn get_all_podcasts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PodcastResponse>>, AppError> {
    let rows = podcast_repo::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn create_podcast(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Json(req): Json<CreatePodcastRequest>,
) -> Result<(StatusCode, Json<PodcastResponse>), AppError> {
    req.validate().map_err(invalid)?;

    let description = req.description.as_deref().filter(|d| !d.is_empty());
    let row = podcast_repo::create(
        &state.db,
        &req.title,
        &req.category,
        description,
        identity.id,
    )
    .await?;

    tracing::info!(podcast_id = row.id, user_id = identity.id, "podcast created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn search_podcasts(
    State(state): State<AppState>,
    Query(query): Query<SearchPodcastsQuery>,
) -> Result<Json<SearchPodcastsResponse>, AppError> {
    query.validate().map_err(invalid)?;

    let page = query.page();
    let (rows, total_results) = podcast_repo::search(&state.db, &query.title_search, page).await?;

    Ok(Json(SearchPodcastsResponse {
        podcasts: rows.into_iter().map(Into::into).collect(),
        page,
        total_pages: podcast_repo::total_pages(total_results),
        total_results,
    }))
}

/// Podcasts created by the caller, whatever the caller's role.
pub async fn my_podcasts(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<PodcastResponse>>, AppError> {
    let rows = podcast_repo::list_by_creator(&state.db, identity.id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_podcast(
    State(state): State<AppState>,
    Path(podcast_id): Path<i64>,
) -> Result<Json<PodcastDetailResponse>, AppError> {
    let row = podcast_repo::get(&state.db, podcast_id)
        .await?
        .ok_or(AppError::not_found("podcast"))?;
    let episodes = episode_repo::list_by_podcast(&state.db, podcast_id).await?;

    Ok(Json(PodcastDetailResponse {
        podcast: row.into(),
        episodes: episodes.into_iter().map(Into::into).collect(),
    }))
}

pub async fn update_podcast(
    State(state): State<AppState>,
    Path(podcast_id): Path<i64>,
    Json(req): Json<UpdatePodcastRequest>,
) -> Result<Json<PodcastResponse>, AppError> {
    req.validate().map_err(invalid)?;

    let row = podcast_repo::update(
        &state.db,
        podcast_id,
        &req.title,
        &req.category,
        req.description(),
    )
    .await?
    .ok_or(AppError::not_found("podcast"))?;

    Ok(Json(row.into()))
}

pub async fn delete_podcast(
    State(state): State<AppState>,
    Path(podcast_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if podcast_repo::delete(&state.db, podcast_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("podcast"))
    }
}
