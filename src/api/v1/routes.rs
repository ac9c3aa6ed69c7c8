/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - すべての route を operation() 経由で登録し、operation 名と guard を結びつける
 * - guard に渡す policy 宣言 (handlers::*::POLICIES) もここで集める
 */
use axum::{
    Router,
    routing::{MethodRouter, delete, get, post, put},
};

use crate::middleware::auth::operation;
use crate::services::auth::OperationPolicy;
use crate::state::AppState;

use crate::api::v1::handlers::{episodes, podcasts, reviews, users};

/// Every per-operation policy table served under `/api/v1`.
pub fn access_policies() -> [&'static [OperationPolicy]; 4] {
    [
        podcasts::POLICIES,
        episodes::POLICIES,
        reviews::POLICIES,
        users::POLICIES,
    ]
}

pub fn routes(state: &AppState) -> Router<AppState> {
    let op = |name: &'static str, route: MethodRouter<AppState>| operation(state, name, route);

    Router::new()
        // podcasts
        .route(
            "/podcasts",
            op(
                podcasts::GET_ALL_PODCASTS,
                get(podcasts::get_all_podcasts),
            )
            .merge(op(podcasts::CREATE_PODCAST, post(podcasts::create_podcast))),
        )
        .route(
            "/podcasts/search",
            op(podcasts::SEARCH_PODCASTS, get(podcasts::search_podcasts)),
        )
        .route(
            "/podcasts/mine",
            op(podcasts::MY_PODCASTS, get(podcasts::my_podcasts)),
        )
        .route(
            "/podcasts/{podcast_id}",
            op(podcasts::GET_PODCAST, get(podcasts::get_podcast))
                .merge(op(podcasts::UPDATE_PODCAST, put(podcasts::update_podcast)))
                .merge(op(podcasts::DELETE_PODCAST, delete(podcasts::delete_podcast))),
        )
        // episodes
        .route(
            "/podcasts/{podcast_id}/episodes",
            op(episodes::GET_EPISODES, get(episodes::get_episodes))
                .merge(op(episodes::CREATE_EPISODE, post(episodes::create_episode))),
        )
        .route(
            "/podcasts/{podcast_id}/episodes/{episode_id}",
            op(episodes::UPDATE_EPISODE, put(episodes::update_episode))
                .merge(op(episodes::DELETE_EPISODE, delete(episodes::delete_episode))),
        )
        // reviews
        .route(
            "/podcasts/{podcast_id}/reviews",
            op(reviews::CREATE_REVIEW, post(reviews::create_review)),
        )
        // users
        .route(
            "/podcasts/{podcast_id}/subscription",
            op(users::TOGGLE_SUBSCRIPTION, post(users::toggle_subscription)),
        )
        .route(
            "/users",
            op(users::CREATE_ACCOUNT, post(users::create_account)),
        )
        .route("/users/{user_id}", op(users::SEE_PROFILE, get(users::see_profile)))
        .route("/login", op(users::LOGIN, post(users::login)))
        .route(
            "/me",
            op(users::ME, get(users::me)).merge(op(users::EDIT_PROFILE, put(users::edit_profile))),
        )
        .route(
            "/me/subscriptions",
            op(users::SUBSCRIPTIONS, get(users::subscriptions)),
        )
}
