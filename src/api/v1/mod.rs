/*
 * Responsibility
 * - v1 の公開ポイント (routes() / access_policies() の re-export)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{access_policies, routes};
