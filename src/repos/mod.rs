/*
 * Responsibility
 * - テーブルごとの SQLx 操作をまとめる
 */
pub mod episode_repo;
pub mod error;
pub mod podcast_repo;
pub mod review_repo;
pub mod user_repo;
