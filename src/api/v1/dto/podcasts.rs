/*
 * Responsibility
 * - Podcasts の request/response DTO
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::episodes::EpisodeResponse;
use crate::repos::podcast_repo::{MAX_SEARCH_PAGE, PodcastRow};

fn validate_title_and_category(title: &str, category: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("title is required");
    }
    if category.trim().is_empty() {
        return Err("category is required");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreatePodcastRequest {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
}

impl CreatePodcastRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_title_and_category(&self.title, &self.category)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePodcastRequest {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
}

impl UpdatePodcastRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_title_and_category(&self.title, &self.category)
    }

    // Empty description clears the column.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchPodcastsQuery {
    #[serde(default)]
    pub title_search: String,
    pub page: Option<i64>,
}

impl SearchPodcastsQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page.is_some_and(|page| page > MAX_SEARCH_PAGE) {
            return Err("page is out of range");
        }
        Ok(())
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Serialize)]
pub struct PodcastResponse {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub created_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PodcastRow> for PodcastResponse {
    fn from(row: PodcastRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            category: row.category,
            description: row.description,
            created_user_id: row.created_user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PodcastDetailResponse {
    #[serde(flatten)]
    pub podcast: PodcastResponse,
    pub episodes: Vec<EpisodeResponse>,
}

#[derive(Debug, Serialize)]
pub struct SearchPodcastsResponse {
    pub podcasts: Vec<PodcastResponse>,
    pub page: i64,
    pub total_pages: i64,
    pub total_results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_treats_empty_description_as_null() {
        let req = UpdatePodcastRequest {
            title: "t".into(),
            category: "c".into(),
            description: Some(String::new()),
        };
        assert_eq!(req.description(), None);
    }

    #[test]
    fn search_page_defaults_to_first() {
        let q: SearchPodcastsQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(q.page(), 1);
        assert_eq!(q.title_search, "");

        let q = SearchPodcastsQuery {
            title_search: "rust".into(),
            page: Some(0),
        };
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn search_page_is_bounded() {
        let huge = SearchPodcastsQuery {
            title_search: "a".into(),
            page: Some(i64::MAX),
        };
        assert_eq!(huge.validate(), Err("page is out of range"));

        let last = SearchPodcastsQuery {
            title_search: "a".into(),
            page: Some(MAX_SEARCH_PAGE),
        };
        assert!(last.validate().is_ok());
    }

    #[test]
    fn create_requires_title_and_category() {
        let req = CreatePodcastRequest {
            title: " ".into(),
            category: "tech".into(),
            description: None,
        };
        assert_eq!(req.validate(), Err("title is required"));
    }
}
