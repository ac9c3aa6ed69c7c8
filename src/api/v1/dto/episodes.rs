use serde::{Deserialize, Serialize};

use crate::repos::episode_repo::{EpisodeChanges, EpisodeRow};

#[derive(Debug, Deserialize)]
pub struct CreateEpisodeRequest {
    pub title: String,
    pub category: String,
    pub image_url: Option<String>,
    pub play_time: Option<i32>,
}

impl CreateEpisodeRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.category.trim().is_empty() {
            return Err("category is required");
        }
        validate_common(self.image_url.as_deref(), self.play_time)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateEpisodeRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub play_time: Option<i32>,
}

impl UpdateEpisodeRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(category) = &self.category
            && category.trim().is_empty()
        {
            return Err("category cannot be empty");
        }
        validate_common(self.image_url.as_deref(), self.play_time)
    }

    pub fn changes(&self) -> EpisodeChanges<'_> {
        EpisodeChanges {
            title: self.title.as_deref(),
            category: self.category.as_deref(),
            image_url: self.image_url.as_deref(),
            play_time: self.play_time,
        }
    }
}

fn validate_common(image_url: Option<&str>, play_time: Option<i32>) -> Result<(), &'static str> {
    if let Some(url) = image_url
        && url.len() > 2048
    {
        return Err("image_url must be <= 2048 chars");
    }
    if let Some(play_time) = play_time
        && play_time < 0
    {
        return Err("play_time must be >= 0");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct EpisodeResponse {
    pub id: i64,
    pub podcast_id: i64,
    pub title: String,
    pub category: String,
    pub image_url: Option<String>,
    pub play_time: Option<i32>,
}

impl From<EpisodeRow> for EpisodeResponse {
    fn from(row: EpisodeRow) -> Self {
        Self {
            id: row.id,
            podcast_id: row.podcast_id,
            title: row.title,
            category: row.category,
            image_url: row.image_url,
            play_time: row.play_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_play_time_is_rejected() {
        let req = UpdateEpisodeRequest {
            title: None,
            category: None,
            image_url: None,
            play_time: Some(-1),
        };
        assert_eq!(req.validate(), Err("play_time must be >= 0"));
    }
}
