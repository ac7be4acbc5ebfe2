use reqwest::Client;

use super::check_status;
use crate::error::Result;
use crate::models::{WorkoutHistoryCreate, WorkoutHistoryItem};

/// Client for the workout-history service.
#[derive(Clone)]
pub struct HistoryClient {
    http: Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn submit(&self, record: &WorkoutHistoryCreate) -> Result<WorkoutHistoryItem> {
        let url = format!("{}/history", self.base_url);
        let response = self.http.post(&url).json(record).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}
