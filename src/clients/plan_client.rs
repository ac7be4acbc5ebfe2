use reqwest::{Client, StatusCode};

use super::check_status;
use crate::error::{AppError, Result};
use crate::models::TrainingPlan;

/// Read-only client for the training-plan service. Plans are not cached;
/// every call round-trips.
#[derive(Clone)]
pub struct PlanClient {
    http: Client,
    base_url: String,
}

impl PlanClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_plan(&self, plan_id: i64) -> Result<TrainingPlan> {
        let url = format!("{}/training-plans/{}", self.base_url, plan_id);
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::PlanNotFound(plan_id));
        }
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn list_plans(&self, user_id: Option<&str>) -> Result<Vec<TrainingPlan>> {
        let url = format!("{}/training-plans", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(user_id) = user_id {
            request = request.query(&[("user_id", user_id)]);
        }
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}
