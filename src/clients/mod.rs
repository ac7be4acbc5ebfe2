pub mod history_client;
pub mod plan_client;

pub use history_client::HistoryClient;
pub use plan_client::PlanClient;

use crate::error::{AppError, Result};

/// Map a non-success response into a service error carrying the status
/// and whatever body the service sent.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(AppError::Service {
        status: status.as_u16(),
        message,
    })
}
