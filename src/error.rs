use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Training plan {0} not found")]
    PlanNotFound(i64),

    #[error("A workout session is already in progress")]
    SessionInProgress,

    #[error("No active workout session")]
    NoActiveSession,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether retrying the operation can succeed without any session state
    /// having been lost. Transport failures and 5xx responses qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Http(_) => true,
            AppError::Service { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let server_side = AppError::Service {
            status: 503,
            message: "unavailable".to_string(),
        };
        let client_side = AppError::Service {
            status: 422,
            message: "bad payload".to_string(),
        };
        assert!(server_side.is_retryable());
        assert!(!client_side.is_retryable());
        assert!(!AppError::PlanNotFound(7).is_retryable());
        assert!(!AppError::SessionInProgress.is_retryable());
    }
}
