use std::env;

#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub database_url: String,
    pub http_timeout_secs: u64,
    pub user_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:ironlift.db?mode=rwc".to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            user_id: env::var("USER_ID").ok(),
        })
    }
}
