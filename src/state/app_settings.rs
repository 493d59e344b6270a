use cricket_api::client::{BASE_URL_ENV, DEFAULT_BASE_URL};
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend base URL, resolved once at startup. Nothing re-reads the
    /// environment after this.
    pub api_url: String,
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        let api_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self { api_url, full_screen: false, log_level: None }
    }
}
