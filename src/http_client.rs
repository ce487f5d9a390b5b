use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

static CLIENT: OnceCell<Client> = OnceCell::new();
static BASE_URL: OnceCell<String> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Base URL of the REST backend, without a trailing slash.
pub fn api_base_url() -> &'static str {
    BASE_URL.get_or_init(|| {
        std::env::var("PUTT_API_BASE_URL")
            .ok()
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    })
}

/// Offline mode runs the UI against the local demo feed instead of a backend.
pub fn offline_mode() -> bool {
    if let Ok(flag) = std::env::var("PUTT_OFFLINE") {
        let flag = flag.trim();
        return flag == "1" || flag.eq_ignore_ascii_case("true");
    }
    std::env::var("PUTT_API_BASE_URL").is_err()
}
