use log::{debug, log_enabled, Level};
use reqwest::StatusCode;
use serde::Serialize;

/// Longest body echoed to the debug log
const MAX_LOGGED_CHARS: usize = 2000;

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Keep a short prefix of a key so logs can tell keys apart without leaking them
pub fn mask_credential(key: &str) -> String {
    if key.chars().count() <= 8 {
        return "***".to_string();
    }
    format!("{}***", key.chars().take(5).collect::<String>())
}

/// Log an outgoing request at debug level
pub fn log_request<T: Serialize>(url: &str, body: &T, api_key: &str) {
    if !log_enabled!(Level::Debug) {
        return;
    }

    let host = reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    let json = serde_json::to_string(body)
        .unwrap_or_else(|e| format!("<unserializable request: {}>", e));

    debug!(
        "POST {} (host {}) auth=Bearer {} body={}",
        url,
        host,
        mask_credential(api_key),
        safe_truncate(&json, MAX_LOGGED_CHARS)
    );
}

/// Log a response at debug level
pub fn log_response(status: StatusCode, body: &str) {
    debug!(
        "response {} ({} bytes): {}",
        status,
        body.len(),
        safe_truncate(body, MAX_LOGGED_CHARS)
    );
}
