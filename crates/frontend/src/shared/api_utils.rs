//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// The dashboard is served by the same host as the orders API, so the base
/// is the origin of the current window location.
///
/// # Returns
/// - API base URL like "http://localhost:5000" or "https://example.com"
/// - Empty string if window is not available (relative URLs are used then)
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Join a base URL and an API path
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://host/", "/api/orders/filter"), "http://host/api/orders/filter");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
