use chrono::Duration;
use serde::Deserialize;

const STATE_KEY: &str = "orders_filter_state_v1";
const PANEL_EXPANDED_KEY: &str = "orders_filters_expanded";
const SAVED_SETS_KEY: &str = "orders_saved_filter_sets_v1";

/// Настройки панели фильтров заказов
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    // API
    pub filter_path: String,
    pub refresh_path: String,
    pub options_path: String,

    // Пагинация
    pub default_per_page: u32,
    pub page_size_options: Vec<u32>,
    pub options_page_size: u32,
    /// Pages shown on each side of the current page
    pub pagination_radius: u32,

    // localStorage
    pub state_ttl_hours: i64,
    pub state_key: String,
    pub panel_expanded_key: String,
    pub saved_sets_key: String,

    // UI
    pub status_autohide_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_path: "/api/orders/filter".to_string(),
            refresh_path: "/api/refresh-orders".to_string(),
            options_path: "/api/filters/options".to_string(),
            default_per_page: 50,
            page_size_options: vec![25, 50, 100, 200],
            options_page_size: 20,
            pagination_radius: 2,
            state_ttl_hours: 24,
            state_key: STATE_KEY.to_string(),
            panel_expanded_key: PANEL_EXPANDED_KEY.to_string(),
            saved_sets_key: SAVED_SETS_KEY.to_string(),
            status_autohide_ms: 5000,
        }
    }
}

impl FilterConfig {
    pub fn state_ttl(&self) -> Duration {
        Duration::hours(self.state_ttl_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: FilterConfig =
            serde_json::from_str(r#"{ "default_per_page": 100, "state_ttl_hours": 12 }"#).unwrap();
        assert_eq!(config.default_per_page, 100);
        assert_eq!(config.state_ttl(), Duration::hours(12));
        assert_eq!(config.filter_path, "/api/orders/filter");
        assert_eq!(config.options_page_size, 20);
    }
}
