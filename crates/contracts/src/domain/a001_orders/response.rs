use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::dto::OrderDto;

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50
}

/// Ответ `POST /api/orders/filter`: одна страница заказов плюс метаданные пагинации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<OrderDto>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_totals: Option<BTreeMap<String, u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ответ `POST /api/refresh-orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshOrdersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_orders_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Ответ `GET /api/filters/options/<field>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub options: Vec<FilterOption>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_query_result_parses_without_pagination() {
        let result: QueryResult = serde_json::from_value(json!({
            "success": false,
            "orders": [],
            "total_count": 0,
            "error": "database unavailable"
        }))
        .unwrap();

        assert!(!result.success);
        assert_eq!(result.page, 1);
        assert_eq!(result.per_page, 50);
        assert_eq!(result.error.as_deref(), Some("database unavailable"));
    }

    #[test]
    fn status_totals_are_optional() {
        let result: QueryResult = serde_json::from_value(json!({
            "success": true,
            "orders": [],
            "total_count": 4,
            "page": 1,
            "per_page": 50,
            "total_pages": 1,
            "status_totals": { "COMPLETED": 3, "CANCELLED": 1 }
        }))
        .unwrap();

        let totals = result.status_totals.unwrap();
        assert_eq!(totals.get("COMPLETED"), Some(&3));
        assert_eq!(totals.len(), 2);
    }
}
