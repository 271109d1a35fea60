use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Значение одного фильтра: строка (числа тоже передаются строкой) или список для multi-select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    /// Scalar value, or the first entry of a list
    pub fn first(&self) -> Option<&str> {
        match self {
            FilterValue::One(value) => Some(value.as_str()),
            FilterValue::Many(values) => values.first().map(String::as_str),
        }
    }

    /// Scalar value only; lists yield `None`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::One(value) => Some(value.as_str()),
            FilterValue::Many(_) => None,
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            FilterValue::One(value) => vec![value.as_str()],
            FilterValue::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::One(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::One(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::Many(values)
    }
}

/// Flat set of active filter criteria, keyed by filter field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterRecord(BTreeMap<String, FilterValue>);

impl FilterRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.0.get(name)
    }

    /// Scalar value of a field, `None` when absent or multi-valued
    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(FilterValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FilterValue> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Тело запроса `POST /api/orders/filter`
///
/// The filter fields are flattened next to the pagination keys, so the wire
/// shape is a single flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilterRequest {
    #[serde(flatten)]
    pub filters: FilterRecord,
    pub page: u32,
    pub per_page: u32,
}

/// Тело запроса `POST /api/refresh-orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshOrdersRequest {
    pub order_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// Query string of `GET /api/filters/options/<field>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptionsQuery {
    pub search: String,
    pub page: u32,
    pub per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_request_is_a_flat_object() {
        let mut filters = FilterRecord::new();
        filters.insert("location_city", "Austin");
        filters.insert(
            "order_status",
            vec!["COMPLETED".to_string(), "CANCELLED".to_string()],
        );
        let request = OrderFilterRequest {
            filters,
            page: 2,
            per_page: 50,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "location_city": "Austin",
                "order_status": ["COMPLETED", "CANCELLED"],
                "page": 2,
                "per_page": 50
            })
        );

        let parsed: OrderFilterRequest = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, request);
        assert!(!parsed.filters.contains("page"));
    }

    #[test]
    fn refresh_request_omits_missing_dates() {
        let request = RefreshOrdersRequest {
            order_status: "all".to_string(),
            date: Some("2024-06-01".to_string()),
            date_from: None,
            date_to: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "order_status": "all", "date": "2024-06-01" }));
    }

    #[test]
    fn filter_value_accessors() {
        let one = FilterValue::from("x");
        let many = FilterValue::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(one.as_str(), Some("x"));
        assert_eq!(many.as_str(), None);
        assert_eq!(many.first(), Some("a"));
        assert_eq!(many.values(), vec!["a", "b"]);
    }
}
