use serde::{Deserialize, Serialize};

/// Статус заказа. Неизвестные статусы сохраняются как есть.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Completed,
    Cancelled,
    Executing,
    Ongoing,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Executing => "EXECUTING",
            OrderStatus::Ongoing => "ONGOING",
            OrderStatus::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "COMPLETED" => OrderStatus::Completed,
            "CANCELLED" => OrderStatus::Cancelled,
            "EXECUTING" => OrderStatus::Executing,
            "ONGOING" => OrderStatus::Ongoing,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Other(String::new())
    }
}

/// Заказ в том виде, в каком его возвращает фильтр
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: String,
    #[serde(default)]
    pub order_status: OrderStatus,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub has_grn: bool,
    #[serde(default)]
    pub validation_summary: Option<ValidationSummary>,

    /// Embedded order payload: either a JSON object or a JSON-encoded string
    #[serde(default)]
    pub raw_data: Option<serde_json::Value>,

    // Top-level fallbacks for the embedded payload
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_city: Option<String>,
    #[serde(default)]
    pub location_address: Option<String>,
    #[serde(default)]
    pub rider_name: Option<String>,
    #[serde(default)]
    pub vehicle_registration: Option<String>,
    #[serde(default)]
    pub completed_on: Option<String>,
}

impl OrderDto {
    /// Decode the embedded payload.
    ///
    /// `Ok(None)` when the order carries no payload; an error when the payload
    /// is present but malformed.
    pub fn detail(&self) -> Result<Option<OrderDetail>, serde_json::Error> {
        match &self.raw_data {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(raw)) => serde_json::from_str(raw).map(Some),
            Some(value) => serde_json::from_value(value.clone()).map(Some),
        }
    }
}

/// Итог проверки GRN-документа по заказу
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    #[serde(default)]
    pub has_validation: bool,
    #[serde(default)]
    pub is_valid: bool,
    /// `Some(false)` means the GRN image was checked and contains no document
    #[serde(default)]
    pub has_document: Option<bool>,
    #[serde(default)]
    pub discrepancies_count: u32,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub gtins_verified: Option<u32>,
    #[serde(default)]
    pub gtins_matched: Option<u32>,
    #[serde(default)]
    pub summary: Option<ValidationTotals>,
    #[serde(default)]
    pub validation_date: Option<String>,
    #[serde(default)]
    pub processing_time: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationTotals {
    #[serde(default)]
    pub total_items_found: Option<u32>,
}

/// Embedded order payload (camelCase, as produced by the upstream dispatch system)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub order_metadata: Option<OrderMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetadata {
    #[serde(default)]
    pub tour_detail: Option<TourDetail>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDetail {
    #[serde(default)]
    pub rider_name: Option<String>,
    #[serde(default)]
    pub vehicle_registration_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub transaction_status: Option<TransactionStatus>,
}

impl LineItem {
    /// Transacted quantity when known, otherwise the ordered quantity
    pub fn effective_quantity(&self) -> f64 {
        self.transaction_status
            .as_ref()
            .and_then(|status| status.transacted_quantity)
            .or(self.quantity)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    #[serde(default)]
    pub transacted_quantity: Option<f64>,
}
