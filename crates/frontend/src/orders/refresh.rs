use chrono::NaiveDate;
use contracts::domain::a001_orders::request::{FilterRecord, RefreshOrdersRequest};
use contracts::domain::a001_orders::response::RefreshOrdersResponse;

use super::fields::{DATE_FROM, DATE_TO, ORDER_STATUS};
use crate::shared::date_utils::iso_date;

pub const REFRESH_FAILED_MESSAGE: &str = "Failed to refresh orders. Please try again.";

/// Body of the refresh request for the current filters.
///
/// Both dates give a range, `date_from` alone a single day, and anything
/// else refreshes `today`.
pub fn refresh_request(filters: &FilterRecord, today: NaiveDate) -> RefreshOrdersRequest {
    let order_status = filters
        .get(ORDER_STATUS)
        .and_then(|value| value.first())
        .filter(|status| !status.is_empty())
        .unwrap_or("all")
        .to_string();

    let date_from = filters.text(DATE_FROM).map(str::to_string);
    let date_to = filters.text(DATE_TO).map(str::to_string);

    match (date_from, date_to) {
        (Some(from), Some(to)) => RefreshOrdersRequest {
            order_status,
            date: None,
            date_from: Some(from),
            date_to: Some(to),
        },
        (Some(from), None) => RefreshOrdersRequest {
            order_status,
            date: Some(from),
            date_from: None,
            date_to: None,
        },
        _ => RefreshOrdersRequest {
            order_status,
            date: Some(iso_date(today)),
            date_from: None,
            date_to: None,
        },
    }
}

/// Banner text for a refresh reply; `Err` carries the failure text
pub fn refresh_message(response: &RefreshOrdersResponse) -> Result<String, String> {
    if response.success {
        Ok(match (&response.message, response.total_orders_count) {
            (Some(message), _) if !message.is_empty() => message.clone(),
            (_, count) => format!("Refreshed! Found {} orders", count.unwrap_or(0)),
        })
    } else {
        Err(format!(
            "Error: {}",
            response.message.as_deref().unwrap_or("Unknown error")
        ))
    }
}
