//! Query result -> typed view tree.
//!
//! Everything here is pure: the Leptos components only walk the structures
//! built by [`render`].

use contracts::domain::a001_orders::dto::{OrderDetail, OrderDto, OrderStatus, ValidationSummary};
use contracts::domain::a001_orders::response::QueryResult;
use log::warn;

use crate::shared::components::pagination_controls::{paginate, PaginationView};
use crate::shared::components::ui::badge::Tone;
use crate::shared::date_utils::format_datetime;

pub const NO_RESULTS_TITLE: &str = "No Orders Found";
pub const NO_RESULTS_TEXT: &str =
    "No orders match your current filter criteria. Try adjusting your filters.";

/// Line items listed on a card before the "+ N more items" note
const PREVIEW_ITEMS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub summary: ResultsSummary,
    pub body: ResultsBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsBody {
    Empty,
    Orders {
        cards: Vec<OrderCard>,
        pagination: Option<PaginationView>,
        /// Current page holds at least one COMPLETED order
        show_validate_all: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSummary {
    pub total_count: u64,
    /// Per-status counts; empty unless more than one status is present
    pub status_breakdown: Vec<(String, u64)>,
}

impl ResultsSummary {
    pub fn headline(&self) -> String {
        format!("Found {} orders", self.total_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub tone: Tone,
    pub icon: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIndicator {
    NotValidated,
    NoDocument,
    Valid,
    Invalid { discrepancies: u32 },
}

impl ValidationIndicator {
    pub fn label(&self) -> String {
        match self {
            ValidationIndicator::NotValidated => "Unvalidated".to_string(),
            ValidationIndicator::NoDocument => "No Doc".to_string(),
            ValidationIndicator::Valid => "Valid".to_string(),
            ValidationIndicator::Invalid { discrepancies } => format!("{} Issues", discrepancies),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ValidationIndicator::NotValidated => Tone::Info,
            ValidationIndicator::NoDocument => Tone::Warning,
            ValidationIndicator::Valid => Tone::Success,
            ValidationIndicator::Invalid { .. } => Tone::Danger,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ValidationIndicator::NotValidated => "help-circle",
            ValidationIndicator::NoDocument => "file-x",
            ValidationIndicator::Valid => "check-circle",
            ValidationIndicator::Invalid { .. } => "alert-triangle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSection {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySection {
    pub rider: String,
    pub vehicle: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemsSection {
    pub total: usize,
    pub preview: Vec<ItemRow>,
    pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationDetails {
    pub is_valid: bool,
    pub no_document: bool,
    /// Confidence as a rounded percentage, 0..=100
    pub confidence_percent: u8,
    pub items_found: Option<u32>,
    pub discrepancies: u32,
    /// `(matched, verified)` when GTINs were checked
    pub gtins: Option<(u32, u32)>,
    pub validation_date: Option<String>,
    pub processing_time: Option<f64>,
}

impl ValidationDetails {
    pub fn processed_line(&self) -> String {
        let date = self.validation_date.as_deref().unwrap_or("N/A");
        match self.processing_time {
            Some(seconds) => format!("Processed {} ({:.2}s)", date, seconds),
            None => format!("Processed {}", date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Validate,
    Reprocess,
    NoDocument,
    CompletedOnly,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Validate => "Validate GRN",
            CardAction::Reprocess => "Re-process GRN",
            CardAction::NoDocument => "No GRN Document",
            CardAction::CompletedOnly => "GRN Validation (Completed Only)",
        }
    }

    pub fn enabled(&self) -> bool {
        matches!(self, CardAction::Validate | CardAction::Reprocess)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CardAction::Validate => "check-circle",
            CardAction::Reprocess => "rotate-ccw",
            CardAction::NoDocument => "file-x",
            CardAction::CompletedOnly => "lock",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub number: u64,
    pub order_id: String,
    pub status: StatusBadge,
    pub cancellation_reason: Option<String>,
    pub no_grn: bool,
    pub validation: ValidationIndicator,
    pub location: Option<LocationSection>,
    pub delivery: Option<DeliverySection>,
    pub items: Option<ItemsSection>,
    pub validation_details: Option<ValidationDetails>,
    pub completed_on: Option<String>,
    pub action: CardAction,
}

/// Build the display model for one page of results
pub fn render(result: &QueryResult, pagination_radius: u32) -> ResultsView {
    let summary = summarize(result);
    if result.orders.is_empty() {
        return ResultsView {
            summary,
            body: ResultsBody::Empty,
        };
    }

    let first_number = u64::from(result.page.max(1) - 1) * u64::from(result.per_page);
    let cards = result
        .orders
        .iter()
        .enumerate()
        .map(|(index, order)| order_card(order, first_number + index as u64 + 1))
        .collect();

    let show_validate_all = result
        .orders
        .iter()
        .any(|order| order.order_status == OrderStatus::Completed);

    ResultsView {
        summary,
        body: ResultsBody::Orders {
            cards,
            pagination: paginate(result.page, result.total_pages, pagination_radius),
            show_validate_all,
        },
    }
}

fn summarize(result: &QueryResult) -> ResultsSummary {
    let counts: Vec<(String, u64)> = match &result.status_totals {
        Some(totals) => totals
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(status, count)| (status.clone(), *count))
            .collect(),
        None => {
            let mut counts: Vec<(String, u64)> = Vec::new();
            for order in &result.orders {
                let status = order.order_status.as_str();
                match counts.iter_mut().find(|(s, _)| s == status) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((status.to_string(), 1)),
                }
            }
            counts
        }
    };

    ResultsSummary {
        total_count: result.total_count,
        status_breakdown: if counts.len() > 1 { counts } else { Vec::new() },
    }
}

pub fn status_badge(status: &OrderStatus) -> StatusBadge {
    let (tone, icon) = match status {
        OrderStatus::Cancelled => (Tone::Danger, Some("x-circle")),
        OrderStatus::Completed => (Tone::Success, None),
        OrderStatus::Executing | OrderStatus::Ongoing => (Tone::Warning, None),
        OrderStatus::Other(_) => (Tone::Secondary, None),
    };
    StatusBadge {
        label: status.as_str().to_string(),
        tone,
        icon,
    }
}

pub fn validation_indicator(summary: Option<&ValidationSummary>) -> ValidationIndicator {
    match summary {
        Some(s) if s.has_validation => {
            if s.has_document == Some(false) {
                ValidationIndicator::NoDocument
            } else if s.is_valid {
                ValidationIndicator::Valid
            } else {
                ValidationIndicator::Invalid {
                    discrepancies: s.discrepancies_count,
                }
            }
        }
        _ => ValidationIndicator::NotValidated,
    }
}

pub fn card_action(order: &OrderDto) -> CardAction {
    let validated = order
        .validation_summary
        .as_ref()
        .map_or(false, |s| s.has_validation);
    match (&order.order_status, order.has_grn, validated) {
        (OrderStatus::Completed, true, false) => CardAction::Validate,
        (OrderStatus::Completed, true, true) => CardAction::Reprocess,
        (OrderStatus::Completed, false, _) => CardAction::NoDocument,
        _ => CardAction::CompletedOnly,
    }
}

/// Embedded payload, or a detail rebuilt from the top-level fields when the
/// payload is absent or malformed
fn detail_or_fallback(order: &OrderDto) -> (Option<OrderDetail>, bool) {
    match order.detail() {
        Ok(Some(detail)) => (Some(detail), false),
        Ok(None) => (None, true),
        Err(e) => {
            warn!("Could not parse raw_data of order {}: {}", order.id, e);
            (None, true)
        }
    }
}

pub fn order_card(order: &OrderDto, number: u64) -> OrderCard {
    let (detail, fallback) = detail_or_fallback(order);
    let location = detail.as_ref().and_then(|d| d.location.as_ref());
    let tour = detail
        .as_ref()
        .and_then(|d| d.order_metadata.as_ref())
        .and_then(|m| m.tour_detail.as_ref());
    let line_items = detail
        .as_ref()
        .and_then(|d| d.order_metadata.as_ref())
        .map(|m| m.line_items.as_slice())
        .unwrap_or(&[]);

    let location_name = location
        .and_then(|l| l.name.clone())
        .or_else(|| fallback.then(|| order.location_name.clone()).flatten())
        .filter(|name| !name.is_empty());
    let address = location.and_then(|l| l.address.as_ref());
    let location = location_name.map(|name| LocationSection {
        name,
        city: address
            .and_then(|a| a.city.clone())
            .or_else(|| order.location_city.clone())
            .filter(|city| !city.is_empty())
            .unwrap_or_else(|| "N/A".to_string()),
        address: address
            .and_then(|a| a.formatted_address.clone())
            .or_else(|| order.location_address.clone())
            .filter(|a| !a.is_empty()),
    });

    let rider = tour
        .and_then(|t| t.rider_name.clone())
        .or_else(|| order.rider_name.clone())
        .filter(|r| !r.is_empty());
    let delivery = rider.map(|rider| DeliverySection {
        rider,
        vehicle: tour
            .and_then(|t| t.vehicle_registration_number.clone())
            .or_else(|| order.vehicle_registration.clone())
            .filter(|v| !v.is_empty()),
    });

    let items = (!line_items.is_empty()).then(|| ItemsSection {
        total: line_items.len(),
        preview: line_items
            .iter()
            .take(PREVIEW_ITEMS)
            .map(|item| ItemRow {
                id: item.id.clone(),
                quantity: item.effective_quantity(),
            })
            .collect(),
        remaining: line_items.len().saturating_sub(PREVIEW_ITEMS),
    });

    let summary = order.validation_summary.as_ref();
    let validation_details = summary
        .filter(|s| s.has_validation)
        .map(details_for);

    OrderCard {
        number,
        order_id: order.id.clone(),
        status: status_badge(&order.order_status),
        cancellation_reason: order
            .cancellation_reason
            .clone()
            .filter(|r| !r.is_empty()),
        no_grn: !order.has_grn,
        validation: validation_indicator(summary),
        location,
        delivery,
        items,
        validation_details,
        completed_on: order.completed_on.as_deref().map(format_datetime),
        action: card_action(order),
    }
}

fn details_for(summary: &ValidationSummary) -> ValidationDetails {
    let confidence = summary.confidence_score.clamp(0.0, 1.0);
    ValidationDetails {
        is_valid: summary.is_valid,
        no_document: summary.has_document == Some(false),
        confidence_percent: (confidence * 100.0).round() as u8,
        items_found: summary.summary.as_ref().and_then(|t| t.total_items_found),
        discrepancies: summary.discrepancies_count,
        gtins: match (summary.gtins_matched, summary.gtins_verified) {
            (matched, Some(verified)) if verified > 0 => Some((matched.unwrap_or(0), verified)),
            _ => None,
        },
        validation_date: summary
            .validation_date
            .as_deref()
            .and_then(|d| d.split('T').next())
            .map(str::to_string),
        processing_time: summary.processing_time,
    }
}
