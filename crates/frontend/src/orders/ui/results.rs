use leptos::prelude::*;

use super::signals::RESULTS_ANCHOR_ID;
use crate::orders::render::{
    OrderCard, ResultsBody, ResultsSummary, ResultsView, ValidationDetails, NO_RESULTS_TEXT,
    NO_RESULTS_TITLE,
};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::badge::Tone;
use crate::shared::components::ui::{Badge, Button};
use crate::shared::icons::icon;

#[component]
pub fn ResultsPanel(
    results: RwSignal<Option<ResultsView>>,
    on_page_change: Callback<u32>,
    on_validate_all: Callback<()>,
) -> impl IntoView {
    view! {
        <section id=RESULTS_ANCHOR_ID class="orders-results">
            {move || {
                results
                    .get()
                    .map(|ResultsView { summary, body }| {
                        view! {
                            <SummaryBanner summary=summary />
                            {results_body(body, on_page_change, on_validate_all)}
                        }
                    })
            }}
        </section>
    }
}

fn results_body(
    body: ResultsBody,
    on_page_change: Callback<u32>,
    on_validate_all: Callback<()>,
) -> AnyView {
    match body {
        ResultsBody::Empty => view! {
            <div class="empty-state">
                {icon("search")}
                <h4>{NO_RESULTS_TITLE}</h4>
                <p class="text-muted">{NO_RESULTS_TEXT}</p>
            </div>
        }
        .into_any(),
        ResultsBody::Orders {
            cards,
            pagination,
            show_validate_all,
        } => view! {
            {show_validate_all.then(|| view! {
                <div class="orders-results__actions">
                    <Button variant="success" on_click=Callback::new(move |_| on_validate_all.run(()))>
                        {icon("check-circle")}
                        "Validate All"
                    </Button>
                </div>
            })}
            <div class="orders-grid">
                {cards
                    .into_iter()
                    .map(|card| view! { <OrderCardView card=card /> })
                    .collect_view()}
            </div>
            {pagination.map(|pagination| view! {
                <PaginationControls pagination=pagination on_page_change=on_page_change />
            })}
        }
        .into_any(),
    }
}

#[component]
fn SummaryBanner(summary: ResultsSummary) -> impl IntoView {
    let breakdown = summary.status_breakdown.clone();
    view! {
        <div class="alert alert-info results-summary">
            {icon("info")}
            <span>{summary.headline()}" matching your filters"</span>
            {(!breakdown.is_empty()).then(|| view! {
                <div class="results-summary__breakdown">
                    <strong>"Status breakdown:"</strong>
                    {breakdown
                        .into_iter()
                        .map(|(status, count)| view! {
                            <span class="badge badge--neutral">{format!("{}: {}", status, count)}</span>
                        })
                        .collect_view()}
                </div>
            })}
        </div>
    }
}

#[component]
pub fn OrderCardView(card: OrderCard) -> impl IntoView {
    let detail_href = format!("/order/{}", card.order_id);
    let OrderCard {
        number,
        order_id,
        status,
        cancellation_reason,
        no_grn,
        validation,
        location,
        delivery,
        items,
        validation_details,
        completed_on,
        action,
    } = card;

    view! {
        <div class="order-card">
            <a class="card-header" href=detail_href.clone()>
                {icon("package")}
                <div>
                    <h6>{format!("Order #{}", number)}</h6>
                    <small class="opacity-75">{order_id}</small>
                </div>
            </a>

            <div class="card-body order-card-content">
                <div class="order-card__badges">
                    <Badge tone=status.tone>
                        {status.icon.map(icon)}
                        {status.label}
                    </Badge>
                    {cancellation_reason.map(|reason| view! {
                        <Badge tone=Tone::Danger title="Cancellation Reason">
                            {icon("alert-triangle")}
                            {reason}
                        </Badge>
                    })}
                    {no_grn.then(|| view! {
                        <Badge tone=Tone::Danger title="No GRN document available for this order">
                            {icon("file-x")}
                            "No GRN"
                        </Badge>
                    })}
                    <Badge tone=validation.tone()>
                        {icon(validation.icon())}
                        {validation.label()}
                    </Badge>
                </div>

                {location.map(|location| view! {
                    <div class="order-meta-section">
                        <h6>{icon("map-pin")}"Delivery Location"</h6>
                        <div class="order-info-grid">
                            <InfoItem label="Location:" value=location.name />
                            <InfoItem label="City:" value=location.city />
                        </div>
                        {location.address.map(|address| view! {
                            <small class="text-muted">{address}</small>
                        })}
                    </div>
                })}

                {delivery.map(|delivery| view! {
                    <div class="order-meta-section">
                        <h6>{icon("truck")}"Delivery Info"</h6>
                        <div class="order-info-grid">
                            <InfoItem label="Rider:" value=delivery.rider />
                            {delivery.vehicle.map(|vehicle| view! {
                                <InfoItem label="Vehicle:" value=vehicle />
                            })}
                        </div>
                    </div>
                })}

                {items.map(|items| view! {
                    <div class="order-meta-section">
                        <h6>{icon("list")}{format!("Items ({})", items.total)}</h6>
                        <div class="items-list">
                            {items
                                .preview
                                .into_iter()
                                .map(|item| view! {
                                    <div class="item-row">
                                        <span class="item-name">{item.id}</span>
                                        <span class="item-quantity">{format!("{}x", item.quantity)}</span>
                                    </div>
                                })
                                .collect_view()}
                            {(items.remaining > 0).then(|| view! {
                                <small class="text-muted">{format!("+ {} more items", items.remaining)}</small>
                            })}
                        </div>
                    </div>
                })}

                <div class="order-meta-section">
                    <h6>{icon("clipboard")}"GRN Validation"</h6>
                    {match validation_details {
                        Some(details) => view! { <ValidationSummaryView details=details /> }.into_any(),
                        None => view! {
                            <div class="text-center">
                                <Badge tone=Tone::Info>
                                    {icon("help-circle")}
                                    "Not Validated"
                                </Badge>
                                <small class="text-muted">"GRN not processed yet"</small>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>

                {completed_on.map(|completed| view! {
                    <div class="order-meta-section">
                        <small class="text-muted">{format!("Completed: {}", completed)}</small>
                    </div>
                })}
            </div>

            <div class="card-footer">
                {if action.enabled() {
                    view! {
                        <a class="button button--small button--success" href=detail_href>
                            {icon(action.icon())}
                            {action.label()}
                        </a>
                    }
                    .into_any()
                } else {
                    view! {
                        <Button variant="secondary" size="sm" disabled=true>
                            {icon(action.icon())}
                            {action.label()}
                        </Button>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn InfoItem(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="order-info-item">
            <span class="order-info-label">{label}</span>
            <span class="order-info-value">{value}</span>
        </div>
    }
}

#[component]
fn ValidationSummaryView(details: ValidationDetails) -> impl IntoView {
    let processed = details.processed_line();
    view! {
        <div class="validation-summary-card">
            <div class="validation-progress">
                {if details.is_valid {
                    view! { <Badge tone=Tone::Success>{icon("check-circle")}"Valid"</Badge> }.into_any()
                } else {
                    view! { <Badge tone=Tone::Danger>{icon("alert-triangle")}"Invalid"</Badge> }.into_any()
                }}
                <div class="validation-progress-bar">
                    <div
                        class="validation-progress-fill"
                        style=format!("width: {}%", details.confidence_percent)
                    ></div>
                </div>
                <span class="small text-muted">{format!("{}%", details.confidence_percent)}</span>
            </div>
            {details.no_document.then(|| view! {
                <div class="alert alert-warning alert-sm">
                    {icon("file-x")}
                    "No document detected in GRN image"
                </div>
            })}
            <div class="validation-metrics">
                <Metric
                    value=details.items_found.map_or_else(|| "N/A".to_string(), |n| n.to_string())
                    label="Items"
                />
                <Metric value=details.discrepancies.to_string() label="Issues" />
                {details.gtins.map(|(matched, verified)| view! {
                    <Metric value=format!("{}/{}", matched, verified) label="GTINs" />
                })}
            </div>
            <small class="text-muted">{processed}</small>
        </div>
    }
}

#[component]
fn Metric(value: String, label: &'static str) -> impl IntoView {
    view! {
        <div class="validation-metric">
            <div class="validation-metric-value">{value}</div>
            <div class="validation-metric-label">{label}</div>
        </div>
    }
}
