pub mod results;
pub mod signals;
pub mod widgets;

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use std::future::Future;
use std::rc::Rc;

use self::results::ResultsPanel;
use self::signals::SignalSurface;
use self::widgets::FilterField;
use crate::orders::api::HttpOrdersApi;
use crate::orders::collector::collect_fields;
use crate::orders::config::FilterConfig;
use crate::orders::controller::{ApplyOutcome, FilterController};
use crate::orders::error::FilterError;
use crate::orders::fields::{fields_in, find_field, FieldGroup};
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PageSizeSelect;
use crate::shared::components::ui::Button;
use crate::shared::icons::icon;
use crate::shared::storage::BrowserStorage;

pub type DashboardController = FilterController<HttpOrdersApi, BrowserStorage, SignalSurface>;

/// Controller shared with the event handlers of one mounted dashboard
pub type ControllerHandle = StoredValue<Rc<DashboardController>, LocalStorage>;

/// Run a controller action on the local executor
fn spawn_action<F, Fut>(controller: ControllerHandle, action: F)
where
    F: FnOnce(Rc<DashboardController>) -> Fut + 'static,
    Fut: Future<Output = Result<ApplyOutcome, FilterError>> + 'static,
{
    let controller = controller.get_value();
    spawn_local(async move {
        match action(controller).await {
            Ok(outcome) => debug!("filter action finished: {:?}", outcome),
            // already reported on the status banner
            Err(e) => debug!("filter action failed: {}", e),
        }
    });
}

#[component]
pub fn OrdersDashboard() -> impl IntoView {
    let config = FilterConfig::default();
    let surface = SignalSurface::new(config.status_autohide_ms);
    let page_size_options = config.page_size_options.clone();
    let default_per_page = config.default_per_page;

    let controller = Rc::new(FilterController::new(
        HttpOrdersApi::new(&config),
        BrowserStorage,
        surface,
        config,
    ));
    let is_expanded = RwSignal::new(controller.panel_expanded());
    let saved_sets = RwSignal::new(controller.filter_set_names());
    let set_name = RwSignal::new(String::new());
    let selected_set = RwSignal::new(String::new());
    let controller: ControllerHandle = StoredValue::new_local(controller);

    // Первая загрузка: сохранённое состояние или заказы с сегодняшнего дня
    Effect::new(move |_| {
        spawn_action(controller, |c| async move { c.start().await });
    });

    Effect::new(move |_| {
        let expanded = is_expanded.get();
        controller.with_value(|c| c.set_panel_expanded(expanded));
    });

    let active_count = Signal::derive(move || surface.form.with(|f| f.active_count()));
    let page_size = Signal::derive(move || {
        surface
            .form
            .with(|f| f.page_size().unwrap_or(default_per_page))
    });

    let apply = move |_: MouseEvent| spawn_action(controller, |c| async move { c.apply().await });
    let clear = move |_: MouseEvent| controller.with_value(|c| c.clear());
    let load_today = move |_: MouseEvent| spawn_action(controller, |c| async move { c.load_today().await });
    let refresh = move |_: MouseEvent| spawn_action(controller, |c| async move { c.refresh_orders().await });

    let on_page_change = Callback::new(move |page: u32| {
        spawn_action(controller, move |c| async move { c.go_to_page(page).await });
    });
    let on_page_size_change = Callback::new(move |size: u32| {
        spawn_action(controller, move |c| async move { c.change_page_size(size).await });
    });
    let on_validate_all = Callback::new(move |_: ()| {
        controller.with_value(|c| {
            c.validate_all();
        });
    });

    let save_set = move |_: MouseEvent| {
        let name = set_name.get_untracked();
        let saved = controller.with_value(|c| c.save_filter_set(&name));
        if saved {
            set_name.set(String::new());
            saved_sets.set(controller.with_value(|c| c.filter_set_names()));
        }
    };
    let apply_set = move |_: MouseEvent| {
        let name = selected_set.get_untracked();
        if !name.is_empty() {
            spawn_action(controller, move |c| async move { c.apply_filter_set(&name).await });
        }
    };
    let delete_set = move |_: MouseEvent| {
        let name = selected_set.get_untracked();
        if controller.with_value(|c| c.delete_filter_set(&name)) {
            selected_set.set(String::new());
            saved_sets.set(controller.with_value(|c| c.filter_set_names()));
        }
    };

    view! {
        <div class="orders-dashboard">
            {move || surface.status.get().map(|status| view! {
                <div class=format!("{} alert-dismissible", status.kind.alert_class()) role="alert">
                    {icon(status.kind.icon())}
                    <span>{status.text}</span>
                    <button type="button" class="btn-close" on:click=move |_| surface.status.set(None)>
                        {icon("x")}
                    </button>
                </div>
            })}

            <FilterPanel
                is_expanded=is_expanded
                active_filters_count=active_count
                header_actions=move || view! {
                    <Button
                        disabled=Signal::derive(move || surface.loading.get())
                        on_click=Callback::new(apply)
                    >
                        {icon("search")}
                        {move || if surface.loading.get() { "Applying Filters..." } else { "Apply Filters" }}
                    </Button>
                    <Button variant="secondary" on_click=Callback::new(clear)>
                        {icon("x")}
                        "Clear"
                    </Button>
                    <Button variant="secondary" on_click=Callback::new(load_today)>
                        {icon("calendar")}
                        "Load Today"
                    </Button>
                    <Button
                        variant="ghost"
                        title="Re-import orders for the selected status and dates"
                        on_click=Callback::new(refresh)
                    >
                        {icon("refresh")}
                        "Refresh Orders"
                    </Button>
                    <PageSizeSelect
                        page_size=page_size
                        options=page_size_options.clone()
                        on_page_size_change=on_page_size_change
                    />
                }
                filter_content=move || view! {
                    <div class="filter-groups">
                        {FieldGroup::ALL
                            .iter()
                            .map(|group| view! {
                                <fieldset class="filter-group">
                                    <legend>{group.title()}</legend>
                                    {fields_in(*group)
                                        .map(|spec| view! {
                                            <FilterField spec=spec form=surface.form controller=controller />
                                        })
                                        .collect_view()}
                                </fieldset>
                            })
                            .collect_view()}
                    </div>
                    <div class="saved-filter-sets">
                        <input
                            type="text"
                            class="form-control"
                            placeholder="Filter set name"
                            prop:value=move || set_name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                        <Button variant="secondary" size="sm" on_click=Callback::new(save_set)>
                            {icon("save")}
                            "Save Filters"
                        </Button>
                        <select
                            class="form-control"
                            prop:value=move || selected_set.get()
                            on:change=move |ev| selected_set.set(event_target_value(&ev))
                        >
                            <option value="">"Saved filter sets"</option>
                            {move || saved_sets
                                .get()
                                .into_iter()
                                .map(|name| {
                                    let label = name.clone();
                                    view! { <option value=name>{label}</option> }
                                })
                                .collect_view()}
                        </select>
                        <Button variant="secondary" size="sm" on_click=Callback::new(apply_set)>
                            "Apply"
                        </Button>
                        <Button variant="ghost" size="sm" on_click=Callback::new(delete_set)>
                            "Delete"
                        </Button>
                    </div>
                }
                filter_tags=move || view! {
                    {move || {
                        let record = surface.form.with(collect_fields);
                        record
                            .iter()
                            .filter_map(|(name, value)| {
                                let spec = find_field(name)?;
                                let label = format!("{}: {}", spec.label, value.values().join(", "));
                                Some(view! {
                                    <FilterTag
                                        label=label
                                        on_remove=Callback::new(move |_| {
                                            surface.form.update(|f| f.clear_field(spec.name));
                                        })
                                    />
                                })
                            })
                            .collect_view()
                    }}
                }
            />

            <ResultsPanel
                results=surface.results
                on_page_change=on_page_change
                on_validate_all=on_validate_all
            />
        </div>
    }
}
