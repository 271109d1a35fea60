use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::ControllerHandle;
use crate::orders::fields::{FieldSpec, WidgetKind};
use crate::orders::form::FilterForm;
use crate::orders::options::OptionsState;

/// One filter widget, chosen by the field's declared kind
#[component]
pub fn FilterField(
    spec: &'static FieldSpec,
    form: RwSignal<FilterForm>,
    controller: ControllerHandle,
) -> impl IntoView {
    let error = move || form.with(|f| f.error(spec.name).map(str::to_string));
    let control_class = move || {
        if error().is_some() {
            "form-control is-invalid"
        } else {
            "form-control"
        }
    };

    let widget = match spec.kind {
        WidgetKind::Text | WidgetKind::Date | WidgetKind::Number => {
            let input_type = match spec.kind {
                WidgetKind::Date => "date",
                WidgetKind::Number => "number",
                _ => "text",
            };
            view! {
                <input
                    type=input_type
                    step="any"
                    id=spec.dom_id
                    name=spec.name
                    class=control_class
                    placeholder=spec.placeholder
                    prop:value=move || form.with(|f| f.text(spec.name).to_string())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| {
                            f.set_text(spec.name, value);
                        });
                    }
                />
            }
            .into_any()
        }
        WidgetKind::Select => view! {
            <select
                id=spec.dom_id
                name=spec.name
                class=control_class
                prop:value=move || form.with(|f| f.text(spec.name).to_string())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| {
                        f.set_text(spec.name, value);
                    });
                }
            >
                <option value="">"Any"</option>
                {spec
                    .options
                    .iter()
                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        WidgetKind::MultiSelect => view! {
            <div id=spec.dom_id class="filter-checkbox-group">
                {spec
                    .options
                    .iter()
                    .map(|(value, label)| {
                        let value: &'static str = *value;
                        view! {
                            <label class="form-check">
                                <input
                                    type="checkbox"
                                    class="form-check-input"
                                    name=spec.name
                                    value=value
                                    prop:checked=move || {
                                        form.with(|f| f.selected(spec.name).iter().any(|v| v == value))
                                    }
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        form.update(|f| f.toggle_option(spec.name, value, checked));
                                    }
                                />
                                <span>{*label}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
        WidgetKind::RemoteSelect => view! {
            <RemoteSelect spec=spec form=form controller=controller />
        }
        .into_any(),
    };

    view! {
        <div class="filter-field">
            <label class="form-label" for=spec.dom_id>{spec.label}</label>
            {widget}
            {move || error().map(|message| view! { <div class="invalid-feedback">{message}</div> })}
        </div>
    }
}

/// Searchable single-choice select paging options from the backend
#[component]
pub fn RemoteSelect(
    spec: &'static FieldSpec,
    form: RwSignal<FilterForm>,
    controller: ControllerHandle,
) -> impl IntoView {
    let search = RwSignal::new(String::new());
    let options = RwSignal::new(OptionsState::default());
    let is_open = RwSignal::new(false);

    let load = move |more: bool| {
        let term = search.get_untracked();
        let page = if more {
            options.with_untracked(|o| o.next_page(&term))
        } else {
            1
        };
        let controller = controller.get_value();
        spawn_local(async move {
            match controller.filter_options(spec.name, &term, page).await {
                Ok(loaded) => options.update(|o| o.absorb(&term, loaded)),
                Err(e) => warn!("failed to load {} options: {}", spec.name, e),
            }
        });
    };

    let selected = move || form.with(|f| f.text(spec.name).to_string());
    let selected_label = move || {
        let value = selected();
        options.with(|o| o.label_for(&value).map(str::to_string)).unwrap_or(value)
    };

    view! {
        <div class="remote-select">
            {move || {
                if selected().is_empty() {
                    ().into_any()
                } else {
                    view! {
                        <div class="remote-select__selected">
                            <span>{selected_label()}</span>
                            <button
                                type="button"
                                class="remote-select__clear"
                                title="Clear"
                                on:click=move |_| form.update(|f| f.clear_field(spec.name))
                            >
                                "×"
                            </button>
                        </div>
                    }
                    .into_any()
                }
            }}
            <input
                type="search"
                id=spec.dom_id
                class="form-control"
                placeholder=spec.placeholder
                prop:value=move || search.get()
                on:focus=move |_| {
                    is_open.set(true);
                    if options.with_untracked(|o| o.options.is_empty()) {
                        load(false);
                    }
                }
                on:input=move |ev| {
                    search.set(event_target_value(&ev));
                    load(false);
                }
            />
            <Show when=move || is_open.get()>
                <ul class="remote-select__options">
                    {move || {
                        options
                            .get()
                            .options
                            .into_iter()
                            .map(|option| {
                                let value = option.value.clone();
                                view! {
                                    <li
                                        class="remote-select__option"
                                        on:click=move |_| {
                                            let value = value.clone();
                                            form.update(|f| {
                                                f.set_text(spec.name, value);
                                            });
                                            is_open.set(false);
                                        }
                                    >
                                        {option.label}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                    <Show when=move || options.with(|o| o.has_more)>
                        <li class="remote-select__more">
                            <button type="button" on:click=move |_| load(true)>"Load more"</button>
                        </li>
                    </Show>
                    <li class="remote-select__close">
                        <button type="button" on:click=move |_| is_open.set(false)>"Close"</button>
                    </li>
                </ul>
            </Show>
        </div>
    }
}
