use leptos::prelude::*;

/// Button component with variants (primary, secondary, ghost, success, warning) and sizes (sm, md)
#[component]
pub fn Button(
    /// Button variant: "primary" (default), "secondary", "ghost", "success" or "warning"
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Button size: "md" (default) or "sm"
    #[prop(optional, into)]
    size: MaybeProp<String>,
    /// Tooltip
    #[prop(optional, into)]
    title: MaybeProp<String>,
    /// Disabled state (reactive)
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    /// Click event handler
    #[prop(optional)]
    on_click: Option<Callback<leptos::ev::MouseEvent>>,
    /// Button children (content)
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("primary") {
        "secondary" => "button--secondary",
        "ghost" => "button--ghost",
        "success" => "button--success",
        "warning" => "button--warning",
        _ => "button--primary",
    };

    let size_class = move || {
        if size.get().as_deref() == Some("sm") {
            "button--small"
        } else {
            ""
        }
    };

    view! {
        <button
            type="button"
            class=move || format!("button {} {}", variant_class(), size_class())
            title=move || title.get()
            disabled=move || disabled.get().unwrap_or(false)
            on:click=move |ev| {
                ev.stop_propagation();
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
