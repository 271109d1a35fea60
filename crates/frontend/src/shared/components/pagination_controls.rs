use crate::shared::icons::icon;
use leptos::prelude::*;

/// Previous / page window / Next links of one results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub previous: PageLink,
    pub pages: Vec<PageLink>,
    pub next: PageLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub page: u32,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

/// Links for `page` of `total_pages`; `None` for a single page.
///
/// Page links cover `page ± radius`, clamped to the available pages.
pub fn paginate(page: u32, total_pages: u32, radius: u32) -> Option<PaginationView> {
    if total_pages <= 1 {
        return None;
    }
    let page = page.clamp(1, total_pages);
    let first = page.saturating_sub(radius).max(1);
    let last = page.saturating_add(radius).min(total_pages);

    let pages = (first..=last)
        .map(|n| PageLink {
            page: n,
            label: n.to_string(),
            active: n == page,
            disabled: false,
        })
        .collect();

    Some(PaginationView {
        previous: PageLink {
            page: page.saturating_sub(1).max(1),
            label: "Previous".to_string(),
            active: false,
            disabled: page <= 1,
        },
        pages,
        next: PageLink {
            page: page.saturating_add(1).min(total_pages),
            label: "Next".to_string(),
            active: false,
            disabled: page >= total_pages,
        },
    })
}

/// PaginationControls component - Previous / page window / Next
#[component]
pub fn PaginationControls(
    /// Links to render, see [`paginate`]
    pagination: PaginationView,

    /// Callback when page changes (1-based)
    on_page_change: Callback<u32>,
) -> impl IntoView {
    let link = move |link: PageLink, content: AnyView| {
        let page = link.page;
        let class = if link.active {
            "page-item active"
        } else if link.disabled {
            "page-item disabled"
        } else {
            "page-item"
        };
        view! {
            <li class=class>
                <button
                    class="page-link"
                    disabled=link.disabled
                    on:click=move |_| on_page_change.run(page)
                >
                    {content}
                </button>
            </li>
        }
    };

    let PaginationView {
        previous,
        pages,
        next,
    } = pagination;

    view! {
        <nav aria-label="Order results pagination">
            <ul class="pagination">
                {link(previous, view! { {icon("chevron-left")} <span>"Previous"</span> }.into_any())}
                {pages
                    .into_iter()
                    .map(|page| {
                        let label = page.label.clone();
                        link(page, view! { {label} }.into_any())
                    })
                    .collect_view()}
                {link(next, view! { <span>"Next"</span> {icon("chevron-right")} }.into_any())}
            </ul>
        </nav>
    }
}

/// Page size select
#[component]
pub fn PageSizeSelect(
    /// Current page size
    #[prop(into)]
    page_size: Signal<u32>,

    /// Available page sizes
    options: Vec<u32>,

    /// Callback when page size changes
    on_page_size_change: Callback<u32>,
) -> impl IntoView {
    view! {
        <label class="page-size-select">
            <span>"Per page"</span>
            <select
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {options.into_iter().map(|size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}
