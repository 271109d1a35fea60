use leptos::prelude::*;

/// Colour of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Warning,
    Info,
    Secondary,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Danger => "danger",
            Tone::Warning => "warning",
            Tone::Info => "info",
            Tone::Secondary => "secondary",
        }
    }
}

/// Badge component with different tones
#[component]
pub fn Badge(
    /// Badge tone; secondary when omitted
    #[prop(optional)]
    tone: Option<Tone>,
    /// Optional tooltip
    #[prop(optional, into)]
    title: Option<String>,
    /// Badge content
    children: Children,
) -> impl IntoView {
    let tone = tone.unwrap_or(Tone::Secondary);

    view! {
        <span class=format!("status-indicator {}", tone.class()) title=title>
            {children()}
        </span>
    }
}
