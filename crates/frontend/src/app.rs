use crate::orders::ui::OrdersDashboard;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="orders-dashboard-page">
            <OrdersDashboard />
        </main>
    }
}
