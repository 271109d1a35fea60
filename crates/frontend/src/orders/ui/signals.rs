use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::orders::form::FilterForm;
use crate::orders::render::ResultsView;
use crate::orders::surface::{FilterSurface, StatusMessage};

/// Element the results scroll back to after a page change
pub const RESULTS_ANCHOR_ID: &str = "orders-results";

/// `FilterSurface` backed by Leptos signals
#[derive(Clone, Copy)]
pub struct SignalSurface {
    pub form: RwSignal<FilterForm>,
    pub loading: RwSignal<bool>,
    pub results: RwSignal<Option<ResultsView>>,
    pub status: RwSignal<Option<StatusMessage>>,
    /// Bumped for every banner so a stale auto-hide timer leaves newer ones alone
    status_seq: RwSignal<u64>,
    autohide_ms: u32,
}

impl SignalSurface {
    pub fn new(autohide_ms: u32) -> Self {
        Self {
            form: RwSignal::new(FilterForm::new()),
            loading: RwSignal::new(false),
            results: RwSignal::new(None),
            status: RwSignal::new(None),
            status_seq: RwSignal::new(0),
            autohide_ms,
        }
    }
}

impl FilterSurface for SignalSurface {
    fn form(&self) -> FilterForm {
        self.form.get_untracked()
    }

    fn set_form(&self, form: FilterForm) {
        self.form.set(form);
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    fn show_results(&self, results: Option<ResultsView>) {
        self.results.set(results);
    }

    fn show_status(&self, status: Option<StatusMessage>) {
        let seq = self.status_seq.get_untracked() + 1;
        self.status_seq.set(seq);
        let auto_hides = status.as_ref().map_or(false, |s| s.kind.auto_hides());
        self.status.set(status);

        if auto_hides {
            let status = self.status;
            let status_seq = self.status_seq;
            let delay = self.autohide_ms;
            spawn_local(async move {
                TimeoutFuture::new(delay).await;
                if status_seq.get_untracked() == seq {
                    status.set(None);
                }
            });
        }
    }

    fn scroll_to_results(&self) {
        if let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(RESULTS_ANCHOR_ID))
        {
            element.scroll_into_view_with_bool(true);
        }
    }
}
