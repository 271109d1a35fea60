//! Filter state & results controller for the orders dashboard.
//!
//! One instance per mounted dashboard. All state lives behind `&self`
//! (`Cell`/`RefCell`) so the controller can be shared through an `Rc` with
//! the event handlers that drive it.

use chrono::NaiveDate;
use contracts::domain::a001_orders::dto::OrderStatus;
use contracts::domain::a001_orders::request::OrderFilterRequest;
use contracts::domain::a001_orders::response::QueryResult;
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};

use super::api::OrdersApi;
use super::collector::{collect, collect_fields};
use super::config::FilterConfig;
use super::error::FilterError;
use super::fields::{find_field, DATE_FROM, DATE_TO};
use super::options::{load_options_page, OptionsPage};
use super::persistence::{FilterState, FilterStateStore};
use super::refresh::{refresh_message, refresh_request, REFRESH_FAILED_MESSAGE};
use super::render::render;
use super::surface::{FilterSurface, StatusMessage};
use super::validator::{check, mark};
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::date_utils::iso_date;
use crate::shared::storage::KeyValueStorage;

pub const FILTERS_CLEARED_MESSAGE: &str = "All filters cleared.";
pub const NOTHING_TO_VALIDATE_MESSAGE: &str = "No orders to validate. Please apply filters first.";
pub const VALIDATE_ALL_UNAVAILABLE_MESSAGE: &str = "Validate all functionality not available.";

/// How a query request ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Results rendered and state persisted
    Applied { total_count: u64, page: u32 },
    /// Another query was still outstanding; nothing was sent
    Skipped,
    /// The response arrived after the filters were cleared and was dropped
    Superseded,
}

/// Holds the loading flag for the lifetime of one query
struct LoadingGuard<'a, V: FilterSurface> {
    flag: &'a Cell<bool>,
    surface: &'a V,
}

impl<'a, V: FilterSurface> LoadingGuard<'a, V> {
    fn engage(flag: &'a Cell<bool>, surface: &'a V) -> Self {
        flag.set(true);
        surface.set_loading(true);
        Self { flag, surface }
    }
}

impl<V: FilterSurface> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.flag.set(false);
        self.surface.set_loading(false);
    }
}

struct FlagGuard<'a>(&'a Cell<bool>);

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct FilterController<A, S, V> {
    api: A,
    store: FilterStateStore<S>,
    surface: V,
    clock: Box<dyn Clock>,
    config: FilterConfig,

    current_page: Cell<u32>,
    loading: Cell<bool>,
    refreshing: Cell<bool>,
    /// Bumped for every dispatched query and on clear
    request_token: Cell<u64>,
    current_results: RefCell<Option<QueryResult>>,
}

impl<A, S, V> FilterController<A, S, V>
where
    A: OrdersApi,
    S: KeyValueStorage,
    V: FilterSurface,
{
    pub fn new(api: A, storage: S, surface: V, config: FilterConfig) -> Self {
        Self::with_clock(api, storage, surface, config, Box::new(SystemClock))
    }

    pub fn with_clock(
        api: A,
        storage: S,
        surface: V,
        config: FilterConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            api,
            store: FilterStateStore::new(storage, &config),
            surface,
            clock,
            config,
            current_page: Cell::new(1),
            loading: Cell::new(false),
            refreshing: Cell::new(false),
            request_token: Cell::new(0),
            current_results: RefCell::new(None),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.get()
    }

    pub fn current_results(&self) -> Option<QueryResult> {
        self.current_results.borrow().clone()
    }

    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Filter request for the current page built from the widgets
    pub fn collect(&self) -> OrderFilterRequest {
        collect(
            &self.surface.form(),
            self.current_page.get(),
            self.today(),
            self.config.default_per_page,
        )
    }

    /// Validate the current widgets, marking failing fields on the surface
    pub fn validate(&self) -> bool {
        let request = self.collect();
        let mut form = self.surface.form();
        let errors = check(&request.filters);
        mark(&mut form, &errors);
        self.surface.set_form(form);
        errors.is_empty()
    }

    /// Query the current page with the current filters
    pub async fn apply(&self) -> Result<ApplyOutcome, FilterError> {
        self.run_query(self.current_page.get(), false).await
    }

    /// Re-query at page `page`. Pages below 1 are ignored.
    pub async fn go_to_page(&self, page: u32) -> Result<ApplyOutcome, FilterError> {
        if page < 1 {
            return Ok(ApplyOutcome::Skipped);
        }
        if self.loading.get() {
            debug!("page {} requested while a query is outstanding", page);
            return Ok(ApplyOutcome::Skipped);
        }
        self.current_page.set(page);
        self.run_query(page, true).await
    }

    pub async fn change_page_size(&self, per_page: u32) -> Result<ApplyOutcome, FilterError> {
        let mut form = self.surface.form();
        form.set_page_size(per_page);
        self.surface.set_form(form);
        self.current_page.set(1);
        self.apply().await
    }

    /// Clear the filters and query today's orders
    pub async fn load_today(&self) -> Result<ApplyOutcome, FilterError> {
        self.reset();
        let today = iso_date(self.today());
        let mut form = self.surface.form();
        form.set_text(DATE_FROM, today.clone());
        form.set_text(DATE_TO, today);
        self.surface.set_form(form);
        self.apply().await
    }

    /// First query after mount: the saved state when there is one, otherwise
    /// orders from today onwards
    pub async fn start(&self) -> Result<ApplyOutcome, FilterError> {
        if !self.load_state() {
            let mut form = self.surface.form();
            form.set_text(DATE_FROM, iso_date(self.today()));
            self.surface.set_form(form);
        }
        self.apply().await
    }

    async fn run_query(&self, page: u32, scroll: bool) -> Result<ApplyOutcome, FilterError> {
        if self.loading.get() {
            debug!("query already in flight, ignoring");
            return Ok(ApplyOutcome::Skipped);
        }
        let _loading = LoadingGuard::engage(&self.loading, &self.surface);

        let mut form = self.surface.form();
        let request = collect(&form, page, self.today(), self.config.default_per_page);
        let errors = check(&request.filters);
        mark(&mut form, &errors);
        self.surface.set_form(form);
        if !errors.is_empty() {
            let err = FilterError::Validation(errors);
            self.surface
                .show_status(Some(StatusMessage::error(err.user_message())));
            return Err(err);
        }

        let token = self.request_token.get() + 1;
        self.request_token.set(token);
        debug!("applying filters (page {}, token {}): {:?}", page, token, request);

        let response = self.api.filter_orders(&request).await;

        if token != self.request_token.get() {
            debug!("dropping response for superseded token {}", token);
            return Ok(ApplyOutcome::Superseded);
        }

        let result = match response {
            Ok(result) if result.success => result,
            Ok(result) => {
                let err = FilterError::Api(
                    result.error.unwrap_or_else(|| "Unknown error".to_string()),
                );
                error!("{}", err);
                self.surface
                    .show_status(Some(StatusMessage::error(err.user_message())));
                return Err(err);
            }
            Err(err) => {
                error!("error applying filters: {}", err);
                self.surface
                    .show_status(Some(StatusMessage::error(err.user_message())));
                return Err(err);
            }
        };

        let page = result.page.max(1);
        let total_count = result.total_count;
        self.current_page.set(page);
        self.surface
            .show_results(Some(render(&result, self.config.pagination_radius)));
        *self.current_results.borrow_mut() = Some(result);
        self.save_state();

        info!("found {} orders (page {})", total_count, page);
        self.surface.show_status(Some(StatusMessage::success(format!(
            "Found {} orders matching your filters.",
            total_count
        ))));
        if scroll {
            self.surface.scroll_to_results();
        }

        Ok(ApplyOutcome::Applied { total_count, page })
    }

    fn reset(&self) {
        let mut form = self.surface.form();
        form.reset();
        self.surface.set_form(form);
        self.surface.show_results(None);
        *self.current_results.borrow_mut() = None;
        self.current_page.set(1);
        if let Err(e) = self.store.clear() {
            warn!("failed to clear filter state: {}", e);
        }
        // An outstanding response must not repaint the cleared panel
        self.request_token.set(self.request_token.get() + 1);
    }

    /// Empty every filter, the results and the stored snapshot
    pub fn clear(&self) {
        self.reset();
        self.surface
            .show_status(Some(StatusMessage::info(FILTERS_CLEARED_MESSAGE)));
    }

    /// Snapshot the filters and pagination. Failures are only logged.
    pub fn save_state(&self) {
        let filters = self.collect();
        let state = FilterState {
            per_page: filters.per_page,
            current_page: self.current_page.get(),
            timestamp: self.clock.now().timestamp_millis(),
            filters,
        };
        if let Err(e) = self.store.save(&state) {
            warn!("failed to save filter state: {}", e);
        }
    }

    /// Restore the stored snapshot into the widgets. False when there was
    /// nothing usable to restore.
    pub fn load_state(&self) -> bool {
        let state = match self.store.load(self.clock.now()) {
            Ok(Some(state)) => state,
            Ok(None) => return false,
            Err(e) => {
                warn!("failed to load filter state: {}", e);
                return false;
            }
        };

        let mut form = self.surface.form();
        form.restore(&state.filters.filters);
        if state.per_page > 0 {
            form.set_page_size(state.per_page);
        }
        self.surface.set_form(form);
        self.current_page.set(state.current_page.max(1));
        debug!("restored filter state (page {})", state.current_page);
        true
    }

    /// Ask the backend to re-import orders for the current status and date
    /// window, then re-query
    pub async fn refresh_orders(&self) -> Result<ApplyOutcome, FilterError> {
        if self.refreshing.get() {
            return Ok(ApplyOutcome::Skipped);
        }
        self.refreshing.set(true);
        let refreshing = FlagGuard(&self.refreshing);

        let request = refresh_request(&collect_fields(&self.surface.form()), self.today());
        let nonce = self.clock.now().timestamp_millis();
        info!("refreshing orders: {:?}", request);

        let message = match self.api.refresh_orders(&request, nonce).await {
            Ok(response) => refresh_message(&response),
            Err(err) => {
                error!("error refreshing orders: {}", err);
                self.surface
                    .show_status(Some(StatusMessage::error(REFRESH_FAILED_MESSAGE)));
                return Err(err);
            }
        };
        drop(refreshing);

        match message {
            Ok(message) => {
                let outcome = self.apply().await?;
                self.surface
                    .show_status(Some(StatusMessage::success(message)));
                Ok(outcome)
            }
            Err(message) => {
                warn!("refresh rejected: {}", message);
                self.surface
                    .show_status(Some(StatusMessage::error(message.clone())));
                Err(FilterError::Api(message))
            }
        }
    }

    /// One page of options for a searchable select field
    pub async fn filter_options(
        &self,
        field: &str,
        search: &str,
        page: u32,
    ) -> Result<OptionsPage, FilterError> {
        let source = find_field(field)
            .and_then(|spec| spec.option_source())
            .ok_or_else(|| FilterError::Api(format!("{} has no option list", field)))?;
        load_options_page(
            &self.api,
            source,
            search,
            page,
            self.config.options_page_size,
        )
        .await
    }

    /// Ids of the COMPLETED orders on the current page.
    ///
    /// Bulk GRN validation runs outside this panel, so the banner reports
    /// that it is unavailable.
    pub fn validate_all(&self) -> Vec<String> {
        let results = self.current_results.borrow();
        let Some(results) = results.as_ref().filter(|r| !r.orders.is_empty()) else {
            self.surface
                .show_status(Some(StatusMessage::warning(NOTHING_TO_VALIDATE_MESSAGE)));
            return Vec::new();
        };
        let ids: Vec<String> = results
            .orders
            .iter()
            .filter(|o| o.order_status == OrderStatus::Completed)
            .map(|o| o.id.clone())
            .collect();
        info!("validate all requested for {} orders", ids.len());
        self.surface
            .show_status(Some(StatusMessage::error(VALIDATE_ALL_UNAVAILABLE_MESSAGE)));
        ids
    }

    pub fn filter_set_names(&self) -> Vec<String> {
        match self.store.saved_sets() {
            Ok(sets) => sets.into_keys().collect(),
            Err(e) => {
                warn!("failed to read saved filter sets: {}", e);
                Vec::new()
            }
        }
    }

    /// Store the current filters under `name`. Blank names are rejected.
    pub fn save_filter_set(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.store.save_set(name, &self.collect()) {
            Ok(()) => {
                self.surface.show_status(Some(StatusMessage::success(format!(
                    "Filter set \"{}\" saved successfully.",
                    name
                ))));
                true
            }
            Err(e) => {
                error!("failed to save filter set {}: {}", name, e);
                self.surface.show_status(Some(StatusMessage::error(format!(
                    "Could not save filter set \"{}\".",
                    name
                ))));
                false
            }
        }
    }

    /// Replace the widgets with a saved set and query its first page
    pub async fn apply_filter_set(&self, name: &str) -> Result<ApplyOutcome, FilterError> {
        let request = match self.store.saved_sets() {
            Ok(mut sets) => sets.remove(name),
            Err(e) => {
                warn!("failed to read saved filter sets: {}", e);
                None
            }
        };
        let Some(request) = request else {
            self.surface.show_status(Some(StatusMessage::warning(format!(
                "Filter set \"{}\" not found.",
                name
            ))));
            return Ok(ApplyOutcome::Skipped);
        };

        let mut form = self.surface.form();
        form.reset();
        form.restore(&request.filters);
        if request.per_page > 0 {
            form.set_page_size(request.per_page);
        }
        self.surface.set_form(form);
        self.current_page.set(1);
        self.apply().await
    }

    pub fn delete_filter_set(&self, name: &str) -> bool {
        match self.store.delete_set(name) {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!("failed to delete filter set {}: {}", name, e);
                false
            }
        }
    }

    pub fn panel_expanded(&self) -> bool {
        self.store.panel_expanded()
    }

    pub fn set_panel_expanded(&self, expanded: bool) {
        if let Err(e) = self.store.set_panel_expanded(expanded) {
            warn!("failed to save filter panel flag: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::fields::ORDER_STATUS;
    use crate::orders::form::FilterForm;
    use crate::orders::render::ResultsBody;
    use crate::orders::surface::StatusKind;
    use crate::orders::testing::{query_result, sample_order, RecordingSurface, ScriptedApi};
    use crate::shared::clock::FixedClock;
    use crate::shared::storage::MemoryStorage;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use contracts::domain::a001_orders::response::{FilterOption, FilterOptionsResponse, RefreshOrdersResponse};
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::{pin_mut, poll};
    use std::rc::Rc;

    type TestController = FilterController<Rc<ScriptedApi>, MemoryStorage, Rc<RecordingSurface>>;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    struct Harness {
        api: Rc<ScriptedApi>,
        storage: MemoryStorage,
        surface: Rc<RecordingSurface>,
        controller: TestController,
    }

    fn harness() -> Harness {
        let api = Rc::new(ScriptedApi::default());
        let storage = MemoryStorage::new();
        let surface = Rc::new(RecordingSurface::default());
        let controller = FilterController::with_clock(
            api.clone(),
            storage.clone(),
            surface.clone(),
            FilterConfig::default(),
            Box::new(FixedClock(now())),
        );
        Harness {
            api,
            storage,
            surface,
            controller,
        }
    }

    fn stored_state(storage: &MemoryStorage) -> Option<serde_json::Value> {
        storage
            .get_item("orders_filter_state_v1")
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn austin_filters_render_three_cards_and_persist() {
        let h = harness();
        h.surface.edit(|form| {
            form.set_text("location_city", "Austin");
            form.set_text(DATE_FROM, "2024-06-01");
            form.set_text(DATE_TO, "2024-06-01");
        });
        h.api.push_filter(Ok(query_result(
            vec![
                sample_order("o-1", "COMPLETED"),
                sample_order("o-2", "COMPLETED"),
                sample_order("o-3", "CANCELLED"),
            ],
            1,
            1,
        )));

        let outcome = block_on(h.controller.apply());
        assert_eq!(
            outcome,
            Ok(ApplyOutcome::Applied {
                total_count: 3,
                page: 1
            })
        );

        let sent = h.api.filter_calls.borrow()[0].clone();
        assert_eq!(sent.filters.text("location_city"), Some("Austin"));
        assert_eq!((sent.page, sent.per_page), (1, 50));

        match h.surface.results().unwrap().body {
            ResultsBody::Orders {
                cards, pagination, ..
            } => {
                assert_eq!(cards.len(), 3);
                assert!(pagination.is_none());
            }
            ResultsBody::Empty => panic!("expected cards"),
        }

        let state = stored_state(&h.storage).unwrap();
        assert_eq!(state["currentPage"], 1);
        assert_eq!(state["filters"]["location_city"], "Austin");
        assert_eq!(state["filters"]["date_from"], "2024-06-01");
        assert_eq!(state["filters"]["date_to"], "2024-06-01");
        assert_eq!(state["timestamp"], now().timestamp_millis());

        let status = h.surface.last_status().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.text, "Found 3 orders matching your filters.");
        assert!(!h.controller.is_loading());
    }

    #[test]
    fn second_apply_while_pending_is_ignored() {
        let h = harness();
        let (tx, rx) = oneshot::channel();
        h.api.push_pending(rx);

        block_on(async {
            let first = h.controller.apply();
            pin_mut!(first);
            assert!(poll!(first.as_mut()).is_pending());
            assert!(h.controller.is_loading());

            assert_eq!(h.controller.apply().await, Ok(ApplyOutcome::Skipped));
            assert_eq!(h.controller.go_to_page(2).await, Ok(ApplyOutcome::Skipped));
            assert_eq!(h.api.filter_calls.borrow().len(), 1);

            tx.send(Ok(query_result(vec![sample_order("o-1", "COMPLETED")], 1, 1)))
                .unwrap();
            assert!(matches!(
                first.await,
                Ok(ApplyOutcome::Applied { .. })
            ));
        });

        assert!(!h.controller.is_loading());
        assert_eq!(h.surface.loading_history(), vec![true, false]);
    }

    #[test]
    fn invalid_dates_block_the_request() {
        let h = harness();
        h.surface.edit(|form| {
            form.set_text(DATE_FROM, "2024-06-10");
            form.set_text(DATE_TO, "2024-06-01");
        });

        let outcome = block_on(h.controller.apply());
        assert!(matches!(outcome, Err(FilterError::Validation(_))));
        assert!(h.api.filter_calls.borrow().is_empty());
        assert!(h.surface.form().error(DATE_TO).is_some());
        assert_eq!(
            h.surface.last_status().unwrap().text,
            "Please check your filter inputs for errors."
        );
        assert!(!h.controller.is_loading());
    }

    #[test]
    fn failures_keep_previous_results() {
        let h = harness();
        h.api.push_filter(Ok(query_result(vec![sample_order("o-1", "COMPLETED")], 1, 1)));
        block_on(h.controller.apply()).unwrap();
        let before = h.surface.results();
        let snapshot = stored_state(&h.storage);

        h.api.push_filter(Err(FilterError::Status(500)));
        assert_eq!(block_on(h.controller.apply()), Err(FilterError::Status(500)));
        assert_eq!(
            h.surface.last_status().unwrap().text,
            "An error occurred while loading orders. Please try again."
        );
        assert!(!h.controller.is_loading());
        assert_eq!(h.surface.loading_history().last(), Some(&false));

        let mut rejected = query_result(vec![], 1, 0);
        rejected.success = false;
        rejected.error = Some("bad date".to_string());
        h.api.push_filter(Ok(rejected));
        assert_eq!(
            block_on(h.controller.apply()),
            Err(FilterError::Api("bad date".to_string()))
        );
        assert_eq!(h.surface.last_status().unwrap().text, "Filter error: bad date");
        assert!(!h.controller.is_loading());
        assert_eq!(h.surface.loading_history().last(), Some(&false));

        assert_eq!(h.surface.results(), before);
        assert_eq!(stored_state(&h.storage), snapshot);
        assert!(h.controller.current_results().is_some());
    }

    #[test]
    fn go_to_page_requeries_and_scrolls() {
        let h = harness();
        assert_eq!(block_on(h.controller.go_to_page(0)), Ok(ApplyOutcome::Skipped));
        assert!(h.api.filter_calls.borrow().is_empty());

        let mut page_three = query_result(vec![sample_order("o-101", "COMPLETED")], 3, 5);
        page_three.total_count = 201;
        h.api.push_filter(Ok(page_three));

        block_on(h.controller.go_to_page(3)).unwrap();
        assert_eq!(h.api.filter_calls.borrow()[0].page, 3);
        assert_eq!(h.controller.current_page(), 3);
        assert_eq!(h.surface.scrolls(), 1);
        assert_eq!(stored_state(&h.storage).unwrap()["currentPage"], 3);
    }

    #[test]
    fn clear_supersedes_outstanding_response() {
        let h = harness();
        let (tx, rx) = oneshot::channel();
        h.api.push_pending(rx);

        block_on(async {
            let pending = h.controller.apply();
            pin_mut!(pending);
            assert!(poll!(pending.as_mut()).is_pending());

            h.controller.clear();
            tx.send(Ok(query_result(vec![sample_order("o-1", "COMPLETED")], 1, 1)))
                .unwrap();
            assert_eq!(pending.await, Ok(ApplyOutcome::Superseded));
        });

        assert!(h.surface.results().is_none());
        assert!(h.controller.current_results().is_none());
        assert!(stored_state(&h.storage).is_none());
        assert_eq!(h.surface.last_status().unwrap().text, FILTERS_CLEARED_MESSAGE);
        assert!(!h.controller.is_loading());
    }

    fn store_state_aged(h: &Harness, age: Duration) {
        let raw = serde_json::json!({
            "filters": { "location_city": "Dallas", "page": 2, "per_page": 100 },
            "currentPage": 2,
            "perPage": 100,
            "timestamp": (now() - age).timestamp_millis()
        });
        h.storage
            .set_item("orders_filter_state_v1", &raw.to_string())
            .unwrap();
    }

    #[test]
    fn state_older_than_a_day_is_not_restored() {
        let h = harness();
        store_state_aged(&h, Duration::hours(25));

        assert!(!h.controller.load_state());
        assert_eq!(h.surface.form(), FilterForm::new());
        assert_eq!(h.controller.current_page(), 1);
        assert!(stored_state(&h.storage).is_none());
    }

    #[test]
    fn recent_state_is_restored() {
        let h = harness();
        store_state_aged(&h, Duration::hours(1));

        assert!(h.controller.load_state());
        let form = h.surface.form();
        assert_eq!(form.text("location_city"), "Dallas");
        assert_eq!(form.page_size(), Some(100));
        assert!(form.input("page").is_none());
        assert_eq!(h.controller.current_page(), 2);
    }

    #[test]
    fn start_without_state_loads_from_today() {
        let h = harness();
        h.api.push_filter(Ok(query_result(vec![], 1, 0)));

        block_on(h.controller.start()).unwrap();
        let sent = h.api.filter_calls.borrow()[0].clone();
        assert_eq!(sent.filters.text(DATE_FROM), Some("2024-06-15"));
        assert!(!sent.filters.contains(DATE_TO));
        assert_eq!(h.surface.results().unwrap().body, ResultsBody::Empty);
    }

    #[test]
    fn load_today_and_page_size_reset_to_first_page() {
        let h = harness();
        h.surface.edit(|form| {
            form.set_text("rider_name", "Sam");
        });
        h.api.push_filter(Ok(query_result(vec![], 1, 0)));
        block_on(h.controller.load_today()).unwrap();

        let sent = h.api.filter_calls.borrow()[0].clone();
        assert_eq!(sent.filters.text(DATE_FROM), Some("2024-06-15"));
        assert_eq!(sent.filters.text(DATE_TO), Some("2024-06-15"));
        assert!(!sent.filters.contains("rider_name"));

        h.api.push_filter(Ok(query_result(vec![], 1, 0)));
        block_on(h.controller.change_page_size(200)).unwrap();
        let sent = h.api.filter_calls.borrow()[1].clone();
        assert_eq!((sent.page, sent.per_page), (1, 200));
    }

    #[test]
    fn refresh_reports_server_message_and_requeries() {
        let h = harness();
        h.surface.edit(|form| {
            form.set_multi(ORDER_STATUS, vec!["COMPLETED".to_string()]);
            form.set_text(DATE_FROM, "2024-06-01");
        });
        h.api.push_refresh(Ok(RefreshOrdersResponse {
            success: true,
            message: None,
            total_orders_count: Some(7),
        }));
        h.api.push_filter(Ok(query_result(vec![], 1, 0)));

        block_on(h.controller.refresh_orders()).unwrap();

        let (request, nonce) = h.api.refresh_calls.borrow()[0].clone();
        assert_eq!(request.order_status, "COMPLETED");
        assert_eq!(request.date.as_deref(), Some("2024-06-01"));
        assert_eq!(nonce, now().timestamp_millis());
        assert_eq!(h.api.filter_calls.borrow().len(), 1);
        assert_eq!(h.surface.last_status().unwrap().text, "Refreshed! Found 7 orders");
        assert!(!h.controller.is_refreshing());
    }

    #[test]
    fn refresh_transport_failure_is_reported() {
        let h = harness();
        h.api.push_refresh(Err(FilterError::Transport("offline".to_string())));

        assert!(block_on(h.controller.refresh_orders()).is_err());
        assert_eq!(h.surface.last_status().unwrap().text, REFRESH_FAILED_MESSAGE);
        assert!(h.api.filter_calls.borrow().is_empty());
        assert!(!h.controller.is_refreshing());
    }

    #[test]
    fn options_are_loaded_for_remote_selects_only() {
        let h = harness();
        h.api.push_options(Ok(FilterOptionsResponse {
            success: true,
            options: (0..20)
                .map(|i| FilterOption {
                    value: format!("city-{}", i),
                    label: format!("City {}", i),
                })
                .collect(),
            error: None,
        }));

        let page = block_on(h.controller.filter_options("location_city", " aus ", 1)).unwrap();
        assert!(page.has_more);
        let (field, query) = h.api.option_calls.borrow()[0].clone();
        assert_eq!(field, "location_city");
        assert_eq!((query.search.as_str(), query.per_page), ("aus", 20));

        assert!(block_on(h.controller.filter_options("date_from", "", 1)).is_err());
    }

    #[test]
    fn saved_filter_sets() {
        let h = harness();
        h.surface.edit(|form| {
            form.set_text("location_city", "Austin");
        });
        assert!(!h.controller.save_filter_set("  "));
        assert!(h.controller.save_filter_set("austin"));
        assert_eq!(h.controller.filter_set_names(), vec!["austin".to_string()]);

        h.surface.edit(|form| {
            form.reset();
            form.set_text("rider_name", "Sam");
        });
        h.api.push_filter(Ok(query_result(vec![], 1, 0)));
        block_on(h.controller.apply_filter_set("austin")).unwrap();
        let form = h.surface.form();
        assert_eq!(form.text("location_city"), "Austin");
        assert_eq!(form.text("rider_name"), "");

        assert_eq!(
            block_on(h.controller.apply_filter_set("missing")),
            Ok(ApplyOutcome::Skipped)
        );
        assert!(h.controller.delete_filter_set("austin"));
        assert!(h.controller.filter_set_names().is_empty());
    }

    #[test]
    fn validate_all_needs_results() {
        let h = harness();
        assert!(h.controller.validate_all().is_empty());
        assert_eq!(h.surface.last_status().unwrap().kind, StatusKind::Warning);

        h.api.push_filter(Ok(query_result(
            vec![sample_order("o-1", "COMPLETED"), sample_order("o-2", "EXECUTING")],
            1,
            1,
        )));
        block_on(h.controller.apply()).unwrap();
        assert_eq!(h.controller.validate_all(), vec!["o-1".to_string()]);
    }

    #[test]
    fn panel_flag_is_persisted() {
        let h = harness();
        assert!(h.controller.panel_expanded());
        h.controller.set_panel_expanded(false);
        assert!(!h.controller.panel_expanded());
    }
}
