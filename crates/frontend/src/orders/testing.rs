//! In-memory collaborators for controller tests.

use async_trait::async_trait;
use contracts::domain::a001_orders::dto::{OrderDto, OrderStatus};
use contracts::domain::a001_orders::request::{
    FilterOptionsQuery, OrderFilterRequest, RefreshOrdersRequest,
};
use contracts::domain::a001_orders::response::{
    FilterOptionsResponse, QueryResult, RefreshOrdersResponse,
};
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::api::OrdersApi;
use super::error::FilterError;
use super::form::FilterForm;
use super::render::ResultsView;
use super::surface::{FilterSurface, StatusMessage};

pub enum Reply<T> {
    Ready(Result<T, FilterError>),
    /// Resolves when the test sends on the paired channel
    Pending(oneshot::Receiver<Result<T, FilterError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, FilterError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Pending(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FilterError::Transport("reply dropped".to_string()))),
        }
    }
}

fn next<T>(queue: &RefCell<VecDeque<Reply<T>>>) -> Reply<T> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Reply::Ready(Err(FilterError::Transport("no scripted reply".to_string()))))
}

/// `OrdersApi` answering from queues and recording every call
#[derive(Default)]
pub struct ScriptedApi {
    filter_replies: RefCell<VecDeque<Reply<QueryResult>>>,
    refresh_replies: RefCell<VecDeque<Reply<RefreshOrdersResponse>>>,
    option_replies: RefCell<VecDeque<Reply<FilterOptionsResponse>>>,
    pub filter_calls: RefCell<Vec<OrderFilterRequest>>,
    pub refresh_calls: RefCell<Vec<(RefreshOrdersRequest, i64)>>,
    pub option_calls: RefCell<Vec<(String, FilterOptionsQuery)>>,
}

impl ScriptedApi {
    pub fn push_filter(&self, result: Result<QueryResult, FilterError>) {
        self.filter_replies.borrow_mut().push_back(Reply::Ready(result));
    }

    pub fn push_pending(&self, rx: oneshot::Receiver<Result<QueryResult, FilterError>>) {
        self.filter_replies.borrow_mut().push_back(Reply::Pending(rx));
    }

    pub fn push_refresh(&self, result: Result<RefreshOrdersResponse, FilterError>) {
        self.refresh_replies.borrow_mut().push_back(Reply::Ready(result));
    }

    pub fn push_options(&self, result: Result<FilterOptionsResponse, FilterError>) {
        self.option_replies.borrow_mut().push_back(Reply::Ready(result));
    }
}

#[async_trait(?Send)]
impl OrdersApi for ScriptedApi {
    async fn filter_orders(&self, request: &OrderFilterRequest) -> Result<QueryResult, FilterError> {
        self.filter_calls.borrow_mut().push(request.clone());
        let reply = next(&self.filter_replies);
        reply.resolve().await
    }

    async fn refresh_orders(
        &self,
        request: &RefreshOrdersRequest,
        nonce: i64,
    ) -> Result<RefreshOrdersResponse, FilterError> {
        self.refresh_calls.borrow_mut().push((request.clone(), nonce));
        let reply = next(&self.refresh_replies);
        reply.resolve().await
    }

    async fn filter_options(
        &self,
        field: &str,
        query: &FilterOptionsQuery,
    ) -> Result<FilterOptionsResponse, FilterError> {
        self.option_calls
            .borrow_mut()
            .push((field.to_string(), query.clone()));
        let reply = next(&self.option_replies);
        reply.resolve().await
    }
}

/// `FilterSurface` that keeps everything it is shown
#[derive(Default)]
pub struct RecordingSurface {
    form: RefCell<FilterForm>,
    loading: RefCell<Vec<bool>>,
    results: RefCell<Option<ResultsView>>,
    statuses: RefCell<Vec<Option<StatusMessage>>>,
    scrolls: Cell<u32>,
}

impl RecordingSurface {
    pub fn edit(&self, f: impl FnOnce(&mut FilterForm)) {
        f(&mut self.form.borrow_mut());
    }

    pub fn loading_history(&self) -> Vec<bool> {
        self.loading.borrow().clone()
    }

    pub fn results(&self) -> Option<ResultsView> {
        self.results.borrow().clone()
    }

    pub fn last_status(&self) -> Option<StatusMessage> {
        self.statuses.borrow().last().cloned().flatten()
    }

    pub fn scrolls(&self) -> u32 {
        self.scrolls.get()
    }
}

impl FilterSurface for RecordingSurface {
    fn form(&self) -> FilterForm {
        self.form.borrow().clone()
    }

    fn set_form(&self, form: FilterForm) {
        *self.form.borrow_mut() = form;
    }

    fn set_loading(&self, loading: bool) {
        self.loading.borrow_mut().push(loading);
    }

    fn show_results(&self, results: Option<ResultsView>) {
        *self.results.borrow_mut() = results;
    }

    fn show_status(&self, status: Option<StatusMessage>) {
        self.statuses.borrow_mut().push(status);
    }

    fn scroll_to_results(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

pub fn sample_order(id: &str, status: &str) -> OrderDto {
    OrderDto {
        id: id.to_string(),
        order_status: OrderStatus::from(status.to_string()),
        has_grn: true,
        ..Default::default()
    }
}

/// Successful result holding `orders` as page `page` of `total_pages`
pub fn query_result(orders: Vec<OrderDto>, page: u32, total_pages: u32) -> QueryResult {
    QueryResult {
        success: true,
        total_count: orders.len() as u64,
        orders,
        page,
        per_page: 50,
        total_pages,
        status_totals: None,
        error: None,
    }
}
