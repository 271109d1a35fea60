use async_trait::async_trait;
use contracts::domain::a001_orders::request::{
    FilterOptionsQuery, OrderFilterRequest, RefreshOrdersRequest,
};
use contracts::domain::a001_orders::response::{
    FilterOptionsResponse, QueryResult, RefreshOrdersResponse,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use std::rc::Rc;

use super::config::FilterConfig;
use super::error::FilterError;
use crate::shared::api_utils::{api_base, join_url};

/// Backend endpoints used by the order filter panel
#[async_trait(?Send)]
pub trait OrdersApi {
    async fn filter_orders(&self, request: &OrderFilterRequest) -> Result<QueryResult, FilterError>;

    /// `nonce` is appended as a cache-buster
    async fn refresh_orders(
        &self,
        request: &RefreshOrdersRequest,
        nonce: i64,
    ) -> Result<RefreshOrdersResponse, FilterError>;

    async fn filter_options(
        &self,
        field: &str,
        query: &FilterOptionsQuery,
    ) -> Result<FilterOptionsResponse, FilterError>;
}

#[async_trait(?Send)]
impl<T: OrdersApi + ?Sized> OrdersApi for Rc<T> {
    async fn filter_orders(&self, request: &OrderFilterRequest) -> Result<QueryResult, FilterError> {
        (**self).filter_orders(request).await
    }

    async fn refresh_orders(
        &self,
        request: &RefreshOrdersRequest,
        nonce: i64,
    ) -> Result<RefreshOrdersResponse, FilterError> {
        (**self).refresh_orders(request, nonce).await
    }

    async fn filter_options(
        &self,
        field: &str,
        query: &FilterOptionsQuery,
    ) -> Result<FilterOptionsResponse, FilterError> {
        (**self).filter_options(field, query).await
    }
}

/// `OrdersApi` over `fetch`
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    base: String,
    filter_path: String,
    refresh_path: String,
    options_path: String,
}

impl HttpOrdersApi {
    /// Client for the backend serving the current page
    pub fn new(config: &FilterConfig) -> Self {
        Self::with_base(api_base(), config)
    }

    pub fn with_base(base: impl Into<String>, config: &FilterConfig) -> Self {
        Self {
            base: base.into(),
            filter_path: config.filter_path.clone(),
            refresh_path: config.refresh_path.clone(),
            options_path: config.options_path.clone(),
        }
    }

    pub fn filter_url(&self) -> String {
        join_url(&self.base, &self.filter_path)
    }

    pub fn refresh_url(&self, nonce: i64) -> String {
        format!("{}?_cb={}", join_url(&self.base, &self.refresh_path), nonce)
    }

    pub fn options_url(&self, field: &str, query: &FilterOptionsQuery) -> Result<String, FilterError> {
        let qs = serde_qs::to_string(query).map_err(|e| FilterError::Transport(e.to_string()))?;
        let path = format!(
            "{}/{}",
            self.options_path.trim_end_matches('/'),
            urlencoding::encode(field)
        );
        Ok(format!("{}?{}", join_url(&self.base, &path), qs))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FilterError> {
    if !response.ok() {
        return Err(FilterError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| FilterError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl OrdersApi for HttpOrdersApi {
    async fn filter_orders(&self, request: &OrderFilterRequest) -> Result<QueryResult, FilterError> {
        let response = Request::post(&self.filter_url())
            .header("Content-Type", "application/json")
            .json(request)
            .map_err(|e| FilterError::Transport(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| FilterError::Transport(format!("Request failed: {}", e)))?;

        read_json(response).await
    }

    async fn refresh_orders(
        &self,
        request: &RefreshOrdersRequest,
        nonce: i64,
    ) -> Result<RefreshOrdersResponse, FilterError> {
        let response = Request::post(&self.refresh_url(nonce))
            .header("Content-Type", "application/json")
            .header("Cache-Control", "no-cache, no-store, must-revalidate")
            .header("Pragma", "no-cache")
            .header("Expires", "0")
            .json(request)
            .map_err(|e| FilterError::Transport(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| FilterError::Transport(format!("Request failed: {}", e)))?;

        read_json(response).await
    }

    async fn filter_options(
        &self,
        field: &str,
        query: &FilterOptionsQuery,
    ) -> Result<FilterOptionsResponse, FilterError> {
        let url = self.options_url(field, query)?;
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FilterError::Transport(format!("Request failed: {}", e)))?;

        read_json(response).await
    }
}
