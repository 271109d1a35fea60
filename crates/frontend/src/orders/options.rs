use contracts::domain::a001_orders::request::FilterOptionsQuery;
use contracts::domain::a001_orders::response::FilterOption;
use log::warn;

use super::api::OrdersApi;
use super::error::FilterError;

/// One page of options for a searchable select
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsPage {
    pub options: Vec<FilterOption>,
    pub page: u32,
    /// A full page came back, so there may be more
    pub has_more: bool,
}

/// Fetch one page of options for `field`.
///
/// A `success: false` reply is logged and yields an empty page.
pub async fn load_options_page<A: OrdersApi + ?Sized>(
    api: &A,
    field: &str,
    search: &str,
    page: u32,
    page_size: u32,
) -> Result<OptionsPage, FilterError> {
    let page = page.max(1);
    let query = FilterOptionsQuery {
        search: search.trim().to_string(),
        page,
        per_page: page_size,
    };
    let response = api.filter_options(field, &query).await?;

    if !response.success {
        warn!(
            "options for {} failed: {}",
            field,
            response.error.as_deref().unwrap_or("unknown error")
        );
        return Ok(OptionsPage {
            options: Vec::new(),
            page,
            has_more: false,
        });
    }

    let has_more = page_size > 0 && response.options.len() as u32 == page_size;
    Ok(OptionsPage {
        options: response.options,
        page,
        has_more,
    })
}

/// Options accumulated across pages for one search term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsState {
    pub search: String,
    pub options: Vec<FilterOption>,
    pub page: u32,
    pub has_more: bool,
}

impl OptionsState {
    /// Page to request next for `search`; a new search term starts over at 1
    pub fn next_page(&self, search: &str) -> u32 {
        if self.search == search.trim() {
            self.page + 1
        } else {
            1
        }
    }

    pub fn absorb(&mut self, search: &str, loaded: OptionsPage) {
        let search = search.trim();
        if loaded.page <= 1 || self.search != search {
            self.options.clear();
        }
        self.search = search.to_string();
        self.options.extend(loaded.options);
        self.page = loaded.page;
        self.has_more = loaded.has_more;
    }

    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}
