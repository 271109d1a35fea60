use std::rc::Rc;

use super::form::FilterForm;
use super::render::ResultsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Warning,
    Info,
}

impl StatusKind {
    pub fn alert_class(&self) -> &'static str {
        match self {
            StatusKind::Success => "alert alert-success",
            StatusKind::Error => "alert alert-danger",
            StatusKind::Warning => "alert alert-warning",
            StatusKind::Info => "alert alert-info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatusKind::Success => "check-circle",
            StatusKind::Error => "x-circle",
            StatusKind::Warning => "alert-triangle",
            StatusKind::Info => "info",
        }
    }

    /// Success and info banners disappear on their own
    pub fn auto_hides(&self) -> bool {
        matches!(self, StatusKind::Success | StatusKind::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Warning, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, text)
    }
}

/// What the filter controller reads from and writes to the page
pub trait FilterSurface {
    /// Current contents of the filter widgets
    fn form(&self) -> FilterForm;
    fn set_form(&self, form: FilterForm);
    fn set_loading(&self, loading: bool);
    /// `None` clears the results area
    fn show_results(&self, results: Option<ResultsView>);
    fn show_status(&self, status: Option<StatusMessage>);
    fn scroll_to_results(&self);
}

impl<T: FilterSurface + ?Sized> FilterSurface for Rc<T> {
    fn form(&self) -> FilterForm {
        (**self).form()
    }

    fn set_form(&self, form: FilterForm) {
        (**self).set_form(form)
    }

    fn set_loading(&self, loading: bool) {
        (**self).set_loading(loading)
    }

    fn show_results(&self, results: Option<ResultsView>) {
        (**self).show_results(results)
    }

    fn show_status(&self, status: Option<StatusMessage>) {
        (**self).show_status(status)
    }

    fn scroll_to_results(&self) {
        (**self).scroll_to_results()
    }
}
