use std::collections::BTreeMap;

use contracts::domain::a001_orders::request::{FilterRecord, FilterValue};

use super::fields::{find_field, FieldSpec};

/// Raw value of one filter widget, before trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Scalar(String),
    Multi(Vec<String>),
}

/// Current contents of the filter panel: widget values, per-field error
/// marks and the page-size control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    values: BTreeMap<&'static str, FieldInput>,
    errors: BTreeMap<&'static str, String>,
    page_size: Option<u32>,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self, name: &str) -> Option<&FieldInput> {
        self.values.get(name)
    }

    /// Scalar text shown in a widget; empty for unset or multi-valued fields
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FieldInput::Scalar(value)) => value.as_str(),
            _ => "",
        }
    }

    /// Selected entries of a multi-select widget
    pub fn selected(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FieldInput::Multi(values)) => values.as_slice(),
            _ => &[],
        }
    }

    /// Set a scalar widget value. Returns false for undeclared fields.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(spec) = find_field(name) else {
            return false;
        };
        self.values.insert(spec.name, FieldInput::Scalar(value.into()));
        true
    }

    pub fn set_multi(&mut self, name: &str, values: Vec<String>) -> bool {
        let Some(spec) = find_field(name) else {
            return false;
        };
        self.values.insert(spec.name, FieldInput::Multi(values));
        true
    }

    /// Add or remove one entry of a multi-select widget
    pub fn toggle_option(&mut self, name: &str, value: &str, selected: bool) {
        let mut current = self.selected(name).to_vec();
        current.retain(|v| v != value);
        if selected {
            current.push(value.to_string());
        }
        self.set_multi(name, current);
    }

    pub fn clear_field(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// Empty every widget and drop all error marks. The page-size control is kept.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }

    /// Write a stored record back into the widgets.
    ///
    /// Keys without a declared field (pagination keys included) are skipped;
    /// widgets not mentioned in the record keep their value.
    pub fn restore(&mut self, record: &FilterRecord) {
        for (name, value) in record.iter() {
            let Some(spec) = find_field(name) else {
                continue;
            };
            let input = input_for(spec, value);
            self.values.insert(spec.name, input);
        }
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = Some(page_size);
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn set_error(&mut self, name: &str, message: impl Into<String>) {
        if let Some(spec) = find_field(name) {
            self.errors.insert(spec.name, message.into());
        }
    }

    pub fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    /// Number of widgets holding a non-blank value (filter panel badge)
    pub fn active_count(&self) -> usize {
        self.values
            .values()
            .filter(|input| match input {
                FieldInput::Scalar(value) => !value.trim().is_empty(),
                FieldInput::Multi(values) => values.iter().any(|v| !v.trim().is_empty()),
            })
            .count()
    }
}

fn input_for(spec: &FieldSpec, value: &FilterValue) -> FieldInput {
    match (spec.is_multi(), value) {
        (true, FilterValue::Many(values)) => FieldInput::Multi(values.clone()),
        (true, FilterValue::One(value)) => FieldInput::Multi(vec![value.clone()]),
        (false, other) => FieldInput::Scalar(other.first().unwrap_or_default().to_string()),
    }
}
