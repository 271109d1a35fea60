use chrono::NaiveDate;
use contracts::domain::a001_orders::request::{FilterRecord, FilterValue, OrderFilterRequest};

use super::fields::{DATE_FROM, DATE_TO, FILTER_FIELDS};
use super::form::{FieldInput, FilterForm};
use crate::shared::date_utils::iso_date;

/// Read every declared widget into a record: trimmed scalars, cleaned lists,
/// blanks omitted. No defaults are applied here.
pub fn collect_fields(form: &FilterForm) -> FilterRecord {
    let mut record = FilterRecord::new();
    for spec in FILTER_FIELDS {
        let Some(input) = form.input(spec.name) else {
            continue;
        };
        if let Some(value) = clean(input) {
            record.insert(spec.name, value);
        }
    }
    record
}

/// Build the filter request for `page`.
///
/// When neither end of the order date range is set, both default to `today`.
/// `per_page` comes from the page-size control, or `default_per_page`.
pub fn collect(
    form: &FilterForm,
    page: u32,
    today: NaiveDate,
    default_per_page: u32,
) -> OrderFilterRequest {
    let mut filters = collect_fields(form);

    if !filters.contains(DATE_FROM) && !filters.contains(DATE_TO) {
        let today = iso_date(today);
        filters.insert(DATE_FROM, today.clone());
        filters.insert(DATE_TO, today);
    }

    let per_page = form
        .page_size()
        .filter(|size| *size > 0)
        .unwrap_or(default_per_page);

    OrderFilterRequest {
        filters,
        page: page.max(1),
        per_page,
    }
}

fn clean(input: &FieldInput) -> Option<FilterValue> {
    match input {
        FieldInput::Scalar(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| FilterValue::One(trimmed.to_string()))
        }
        FieldInput::Multi(values) => {
            let cleaned: Vec<String> = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect();
            (!cleaned.is_empty()).then_some(FilterValue::Many(cleaned))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::fields::ORDER_STATUS;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn no_dates_default_to_today() {
        let form = FilterForm::new();
        let request = collect(&form, 1, today(), 50);

        assert_eq!(request.filters.text(DATE_FROM), Some("2024-06-15"));
        assert_eq!(request.filters.text(DATE_TO), Some("2024-06-15"));
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 50);
    }

    #[test]
    fn single_date_bound_is_left_alone() {
        let mut form = FilterForm::new();
        form.set_text(DATE_FROM, "2024-06-01");
        let request = collect(&form, 1, today(), 50);

        assert_eq!(request.filters.text(DATE_FROM), Some("2024-06-01"));
        assert!(!request.filters.contains(DATE_TO));

        let mut form = FilterForm::new();
        form.set_text(DATE_TO, "2024-06-20");
        let request = collect(&form, 1, today(), 50);
        assert!(!request.filters.contains(DATE_FROM));
    }

    #[test]
    fn blanks_are_trimmed_and_omitted() {
        let mut form = FilterForm::new();
        form.set_text("location_city", "  Austin ");
        form.set_text("rider_name", "   ");
        form.set_multi(
            ORDER_STATUS,
            vec![" COMPLETED".to_string(), "".to_string(), "  ".to_string()],
        );
        form.set_multi("sku_id", vec![]);

        let record = collect_fields(&form);
        assert_eq!(record.text("location_city"), Some("Austin"));
        assert!(!record.contains("rider_name"));
        assert!(!record.contains("sku_id"));
        assert_eq!(
            record.get(ORDER_STATUS),
            Some(&FilterValue::Many(vec!["COMPLETED".to_string()]))
        );

        form.set_multi(ORDER_STATUS, vec!["".to_string()]);
        assert!(!collect_fields(&form).contains(ORDER_STATUS));
    }

    #[test]
    fn page_and_page_size() {
        let mut form = FilterForm::new();
        assert_eq!(collect(&form, 0, today(), 50).page, 1);

        form.set_page_size(100);
        let request = collect(&form, 3, today(), 50);
        assert_eq!(request.page, 3);
        assert_eq!(request.per_page, 100);

        form.set_page_size(0);
        assert_eq!(collect(&form, 1, today(), 50).per_page, 50);
    }
}
