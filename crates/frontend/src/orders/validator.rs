use contracts::domain::a001_orders::request::FilterRecord;

use super::fields::{
    WidgetKind, COMPLETED_ON_FROM, COMPLETED_ON_TO, CONFIDENCE_MAX, CONFIDENCE_MIN, DATE_FROM,
    DATE_TO, FILTER_FIELDS, QUANTITY_MAX, QUANTITY_MIN,
};
use super::form::FilterForm;
use crate::shared::date_utils::parse_iso_date;

pub const DATE_RANGE_MESSAGE: &str = "End date must be after start date";
pub const CONFIDENCE_RANGE_MESSAGE: &str = "Max confidence must be greater than min";
pub const QUANTITY_RANGE_MESSAGE: &str = "Max quantity must be greater than min";
pub const INVALID_DATE_MESSAGE: &str = "Invalid date";
pub const INVALID_NUMBER_MESSAGE: &str = "Invalid number";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Date,
    Decimal,
    Integer,
}

/// `from <= to` constraint between two fields; the error lands on `to`
#[derive(Debug, Clone, Copy)]
pub struct RangeRule {
    pub from: &'static str,
    pub to: &'static str,
    pub kind: RangeKind,
    pub message: &'static str,
}

pub const RANGE_RULES: &[RangeRule] = &[
    RangeRule {
        from: DATE_FROM,
        to: DATE_TO,
        kind: RangeKind::Date,
        message: DATE_RANGE_MESSAGE,
    },
    RangeRule {
        from: COMPLETED_ON_FROM,
        to: COMPLETED_ON_TO,
        kind: RangeKind::Date,
        message: DATE_RANGE_MESSAGE,
    },
    RangeRule {
        from: CONFIDENCE_MIN,
        to: CONFIDENCE_MAX,
        kind: RangeKind::Decimal,
        message: CONFIDENCE_RANGE_MESSAGE,
    },
    RangeRule {
        from: QUANTITY_MIN,
        to: QUANTITY_MAX,
        kind: RangeKind::Integer,
        message: QUANTITY_RANGE_MESSAGE,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl RangeRule {
    /// True when both ends parse and `from > to`. Unparseable ends never fire.
    fn violated(&self, record: &FilterRecord) -> bool {
        let (Some(from), Some(to)) = (record.text(self.from), record.text(self.to)) else {
            return false;
        };
        match self.kind {
            RangeKind::Date => match (parse_iso_date(from), parse_iso_date(to)) {
                (Some(from), Some(to)) => from > to,
                _ => false,
            },
            RangeKind::Decimal => match (parse_decimal(from), parse_decimal(to)) {
                (Some(from), Some(to)) => from > to,
                _ => false,
            },
            RangeKind::Integer => match (parse_integer(from), parse_integer(to)) {
                (Some(from), Some(to)) => from > to,
                _ => false,
            },
        }
    }
}

fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer part of a numeric input ("3.7" -> 3)
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| parse_decimal(value).map(|v| v.trunc() as i64))
}

/// Check a collected record. Every rule is evaluated; nothing short-circuits.
pub fn check(record: &FilterRecord) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for spec in FILTER_FIELDS {
        let Some(value) = record.text(spec.name) else {
            continue;
        };
        let message = match spec.kind {
            WidgetKind::Date if parse_iso_date(value).is_none() => INVALID_DATE_MESSAGE,
            WidgetKind::Number if parse_decimal(value).is_none() => INVALID_NUMBER_MESSAGE,
            _ => continue,
        };
        errors.push(FieldError {
            field: spec.name,
            message: message.to_string(),
        });
    }

    for rule in RANGE_RULES {
        if rule.violated(record) {
            errors.push(FieldError {
                field: rule.to,
                message: rule.message.to_string(),
            });
        }
    }

    errors
}

/// Validate `record` and mirror the outcome onto the form: failing fields get
/// an error mark, every other field has its previous mark cleared.
pub fn validate(record: &FilterRecord, form: &mut FilterForm) -> bool {
    let errors = check(record);
    mark(form, &errors);
    errors.is_empty()
}

/// Replace the form's error marks with `errors`
pub fn mark(form: &mut FilterForm, errors: &[FieldError]) {
    for spec in FILTER_FIELDS {
        form.clear_error(spec.name);
    }
    for error in errors {
        form.set_error(error.field, error.message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> FilterRecord {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn reversed_date_range_flags_end_date() {
        let mut form = FilterForm::new();
        let rec = record(&[(DATE_FROM, "2024-06-10"), (DATE_TO, "2024-06-01")]);

        assert!(!validate(&rec, &mut form));
        assert_eq!(form.error(DATE_TO), Some(DATE_RANGE_MESSAGE));
        assert_eq!(form.error(DATE_FROM), None);
    }

    #[test]
    fn equal_and_ascending_dates_pass() {
        let mut form = FilterForm::new();
        assert!(validate(
            &record(&[(DATE_FROM, "2024-06-01"), (DATE_TO, "2024-06-01")]),
            &mut form
        ));
        assert!(validate(
            &record(&[(DATE_FROM, "2024-06-01"), (DATE_TO, "2024-06-30")]),
            &mut form
        ));
    }

    #[test]
    fn all_rules_are_reported_together() {
        let rec = record(&[
            (DATE_FROM, "2024-06-10"),
            (DATE_TO, "2024-06-01"),
            (COMPLETED_ON_FROM, "2024-06-05"),
            (COMPLETED_ON_TO, "2024-06-04"),
            (CONFIDENCE_MIN, "0.9"),
            (CONFIDENCE_MAX, "0.5"),
            (QUANTITY_MIN, "10"),
            (QUANTITY_MAX, "9"),
        ]);

        let fields: Vec<_> = check(&rec).into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![DATE_TO, COMPLETED_ON_TO, CONFIDENCE_MAX, QUANTITY_MAX]
        );
    }

    #[test]
    fn quantity_compares_as_integers() {
        let rec = record(&[(QUANTITY_MIN, "9"), (QUANTITY_MAX, "10")]);
        assert!(check(&rec).is_empty());

        let rec = record(&[(QUANTITY_MIN, "10.9"), (QUANTITY_MAX, "10")]);
        assert!(check(&rec).is_empty());
    }

    #[test]
    fn malformed_values_are_flagged_but_do_not_trip_ranges() {
        let rec = record(&[
            (DATE_FROM, "yesterday"),
            (DATE_TO, "2024-06-01"),
            (CONFIDENCE_MIN, "high"),
        ]);
        let errors = check(&rec);

        assert_eq!(
            errors,
            vec![
                FieldError {
                    field: DATE_FROM,
                    message: INVALID_DATE_MESSAGE.to_string()
                },
                FieldError {
                    field: CONFIDENCE_MIN,
                    message: INVALID_NUMBER_MESSAGE.to_string()
                },
            ]
        );
    }

    #[test]
    fn passing_validation_clears_previous_marks() {
        let mut form = FilterForm::new();
        form.set_error(DATE_TO, DATE_RANGE_MESSAGE);

        assert!(validate(&record(&[(DATE_FROM, "2024-06-01")]), &mut form));
        assert!(!form.has_errors());
    }
}
