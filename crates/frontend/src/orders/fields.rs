//! Declared table of order filter fields.
//!
//! Collector, validator, persistence and the filter panel all look fields up
//! here instead of deriving DOM ids from field names.

pub const DATE_FROM: &str = "date_from";
pub const DATE_TO: &str = "date_to";
pub const ORDER_STATUS: &str = "order_status";
pub const COMPLETED_ON_FROM: &str = "completed_on_from";
pub const COMPLETED_ON_TO: &str = "completed_on_to";
pub const CONFIDENCE_MIN: &str = "confidence_min";
pub const CONFIDENCE_MAX: &str = "confidence_max";
pub const QUANTITY_MIN: &str = "quantity_min";
pub const QUANTITY_MAX: &str = "quantity_max";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Text,
    Date,
    Number,
    /// Single choice from a fixed option list
    Select,
    /// Several choices from a fixed option list
    MultiSelect,
    /// Searchable single choice backed by `/api/filters/options/<field>`
    RemoteSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Dates,
    Status,
    Location,
    Delivery,
    Items,
    Validation,
    Search,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 7] = [
        FieldGroup::Dates,
        FieldGroup::Status,
        FieldGroup::Location,
        FieldGroup::Delivery,
        FieldGroup::Items,
        FieldGroup::Validation,
        FieldGroup::Search,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FieldGroup::Dates => "Dates",
            FieldGroup::Status => "Order Status",
            FieldGroup::Location => "Location",
            FieldGroup::Delivery => "Delivery",
            FieldGroup::Items => "Line Items",
            FieldGroup::Validation => "GRN Validation",
            FieldGroup::Search => "Search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub dom_id: &'static str,
    pub kind: WidgetKind,
    pub group: FieldGroup,
    pub placeholder: &'static str,
    /// `(value, label)` pairs for `Select` / `MultiSelect`
    pub options: &'static [(&'static str, &'static str)],
}

impl FieldSpec {
    pub fn is_multi(&self) -> bool {
        self.kind == WidgetKind::MultiSelect
    }

    /// Option source name for remote selects
    pub fn option_source(&self) -> Option<&'static str> {
        match self.kind {
            WidgetKind::RemoteSelect => Some(self.name),
            _ => None,
        }
    }
}

const ORDER_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("COMPLETED", "Completed"),
    ("CANCELLED", "Cancelled"),
    ("EXECUTING", "Executing"),
    ("ONGOING", "Ongoing"),
];

const VALIDATION_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("all", "All Orders"),
    ("validated", "Has Validation"),
    ("unvalidated", "No Validation"),
    ("valid", "Valid Only"),
    ("invalid", "Invalid Only"),
    ("no_document", "No Document Detected"),
    ("has_issues", "Has Issues"),
];

const fn field(
    name: &'static str,
    label: &'static str,
    dom_id: &'static str,
    kind: WidgetKind,
    group: FieldGroup,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        dom_id,
        kind,
        group,
        placeholder: "",
        options: &[],
    }
}

pub const FILTER_FIELDS: &[FieldSpec] = &[
    field(DATE_FROM, "From", "filter-date-from", WidgetKind::Date, FieldGroup::Dates),
    field(DATE_TO, "To", "filter-date-to", WidgetKind::Date, FieldGroup::Dates),
    field(
        COMPLETED_ON_FROM,
        "Completed From",
        "filter-completed-from",
        WidgetKind::Date,
        FieldGroup::Dates,
    ),
    field(
        COMPLETED_ON_TO,
        "Completed To",
        "filter-completed-to",
        WidgetKind::Date,
        FieldGroup::Dates,
    ),
    FieldSpec {
        options: ORDER_STATUS_OPTIONS,
        ..field(
            ORDER_STATUS,
            "Order Status",
            "filter-order-status",
            WidgetKind::MultiSelect,
            FieldGroup::Status,
        )
    },
    FieldSpec {
        placeholder: "Store, warehouse...",
        ..field(
            "location_name",
            "Location Name",
            "filter-location-name",
            WidgetKind::Text,
            FieldGroup::Location,
        )
    },
    FieldSpec {
        placeholder: "All cities",
        ..field(
            "location_city",
            "City",
            "filter-city",
            WidgetKind::RemoteSelect,
            FieldGroup::Location,
        )
    },
    FieldSpec {
        placeholder: "e.g. US",
        ..field(
            "location_country_code",
            "Country",
            "filter-country",
            WidgetKind::Text,
            FieldGroup::Location,
        )
    },
    FieldSpec {
        placeholder: "All riders",
        ..field(
            "rider_name",
            "Rider",
            "filter-rider",
            WidgetKind::RemoteSelect,
            FieldGroup::Delivery,
        )
    },
    field(
        "vehicle_registration",
        "Vehicle Registration",
        "filter-vehicle",
        WidgetKind::Text,
        FieldGroup::Delivery,
    ),
    FieldSpec {
        placeholder: "All clients",
        ..field(
            "client_id",
            "Client",
            "filter-client",
            WidgetKind::RemoteSelect,
            FieldGroup::Delivery,
        )
    },
    field("sku_id", "SKU ID", "filter-sku-id", WidgetKind::Text, FieldGroup::Items),
    field("item_name", "Item Name", "filter-item-name", WidgetKind::Text, FieldGroup::Items),
    field(QUANTITY_MIN, "Min Quantity", "filter-quantity-min", WidgetKind::Number, FieldGroup::Items),
    field(QUANTITY_MAX, "Max Quantity", "filter-quantity-max", WidgetKind::Number, FieldGroup::Items),
    FieldSpec {
        options: VALIDATION_STATUS_OPTIONS,
        ..field(
            "has_validation",
            "Validation Status",
            "filter-validation-status",
            WidgetKind::Select,
            FieldGroup::Validation,
        )
    },
    FieldSpec {
        placeholder: "0.0",
        ..field(
            CONFIDENCE_MIN,
            "Min Confidence",
            "filter-confidence-min",
            WidgetKind::Number,
            FieldGroup::Validation,
        )
    },
    FieldSpec {
        placeholder: "1.0",
        ..field(
            CONFIDENCE_MAX,
            "Max Confidence",
            "filter-confidence-max",
            WidgetKind::Number,
            FieldGroup::Validation,
        )
    },
    FieldSpec {
        placeholder: "Order id, location, rider, client...",
        ..field("search", "Search", "filter-search", WidgetKind::Text, FieldGroup::Search)
    },
];

/// Look up a declared filter field by name
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    FILTER_FIELDS.iter().find(|f| f.name == name)
}

pub fn fields_in(group: FieldGroup) -> impl Iterator<Item = &'static FieldSpec> {
    FILTER_FIELDS.iter().filter(move |f| f.group == group)
}
