//! Fixed file locations and defaults shared by the store, loader, and views.

/// The CSV file that collects survey submissions.
pub const CSV_PATH: &str = "data.csv";

/// The JSON reference document with `chart_title` and `data_points`.
pub const JSON_PATH: &str = "data.json";

/// The canonical column layout of the ingestion table.
pub const COLUMNS: [&str; 2] = ["category", "value"];

/// Title used when the reference document is missing or has no usable title.
pub const DEFAULT_CHART_TITLE: &str = "JSON Chart";

/// Study spots offered by the survey when the reference document yields none.
pub const FALLBACK_SPOTS: [&str; 7] = [
    "Library",
    "Dorm",
    "Clough Commons",
    "Student Center",
    "Klaus Atrium",
    "Outdoor Greens",
    "Dining Hall",
];

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 10;
pub const RATING_DEFAULT: u8 = 7;

/// Default number of categories shown in the ranked totals chart.
pub const DEFAULT_TOP_K: usize = 5;
