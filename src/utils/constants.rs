/// Source column names
pub const COL_DATE: &str = "dt";
pub const COL_AVG_TEMP: &str = "AverageTemperature";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_CITY: &str = "City";
pub const COL_COUNTRY: &str = "Country";

/// Derived column names
pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_DATE,
    COL_AVG_TEMP,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_CITY,
    COL_COUNTRY,
];

/// Temperature cells treated as missing, matching the common CSV NA spellings
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Accepted `dt` layouts
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
pub const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Country selector sentinel meaning "no restriction"
pub const ALL_COUNTRIES: &str = "All";

/// File names
pub const DEFAULT_DATA_FILE: &str = "climate_change_earth.csv";
pub const DEFAULT_EXPORT_FILE: &str = "filtered_climate_data.csv";
pub const DEFAULT_CONFIG_FILE: &str = "climate-dashboard";

/// Configuration environment prefix (e.g. CLIMATE_DASHBOARD_TOP_CITIES)
pub const ENV_PREFIX: &str = "CLIMATE_DASHBOARD";

/// Aggregation defaults
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;
pub const DEFAULT_TOP_CITIES: usize = 10;
pub const DEFAULT_SAMPLE_ROWS: usize = 100;
pub const DEFAULT_KDE_GRID_POINTS: usize = 200;
pub const DEFAULT_KDE_MAX_SAMPLES: usize = 20_000;
