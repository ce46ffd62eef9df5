//! Application constants for the TradingView CSV parser
//!
//! Column names, default values, missing-value tokens and the default
//! LuxAlgo category table used throughout the parser.

// =============================================================================
// Column Names and Layout
// =============================================================================

/// Raw Unix timestamp column in TradingView exports
pub const TIME_COLUMN: &str = "time";

/// Derived human-readable date-time column
pub const DATETIME_COLUMN: &str = "datetime";

/// Output layout for derived date-time values
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix of the inline diagnostic produced for unconvertible timestamps
pub const INVALID_TIMESTAMP_PREFIX: &str = "Invalid timestamp: ";

// =============================================================================
// Missing Values
// =============================================================================

/// Text representation of a missing cell in JSON exports and diagnostics
pub const MISSING_TEXT: &str = "NaN";

/// Raw field values read as missing cells
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// =============================================================================
// Defaults
// =============================================================================

/// Default rounding precision for numeric columns
pub const DEFAULT_DECIMAL_PLACES: u32 = 4;

/// Largest precision accepted; f64 carries roughly 15 significant digits
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Default number of rows rendered by data displays
pub const DEFAULT_MAX_DISPLAY_ROWS: usize = 10;

/// Sentinel returned by display operations before any successful parse
pub const NOT_PARSED_MESSAGE: &str = "No data parsed yet. Use parse_csv() first.";

// =============================================================================
// Category Table
// =============================================================================

/// Category whose result receives the derived date-time column
pub const TIME_SERIES_CATEGORY: &str = "OHLC";

/// Category collecting every unclaimed column
pub const CATCH_ALL_CATEGORY: &str = "Other";

/// Default category table, in priority order
pub mod categories {
    pub const OHLC: &[&str] = &["time", "open", "high", "low", "close"];

    pub const LUXALGO_CONNECTOR: &[&str] = &["LUCID Connector"];

    pub const SIGNALS: &[&str] = &[
        "Bullish",
        "Bullish+",
        "Bearish",
        "Bearish+",
        "Bullish Exit",
        "Bearish Exit",
    ];

    pub const METRICS: &[&str] = &[
        "Trend Strength",
        "Take Profit",
        "Stop Loss",
        "Bar Color Value",
    ];

    pub const INDICATORS: &[&str] = &[
        "Trend Tracer",
        "Trend Catcher",
        "Smart Trail",
        "Smart Trail Extremity",
    ];

    pub const BANDS: &[&str] = &[
        "RZ R3 Band",
        "RZ R2 Band",
        "RZ R1 Band",
        "Reversal Zones Average",
        "RZ S1 Band",
        "RZ S2 Band",
        "RZ S3 Band",
    ];

    pub const NEO: &[&str] = &["Neo Lead", "Neo Lag"];

    pub const ALERTS: &[&str] = &[
        "Custom Alert Condition Highlighter",
        "Alert Scripting Condition Highlighter",
    ];

    pub const OTHER: &[&str] = &["@valuewhen"];

    /// Labels and patterns in declaration order
    pub const DEFAULT_TABLE: &[(&str, &[&str])] = &[
        ("OHLC", OHLC),
        ("LuxAlgo_Connector", LUXALGO_CONNECTOR),
        ("Signals", SIGNALS),
        ("Metrics", METRICS),
        ("Indicators", INDICATORS),
        ("Bands", BANDS),
        ("Neo", NEO),
        ("Alerts", ALERTS),
        ("Other", OTHER),
    ];
}
