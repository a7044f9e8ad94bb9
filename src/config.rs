//! Configuration constants and CLI options.

use clap::{Parser, ValueEnum};

use crate::geometry::LatLng;

/// Default base URL of the geo-data service.
pub const DEFAULT_BASE_URL: &str = "https://api.wilayah-indonesia.dev";

/// Cap applied to the `limit` query parameter of listing endpoints.
pub const MAX_LIST_LIMIT: u32 = 100;

/// HTTP request timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Default viewport center: roughly the middle of the archipelago.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: -2.5,
    lng: 118.0,
};

/// Default viewport zoom (whole-country view).
pub const DEFAULT_ZOOM: u8 = 5;

/// Maximum absolute offset, in degrees, applied to approximate markers for
/// levels without upstream coordinates. 0.05° is a few kilometres, close
/// enough to read as "inside the parent city".
pub const APPROX_OFFSET_DEGREES: f64 = 0.05;

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Command-line options for the drill-down binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geo_cascade",
    about = "Drill down through Indonesia's administrative hierarchy"
)]
pub struct Config {
    /// Administrative codes to drill through, outermost first:
    /// PROVINCE [CITY [DISTRICT [VILLAGE]]]. With no codes, lists provinces.
    pub codes: Vec<String>,

    /// Base URL of the geo-data service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Maximum number of child options fetched per level (capped at 100)
    #[arg(long, default_value_t = MAX_LIST_LIMIT)]
    pub limit: u32,

    /// Free-text filter applied when listing provinces
    #[arg(long)]
    pub search: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
