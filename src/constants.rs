//! Constants used throughout the application
//!
//! This module centralizes file names, ids and other constant values
//! to improve maintainability and consistency.

// Application directories and files
pub const APP_DIR: &str = "formkit";
pub const CONFIG_FILE_LOCAL: &str = "formkit.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "formkit.log";
pub const CONFIG_GENERATED: &str = "✅ Configuration file generated";

// Dialog help
pub const HELP_SEPARATOR: &str = "\n\n";

// Standard dialog buttons (id, label)
pub const BUTTON_BACK: (&str, &str) = ("back", "Back");
pub const BUTTON_ABORT: (&str, &str) = ("abort", "Abort");
pub const BUTTON_NEXT: (&str, &str) = ("next", "Next");

// Event payload keys
pub const EVENT_REASON: &str = "EventReason";
pub const REASON_ACTIVATED: &str = "Activated";
pub const REASON_VALUE_CHANGED: &str = "ValueChanged";

// Terminal host
pub const TICK_RATE_DEFAULT_MS: u64 = 100;
pub const TICK_RATE_MIN_MS: u64 = 10;
pub const TICK_RATE_MAX_MS: u64 = 1000;
pub const HELP_PANEL_WIDTH_PERCENT: u16 = 40;
