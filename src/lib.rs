//! formkit - capability-based widgets for descriptor-driven dialogs
//!
//! Widgets are plain Rust objects implementing [`widget::Widget`]. Each one
//! declares its widget type and the optional lifecycle hooks it implements;
//! formkit compiles that into the string-keyed descriptors a host dialog
//! engine consumes, adapts the hooks to the host's fixed callback
//! signatures, and routes host events back to the right widget.
//!
//! # Modules
//!
//! * [`widget`] - Widget trait, capabilities, callback adapters, descriptors
//! * [`dialog`] - Dialog lifecycle and event routing
//! * [`host`] - Host interface plus in-memory and terminal hosts
//! * [`report`] - User-facing message reporting
//! * [`config`] - Application configuration management
//! * [`logger`] - File logging setup

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Demo account form used by the `formkit` binary
pub mod demo;

/// Dialog runner and event router
pub mod dialog;

/// Error types for descriptor building and dialog runs
pub mod error;

/// Host dialog engine interface and implementations
pub mod host;

/// Logging setup for debugging and error tracking
pub mod logger;

/// Message reporting with per-kind log/show/timeout settings
pub mod report;

/// Widget objects and their descriptors
pub mod widget;

pub use dialog::{Dialog, DialogOutcome};
pub use error::{ConfigError, DialogError};
pub use host::{HostError, WidgetHost};
pub use widget::{shared, Action, CapabilitySet, Event, Widget, WidgetBase, WidgetOption, WidgetType};
