//! User-facing messages: log them, show them, remember them.
//!
//! Each message kind has its own [`KindSettings`]: whether to log it,
//! whether to show a popup, and an optional popup timeout. Settings can be
//! exported to and imported from a JSON map so they travel with profiles.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Message,
    LongMessage,
    Warning,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Message => "message",
            MessageKind::LongMessage => "long message",
            MessageKind::Warning => "warning",
            MessageKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// Handling of one kind of message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindSettings {
    /// Write the message to the log
    pub log: bool,
    /// Show the message in a popup
    pub show: bool,
    /// Close the popup after this many seconds (0 = wait for the user)
    pub timeout: u32,
}

impl Default for KindSettings {
    fn default() -> Self {
        Self {
            log: true,
            show: true,
            timeout: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportSettings {
    /// Plain and long messages
    pub messages: KindSettings,
    pub warnings: KindSettings,
    pub errors: KindSettings,
}

impl ReportSettings {
    pub fn for_kind(&self, kind: MessageKind) -> &KindSettings {
        match kind {
            MessageKind::Message | MessageKind::LongMessage => &self.messages,
            MessageKind::Warning => &self.warnings,
            MessageKind::Error => &self.errors,
        }
    }

    fn for_kind_mut(&mut self, kind: MessageKind) -> &mut KindSettings {
        match kind {
            MessageKind::Message | MessageKind::LongMessage => &mut self.messages,
            MessageKind::Warning => &mut self.warnings,
            MessageKind::Error => &mut self.errors,
        }
    }
}

/// Where popups go. Implemented by whatever UI the application runs.
pub trait Popup {
    fn show(&self, kind: MessageKind, text: &str);

    fn show_timed(&self, kind: MessageKind, text: &str, timeout_secs: u32);
}

pub struct Report {
    settings: ReportSettings,
    popup: Option<Box<dyn Popup>>,
    entries: Vec<(MessageKind, String)>,
}

impl Report {
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            popup: None,
            entries: Vec::new(),
        }
    }

    pub fn with_popup(mut self, popup: Box<dyn Popup>) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    pub fn message(&mut self, text: &str) {
        self.report(MessageKind::Message, text);
    }

    pub fn long_message(&mut self, text: &str) {
        self.report(MessageKind::LongMessage, text);
    }

    pub fn warning(&mut self, text: &str) {
        self.report(MessageKind::Warning, text);
    }

    pub fn error(&mut self, text: &str) {
        self.report(MessageKind::Error, text);
    }

    fn report(&mut self, kind: MessageKind, text: &str) {
        let settings = *self.settings.for_kind(kind);

        if settings.log {
            match kind {
                MessageKind::Message | MessageKind::LongMessage => log::info!("{}", text),
                MessageKind::Warning => log::warn!("{}", text),
                MessageKind::Error => log::error!("{}", text),
            }
        }

        if settings.show {
            if let Some(popup) = &self.popup {
                if settings.timeout > 0 {
                    popup.show_timed(kind, text, settings.timeout);
                } else {
                    popup.show(kind, text);
                }
            }
        }

        self.entries.push((kind, text.to_string()));
    }

    /// Messages reported so far, oldest first.
    pub fn messages(&self, kind: MessageKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(entry_kind, _)| *entry_kind == kind)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn count(&self, kind: MessageKind) -> usize {
        self.entries.iter().filter(|(entry_kind, _)| *entry_kind == kind).count()
    }

    /// Forget every reported message. Settings are kept.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn display_messages(&mut self, show: bool, timeout: u32) {
        self.set_display(MessageKind::Message, show, timeout);
    }

    pub fn display_warnings(&mut self, show: bool, timeout: u32) {
        self.set_display(MessageKind::Warning, show, timeout);
    }

    pub fn display_errors(&mut self, show: bool, timeout: u32) {
        self.set_display(MessageKind::Error, show, timeout);
    }

    fn set_display(&mut self, kind: MessageKind, show: bool, timeout: u32) {
        let settings = self.settings.for_kind_mut(kind);
        settings.show = show;
        settings.timeout = timeout;
    }

    pub fn log_messages(&mut self, log: bool) {
        self.settings.for_kind_mut(MessageKind::Message).log = log;
    }

    pub fn log_warnings(&mut self, log: bool) {
        self.settings.for_kind_mut(MessageKind::Warning).log = log;
    }

    pub fn log_errors(&mut self, log: bool) {
        self.settings.for_kind_mut(MessageKind::Error).log = log;
    }

    pub fn export(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.settings).context("Failed to export report settings")
    }

    /// Replace the settings with an exported map. Missing entries fall back
    /// to their defaults.
    pub fn import(&mut self, settings: serde_json::Value) -> Result<()> {
        self.settings = serde_json::from_value(settings).context("Failed to import report settings")?;
        Ok(())
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(ReportSettings::default())
    }
}
