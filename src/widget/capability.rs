//! Statically declared widget capabilities.
//!
//! A widget advertises which optional hooks it implements through
//! [`Widget::capabilities`](super::Widget::capabilities). [`inspect`] turns
//! that declaration plus the widget type into a [`CapabilityReport`] once per
//! descriptor build.

use super::{Widget, WidgetType};
use crate::error::ConfigError;
use bitflags::bitflags;

bitflags! {
    /// Optional lifecycle hooks a widget implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CapabilitySet: u16 {
        const LABEL        = 1 << 0;
        const HELP         = 1 << 1;
        const OPT          = 1 << 2;
        const INIT         = 1 << 3;
        /// `handle_self()`: called without the event payload.
        const HANDLE_SELF  = 1 << 4;
        /// `handle_event(&Event)`: receives the event payload.
        const HANDLE_EVENT = 1 << 5;
        const VALIDATE     = 1 << 6;
        const STORE        = 1 << 7;
        const CLEANUP      = 1 << 8;
    }
}

const NAMES: [(CapabilitySet, &str); 9] = [
    (CapabilitySet::LABEL, "label"),
    (CapabilitySet::HELP, "help"),
    (CapabilitySet::OPT, "opt"),
    (CapabilitySet::INIT, "init"),
    (CapabilitySet::HANDLE_SELF, "handle"),
    (CapabilitySet::HANDLE_EVENT, "handle"),
    (CapabilitySet::VALIDATE, "validate"),
    (CapabilitySet::STORE, "store"),
    (CapabilitySet::CLEANUP, "cleanup"),
];

impl CapabilitySet {
    /// True when either form of `handle` is declared.
    pub fn handles(&self) -> bool {
        self.intersects(CapabilitySet::HANDLE_SELF | CapabilitySet::HANDLE_EVENT)
    }

    /// Hook names in declaration order, as the host knows them.
    pub fn names(&self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Which call form the adapter must use for `handle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleForm {
    /// The widget only cares that one of its own events happened.
    SelfOnly,
    /// The widget wants the event payload.
    WithEvent,
}

/// Result of inspecting one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityReport {
    pub widget_type: WidgetType,
    pub capabilities: CapabilitySet,
    pub handle: Option<HandleForm>,
}

impl CapabilityReport {
    pub fn has(&self, capability: CapabilitySet) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Determine which hooks `widget` implements.
///
/// Fails when no widget type is declared, or when both forms of `handle`
/// are declared at once.
pub fn inspect(widget: &dyn Widget) -> Result<CapabilityReport, ConfigError> {
    let widget_type = widget.widget_type().ok_or_else(|| ConfigError::MissingWidgetType {
        widget: widget.type_name().to_string(),
    })?;

    let capabilities = widget.capabilities();
    let handle = match (
        capabilities.contains(CapabilitySet::HANDLE_SELF),
        capabilities.contains(CapabilitySet::HANDLE_EVENT),
    ) {
        (true, true) => {
            return Err(ConfigError::AmbiguousHandle {
                widget: widget.type_name().to_string(),
            })
        }
        (true, false) => Some(HandleForm::SelfOnly),
        (false, true) => Some(HandleForm::WithEvent),
        (false, false) => None,
    };

    Ok(CapabilityReport {
        widget_type,
        capabilities,
        handle,
    })
}
