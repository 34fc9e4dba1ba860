//! Per-widget bookkeeping and the host-backed state accessors.

use crate::host::{HostError, HostHandle};
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;

/// Shown for a widget that never joined a dialog and has no explicit identity.
const UNNAMED_WIDGET: &str = "<unnamed widget>";

/// Connection between a widget and the dialog run it belongs to.
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) state: WidgetState,
    pub(crate) help_stale: Rc<Cell<bool>>,
}

/// State every widget embeds: the identity override, the routing flag and,
/// while a dialog is running, the binding to its host.
#[derive(Default)]
pub struct WidgetBase {
    widget_id: Option<String>,
    handle_all_events: bool,
    binding: Option<Binding>,
    /// Identity the last dialog resolved for this widget.
    resolved_id: Option<String>,
}

impl WidgetBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base with an explicit identity instead of the type-derived one.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            widget_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn widget_id(&self) -> Option<&str> {
        self.widget_id.as_deref()
    }

    pub fn set_widget_id(&mut self, id: impl Into<String>) {
        self.widget_id = Some(id.into());
    }

    pub fn handle_all_events(&self) -> bool {
        self.handle_all_events
    }

    pub fn set_handle_all_events(&mut self, all: bool) {
        self.handle_all_events = all;
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub(crate) fn bind(&mut self, binding: Binding) {
        self.resolved_id = Some(binding.state.id.clone());
        self.binding = Some(binding);
    }

    pub(crate) fn unbind(&mut self) {
        self.binding = None;
    }

    /// Accessor for the host-held state of this widget. Only available while
    /// the widget is part of a running dialog.
    pub fn state(&self) -> Result<&WidgetState, HostError> {
        self.binding
            .as_ref()
            .map(|binding| &binding.state)
            .ok_or_else(|| self.detached())
    }

    /// Accessor for another widget of the same dialog, e.g. to enable a
    /// field that depends on this one.
    pub fn state_of(&self, id: &str) -> Result<WidgetState, HostError> {
        let state = self.state()?;
        Ok(WidgetState::new(id, state.host.clone()))
    }

    /// Is the widget open for interaction?
    pub fn is_enabled(&self) -> Result<bool, HostError> {
        self.state()?.is_enabled()
    }

    pub fn enable(&self) -> Result<(), HostError> {
        self.state()?.enable()
    }

    pub fn disable(&self) -> Result<(), HostError> {
        self.state()?.disable()
    }

    /// Move focus to the widget, e.g. after its validation failed.
    pub fn focus(&self) -> Result<(), HostError> {
        self.state()?.focus()
    }

    pub fn value(&self) -> Result<Value, HostError> {
        self.state()?.value()
    }

    pub fn set_value(&self, value: impl Into<Value>) -> Result<(), HostError> {
        self.state()?.set_value(value.into())
    }

    /// Ask for the dialog help to be rebuilt because this widget's help text
    /// changed. Takes effect once the current event has been processed.
    pub fn refresh_help(&self) -> Result<(), HostError> {
        let binding = self.binding.as_ref().ok_or_else(|| self.detached())?;
        binding.help_stale.set(true);
        Ok(())
    }

    fn detached(&self) -> HostError {
        let id = self
            .widget_id
            .as_deref()
            .or(self.resolved_id.as_deref())
            .unwrap_or(UNNAMED_WIDGET);
        HostError::Detached(id.to_string())
    }
}

/// Thin pass-through to the host for one widget identity. Host failures
/// come back unchanged.
#[derive(Clone)]
pub struct WidgetState {
    id: String,
    host: HostHandle,
}

impl WidgetState {
    pub fn new(id: impl Into<String>, host: HostHandle) -> Self {
        Self { id: id.into(), host }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_enabled(&self) -> Result<bool, HostError> {
        self.host.is_enabled(&self.id)
    }

    pub fn enable(&self) -> Result<(), HostError> {
        self.host.set_enabled(&self.id, true)
    }

    pub fn disable(&self) -> Result<(), HostError> {
        self.host.set_enabled(&self.id, false)
    }

    pub fn focus(&self) -> Result<(), HostError> {
        self.host.set_focus(&self.id)
    }

    pub fn value(&self) -> Result<Value, HostError> {
        self.host.value(&self.id)
    }

    pub fn set_value(&self, value: Value) -> Result<(), HostError> {
        self.host.set_value(&self.id, value)
    }
}
