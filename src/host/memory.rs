//! In-memory host: a widget table plus a scripted event queue.
//!
//! Used to drive dialogs without a terminal, in tests and for headless runs.

use super::{HostError, WidgetHost};
use crate::widget::descriptor::WidgetDescriptor;
use crate::widget::event::Event;
use crate::widget::{WidgetOption, WidgetType};
use indexmap::IndexMap;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

/// What the host remembers about one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRecord {
    pub widget_type: Option<WidgetType>,
    pub label: Option<String>,
    pub enabled: bool,
    pub value: Value,
}

impl Default for WidgetRecord {
    fn default() -> Self {
        Self {
            widget_type: None,
            label: None,
            enabled: true,
            value: Value::Null,
        }
    }
}

/// One scripted step of user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    /// Deliver an event to the dialog.
    Event(Event),
    /// Change a widget value the way typing would, without an event.
    SetValue(String, Value),
}

#[derive(Default)]
struct HostState {
    open: bool,
    opened: usize,
    widgets: IndexMap<String, WidgetRecord>,
    input: VecDeque<UserInput>,
    focus: Option<String>,
    help: String,
    help_updates: usize,
}

#[derive(Default)]
pub struct MemoryHost {
    state: RefCell<HostState>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose table already knows `ids`, without opening a dialog.
    pub fn with_widgets<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let host = Self::new();
        {
            let mut state = host.state.borrow_mut();
            for id in ids {
                state.widgets.insert(id.into(), WidgetRecord::default());
            }
        }
        host
    }

    /// Queue events the next `user_input` calls will return, in order.
    pub fn with_events<I: IntoIterator<Item = Event>>(self, events: I) -> Self {
        self.state.borrow_mut().input.extend(events.into_iter().map(UserInput::Event));
        self
    }

    /// Queue a mixed script of value changes and events.
    pub fn with_input<I: IntoIterator<Item = UserInput>>(self, input: I) -> Self {
        self.state.borrow_mut().input.extend(input);
        self
    }

    pub fn push_event(&self, event: Event) {
        self.state.borrow_mut().input.push_back(UserInput::Event(event));
    }

    /// Scripted steps not consumed yet.
    pub fn pending_input(&self) -> usize {
        self.state.borrow().input.len()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// How many times a dialog was opened on this host.
    pub fn opened(&self) -> usize {
        self.state.borrow().opened
    }

    pub fn focused(&self) -> Option<String> {
        self.state.borrow().focus.clone()
    }

    pub fn help(&self) -> String {
        self.state.borrow().help.clone()
    }

    /// How many times the help text was pushed.
    pub fn help_updates(&self) -> usize {
        self.state.borrow().help_updates
    }

    pub fn record(&self, id: &str) -> Option<WidgetRecord> {
        self.state.borrow().widgets.get(id).cloned()
    }

    fn with_record<T>(&self, id: &str, f: impl FnOnce(&mut WidgetRecord) -> T) -> Result<T, HostError> {
        let mut state = self.state.borrow_mut();
        state
            .widgets
            .get_mut(id)
            .map(f)
            .ok_or_else(|| HostError::UnknownWidget(id.to_string()))
    }
}

impl WidgetHost for MemoryHost {
    fn open_dialog(&self, descriptors: &[WidgetDescriptor]) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        state.widgets = descriptors
            .iter()
            .map(|descriptor| {
                let record = WidgetRecord {
                    widget_type: descriptor.widget_type().cloned(),
                    label: descriptor.label().map(str::to_string),
                    enabled: !descriptor.has_option(&WidgetOption::Disabled),
                    value: Value::Null,
                };
                (descriptor.id().to_string(), record)
            })
            .collect();
        let first = state.widgets.keys().next().cloned();
        state.focus = first;
        state.open = true;
        state.opened += 1;
        Ok(())
    }

    fn close_dialog(&self) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return Err(HostError::NoDialog);
        }
        state.open = false;
        Ok(())
    }

    fn user_input(&self) -> Result<Event, HostError> {
        loop {
            let step = self.state.borrow_mut().input.pop_front().ok_or(HostError::InputClosed)?;
            match step {
                UserInput::Event(event) => return Ok(event),
                UserInput::SetValue(id, value) => self.set_value(&id, value)?,
            }
        }
    }

    fn is_enabled(&self, id: &str) -> Result<bool, HostError> {
        self.with_record(id, |record| record.enabled)
    }

    fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), HostError> {
        self.with_record(id, |record| record.enabled = enabled)
    }

    fn set_focus(&self, id: &str) -> Result<(), HostError> {
        self.with_record(id, |_| ())?;
        self.state.borrow_mut().focus = Some(id.to_string());
        Ok(())
    }

    fn value(&self, id: &str) -> Result<Value, HostError> {
        self.with_record(id, |record| record.value.clone())
    }

    fn set_value(&self, id: &str, value: Value) -> Result<(), HostError> {
        self.with_record(id, |record| record.value = value)
    }

    fn set_help(&self, text: &str) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        state.help = text.to_string();
        state.help_updates += 1;
        Ok(())
    }
}
