//! Host-side state of the form shown in the terminal: fields, focus, help.

use crate::constants::{
    BUTTON_ABORT, BUTTON_BACK, BUTTON_NEXT, EVENT_REASON, REASON_ACTIVATED, REASON_VALUE_CHANGED,
};
use crate::host::HostError;
use crate::widget::descriptor::WidgetDescriptor;
use crate::widget::event::Event;
use crate::widget::{WidgetOption, WidgetType};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

/// One row of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub widget_type: WidgetType,
    pub enabled: bool,
    pub value: Value,
    /// Emit events for edits, not only for activation.
    pub notify: bool,
}

impl Field {
    fn from_descriptor(descriptor: &WidgetDescriptor) -> Self {
        Self {
            id: descriptor.id().to_string(),
            label: descriptor.label().unwrap_or(descriptor.id()).to_string(),
            widget_type: descriptor.widget_type().cloned().unwrap_or(WidgetType::Empty),
            enabled: !descriptor.has_option(&WidgetOption::Disabled),
            value: Value::Null,
            notify: descriptor.has_option(&WidgetOption::Notify)
                || descriptor.has_option(&WidgetOption::ImmediateNotify),
        }
    }

    fn button((id, label): (&str, &str)) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            widget_type: WidgetType::PushButton,
            enabled: true,
            value: Value::Null,
            notify: true,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self.widget_type,
            WidgetType::InputField | WidgetType::Password | WidgetType::ComboBox
        )
    }

    pub fn is_focusable(&self) -> bool {
        self.enabled && !matches!(self.widget_type, WidgetType::Empty | WidgetType::RichText)
    }

    /// Current value as editable text.
    pub fn text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Value as shown on screen.
    pub fn display_value(&self) -> String {
        match self.widget_type {
            WidgetType::Password => "*".repeat(self.text().chars().count()),
            WidgetType::CheckBox => {
                if self.value.as_bool().unwrap_or(false) {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            WidgetType::PushButton => String::new(),
            _ => self.text(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    pub title: String,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub help: String,
    pub show_help: bool,
}

impl Form {
    /// Form for `descriptors`, followed by the standard dialog buttons.
    pub fn from_descriptors(title: &str, descriptors: &[WidgetDescriptor], show_help: bool) -> Self {
        let mut fields: Vec<Field> = descriptors.iter().map(Field::from_descriptor).collect();
        fields.extend([BUTTON_BACK, BUTTON_ABORT, BUTTON_NEXT].into_iter().map(Field::button));

        let mut form = Self {
            title: title.to_string(),
            fields,
            focus: 0,
            help: String::new(),
            show_help,
        };
        if !form.fields[0].is_focusable() {
            form.focus_next();
        }
        form
    }

    pub fn index_of(&self, id: &str) -> Result<usize, HostError> {
        self.fields
            .iter()
            .position(|field| field.id == id)
            .ok_or_else(|| HostError::UnknownWidget(id.to_string()))
    }

    pub fn field(&self, id: &str) -> Result<&Field, HostError> {
        let index = self.index_of(id)?;
        Ok(&self.fields[index])
    }

    pub fn field_mut(&mut self, id: &str) -> Result<&mut Field, HostError> {
        let index = self.index_of(id)?;
        Ok(&mut self.fields[index])
    }

    pub fn focused(&self) -> Option<&Field> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(self.fields.len().saturating_sub(1));
    }

    fn move_focus(&mut self, step: usize) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let mut index = self.focus;
        for _ in 0..len {
            index = (index + step) % len;
            if self.fields[index].is_focusable() {
                self.focus = index;
                return;
            }
        }
    }

    /// Apply a key press. Returns the event to report to the dialog, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Event> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Event::new(BUTTON_ABORT.0));
        }

        let on_check_box = self
            .focused()
            .map(|field| field.widget_type == WidgetType::CheckBox)
            .unwrap_or(false);

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
                None
            }
            KeyCode::Esc => Some(Event::new(BUTTON_ABORT.0)),
            KeyCode::Enter => self.activate(),
            KeyCode::Char(' ') if on_check_box => self.toggle(),
            KeyCode::Char(ch) => self.edit(|text| text.push(ch)),
            KeyCode::Backspace => self.edit(|text| {
                text.pop();
            }),
            _ => None,
        }
    }

    fn activate(&mut self) -> Option<Event> {
        let field = self.focused()?;
        if !field.enabled {
            return None;
        }
        if field.widget_type == WidgetType::PushButton || field.notify {
            return Some(Event::new(field.id.clone()).with(EVENT_REASON, REASON_ACTIVATED));
        }
        self.focus_next();
        None
    }

    fn toggle(&mut self) -> Option<Event> {
        let field = self.fields.get_mut(self.focus).filter(|field| field.enabled)?;
        let checked = !field.value.as_bool().unwrap_or(false);
        field.value = Value::Bool(checked);
        value_changed(field)
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) -> Option<Event> {
        let field = self.fields.get_mut(self.focus).filter(|field| field.enabled && field.is_text())?;
        let mut text = field.text();
        change(&mut text);
        field.value = Value::String(text);
        value_changed(field)
    }
}

fn value_changed(field: &Field) -> Option<Event> {
    field
        .notify
        .then(|| Event::new(field.id.clone()).with(EVENT_REASON, REASON_VALUE_CHANGED))
}
