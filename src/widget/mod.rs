//! Capability-bearing widget objects.
//!
//! A widget is any type implementing [`Widget`]. It declares its widget type
//! and the optional hooks it implements; the rest of this module turns that
//! declaration into a [`WidgetDescriptor`] the host can consume.
//!
//! # Module Components
//!
//! - [`capability`] - Declared hook set and its inspection
//! - [`adapter`] - Host-signature wrappers around widget hooks
//! - [`descriptor`] - The string-keyed descriptor handed to the host
//! - [`event`] - Host events and dialog actions
//! - [`state`] - Identity, routing flag and host-backed state accessors
//!
//! # Lifecycle
//!
//! `init` runs once when the dialog opens, `handle` for every routed event,
//! `validate` before the dialog accepts input, `store` once after successful
//! validation and `cleanup` once when the dialog closes.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub mod adapter;
pub mod capability;
pub mod descriptor;
pub mod event;
pub mod state;

pub use adapter::AdaptedCallback;
pub use capability::{inspect, CapabilityReport, CapabilitySet, HandleForm};
pub use descriptor::{build_descriptor, DescriptorValue, WidgetDescriptor};
pub use event::{Action, Event};
pub use state::{WidgetBase, WidgetState};

/// Kind of widget the host should render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    InputField,
    Password,
    CheckBox,
    ComboBox,
    RadioButtons,
    PushButton,
    RichText,
    Empty,
    Custom(String),
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetType::InputField => "input_field",
            WidgetType::Password => "password",
            WidgetType::CheckBox => "check_box",
            WidgetType::ComboBox => "combo_box",
            WidgetType::RadioButtons => "radio_buttons",
            WidgetType::PushButton => "push_button",
            WidgetType::RichText => "rich_text",
            WidgetType::Empty => "empty",
            WidgetType::Custom(name) => name,
        };
        f.write_str(name)
    }
}

/// Presentation options passed through to the host untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetOption {
    /// Emit an event when the user interacts with the widget. Needed for
    /// `handle` to see anything on most hosts.
    Notify,
    ImmediateNotify,
    HStretch,
    VStretch,
    /// Start out disabled.
    Disabled,
    Custom(String),
}

/// A UI form element.
///
/// Only [`base`](Widget::base) / [`base_mut`](Widget::base_mut) are required.
/// A concrete widget overrides [`widget_type`](Widget::widget_type), lists
/// the hooks it implements in [`capabilities`](Widget::capabilities), and
/// overrides those hooks. Hooks left out of the capability set are never
/// called.
///
/// ```
/// use formkit::widget::{CapabilitySet, Widget, WidgetBase, WidgetType};
///
/// struct UserName {
///     base: WidgetBase,
///     value: String,
/// }
///
/// impl Widget for UserName {
///     fn base(&self) -> &WidgetBase { &self.base }
///     fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///     fn widget_type(&self) -> Option<WidgetType> { Some(WidgetType::InputField) }
///     fn capabilities(&self) -> CapabilitySet { CapabilitySet::LABEL | CapabilitySet::VALIDATE }
///     fn label(&self) -> String { "User name".into() }
///     fn validate(&mut self) -> bool { !self.value.is_empty() }
/// }
/// ```
pub trait Widget: 'static {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Widget type tag. A widget returning `None` cannot be put in a dialog.
    fn widget_type(&self) -> Option<WidgetType> {
        None
    }

    /// Hooks this widget implements.
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::empty()
    }

    /// Short name of the concrete type, used for the default identity.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Identity within the dialog: the explicit override if one was set,
    /// else derived from the concrete type name.
    fn widget_id(&self) -> String {
        match self.base().widget_id() {
            Some(id) => id.to_string(),
            None => short_type_name(self.type_name()),
        }
    }

    /// Whether `handle` should see events of every widget, not only its own.
    fn handle_all_events(&self) -> bool {
        self.base().handle_all_events()
    }

    /// Whether `event` was emitted by this widget.
    fn my_event(&self, event: &Event) -> bool {
        self.widget_id() == event.id
    }

    fn label(&self) -> String {
        String::new()
    }

    /// Help text for the widget. May be asked for again after
    /// [`WidgetBase::refresh_help`].
    fn help(&self) -> String {
        String::new()
    }

    fn opt(&self) -> Vec<WidgetOption> {
        Vec::new()
    }

    /// Set the initial value, typically from persistent storage.
    fn init(&mut self) {}

    /// React to an event addressed to this widget.
    fn handle_self(&mut self) -> Option<Action> {
        None
    }

    /// React to an event, inspecting its payload. Used with
    /// `handle_all_events` or by widgets emitting several kinds of events.
    fn handle_event(&mut self, _event: &Event) -> Option<Action> {
        None
    }

    /// Returning `false` keeps the dialog open.
    fn validate(&mut self) -> bool {
        true
    }

    /// Store the widget value for further processing.
    fn store(&mut self) {}

    fn cleanup(&mut self) {}
}

/// Widgets are shared between the application and the adapted callbacks.
pub type WidgetRef = Rc<RefCell<dyn Widget>>;

/// Wrap a widget so it can be placed in a dialog.
pub fn shared<W: Widget>(widget: W) -> WidgetRef {
    Rc::new(RefCell::new(widget))
}

/// Strip module paths from a `std::any::type_name` string, generics included:
/// `app::forms::Picker<alloc::string::String>` becomes `Picker<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(last_path_segment(&segment));
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
