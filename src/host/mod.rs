//! The host dialog engine seen from the widget side.
//!
//! The core never talks to a concrete UI toolkit. Everything it needs from
//! the engine that renders descriptors and owns the live widget table goes
//! through [`WidgetHost`], which is injected when a dialog is opened.

use crate::widget::descriptor::WidgetDescriptor;
use crate::widget::event::Event;
use serde_json::Value;
use std::rc::Rc;

pub mod memory;
pub mod terminal;

pub use memory::{MemoryHost, UserInput};
pub use terminal::TerminalHost;

/// Failures reported by the host. The core passes them through untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),

    #[error("Widget '{0}' is not attached to an open dialog")]
    Detached(String),

    #[error("No dialog is open")]
    NoDialog,

    #[error("Event queue exhausted")]
    InputClosed,

    #[error("Host I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err.to_string())
    }
}

/// Host-held presentation state and the event source of one dialog.
///
/// All methods take `&self`: the dialog loop is single threaded and hosts
/// keep their widget table behind interior mutability, so widget hooks can
/// query and change state while the loop is dispatching to them.
pub trait WidgetHost {
    /// Show a dialog built from `descriptors`, in order.
    fn open_dialog(&self, descriptors: &[WidgetDescriptor]) -> Result<(), HostError>;

    fn close_dialog(&self) -> Result<(), HostError>;

    /// Block until the next user interaction.
    fn user_input(&self) -> Result<Event, HostError>;

    fn is_enabled(&self, id: &str) -> Result<bool, HostError>;

    fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), HostError>;

    fn set_focus(&self, id: &str) -> Result<(), HostError>;

    fn value(&self, id: &str) -> Result<Value, HostError>;

    fn set_value(&self, id: &str, value: Value) -> Result<(), HostError>;

    /// Replace the help text shown alongside the dialog.
    fn set_help(&self, text: &str) -> Result<(), HostError>;
}

/// Shared handle widgets keep to reach their host.
pub type HostHandle = Rc<dyn WidgetHost>;
