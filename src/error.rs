//! Error types shared by the descriptor builder and the dialog runner.

use crate::host::HostError;

/// Fatal problems in how widgets are declared. These surface while the
/// descriptors are being built, before the host ever shows a dialog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Widget '{widget}' does not set its widget type")]
    MissingWidgetType { widget: String },

    #[error("Widget '{widget}' declares both handle_self and handle_event")]
    AmbiguousHandle { widget: String },

    #[error("Widget identity '{0}' is used more than once in the dialog")]
    DuplicateIdentity(String),

    #[error("Widget '{0}' is already bound to a running dialog")]
    AlreadyBound(String),

    #[error("A widget of the dialog is busy running one of its own hooks")]
    WidgetBusy,

    #[error("Widget identity '{0}' is reserved for a dialog button")]
    ReservedIdentity(String),
}

/// Anything that can stop a dialog run.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),
}
