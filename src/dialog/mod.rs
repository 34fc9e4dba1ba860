//! Running a dialog: descriptors in, lifecycle hooks driven by host events.
//!
//! One [`Dialog::run`] takes every widget through
//! `init → (handle → validate)* → store → cleanup`. `init`, `store` and
//! `cleanup` run at most once; the event loop repeats until a `handle`
//! hook or a dialog button yields an action that passes validation, or an
//! action that skips it (`back`, `abort`, `cancel`).

use crate::constants::HELP_SEPARATOR;
use crate::error::{ConfigError, DialogError};
use crate::host::{HostError, HostHandle};
use crate::widget::descriptor::{build_descriptor, WidgetDescriptor};
use crate::widget::event::{Action, Event};
use crate::widget::state::{Binding, WidgetState};
use crate::widget::WidgetRef;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

pub mod router;

pub use router::{EventFilter, EventRouter};

/// How a dialog run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOutcome {
    pub action: Action,
    /// Number of times the widgets were validated, rejected rounds included.
    pub validation_rounds: usize,
}

/// A set of widgets shown together.
#[derive(Default)]
pub struct Dialog {
    widgets: Vec<WidgetRef>,
}

impl Dialog {
    pub fn new(widgets: Vec<WidgetRef>) -> Self {
        Self { widgets }
    }

    pub fn push(&mut self, widget: WidgetRef) {
        self.widgets.push(widget);
    }

    pub fn widgets(&self) -> &[WidgetRef] {
        &self.widgets
    }

    /// Build one descriptor per widget, in order. Identities must be unique
    /// and must not collide with a dialog button id.
    pub fn descriptors(&self) -> Result<Vec<WidgetDescriptor>, ConfigError> {
        let mut seen = HashSet::new();
        let mut descriptors = Vec::with_capacity(self.widgets.len());
        for widget in &self.widgets {
            let descriptor = build_descriptor(widget)?;
            if Action::from_event_id(descriptor.id()).is_some() {
                return Err(ConfigError::ReservedIdentity(descriptor.id().to_string()));
            }
            if !seen.insert(descriptor.id().to_string()) {
                return Err(ConfigError::DuplicateIdentity(descriptor.id().to_string()));
            }
            descriptors.push(descriptor);
        }
        Ok(descriptors)
    }

    /// Show the dialog on `host` and drive it until it is left.
    ///
    /// Configuration errors abort before the host is touched. Host errors
    /// are returned as-is; once `init` has run, `cleanup` hooks still run,
    /// and the host dialog is always closed.
    pub fn run(&self, host: HostHandle) -> Result<DialogOutcome, DialogError> {
        let descriptors = self.descriptors()?;
        let help_stale = Rc::new(Cell::new(false));
        self.bind(&descriptors, &host, &help_stale)?;

        log::info!("Opening dialog with {} widgets", descriptors.len());
        let result = run_bound(&descriptors, &host, &help_stale);
        self.unbind();

        if let Ok(outcome) = &result {
            log::info!(
                "Dialog finished with '{}' after {} validation round(s)",
                outcome.action,
                outcome.validation_rounds
            );
        }
        result
    }

    fn bind(
        &self,
        descriptors: &[WidgetDescriptor],
        host: &HostHandle,
        help_stale: &Rc<Cell<bool>>,
    ) -> Result<(), ConfigError> {
        for (widget, descriptor) in self.widgets.iter().zip(descriptors) {
            let bound = widget
                .try_borrow()
                .map(|widget| widget.base().is_bound())
                .unwrap_or(true);
            if bound {
                return Err(ConfigError::AlreadyBound(descriptor.id().to_string()));
            }
        }
        for (widget, descriptor) in self.widgets.iter().zip(descriptors) {
            widget.borrow_mut().base_mut().bind(Binding {
                state: WidgetState::new(descriptor.id(), Rc::clone(host)),
                help_stale: Rc::clone(help_stale),
            });
        }
        Ok(())
    }

    fn unbind(&self) {
        for widget in &self.widgets {
            widget.borrow_mut().base_mut().unbind();
        }
    }
}

fn run_bound(
    descriptors: &[WidgetDescriptor],
    host: &HostHandle,
    help_stale: &Cell<bool>,
) -> Result<DialogOutcome, DialogError> {
    host.open_dialog(descriptors)?;
    let result = host
        .set_help(&collect_help(descriptors))
        .and_then(|()| run_initialized(descriptors, host, help_stale));
    let closed = host.close_dialog();

    let outcome = result?;
    closed?;
    Ok(outcome)
}

/// `init` every widget, run the event loop, then `cleanup` whatever the
/// loop ended with.
fn run_initialized(
    descriptors: &[WidgetDescriptor],
    host: &HostHandle,
    help_stale: &Cell<bool>,
) -> Result<DialogOutcome, HostError> {
    for descriptor in descriptors {
        if let Some(init) = descriptor.init() {
            init(descriptor.id());
        }
    }
    let result = event_loop(descriptors, host, help_stale);

    for descriptor in descriptors {
        if let Some(cleanup) = descriptor.cleanup() {
            cleanup(descriptor.id());
        }
    }
    result
}

fn event_loop(
    descriptors: &[WidgetDescriptor],
    host: &HostHandle,
    help_stale: &Cell<bool>,
) -> Result<DialogOutcome, HostError> {
    refresh_help_if_stale(descriptors, host, help_stale)?;

    let router = EventRouter::new(descriptors);
    let mut validation_rounds = 0;

    loop {
        let event = host.user_input()?;
        log::debug!("Received event '{}'", event.id);

        let action = router.dispatch(&event).or_else(|| Action::from_event_id(&event.id));
        refresh_help_if_stale(descriptors, host, help_stale)?;

        let Some(action) = action else {
            continue;
        };

        if !action.needs_validation() {
            return Ok(DialogOutcome {
                action,
                validation_rounds,
            });
        }

        validation_rounds += 1;
        if !validate_all(descriptors, &event) {
            refresh_help_if_stale(descriptors, host, help_stale)?;
            continue;
        }

        for descriptor in descriptors {
            if let Some(store) = descriptor.store() {
                store(descriptor.id(), &event);
            }
        }
        return Ok(DialogOutcome {
            action,
            validation_rounds,
        });
    }
}

/// Validate in dialog order, stopping at the first widget that rejects.
fn validate_all(descriptors: &[WidgetDescriptor], event: &Event) -> bool {
    for descriptor in descriptors {
        if let Some(validate) = descriptor.validate() {
            if !validate(descriptor.id(), event) {
                log::info!("Validation of '{}' failed", descriptor.id());
                return false;
            }
        }
    }
    true
}

/// Concatenated help of every widget that has some.
pub fn collect_help(descriptors: &[WidgetDescriptor]) -> String {
    descriptors
        .iter()
        .filter_map(|descriptor| descriptor.help().map(|help| help(descriptor.id())))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(HELP_SEPARATOR)
}

fn refresh_help_if_stale(
    descriptors: &[WidgetDescriptor],
    host: &HostHandle,
    help_stale: &Cell<bool>,
) -> Result<(), HostError> {
    if help_stale.replace(false) {
        log::debug!("Refreshing dialog help");
        host.set_help(&collect_help(descriptors))?;
    }
    Ok(())
}
