use crate::common::{call_log, Recorder};
use formkit::host::{HostError, MemoryHost, UserInput, WidgetHost};
use formkit::widget::descriptor::WidgetDescriptor;
use formkit::widget::{Action, CapabilitySet, Event, Widget, WidgetBase, WidgetRef, WidgetType};
use formkit::{ConfigError, Dialog, DialogError};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

const ALL_HOOKS: CapabilitySet = CapabilitySet::INIT
    .union(CapabilitySet::HANDLE_SELF)
    .union(CapabilitySet::VALIDATE)
    .union(CapabilitySet::STORE)
    .union(CapabilitySet::CLEANUP);

#[test]
fn test_full_lifecycle_order() {
    let calls = call_log();
    let dialog = Dialog::new(vec![
        Recorder::new("a", ALL_HOOKS).logging_to(&calls).shared(),
        Recorder::new("b", ALL_HOOKS).logging_to(&calls).shared(),
    ]);
    let host = Rc::new(MemoryHost::new().with_events([Event::new("a"), Event::new("next")]));

    let outcome = dialog.run(host.clone()).unwrap();

    assert_eq!(outcome.action, Action::Next);
    assert_eq!(outcome.validation_rounds, 1);
    assert_eq!(
        *calls.borrow(),
        vec![
            "a:init",
            "b:init",
            "a:handle_self",
            "a:validate",
            "b:validate",
            "a:store",
            "b:store",
            "a:cleanup",
            "b:cleanup",
        ]
    );
    assert!(!host.is_open());
    assert_eq!(host.opened(), 1);
}

#[test]
fn test_rejected_validation_keeps_dialog_open() {
    let recorder = Rc::new(RefCell::new(
        Recorder::new("form", CapabilitySet::VALIDATE | CapabilitySet::STORE).validations([false, false, false, true]),
    ));
    let widget: WidgetRef = recorder.clone();
    let dialog = Dialog::new(vec![widget]);
    let host = Rc::new(MemoryHost::new().with_events((0..4).map(|_| Event::new("next"))));

    let outcome = dialog.run(host.clone()).unwrap();

    assert_eq!(outcome.validation_rounds, 4);
    assert_eq!(
        recorder.borrow().calls(),
        vec![
            "form:validate",
            "form:validate",
            "form:validate",
            "form:validate",
            "form:store"
        ]
    );
    assert_eq!(host.pending_input(), 0);
}

#[test]
fn test_failed_validation_stops_at_first_rejecting_widget() {
    let calls = call_log();
    let dialog = Dialog::new(vec![
        Recorder::new("a", CapabilitySet::VALIDATE)
            .validations([false])
            .logging_to(&calls)
            .shared(),
        Recorder::new("b", CapabilitySet::VALIDATE).logging_to(&calls).shared(),
    ]);
    let host = Rc::new(MemoryHost::new().with_events([Event::new("next"), Event::new("next")]));

    dialog.run(host.clone()).unwrap();

    assert_eq!(*calls.borrow(), vec!["a:validate", "a:validate", "b:validate"]);
    assert_eq!(host.focused().as_deref(), Some("a"));
}

#[test]
fn test_abort_skips_validation_and_store() {
    let calls = call_log();
    let dialog = Dialog::new(vec![Recorder::new("a", ALL_HOOKS).logging_to(&calls).shared()]);
    let host = Rc::new(MemoryHost::new().with_events([Event::new("abort")]));

    let outcome = dialog.run(host).unwrap();

    assert_eq!(outcome.action, Action::Abort);
    assert_eq!(outcome.validation_rounds, 0);
    assert_eq!(*calls.borrow(), vec!["a:init", "a:cleanup"]);
}

#[test]
fn test_handle_action_ends_the_loop() {
    let calls = call_log();
    let dialog = Dialog::new(vec![Recorder::new("finish", ALL_HOOKS)
        .returning(Action::Custom("finish".into()))
        .logging_to(&calls)
        .shared()]);
    let host = Rc::new(MemoryHost::new().with_events([Event::new("elsewhere"), Event::new("finish")]));

    let outcome = dialog.run(host).unwrap();

    assert_eq!(outcome.action, Action::Custom("finish".into()));
    assert_eq!(
        *calls.borrow(),
        vec![
            "finish:init",
            "finish:handle_self",
            "finish:validate",
            "finish:store",
            "finish:cleanup"
        ]
    );
}

#[test]
fn test_config_error_aborts_before_host_is_touched() {
    let dialog = Dialog::new(vec![
        Recorder::new("first", CapabilitySet::INIT).shared(),
        Recorder::new("broken", CapabilitySet::INIT).untyped().shared(),
    ]);
    let host = Rc::new(MemoryHost::new().with_events([Event::new("next")]));

    let result = dialog.run(host.clone());

    assert!(matches!(
        result,
        Err(DialogError::Config(ConfigError::MissingWidgetType { .. }))
    ));
    assert_eq!(host.opened(), 0);
    assert_eq!(host.pending_input(), 1);
}

#[test]
fn test_duplicate_identity_is_rejected() {
    let dialog = Dialog::new(vec![
        Recorder::new("same", CapabilitySet::LABEL).shared(),
        Recorder::new("same", CapabilitySet::HELP).shared(),
    ]);
    assert!(matches!(
        dialog.descriptors(),
        Err(ConfigError::DuplicateIdentity(id)) if id == "same"
    ));
}

#[test]
fn test_host_error_propagates_after_cleanup() {
    let calls = call_log();
    let recorder = Rc::new(RefCell::new(Recorder::new("a", ALL_HOOKS).logging_to(&calls)));
    let widget: WidgetRef = recorder.clone();
    let dialog = Dialog::new(vec![widget]);
    let host = Rc::new(MemoryHost::new());

    let result = dialog.run(host.clone());

    assert!(matches!(result, Err(DialogError::Host(HostError::InputClosed))));
    assert_eq!(*calls.borrow(), vec!["a:init", "a:cleanup"]);
    assert!(!host.is_open());
    assert!(!recorder.borrow().base().is_bound());
}

#[test]
fn test_widget_can_run_in_consecutive_dialogs() {
    let calls = call_log();
    let widget = Recorder::new("a", CapabilitySet::INIT).logging_to(&calls).shared();
    let dialog = Dialog::new(vec![widget]);

    for _ in 0..2 {
        let host = Rc::new(MemoryHost::new().with_events([Event::new("next")]));
        dialog.run(host).unwrap();
    }
    assert_eq!(*calls.borrow(), vec!["a:init", "a:init"]);
}

/// Widget starting a nested dialog over widgets it does not own.
struct Nested {
    base: WidgetBase,
    inner: Dialog,
    result: Option<Result<(), String>>,
}

impl Widget for Nested {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::PushButton)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::INIT
    }

    fn init(&mut self) {
        let host = Rc::new(MemoryHost::new().with_events([Event::new("next")]));
        self.result = Some(self.inner.run(host).map(|_| ()).map_err(|err| err.to_string()));
    }
}

#[test]
fn test_widget_bound_to_running_dialog_cannot_join_another() {
    let shared_widget = Recorder::new("shared", CapabilitySet::LABEL).shared();
    let nested = Rc::new(RefCell::new(Nested {
        base: WidgetBase::with_id("nested"),
        inner: Dialog::new(vec![shared_widget.clone()]),
        result: None,
    }));
    let nested_ref: WidgetRef = nested.clone();
    let outer = Dialog::new(vec![shared_widget, nested_ref]);

    outer
        .run(Rc::new(MemoryHost::new().with_events([Event::new("next")])))
        .unwrap();

    assert_eq!(
        nested.borrow().result,
        Some(Err(ConfigError::AlreadyBound("shared".to_string()).to_string()))
    );
}

/// Widget whose `init` tries to run a dialog containing itself.
struct SelfNesting {
    base: WidgetBase,
    me: Option<WidgetRef>,
    result: Option<Result<(), String>>,
}

impl Widget for SelfNesting {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::PushButton)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::INIT
    }

    fn init(&mut self) {
        let Some(me) = self.me.take() else {
            return;
        };
        let host = Rc::new(MemoryHost::new().with_events([Event::new("next")]));
        let inner = Dialog::new(vec![me]);
        self.result = Some(inner.run(host).map(|_| ()).map_err(|err| err.to_string()));
    }
}

#[test]
fn test_widget_cannot_join_a_dialog_started_from_its_own_hook() {
    let widget = Rc::new(RefCell::new(SelfNesting {
        base: WidgetBase::with_id("nesting"),
        me: None,
        result: None,
    }));
    let widget_ref: WidgetRef = widget.clone();
    widget.borrow_mut().me = Some(widget_ref.clone());
    let outer = Dialog::new(vec![widget_ref]);

    let outcome = outer
        .run(Rc::new(MemoryHost::new().with_events([Event::new("next")])))
        .unwrap();

    assert_eq!(outcome.action, Action::Next);
    assert_eq!(
        widget.borrow().result,
        Some(Err(ConfigError::WidgetBusy.to_string()))
    );
    assert!(!widget.borrow().base().is_bound());
}

/// Memory host that cannot show help.
struct NoHelpHost {
    inner: MemoryHost,
}

impl WidgetHost for NoHelpHost {
    fn open_dialog(&self, descriptors: &[WidgetDescriptor]) -> Result<(), HostError> {
        self.inner.open_dialog(descriptors)
    }

    fn close_dialog(&self) -> Result<(), HostError> {
        self.inner.close_dialog()
    }

    fn user_input(&self) -> Result<Event, HostError> {
        self.inner.user_input()
    }

    fn is_enabled(&self, id: &str) -> Result<bool, HostError> {
        self.inner.is_enabled(id)
    }

    fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), HostError> {
        self.inner.set_enabled(id, enabled)
    }

    fn set_focus(&self, id: &str) -> Result<(), HostError> {
        self.inner.set_focus(id)
    }

    fn value(&self, id: &str) -> Result<serde_json::Value, HostError> {
        self.inner.value(id)
    }

    fn set_value(&self, id: &str, value: serde_json::Value) -> Result<(), HostError> {
        self.inner.set_value(id, value)
    }

    fn set_help(&self, _text: &str) -> Result<(), HostError> {
        Err(HostError::Io("help".to_string()))
    }
}

#[test]
fn test_no_cleanup_when_dialog_fails_before_init() {
    let calls = call_log();
    let dialog = Dialog::new(vec![Recorder::new("a", ALL_HOOKS).logging_to(&calls).shared()]);
    let host = Rc::new(NoHelpHost {
        inner: MemoryHost::new().with_events([Event::new("next")]),
    });

    let result = dialog.run(host.clone());

    assert!(matches!(
        result,
        Err(DialogError::Host(HostError::Io(ref msg))) if msg == "help"
    ));
    assert!(calls.borrow().is_empty());
    assert!(!host.inner.is_open());
}

#[test]
fn test_button_ids_are_reserved() {
    for id in ["next", "back", "abort", "cancel", "ok", "accept"] {
        let dialog = Dialog::new(vec![Recorder::new(id, CapabilitySet::LABEL).shared()]);
        let host = Rc::new(MemoryHost::new().with_events([Event::new("next")]));

        let result = dialog.run(host.clone());

        assert!(matches!(
            result,
            Err(DialogError::Config(ConfigError::ReservedIdentity(ref reserved))) if reserved == id
        ));
        assert_eq!(host.opened(), 0);
    }
}

#[test]
fn test_detached_error_names_type_derived_identity() {
    let recorder = Rc::new(RefCell::new(Recorder::anonymous(CapabilitySet::INIT)));
    let widget: WidgetRef = recorder.clone();
    let dialog = Dialog::new(vec![widget]);

    dialog
        .run(Rc::new(MemoryHost::new().with_events([Event::new("next")])))
        .unwrap();

    assert_eq!(
        recorder.borrow().base().focus(),
        Err(HostError::Detached("Recorder".to_string()))
    );
}

/// Widget whose help changes when it handles an event.
struct Counter {
    base: WidgetBase,
    clicks: usize,
}

impl Widget for Counter {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::PushButton)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::HELP | CapabilitySet::HANDLE_SELF
    }

    fn help(&self) -> String {
        format!("Clicked {} times", self.clicks)
    }

    fn handle_self(&mut self) -> Option<Action> {
        self.clicks += 1;
        self.base.refresh_help().ok();
        None
    }
}

#[test]
fn test_help_refresh_is_pushed_after_event() {
    let dialog = Dialog::new(vec![
        Rc::new(RefCell::new(Counter {
            base: WidgetBase::with_id("counter"),
            clicks: 0,
        })) as WidgetRef,
        Recorder::new("static", CapabilitySet::HELP).help_text("Static help").shared(),
    ]);
    let host = Rc::new(MemoryHost::new().with_events([Event::new("counter"), Event::new("counter"), Event::new("other")]));

    let error = dialog.run(host.clone()).unwrap_err();

    assert!(matches!(error, DialogError::Host(HostError::InputClosed)));
    assert_eq!(host.help(), "Clicked 2 times\n\nStatic help");
    assert_eq!(host.help_updates(), 3);
}

#[test]
fn test_hooks_see_host_state_during_run() {
    struct Mirror {
        base: WidgetBase,
        stored: Rc<RefCell<Option<serde_json::Value>>>,
    }

    impl Widget for Mirror {
        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn widget_type(&self) -> Option<WidgetType> {
            Some(WidgetType::InputField)
        }

        fn capabilities(&self) -> CapabilitySet {
            CapabilitySet::INIT | CapabilitySet::STORE
        }

        fn init(&mut self) {
            self.base.set_value("initial").unwrap();
        }

        fn store(&mut self) {
            *self.stored.borrow_mut() = self.base.value().ok();
        }
    }

    let stored = Rc::new(RefCell::new(None));
    let dialog = Dialog::new(vec![Rc::new(RefCell::new(Mirror {
        base: WidgetBase::with_id("mirror"),
        stored: stored.clone(),
    })) as WidgetRef]);
    let host = Rc::new(MemoryHost::new().with_input([
        UserInput::SetValue("mirror".into(), json!("typed")),
        UserInput::Event(Event::new("next")),
    ]));

    dialog.run(host).unwrap();

    assert_eq!(*stored.borrow(), Some(json!("typed")));
}
