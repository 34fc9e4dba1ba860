//! Wrappers giving widget hooks the fixed signatures the host calls.
//!
//! The host always passes the widget identity, and for `handle`, `validate`
//! and `store` also the event. Widgets already know who they are, so the
//! identity is dropped here; only `handle_event` gets to see the event.
//! Each wrapper is created once per descriptor build and reused for every
//! call during the dialog run.

use super::capability::HandleForm;
use super::event::{Action, Event};
use super::WidgetRef;
use std::fmt;
use std::rc::Rc;

pub type InitFn = Rc<dyn Fn(&str)>;
pub type HandleFn = Rc<dyn Fn(&str, &Event) -> Option<Action>>;
pub type ValidateFn = Rc<dyn Fn(&str, &Event) -> bool>;
pub type StoreFn = Rc<dyn Fn(&str, &Event)>;
pub type CleanupFn = Rc<dyn Fn(&str)>;
pub type HelpFn = Rc<dyn Fn(&str) -> String>;

/// A widget hook behind a host-callable signature.
#[derive(Clone)]
pub enum AdaptedCallback {
    Init(InitFn),
    Handle(HandleFn),
    Validate(ValidateFn),
    Store(StoreFn),
    Cleanup(CleanupFn),
    Help(HelpFn),
}

impl AdaptedCallback {
    /// Signature as the host declares it.
    pub fn signature(&self) -> &'static str {
        match self {
            AdaptedCallback::Init(_) => "void (string)",
            AdaptedCallback::Handle(_) => "symbol (string, map)",
            AdaptedCallback::Validate(_) => "boolean (string, map)",
            AdaptedCallback::Store(_) => "void (string, map)",
            AdaptedCallback::Cleanup(_) => "void (string)",
            AdaptedCallback::Help(_) => "string (string)",
        }
    }
}

impl fmt::Debug for AdaptedCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdaptedCallback({})", self.signature())
    }
}

pub fn adapt_init(widget: &WidgetRef) -> AdaptedCallback {
    let widget = Rc::clone(widget);
    AdaptedCallback::Init(Rc::new(move |_id: &str| widget.borrow_mut().init()))
}

/// The call form is fixed here, at wrap time, so dispatch never has to ask
/// the widget which `handle` it implements.
pub fn adapt_handle(widget: &WidgetRef, form: HandleForm) -> AdaptedCallback {
    let widget = Rc::clone(widget);
    let handle: HandleFn = match form {
        HandleForm::SelfOnly => Rc::new(move |_id: &str, _event: &Event| widget.borrow_mut().handle_self()),
        HandleForm::WithEvent => Rc::new(move |_id: &str, event: &Event| widget.borrow_mut().handle_event(event)),
    };
    AdaptedCallback::Handle(handle)
}

pub fn adapt_validate(widget: &WidgetRef) -> AdaptedCallback {
    let widget = Rc::clone(widget);
    AdaptedCallback::Validate(Rc::new(move |_id: &str, _event: &Event| widget.borrow_mut().validate()))
}

pub fn adapt_store(widget: &WidgetRef) -> AdaptedCallback {
    let widget = Rc::clone(widget);
    AdaptedCallback::Store(Rc::new(move |_id: &str, _event: &Event| widget.borrow_mut().store()))
}

pub fn adapt_cleanup(widget: &WidgetRef) -> AdaptedCallback {
    let widget = Rc::clone(widget);
    AdaptedCallback::Cleanup(Rc::new(move |_id: &str| widget.borrow_mut().cleanup()))
}

pub fn adapt_help(widget: &WidgetRef) -> AdaptedCallback {
    let widget = Rc::clone(widget);
    AdaptedCallback::Help(Rc::new(move |_id: &str| widget.borrow().help()))
}
