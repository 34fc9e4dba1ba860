use crate::common::{call_log, Recorder};
use formkit::widget::adapter::AdaptedCallback;
use formkit::widget::descriptor::{build_descriptor, DescriptorValue};
use formkit::widget::{Action, CapabilitySet, Event, WidgetRef};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_handle_self_ignores_the_payload() {
    let calls = call_log();
    let widget = Recorder::new("a", CapabilitySet::HANDLE_SELF)
        .returning(Action::Next)
        .logging_to(&calls)
        .shared();
    let descriptor = build_descriptor(&widget).unwrap();
    let handle = descriptor.handle().unwrap();

    let event = Event::new("a").with("EventReason", "Activated");
    assert_eq!(handle("a", &event), Some(Action::Next));
    assert_eq!(*calls.borrow(), vec!["a:handle_self"]);
}

#[test]
fn test_handle_event_receives_the_payload_unchanged() {
    let recorder = Rc::new(RefCell::new(Recorder::new("a", CapabilitySet::HANDLE_EVENT)));
    let widget: WidgetRef = recorder.clone();
    let descriptor = build_descriptor(&widget).unwrap();

    let event = Event::new("a").with("EventReason", "ValueChanged").with("Value", json!([1, 2]));
    assert_eq!(descriptor.handle().unwrap()("a", &event), None);
    assert_eq!(recorder.borrow().last_event.as_ref(), Some(&event));
}

#[test]
fn test_identity_argument_is_not_passed_on() {
    let calls = call_log();
    let widget = Recorder::new("real_id", CapabilitySet::INIT | CapabilitySet::STORE | CapabilitySet::CLEANUP)
        .logging_to(&calls)
        .shared();
    let descriptor = build_descriptor(&widget).unwrap();
    let event = Event::new("whatever");

    descriptor.init().unwrap()("bogus");
    descriptor.store().unwrap()("bogus", &event);
    descriptor.cleanup().unwrap()("bogus");

    assert_eq!(*calls.borrow(), vec!["real_id:init", "real_id:store", "real_id:cleanup"]);
}

#[test]
fn test_validate_adapter_returns_widget_verdict() {
    let widget = Recorder::new("v", CapabilitySet::VALIDATE).validations([false, true]).shared();
    let descriptor = build_descriptor(&widget).unwrap();
    let validate = descriptor.validate().unwrap();
    let event = Event::new("next");

    assert!(!validate("v", &event));
    assert!(validate("v", &event));
}

#[test]
fn test_adapter_is_reused_across_calls() {
    let calls = call_log();
    let widget = Recorder::new("a", CapabilitySet::HANDLE_SELF).logging_to(&calls).shared();
    let descriptor = build_descriptor(&widget).unwrap();
    let first = descriptor.handle().unwrap().clone();

    for _ in 0..3 {
        first("a", &Event::new("a"));
    }
    assert!(Rc::ptr_eq(&first, descriptor.handle().unwrap()));
    assert_eq!(calls.borrow().len(), 3);
}

#[test]
fn test_callback_signatures() {
    let widget = Recorder::new(
        "sig",
        CapabilitySet::HELP
            | CapabilitySet::INIT
            | CapabilitySet::HANDLE_EVENT
            | CapabilitySet::VALIDATE
            | CapabilitySet::STORE
            | CapabilitySet::CLEANUP,
    )
    .shared();
    let descriptor = build_descriptor(&widget).unwrap();

    let signature = |key: &str| match descriptor.get(key) {
        Some(DescriptorValue::Callback(callback)) => callback.signature(),
        other => panic!("{} is not a callback: {:?}", key, other),
    };
    assert_eq!(signature("init"), "void (string)");
    assert_eq!(signature("handle"), "symbol (string, map)");
    assert_eq!(signature("validate_function"), "boolean (string, map)");
    assert_eq!(signature("store"), "void (string, map)");
    assert_eq!(signature("cleanup"), "void (string)");
    assert_eq!(signature("help"), "string (string)");
    assert!(matches!(descriptor.get("help"), Some(DescriptorValue::Callback(AdaptedCallback::Help(_)))));
}
