use crate::common::{call_log, Recorder};
use formkit::dialog::EventRouter;
use formkit::widget::{Action, CapabilitySet, Event};
use formkit::Dialog;

#[test]
fn test_event_reaches_only_its_own_widget() {
    let calls = call_log();
    let dialog = Dialog::new(vec![
        Recorder::new("a", CapabilitySet::HANDLE_SELF).logging_to(&calls).shared(),
        Recorder::new("b", CapabilitySet::HANDLE_SELF).logging_to(&calls).shared(),
    ]);
    let descriptors = dialog.descriptors().unwrap();
    let router = EventRouter::new(&descriptors);

    assert_eq!(router.dispatch(&Event::new("a")), None);
    assert_eq!(*calls.borrow(), vec!["a:handle_self"]);
    assert_eq!(router.recipients(&Event::new("b")), vec!["b"]);
}

#[test]
fn test_foreign_events_never_reach_filtered_widget() {
    let calls = call_log();
    let dialog = Dialog::new(vec![Recorder::new("a", CapabilitySet::HANDLE_EVENT).logging_to(&calls).shared()]);
    let descriptors = dialog.descriptors().unwrap();
    let router = EventRouter::new(&descriptors);

    for id in ["b", "next", "A", ""] {
        router.dispatch(&Event::new(id));
    }
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_all_events_widget_sees_everything() {
    let calls = call_log();
    let dialog = Dialog::new(vec![
        Recorder::new("a", CapabilitySet::HANDLE_SELF).logging_to(&calls).shared(),
        Recorder::new("watcher", CapabilitySet::HANDLE_EVENT)
            .all_events()
            .logging_to(&calls)
            .shared(),
    ]);
    let descriptors = dialog.descriptors().unwrap();
    let router = EventRouter::new(&descriptors);

    router.dispatch(&Event::new("a"));
    router.dispatch(&Event::new("next"));

    assert_eq!(
        *calls.borrow(),
        vec!["a:handle_self", "watcher:handle_event(a)", "watcher:handle_event(next)"]
    );
}

#[test]
fn test_first_action_wins_but_later_widgets_still_see_event() {
    let calls = call_log();
    let dialog = Dialog::new(vec![
        Recorder::new("a", CapabilitySet::HANDLE_SELF)
            .returning(Action::Custom("first".into()))
            .logging_to(&calls)
            .shared(),
        Recorder::new("watcher", CapabilitySet::HANDLE_EVENT)
            .all_events()
            .returning(Action::Abort)
            .logging_to(&calls)
            .shared(),
    ]);
    let descriptors = dialog.descriptors().unwrap();
    let router = EventRouter::new(&descriptors);

    assert_eq!(router.dispatch(&Event::new("a")), Some(Action::Custom("first".into())));
    assert_eq!(*calls.borrow(), vec!["a:handle_self", "watcher:handle_event(a)"]);
}

#[test]
fn test_widgets_without_handle_are_not_routed() {
    let dialog = Dialog::new(vec![
        Recorder::new("plain", CapabilitySet::LABEL).shared(),
        Recorder::new("h", CapabilitySet::HANDLE_SELF).shared(),
    ]);
    let descriptors = dialog.descriptors().unwrap();
    let router = EventRouter::new(&descriptors);

    assert_eq!(router.len(), 1);
    assert!(router.recipients(&Event::new("plain")).is_empty());
}
