use formkit::host::{HostError, MemoryHost, WidgetHost};
use formkit::widget::{WidgetBase, WidgetState};
use serde_json::json;
use std::rc::Rc;

fn state(id: &str) -> (Rc<MemoryHost>, WidgetState) {
    let host = Rc::new(MemoryHost::with_widgets(["w", "other"]));
    let state = WidgetState::new(id, host.clone());
    (host, state)
}

#[test]
fn test_enable_then_disable_reports_disabled() {
    let (_host, state) = state("w");
    state.enable().unwrap();
    state.disable().unwrap();
    assert!(!state.is_enabled().unwrap());
}

#[test]
fn test_disable_then_enable_reports_enabled() {
    let (_host, state) = state("w");
    state.disable().unwrap();
    state.enable().unwrap();
    assert!(state.is_enabled().unwrap());
}

#[test]
fn test_state_is_per_identity() {
    let (host, state) = state("w");
    state.disable().unwrap();
    assert!(host.is_enabled("other").unwrap());
    assert!(!host.is_enabled("w").unwrap());
}

#[test]
fn test_focus_and_value_pass_through() {
    let (host, state) = state("w");
    state.focus().unwrap();
    assert_eq!(host.focused().as_deref(), Some("w"));

    state.set_value(json!("alice")).unwrap();
    assert_eq!(state.value().unwrap(), json!("alice"));
    assert_eq!(host.value("w").unwrap(), json!("alice"));
}

#[test]
fn test_unknown_identity_surfaces_host_error() {
    let (_host, state) = state("missing");
    assert_eq!(state.is_enabled(), Err(HostError::UnknownWidget("missing".to_string())));
    assert_eq!(state.enable(), Err(HostError::UnknownWidget("missing".to_string())));
    assert_eq!(state.focus(), Err(HostError::UnknownWidget("missing".to_string())));
}

#[test]
fn test_unbound_base_is_detached() {
    let base = WidgetBase::with_id("w");
    assert!(!base.is_bound());
    assert_eq!(base.is_enabled(), Err(HostError::Detached("w".to_string())));
    assert_eq!(base.refresh_help(), Err(HostError::Detached("w".to_string())));
}

#[test]
fn test_unbound_base_without_identity_is_named_in_error() {
    let base = WidgetBase::new();
    assert_eq!(
        base.focus(),
        Err(HostError::Detached("<unnamed widget>".to_string()))
    );
}
