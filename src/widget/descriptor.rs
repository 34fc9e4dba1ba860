//! Declarative descriptor of one widget, as consumed by the host.
//!
//! The key names are the host's wire names and must not change.

use super::adapter::{
    adapt_cleanup, adapt_handle, adapt_help, adapt_init, adapt_store, adapt_validate, AdaptedCallback, CleanupFn,
    HandleFn, HelpFn, InitFn, StoreFn, ValidateFn,
};
use super::capability::{inspect, CapabilitySet};
use super::{WidgetOption, WidgetRef, WidgetType};
use crate::dialog::router::EventFilter;
use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

pub const KEY_ID: &str = "_cwm_key";
pub const KEY_HELP: &str = "help";
pub const KEY_NO_HELP: &str = "no_help";
pub const KEY_LABEL: &str = "label";
pub const KEY_OPT: &str = "opt";
pub const KEY_VALIDATE_FUNCTION: &str = "validate_function";
pub const KEY_VALIDATE_TYPE: &str = "validate_type";
pub const KEY_HANDLE_EVENTS: &str = "handle_events";
pub const KEY_INIT: &str = "init";
pub const KEY_HANDLE: &str = "handle";
pub const KEY_STORE: &str = "store";
pub const KEY_CLEANUP: &str = "cleanup";
pub const KEY_WIDGET: &str = "widget";

/// How the host should treat a `validate_function` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidateKind {
    /// Call it, rather than treating it as a static value.
    Function,
}

/// Value stored under a descriptor key.
#[derive(Debug, Clone)]
pub enum DescriptorValue {
    Text(String),
    /// Marker value, meaningful only by its key (`no_help`).
    Marker,
    Options(Vec<WidgetOption>),
    ValidateKind(ValidateKind),
    EventIds(Vec<String>),
    WidgetType(WidgetType),
    Callback(AdaptedCallback),
}

impl Serialize for DescriptorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DescriptorValue::Text(text) => serializer.serialize_str(text),
            DescriptorValue::Marker => serializer.serialize_str(""),
            DescriptorValue::Options(options) => options.serialize(serializer),
            DescriptorValue::ValidateKind(kind) => kind.serialize(serializer),
            DescriptorValue::EventIds(ids) => ids.serialize(serializer),
            DescriptorValue::WidgetType(widget_type) => widget_type.serialize(serializer),
            DescriptorValue::Callback(callback) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("callback", callback.signature())?;
                map.end()
            }
        }
    }
}

/// Ordered string-keyed description of one widget.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct WidgetDescriptor {
    entries: IndexMap<&'static str, DescriptorValue>,
}

impl WidgetDescriptor {
    fn insert(&mut self, key: &'static str, value: DescriptorValue) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&DescriptorValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id(&self) -> &str {
        match self.entries.get(KEY_ID) {
            Some(DescriptorValue::Text(id)) => id,
            _ => "",
        }
    }

    pub fn widget_type(&self) -> Option<&WidgetType> {
        match self.entries.get(KEY_WIDGET) {
            Some(DescriptorValue::WidgetType(widget_type)) => Some(widget_type),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self.entries.get(KEY_LABEL) {
            Some(DescriptorValue::Text(label)) => Some(label),
            _ => None,
        }
    }

    pub fn options(&self) -> &[WidgetOption] {
        match self.entries.get(KEY_OPT) {
            Some(DescriptorValue::Options(options)) => options,
            _ => &[],
        }
    }

    pub fn has_option(&self, option: &WidgetOption) -> bool {
        self.options().contains(option)
    }

    /// Routing scope: `All` when the `handle_events` filter is absent.
    pub fn event_filter(&self) -> EventFilter {
        match self.entries.get(KEY_HANDLE_EVENTS) {
            Some(DescriptorValue::EventIds(ids)) => EventFilter::Only(ids.clone()),
            _ => EventFilter::All,
        }
    }

    fn callback(&self, key: &str) -> Option<&AdaptedCallback> {
        match self.entries.get(key) {
            Some(DescriptorValue::Callback(callback)) => Some(callback),
            _ => None,
        }
    }

    pub fn help(&self) -> Option<&HelpFn> {
        match self.callback(KEY_HELP)? {
            AdaptedCallback::Help(help) => Some(help),
            _ => None,
        }
    }

    pub fn init(&self) -> Option<&InitFn> {
        match self.callback(KEY_INIT)? {
            AdaptedCallback::Init(init) => Some(init),
            _ => None,
        }
    }

    pub fn handle(&self) -> Option<&HandleFn> {
        match self.callback(KEY_HANDLE)? {
            AdaptedCallback::Handle(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn validate(&self) -> Option<&ValidateFn> {
        match self.callback(KEY_VALIDATE_FUNCTION)? {
            AdaptedCallback::Validate(validate) => Some(validate),
            _ => None,
        }
    }

    pub fn store(&self) -> Option<&StoreFn> {
        match self.callback(KEY_STORE)? {
            AdaptedCallback::Store(store) => Some(store),
            _ => None,
        }
    }

    pub fn cleanup(&self) -> Option<&CleanupFn> {
        match self.callback(KEY_CLEANUP)? {
            AdaptedCallback::Cleanup(cleanup) => Some(cleanup),
            _ => None,
        }
    }

    /// JSON rendering for logs and debugging; callbacks show their signature.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Build the descriptor for one widget.
///
/// Fails with a [`ConfigError`] when the widget has no widget type,
/// declares both forms of `handle`, or is in the middle of one of its hooks.
pub fn build_descriptor(widget: &WidgetRef) -> Result<WidgetDescriptor, ConfigError> {
    let (report, id, label, options, all_events) = {
        let w = widget.try_borrow().map_err(|_| ConfigError::WidgetBusy)?;
        let report = inspect(&*w)?;
        let label = report.has(CapabilitySet::LABEL).then(|| w.label());
        let options = report.has(CapabilitySet::OPT).then(|| w.opt());
        (report, w.widget_id(), label, options, w.handle_all_events())
    };

    let mut descriptor = WidgetDescriptor {
        entries: IndexMap::new(),
    };
    descriptor.insert(KEY_ID, DescriptorValue::Text(id.clone()));

    if report.has(CapabilitySet::HELP) {
        descriptor.insert(KEY_HELP, DescriptorValue::Callback(adapt_help(widget)));
    } else {
        descriptor.insert(KEY_NO_HELP, DescriptorValue::Marker);
    }
    if let Some(label) = label {
        descriptor.insert(KEY_LABEL, DescriptorValue::Text(label));
    }
    if let Some(options) = options {
        descriptor.insert(KEY_OPT, DescriptorValue::Options(options));
    }
    if report.has(CapabilitySet::VALIDATE) {
        descriptor.insert(KEY_VALIDATE_FUNCTION, DescriptorValue::Callback(adapt_validate(widget)));
        descriptor.insert(KEY_VALIDATE_TYPE, DescriptorValue::ValidateKind(ValidateKind::Function));
    }
    if !all_events {
        descriptor.insert(KEY_HANDLE_EVENTS, DescriptorValue::EventIds(vec![id.clone()]));
    }
    if report.has(CapabilitySet::INIT) {
        descriptor.insert(KEY_INIT, DescriptorValue::Callback(adapt_init(widget)));
    }
    if let Some(form) = report.handle {
        descriptor.insert(KEY_HANDLE, DescriptorValue::Callback(adapt_handle(widget, form)));
    }
    if report.has(CapabilitySet::STORE) {
        descriptor.insert(KEY_STORE, DescriptorValue::Callback(adapt_store(widget)));
    }
    if report.has(CapabilitySet::CLEANUP) {
        descriptor.insert(KEY_CLEANUP, DescriptorValue::Callback(adapt_cleanup(widget)));
    }
    descriptor.insert(KEY_WIDGET, DescriptorValue::WidgetType(report.widget_type));

    log::debug!("Built descriptor for '{}': {:?}", id, descriptor.keys().collect::<Vec<_>>());
    Ok(descriptor)
}
