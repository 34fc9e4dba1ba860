//! Delivery of host events to `handle` hooks.

use crate::widget::adapter::HandleFn;
use crate::widget::descriptor::WidgetDescriptor;
use crate::widget::event::{Action, Event};
use serde::Serialize;

/// Which events a widget's `handle` gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFilter {
    /// Every event of the dialog.
    All,
    /// Only events whose id is listed.
    Only(Vec<String>),
}

impl EventFilter {
    pub fn accepts(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(ids) => ids.iter().any(|id| *id == event.id),
        }
    }
}

struct Route {
    id: String,
    filter: EventFilter,
    handle: HandleFn,
}

/// Routing table built from one dialog's descriptors. Widgets without a
/// `handle` hook are not part of it.
pub struct EventRouter {
    routes: Vec<Route>,
}

impl EventRouter {
    pub fn new(descriptors: &[WidgetDescriptor]) -> Self {
        let routes = descriptors
            .iter()
            .filter_map(|descriptor| {
                descriptor.handle().map(|handle| Route {
                    id: descriptor.id().to_string(),
                    filter: descriptor.event_filter(),
                    handle: handle.clone(),
                })
            })
            .collect();
        Self { routes }
    }

    /// Identities whose `handle` would receive `event`, in dialog order.
    pub fn recipients(&self, event: &Event) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|route| route.filter.accepts(event))
            .map(|route| route.id.as_str())
            .collect()
    }

    /// Call every accepting `handle` hook in dialog order. The first action
    /// returned is the result; later widgets still see the event.
    pub fn dispatch(&self, event: &Event) -> Option<Action> {
        let mut result = None;
        for route in self.routes.iter().filter(|route| route.filter.accepts(event)) {
            log::trace!("Routing event '{}' to '{}'", event.id, route.id);
            if let Some(action) = (route.handle)(&route.id, event) {
                log::debug!("Widget '{}' returned action '{}'", route.id, action);
                result.get_or_insert(action);
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
