//! Minimal dependency-injection framework the adapter is wired through.
//!
//! A [`Component`] describes how to build a named service. Each module owns a
//! [`ComponentContainer`] mapping component names to [`Provider`]s, and a
//! provider lazily builds and memoizes a single instance of its service.
//! Components registered through [`register_component`] land in a
//! process-wide registry and are attached to every container, present and
//! future, by the module layer.

mod component;
mod container;
mod provider;
mod types;

pub use component::Component;
pub use container::ComponentContainer;
pub use provider::Provider;
pub use types::{
    ComponentError, DynService, InstanceFactory, InstanceFactoryOptions, OnInstanceCreatedCallback,
};

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

static GLOBAL_COMPONENTS: LazyLock<Mutex<HashMap<Arc<str>, Component>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Process-wide registry of components, keyed by component name.
pub(crate) fn global_components() -> &'static Mutex<HashMap<Arc<str>, Component>> {
    &GLOBAL_COMPONENTS
}

/// Adds `component` to the process-wide registry.
///
/// Returns `false` without replacing anything when a component with the same
/// name is already registered.
pub fn register_component(component: Component) -> bool {
    let mut components = GLOBAL_COMPONENTS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if components.contains_key(component.name()) {
        return false;
    }
    components.insert(Arc::from(component.name()), component);
    true
}
