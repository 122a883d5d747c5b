use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, MutexGuard};

use crate::component::{self, Component, Provider};
use crate::module::logger::LOGGER;
use crate::module::types::AnalyticsModule;

static MODULES: LazyLock<Mutex<HashMap<String, AnalyticsModule>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

pub(crate) fn modules_guard() -> MutexGuard<'static, HashMap<String, AnalyticsModule>> {
    MODULES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Attaches `component` to `module`'s container. A component the container
/// already has is skipped with a debug log instead of an error, since the
/// same component is pushed to every module on registration.
pub(crate) fn add_component(module: &AnalyticsModule, component: &Component) {
    if let Err(error) = module.container().add_component(component.clone()) {
        LOGGER.debug(format!(
            "component {} was not added to module {}: {error}",
            component.name(),
            module.name()
        ));
    }
}

/// Registers `component` in the process-wide registry and attaches it to
/// every module that already exists. Modules created later pick it up during
/// initialization. Returns `false` if the name was already registered.
pub fn register_component(component: Component) -> bool {
    if !component::register_component(component.clone()) {
        LOGGER.debug(format!(
            "component {} is already registered",
            component.name()
        ));
        return false;
    }
    let modules = modules_guard();
    for module in modules.values() {
        add_component(module, &component);
    }
    true
}

/// Returns `module`'s provider for the component named `name`.
pub fn get_provider(module: &AnalyticsModule, name: &str) -> Provider {
    module.container().get_provider(name)
}
