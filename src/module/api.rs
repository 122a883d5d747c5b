use std::sync::Arc;

use crate::component::ComponentContainer;
use crate::logger::{self, LogLevel};
use crate::module::constants::DEFAULT_MODULE_NAME;
use crate::module::errors::{ModuleError, ModuleResult};
use crate::module::logger::LOGGER;
use crate::module::registry::{self, modules_guard};
use crate::module::types::{AnalyticsModule, ModuleSettings};

/// Creates the module named in `settings`, attaching every globally
/// registered component to its container.
///
/// Passing `None` (or settings without a name) targets
/// [`DEFAULT_MODULE_NAME`]. Initializing a name that already exists returns
/// the existing handle unchanged.
pub fn initialize_module(settings: Option<ModuleSettings>) -> ModuleResult<AnalyticsModule> {
    let settings = settings.unwrap_or_default();
    let name = match settings.name {
        Some(name) => {
            if name.trim().is_empty() {
                return Err(ModuleError::BadModuleName { name });
            }
            name
        }
        None => DEFAULT_MODULE_NAME.to_string(),
    };

    let mut modules = modules_guard();
    if let Some(existing) = modules.get(&name) {
        return Ok(existing.clone());
    }

    let container = ComponentContainer::new(name.as_str());
    let module = AnalyticsModule::new(Arc::<str>::from(name.as_str()), container);
    let components: Vec<_> = {
        let registered = crate::component::global_components()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        registered.values().cloned().collect()
    };
    for component in &components {
        registry::add_component(&module, component);
    }
    modules.insert(name.clone(), module.clone());
    LOGGER.debug(format!("module {name} initialized"));
    Ok(module)
}

/// Looks up a module created earlier. `None` targets [`DEFAULT_MODULE_NAME`].
pub fn get_module(name: Option<&str>) -> ModuleResult<AnalyticsModule> {
    let name = name.unwrap_or(DEFAULT_MODULE_NAME);
    let modules = modules_guard();
    modules
        .get(name)
        .cloned()
        .ok_or_else(|| ModuleError::NoModule {
            name: name.to_string(),
        })
}

/// All modules currently alive, in no particular order.
pub fn get_modules() -> Vec<AnalyticsModule> {
    modules_guard().values().cloned().collect()
}

/// Removes `module` from the registry and disposes its providers. The handle
/// keeps working as a plain value but the name becomes available again.
pub fn delete_module(module: &AnalyticsModule) -> ModuleResult<()> {
    let removed = {
        let mut modules = modules_guard();
        modules.remove(module.name())
    };
    match removed {
        Some(existing) => {
            for provider in existing.container().get_providers() {
                provider.delete();
            }
            existing.container().reset();
            LOGGER.debug(format!("module {} deleted", existing.name()));
            Ok(())
        }
        None => Err(ModuleError::NoModule {
            name: module.name().to_string(),
        }),
    }
}

/// Adjusts the log level of every logger in the crate.
pub fn set_log_level(level: LogLevel) {
    logger::set_log_level(level);
}
