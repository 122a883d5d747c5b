use std::fmt;
use std::sync::Arc;

use crate::component::{ComponentContainer, DynService};

/// Settings accepted by [`initialize_module`](crate::module::initialize_module).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleSettings {
    /// Registry name of the module. Defaults to
    /// [`DEFAULT_MODULE_NAME`](crate::module::DEFAULT_MODULE_NAME).
    pub name: Option<String>,
}

/// Handle to one named module instance and its component container.
///
/// Clones share the same underlying module; equality is handle identity.
#[derive(Clone)]
pub struct AnalyticsModule {
    inner: Arc<ModuleInner>,
}

struct ModuleInner {
    name: Arc<str>,
    container: ComponentContainer,
}

impl AnalyticsModule {
    pub(crate) fn new(name: impl Into<Arc<str>>, container: ComponentContainer) -> Self {
        let module = AnalyticsModule {
            inner: Arc::new(ModuleInner {
                name: name.into(),
                container,
            }),
        };
        // Factories reach the owning module through the container.
        let root: DynService = Arc::new(module.clone());
        module.inner.container.attach_root_service(root);
        module
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn container(&self) -> &ComponentContainer {
        &self.inner.container
    }
}

impl PartialEq for AnalyticsModule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for AnalyticsModule {}

impl fmt::Debug for AnalyticsModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsModule")
            .field("name", &self.inner.name)
            .finish()
    }
}
