use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::component::component::Component;
use crate::component::provider::Provider;
use crate::component::types::{ComponentError, DynService};

/// Holds one [`Provider`] per component name for a single module instance.
///
/// Providers are created on demand: asking for an unknown name yields an
/// empty provider that starts producing instances once the matching
/// component arrives.
#[derive(Clone)]
pub struct ComponentContainer {
    inner: Arc<ComponentContainerInner>,
}

struct ComponentContainerInner {
    name: Arc<str>,
    providers: Mutex<HashMap<Arc<str>, Provider>>,
    root_service: Mutex<Option<DynService>>,
}

impl ComponentContainer {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        ComponentContainer {
            inner: Arc::new(ComponentContainerInner {
                name: name.into(),
                providers: Mutex::new(HashMap::new()),
                root_service: Mutex::new(None),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the provider for `name`, creating an empty one if needed.
    pub fn get_provider(&self, name: &str) -> Provider {
        let mut providers = self.inner.providers.lock().unwrap();
        if let Some(provider) = providers.get(name) {
            return provider.clone();
        }
        let name: Arc<str> = Arc::from(name);
        let provider = Provider::new(name.clone(), self.clone());
        providers.insert(name, provider.clone());
        provider
    }

    /// Hands `component` to its provider. Fails if that provider already has
    /// a component.
    pub fn add_component(&self, component: Component) -> Result<(), ComponentError> {
        let provider = self.get_provider(component.name());
        provider.set_component(component)
    }

    pub fn get_providers(&self) -> Vec<Provider> {
        let providers = self.inner.providers.lock().unwrap();
        providers.values().cloned().collect()
    }

    /// Attaches the service owning this container, so factories can reach
    /// back to it without a registry lookup.
    pub fn attach_root_service(&self, service: DynService) {
        let mut slot = self.inner.root_service.lock().unwrap();
        *slot = Some(service);
    }

    /// Downcasts the attached root service, if any.
    pub fn root_service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let slot = self.inner.root_service.lock().unwrap();
        slot.as_ref()
            .and_then(|service| service.clone().downcast::<T>().ok())
    }

    /// Drops every provider and the root service. Used when the owning
    /// module is deleted, which also breaks the provider/container reference
    /// cycle.
    pub(crate) fn reset(&self) {
        let mut providers = self.inner.providers.lock().unwrap();
        providers.clear();
        let mut slot = self.inner.root_service.lock().unwrap();
        *slot = None;
    }
}

impl fmt::Debug for ComponentContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers = self.inner.providers.lock().unwrap();
        f.debug_struct("ComponentContainer")
            .field("name", &self.inner.name)
            .field("providers", &providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
