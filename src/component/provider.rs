use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::component::component::Component;
use crate::component::container::ComponentContainer;
use crate::component::types::{ComponentError, DynService, InstanceFactoryOptions};

/// Binds a component name to at most one memoized service instance.
///
/// A provider can exist before its component does. Configuration is staged on
/// the provider and snapshotted into the factory call; once an instance has
/// been memoized the staged options are frozen and [`Provider::configure`]
/// refuses further writes.
#[derive(Clone)]
pub struct Provider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    name: Arc<str>,
    container: ComponentContainer,
    component: Mutex<Option<Component>>,
    // Lock order: staged_options before instance.
    staged_options: Mutex<Value>,
    instance: Mutex<Option<DynService>>,
}

impl Provider {
    pub(crate) fn new(name: Arc<str>, container: ComponentContainer) -> Self {
        Provider {
            inner: Arc::new(ProviderInner {
                name,
                container,
                component: Mutex::new(None),
                staged_options: Mutex::new(Value::Null),
                instance: Mutex::new(None),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_component_set(&self) -> bool {
        self.inner.component.lock().unwrap().is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.instance.lock().unwrap().is_some()
    }

    /// Stages `options` for the factory. Fails once an instance exists: the
    /// snapshot handed to the factory is the configuration of record and
    /// later writes would silently diverge from it.
    pub fn configure(&self, options: Value) -> Result<(), ComponentError> {
        let mut staged = self.inner.staged_options.lock().unwrap();
        let instance = self.inner.instance.lock().unwrap();
        if instance.is_some() {
            return Err(ComponentError::InstanceAlreadyInitialized {
                name: self.inner.name.to_string(),
            });
        }
        *staged = options;
        Ok(())
    }

    /// Snapshot of the currently staged options.
    pub fn options(&self) -> Value {
        self.inner.staged_options.lock().unwrap().clone()
    }

    pub fn set_component(&self, component: Component) -> Result<(), ComponentError> {
        if component.name() != self.name() {
            return Err(ComponentError::MismatchingComponent {
                expected: self.name().to_string(),
                found: component.name().to_string(),
            });
        }
        let mut slot = self.inner.component.lock().unwrap();
        if slot.is_some() {
            return Err(ComponentError::ComponentAlreadyProvided {
                name: self.name().to_string(),
            });
        }
        *slot = Some(component);
        Ok(())
    }

    /// Returns the service, building and memoizing it on first use.
    ///
    /// A factory failure is returned to the caller and nothing is memoized,
    /// so a later call runs the factory again.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, ComponentError> {
        let component = self
            .inner
            .component
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ComponentError::ComponentNotRegistered {
                name: self.inner.name.to_string(),
            })?;
        let options = self.options();
        let mut instance = self.inner.instance.lock().unwrap();
        let service = match instance.as_ref() {
            Some(service) => service.clone(),
            None => {
                let service = (component.instance_factory)(
                    &self.inner.container,
                    InstanceFactoryOptions::new(options),
                )?;
                *instance = Some(service.clone());
                if let Some(callback) = component.on_instance_created.as_ref() {
                    callback(&self.inner.container, &service);
                }
                service
            }
        };
        drop(instance);
        service
            .downcast::<T>()
            .map_err(|_| ComponentError::InstanceUnavailable {
                name: self.inner.name.to_string(),
            })
    }

    /// Like [`Provider::resolve`] but swallows the failure reason.
    pub fn get_immediate<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.resolve::<T>().ok()
    }

    /// Drops the memoized instance. The next resolution runs the factory
    /// again and staged options become writable once more.
    pub fn clear_instance(&self) {
        let mut instance = self.inner.instance.lock().unwrap();
        *instance = None;
    }

    /// Clears the instance and the staged options.
    pub fn delete(&self) {
        let mut staged = self.inner.staged_options.lock().unwrap();
        let mut instance = self.inner.instance.lock().unwrap();
        *staged = Value::Null;
        *instance = None;
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.inner.name)
            .field("component_set", &self.is_component_set())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
