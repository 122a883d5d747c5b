use std::fmt;
use std::sync::Arc;

use crate::component::container::ComponentContainer;
use crate::component::types::{DynService, InstanceFactory, OnInstanceCreatedCallback};

/// A named service recipe: the factory that builds the service plus optional
/// lifecycle hooks. Components are cheap to clone and are shared between the
/// global registry and every container they have been added to.
#[derive(Clone)]
pub struct Component {
    name: Arc<str>,
    pub(crate) instance_factory: InstanceFactory,
    pub(crate) on_instance_created: Option<OnInstanceCreatedCallback>,
}

impl Component {
    pub fn new(name: impl Into<Arc<str>>, instance_factory: InstanceFactory) -> Self {
        Component {
            name: name.into(),
            instance_factory,
            on_instance_created: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a callback invoked once per container, right after the
    /// provider memoizes the freshly built instance.
    pub fn with_instance_created_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ComponentContainer, &DynService) + Send + Sync + 'static,
    {
        self.on_instance_created = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("has_on_instance_created", &self.on_instance_created.is_some())
            .finish()
    }
}
