use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::component::container::ComponentContainer;

/// Type-erased service instance produced by a component factory.
pub type DynService = Arc<dyn Any + Send + Sync>;

/// Factory invoked the first time a provider has to produce its service.
pub type InstanceFactory = Arc<
    dyn Fn(&ComponentContainer, InstanceFactoryOptions) -> Result<DynService, ComponentError>
        + Send
        + Sync,
>;

/// Callback fired once, right after a provider memoizes a fresh instance.
pub type OnInstanceCreatedCallback = Arc<dyn Fn(&ComponentContainer, &DynService) + Send + Sync>;

/// Options handed to an [`InstanceFactory`], snapshotted from whatever was
/// staged on the provider at resolution time.
#[derive(Clone, Debug, Default)]
pub struct InstanceFactoryOptions {
    pub options: Value,
}

impl InstanceFactoryOptions {
    pub fn new(options: Value) -> Self {
        InstanceFactoryOptions { options }
    }
}

/// Errors surfaced by the component framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// A component was offered to a provider registered under another name.
    MismatchingComponent { expected: String, found: String },
    /// A component with this name was already provided to the container.
    ComponentAlreadyProvided { name: String },
    /// The provider has no component yet, so no instance can be produced.
    ComponentNotRegistered { name: String },
    /// Configuration was staged after the instance had been created.
    InstanceAlreadyInitialized { name: String },
    /// The instance factory failed.
    InitializationFailed { name: String, reason: String },
    /// The memoized instance is not of the requested concrete type.
    InstanceUnavailable { name: String },
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::MismatchingComponent { expected, found } => write!(
                f,
                "component {found} does not match the provider {expected} (component/mismatch)"
            ),
            ComponentError::ComponentAlreadyProvided { name } => write!(
                f,
                "component {name} has already been provided (component/already-provided)"
            ),
            ComponentError::ComponentNotRegistered { name } => write!(
                f,
                "no component named {name} has been registered (component/not-registered)"
            ),
            ComponentError::InstanceAlreadyInitialized { name } => write!(
                f,
                "{name} has already been initialized and can no longer be configured (component/already-initialized)"
            ),
            ComponentError::InitializationFailed { name, reason } => write!(
                f,
                "initialization of {name} failed: {reason} (component/initialization-failed)"
            ),
            ComponentError::InstanceUnavailable { name } => write!(
                f,
                "the {name} instance does not have the requested type (component/instance-unavailable)"
            ),
        }
    }
}

impl std::error::Error for ComponentError {}
