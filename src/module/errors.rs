use std::fmt;

use crate::component::ComponentError;

/// Errors surfaced by the module layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// No module with this name has been created yet.
    NoModule { name: String },
    /// The requested module name is empty or whitespace.
    BadModuleName { name: String },
    /// A component operation performed on behalf of the module failed.
    ComponentFailure { component: String, message: String },
}

pub type ModuleResult<T> = Result<T, ModuleError>;

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::NoModule { name } => write!(
                f,
                "no module named '{name}' has been created - call initialize_module() first (module/no-module)"
            ),
            ModuleError::BadModuleName { name } => {
                write!(f, "illegal module name: '{name}' (module/bad-module-name)")
            }
            ModuleError::ComponentFailure { component, message } => {
                write!(f, "component {component} failed: {message} (module/component-failure)")
            }
        }
    }
}

impl std::error::Error for ModuleError {}

impl From<ComponentError> for ModuleError {
    fn from(error: ComponentError) -> Self {
        let component = match &error {
            ComponentError::MismatchingComponent { expected, .. } => expected.clone(),
            ComponentError::ComponentAlreadyProvided { name }
            | ComponentError::ComponentNotRegistered { name }
            | ComponentError::InstanceAlreadyInitialized { name }
            | ComponentError::InitializationFailed { name, .. }
            | ComponentError::InstanceUnavailable { name } => name.clone(),
        };
        ModuleError::ComponentFailure {
            component,
            message: error.to_string(),
        }
    }
}
