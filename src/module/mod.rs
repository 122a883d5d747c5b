//! Module registry hosting the adapter.
//!
//! A module is a named bundle of services backed by a
//! [`ComponentContainer`](crate::component::ComponentContainer). Service
//! crates register a [`Component`](crate::component::Component) once through
//! [`register_component`] and every module, existing or future, gains a
//! provider for it. Consumers create modules with [`initialize_module`] and
//! look them up by name with [`get_module`].

mod api;
mod constants;
mod errors;
pub(crate) mod logger;
pub(crate) mod registry;
mod types;

pub use api::{
    delete_module, get_module, get_modules, initialize_module, set_log_level,
};
pub use constants::DEFAULT_MODULE_NAME;
pub use errors::{ModuleError, ModuleResult};
pub use registry::{get_provider, register_component};
pub use types::{AnalyticsModule, ModuleSettings};
