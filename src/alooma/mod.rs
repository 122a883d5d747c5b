//! Injectable adapter around the alooma analytics client.
//!
//! The adapter turns a process-wide client handle (the Rust stand-in for the
//! `window.alooma` object a browser embed snippet creates) into a lazily
//! created, module-scoped service:
//!
//! 1. the embedder installs an [`AloomaGlobal`] implementation into
//!    [`GlobalAloomaBinding`],
//! 2. bootstrap code stages the api key, client config and super properties
//!    through [`alooma_provider`],
//! 3. the first [`get_alooma`] call builds the [`Alooma`] facade, runs the
//!    client's `init`, and arranges for super properties to be registered
//!    once the client reports that it has finished loading.
//!
//! Every facade call re-reads the binding, so replacing the installed handle
//! redirects services that were created earlier.

mod api;
mod config;
mod constants;
mod error;
mod global;
mod methods;

#[doc(inline)]
pub use api::{alooma_provider, get_alooma, register_alooma_component, Alooma, AloomaPeople};
#[doc(inline)]
pub use config::{AloomaProvider, AloomaSettings};
#[doc(inline)]
pub use error::{not_callable, AloomaError, AloomaErrorCode, AloomaResult};
#[doc(inline)]
pub use global::{AloomaBinding, AloomaGlobal, GlobalAloomaBinding};
#[doc(inline)]
pub use methods::{MethodPath, PeopleMethod, RootMethod};
