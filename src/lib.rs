//! Rust port of the `angular-alooma` shim: exposes the alooma analytics
//! client as an injectable, module-scoped service.
//!
//! The original shim wrapped the `window.alooma` global behind a provider so
//! application code could configure the client during bootstrap and inject a
//! facade afterwards. This crate keeps that shape with Rust seams: the
//! ambient global becomes an installable [`alooma::AloomaGlobal`] handle,
//! the provider becomes [`alooma::AloomaProvider`] staging settings on a
//! component provider, and the injected facade becomes [`alooma::Alooma`],
//! created lazily once per [`module::AnalyticsModule`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use alooma_rs_adapter::alooma::{
//!     alooma_provider, get_alooma, AloomaGlobal, AloomaResult, GlobalAloomaBinding, MethodPath,
//! };
//! use alooma_rs_adapter::module::initialize_module;
//! use serde_json::{json, Value};
//!
//! struct StdoutClient;
//!
//! impl AloomaGlobal for StdoutClient {
//!     fn loaded(&self) -> bool {
//!         true
//!     }
//!
//!     fn call(&self, path: MethodPath, args: &[Value]) -> AloomaResult<Value> {
//!         println!("alooma.{path}({args:?})");
//!         Ok(Value::Null)
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     GlobalAloomaBinding::shared().inner().install(Arc::new(StdoutClient));
//!
//!     let module = initialize_module(None)?;
//!     let provider = alooma_provider(&module);
//!     provider.set_api_key("YOUR-PROJECT-TOKEN")?;
//!
//!     let alooma = get_alooma(Some(module))?;
//!     alooma.track(&[json!("signed up")])?;
//!     Ok(())
//! }
//! ```

pub mod alooma;
pub mod component;
pub mod logger;
pub mod module;
pub mod platform;

#[cfg(test)]
pub(crate) mod test_support;
