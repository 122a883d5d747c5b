//! Shared helpers for the crate's tests.
//!
//! The module registry, the component registry and the client binding are
//! process-wide, so tests that touch them hold [`global_test_guard`] and
//! start from [`reset_environment`].

mod alooma;

pub use alooma::RecordingGlobal;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::alooma::GlobalAloomaBinding;
use crate::logger::LogLevel;
use crate::module::{AnalyticsModule, ModuleSettings};

static TEST_GUARD: Mutex<()> = Mutex::new(());

/// Serializes tests that read or write process-wide state.
pub fn global_test_guard() -> MutexGuard<'static, ()> {
    TEST_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Returns the crate to a pristine state: no modules, no registered
/// components, no installed client handle, default log level.
pub fn reset_environment() {
    crate::module::registry::modules_guard().clear();
    crate::component::global_components()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clear();
    GlobalAloomaBinding::shared().inner().reset();
    crate::logger::set_log_level(LogLevel::Info);
}

/// A name no other test will have used.
pub fn unique_name(prefix: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("{prefix}-{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Creates a module under a fresh unique name.
pub fn unique_module() -> AnalyticsModule {
    crate::module::initialize_module(Some(ModuleSettings {
        name: Some(unique_name("module")),
    }))
    .expect("failed to initialize test module")
}
