use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use serde_json::Value;

use crate::alooma::error::AloomaResult;
use crate::alooma::methods::MethodPath;

/// Contract of an installed alooma client, the counterpart of the
/// `window.alooma` object the embed snippet creates in a browser.
///
/// Implementations resolve `path` at call time, never earlier, so a handle
/// whose methods get swapped after installation (as the real embed snippet
/// does once the full library arrives) always has its current method
/// invoked. People paths must be dispatched on the nested `people` object.
pub trait AloomaGlobal: Send + Sync {
    /// Whether the client finished its own asynchronous bootstrap, the
    /// equivalent of the `__loaded` marker on the JS object.
    fn loaded(&self) -> bool;

    /// Invokes the method at `path` with `args`.
    ///
    /// Returns [`not_callable`](crate::alooma::error::not_callable) when the
    /// path does not resolve to a function on the client.
    fn call(&self, path: MethodPath, args: &[Value]) -> AloomaResult<Value>;
}

/// Single mutable slot holding the installed client handle.
#[derive(Default)]
pub struct AloomaBinding {
    slot: RwLock<Option<Arc<dyn AloomaGlobal>>>,
}

impl AloomaBinding {
    pub fn new() -> Self {
        AloomaBinding::default()
    }

    /// Installs `global`, replacing any previous handle. Services resolved
    /// earlier pick up the new handle on their next forwarded call.
    pub fn install(&self, global: Arc<dyn AloomaGlobal>) {
        let mut slot = self.slot.write().unwrap_or_else(|p| p.into_inner());
        *slot = Some(global);
    }

    /// The currently installed handle, if any.
    pub fn current(&self) -> Option<Arc<dyn AloomaGlobal>> {
        let slot = self.slot.read().unwrap_or_else(|p| p.into_inner());
        slot.clone()
    }

    pub fn is_installed(&self) -> bool {
        let slot = self.slot.read().unwrap_or_else(|p| p.into_inner());
        slot.is_some()
    }

    /// Removes and returns the installed handle.
    pub fn take(&self) -> Option<Arc<dyn AloomaGlobal>> {
        let mut slot = self.slot.write().unwrap_or_else(|p| p.into_inner());
        slot.take()
    }

    /// Empties the slot.
    pub fn reset(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|p| p.into_inner());
        *slot = None;
    }
}

impl fmt::Debug for AloomaBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AloomaBinding")
            .field("installed", &self.is_installed())
            .finish()
    }
}

/// Process-wide [`AloomaBinding`], the place embedders install the real
/// client before bootstrapping any module.
#[derive(Clone, Debug)]
pub struct GlobalAloomaBinding {
    binding: Arc<AloomaBinding>,
}

impl GlobalAloomaBinding {
    pub fn shared() -> Self {
        static SHARED: LazyLock<Arc<AloomaBinding>> =
            LazyLock::new(|| Arc::new(AloomaBinding::new()));
        GlobalAloomaBinding {
            binding: SHARED.clone(),
        }
    }

    pub fn inner(&self) -> &AloomaBinding {
        &self.binding
    }
}
