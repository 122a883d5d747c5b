//! Small runtime shims so the crate can run on native targets and on
//! `wasm32` browser targets without the callers caring which one is active.

use std::future::Future;
use std::time::Duration;

/// Spawns `future` on the ambient tokio runtime when one is running.
///
/// Outside of a runtime (plain synchronous callers) the task is handed to a
/// lazily started background runtime driven by a dedicated thread, so detached
/// work such as the async-load watcher still makes progress.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    use std::sync::LazyLock;
    use tokio::runtime::{Builder, Handle};

    static BACKGROUND_RUNTIME: LazyLock<Handle> = LazyLock::new(|| {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build background tokio runtime");
        let handle = runtime.handle().clone();
        std::thread::spawn(move || runtime.block_on(std::future::pending::<()>()));
        handle
    });

    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(_) => {
            BACKGROUND_RUNTIME.spawn(future);
        }
    }
}

/// Browser targets have no thread pool; everything lands on the JS microtask
/// queue instead.
#[cfg(target_arch = "wasm32")]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Sleeps for `duration` using whichever timer the target provides.
pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(duration).await;
    }
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::sleep(duration).await;
    }
}
