//! Shows the async-load watcher: super properties staged during bootstrap
//! are registered only after the client reports that it finished loading.
//!
//! ```bash
//! cargo run --example adapter_super_properties
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use alooma_rs_adapter::alooma::{
    alooma_provider, get_alooma, AloomaGlobal, AloomaResult, GlobalAloomaBinding, MethodPath,
};
use alooma_rs_adapter::module::initialize_module;

/// A client whose async bootstrap finishes later, like a script tag still in
/// flight.
struct SlowLoadingClient {
    loaded: AtomicBool,
}

impl AloomaGlobal for SlowLoadingClient {
    fn loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    fn call(&self, path: MethodPath, args: &[Value]) -> AloomaResult<Value> {
        println!("  -> alooma.{path} {args:?}");
        Ok(Value::Null)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(SlowLoadingClient {
        loaded: AtomicBool::new(false),
    });
    GlobalAloomaBinding::shared()
        .inner()
        .install(client.clone() as Arc<dyn AloomaGlobal>);

    let module = initialize_module(None)?;
    let provider = alooma_provider(&module);
    provider.set_api_key("demo-project-token")?;
    provider.set_super_properties(
        json!({ "app_version": "1.4.2", "channel": "beta" })
            .as_object()
            .cloned()
            .unwrap_or_default(),
    )?;

    println!("resolving the service while the client is still loading");
    get_alooma(Some(module))?;
    println!("init went through; super properties are waiting for the loaded marker");

    let finish_loading = client.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1200)).await;
        finish_loading.loaded.store(true, Ordering::SeqCst);
        println!("client finished loading");
    });

    // One poll interval after the marker flips, the watcher registers the
    // staged properties.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    println!("done");

    Ok(())
}
