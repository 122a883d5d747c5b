//! Bootstrap the adapter against a console-backed client and forward a few
//! calls through the facade.
//!
//! ```bash
//! cargo run --example adapter_basic
//! ```

use std::sync::Arc;

use serde_json::{json, Value};

use alooma_rs_adapter::alooma::{
    alooma_provider, get_alooma, AloomaGlobal, AloomaResult, GlobalAloomaBinding, MethodPath,
    RootMethod,
};
use alooma_rs_adapter::module::initialize_module;

/// Stands in for the real embed snippet: prints every dispatched call.
struct ConsoleClient;

impl AloomaGlobal for ConsoleClient {
    fn loaded(&self) -> bool {
        true
    }

    fn call(&self, path: MethodPath, args: &[Value]) -> AloomaResult<Value> {
        println!("  -> alooma.{path} {args:?}");
        if path == MethodPath::Root(RootMethod::GetDistinctId) {
            return Ok(json!("demo-user-42"));
        }
        Ok(Value::Null)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    GlobalAloomaBinding::shared()
        .inner()
        .install(Arc::new(ConsoleClient));

    let module = initialize_module(None)?;
    println!("module ready: {}", module.name());

    let provider = alooma_provider(&module);
    provider.set_api_key("demo-project-token")?;
    provider.set_config(
        json!({ "track_pageview": false })
            .as_object()
            .cloned()
            .unwrap_or_default(),
    )?;

    println!("resolving the alooma service:");
    let alooma = get_alooma(Some(module))?;

    println!("forwarding calls:");
    alooma.track(&[json!("signed up"), json!({ "plan": "pro" })])?;
    alooma.identify(&[json!("demo-user-42")])?;
    alooma.people().set(&[json!({ "name": "Ada" })])?;

    let distinct_id = alooma.get_distinct_id(&[])?;
    println!("distinct id reported by the client: {distinct_id}");

    Ok(())
}
