use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::alooma::{not_callable, AloomaGlobal, AloomaResult, MethodPath};

/// In-memory stand-in for the client handle: records every dispatched call
/// and lets tests script results, failures and the loaded marker.
pub struct RecordingGlobal {
    loaded: AtomicBool,
    calls: Mutex<Vec<(MethodPath, Vec<Value>)>>,
    results: Mutex<HashMap<MethodPath, Value>>,
    failing: Mutex<HashSet<MethodPath>>,
}

impl RecordingGlobal {
    pub fn new(loaded: bool) -> Arc<Self> {
        Arc::new(RecordingGlobal {
            loaded: AtomicBool::new(loaded),
            calls: Mutex::new(Vec::new()),
            results: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
        })
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::SeqCst);
    }

    /// Every call in dispatch order.
    pub fn calls(&self) -> Vec<(MethodPath, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Argument lists of the calls made to `path`.
    pub fn calls_for(&self, path: MethodPath) -> Vec<Vec<Value>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(recorded, _args)| *recorded == path)
            .map(|(_recorded, args)| args.clone())
            .collect()
    }

    /// Makes calls to `path` return `value` instead of null.
    pub fn stub_result(&self, path: MethodPath, value: Value) {
        self.results.lock().unwrap().insert(path, value);
    }

    /// Makes calls to `path` fail as not callable.
    pub fn fail_path(&self, path: MethodPath) {
        self.failing.lock().unwrap().insert(path);
    }
}

impl AloomaGlobal for RecordingGlobal {
    fn loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    fn call(&self, path: MethodPath, args: &[Value]) -> AloomaResult<Value> {
        self.calls.lock().unwrap().push((path, args.to_vec()));
        if self.failing.lock().unwrap().contains(&path) {
            return Err(not_callable(path));
        }
        Ok(self
            .results
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .unwrap_or(Value::Null))
    }
}
