use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use serde_json::Value;

use crate::alooma::config::{AloomaProvider, AloomaSettings};
use crate::alooma::constants::{
    ALOOMA_COMPONENT_NAME, ASYNC_LOAD_POLL_INTERVAL, GLOBAL_MISSING_MESSAGE,
};
use crate::alooma::error::{global_missing, internal_error, AloomaResult};
use crate::alooma::global::GlobalAloomaBinding;
use crate::alooma::methods::{MethodPath, PeopleMethod, RootMethod};
use crate::component::{
    Component, ComponentContainer, ComponentError, DynService, InstanceFactoryOptions,
};
use crate::logger::Logger;
use crate::module::{self, AnalyticsModule};
use crate::platform;

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("analytics.alooma"));

static ALOOMA_COMPONENT: LazyLock<Component> = LazyLock::new(|| {
    Component::new(ALOOMA_COMPONENT_NAME, Arc::new(alooma_factory))
        .with_instance_created_callback(|container, _service| {
            LOGGER.debug(format!(
                "alooma service created for module {}",
                container.name()
            ));
        })
});

/// Facade over the installed alooma client.
///
/// The facade is created lazily, at most once per module, and every call
/// re-reads the shared binding so it always talks to whichever handle is
/// installed at that moment. Each method takes its arguments as a JSON
/// value slice and returns whatever the client returned.
#[derive(Clone)]
pub struct Alooma {
    inner: Arc<AloomaInner>,
}

struct AloomaInner {
    module: AnalyticsModule,
    settings: AloomaSettings,
    binding: GlobalAloomaBinding,
}

fn forward(inner: &AloomaInner, path: MethodPath, args: &[Value]) -> AloomaResult<Value> {
    let global = inner
        .binding
        .inner()
        .current()
        .ok_or_else(|| global_missing(GLOBAL_MISSING_MESSAGE))?;
    global.call(path, args)
}

impl Alooma {
    /// The module this service belongs to.
    pub fn module(&self) -> &AnalyticsModule {
        &self.inner.module
    }

    /// The settings snapshot the service was created with.
    pub fn settings(&self) -> &AloomaSettings {
        &self.inner.settings
    }

    /// The `people.*` facet of the facade.
    pub fn people(&self) -> AloomaPeople {
        AloomaPeople {
            inner: self.inner.clone(),
        }
    }

    /// Re-runs the client's `init` with explicit arguments, for consumers
    /// that manage a second project token themselves.
    pub fn init(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Init.into(), args)
    }

    pub fn push(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Push.into(), args)
    }

    pub fn disable(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Disable.into(), args)
    }

    /// Records an event, optionally with a properties object.
    pub fn track(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Track.into(), args)
    }

    pub fn track_links(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::TrackLinks.into(), args)
    }

    pub fn track_forms(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::TrackForms.into(), args)
    }

    /// Registers properties sent with every subsequent event.
    pub fn register(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Register.into(), args)
    }

    pub fn register_once(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::RegisterOnce.into(), args)
    }

    pub fn unregister(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Unregister.into(), args)
    }

    pub fn identify(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Identify.into(), args)
    }

    pub fn get_distinct_id(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::GetDistinctId.into(), args)
    }

    /// Merges two identities, typically right after sign-up.
    pub fn alias(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::Alias.into(), args)
    }

    pub fn set_config(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::SetConfig.into(), args)
    }

    pub fn get_config(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::GetConfig.into(), args)
    }

    pub fn get_property(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, RootMethod::GetProperty.into(), args)
    }
}

impl fmt::Debug for Alooma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alooma")
            .field("module", &self.inner.module.name())
            .finish()
    }
}

/// Forwards to the client's nested `people` object.
#[derive(Clone)]
pub struct AloomaPeople {
    inner: Arc<AloomaInner>,
}

impl AloomaPeople {
    /// Sets profile properties on the current user.
    pub fn set(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, PeopleMethod::Set.into(), args)
    }

    pub fn set_once(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, PeopleMethod::SetOnce.into(), args)
    }

    pub fn increment(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, PeopleMethod::Increment.into(), args)
    }

    pub fn append(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, PeopleMethod::Append.into(), args)
    }

    pub fn track_charge(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, PeopleMethod::TrackCharge.into(), args)
    }

    pub fn clear_charges(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, PeopleMethod::ClearCharges.into(), args)
    }

    pub fn delete_user(&self, args: &[Value]) -> AloomaResult<Value> {
        forward(&self.inner, PeopleMethod::DeleteUser.into(), args)
    }
}

impl fmt::Debug for AloomaPeople {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AloomaPeople")
            .field("module", &self.inner.module.name())
            .finish()
    }
}

/// Builds the facade for one module: decodes the staged settings, requires
/// an installed handle, runs the client's `init`, and starts the watcher
/// that registers super properties once the client has loaded.
///
/// Failures are returned to the provider without being memoized, so a later
/// resolution attempt starts over, e.g. after the embedder installs the
/// missing handle.
fn alooma_factory(
    container: &ComponentContainer,
    options: InstanceFactoryOptions,
) -> Result<DynService, ComponentError> {
    let module = container
        .root_service::<AnalyticsModule>()
        .ok_or_else(|| ComponentError::InitializationFailed {
            name: ALOOMA_COMPONENT_NAME.to_string(),
            reason: "no module attached to the component container".to_string(),
        })?;
    let settings = AloomaSettings::from_options(&options.options).map_err(|error| {
        ComponentError::InitializationFailed {
            name: ALOOMA_COMPONENT_NAME.to_string(),
            reason: format!("invalid alooma settings: {error}"),
        }
    })?;

    let binding = GlobalAloomaBinding::shared();
    let global =
        binding
            .inner()
            .current()
            .ok_or_else(|| ComponentError::InitializationFailed {
                name: ALOOMA_COMPONENT_NAME.to_string(),
                reason: GLOBAL_MISSING_MESSAGE.to_string(),
            })?;

    let init_args = [
        settings.api_key.clone().map_or(Value::Null, Value::String),
        settings.config.clone().map_or(Value::Null, Value::Object),
    ];
    global
        .call(RootMethod::Init.into(), &init_args)
        .map_err(|error| ComponentError::InitializationFailed {
            name: ALOOMA_COMPONENT_NAME.to_string(),
            reason: error.to_string(),
        })?;

    let super_properties = settings.super_properties.clone();
    let watch_binding = binding.clone();
    watch_async_load(binding.clone(), ASYNC_LOAD_POLL_INTERVAL, move || {
        if let Some(properties) = super_properties {
            match watch_binding.inner().current() {
                Some(global) => {
                    if let Err(error) =
                        global.call(RootMethod::Register.into(), &[Value::Object(properties)])
                    {
                        LOGGER.warn(format!(
                            "failed to register alooma super properties: {error}"
                        ));
                    }
                }
                None => LOGGER.warn(
                    "alooma handle was removed before super properties could be registered",
                ),
            }
        }
    });

    let service = Alooma {
        inner: Arc::new(AloomaInner {
            module: (*module).clone(),
            settings,
            binding,
        }),
    };
    Ok(Arc::new(service) as DynService)
}

/// Polls the installed handle every `interval` until it reports loaded,
/// then runs `on_loaded`. The callback never fires while the client is
/// still loading and cannot fire more than once.
fn watch_async_load<F>(binding: GlobalAloomaBinding, interval: Duration, on_loaded: F)
where
    F: FnOnce() + Send + 'static,
{
    platform::spawn_detached(async move {
        loop {
            let loaded = binding
                .inner()
                .current()
                .map(|global| global.loaded())
                .unwrap_or(false);
            if loaded {
                break;
            }
            LOGGER.debug(format!(
                "alooma async api not loaded yet, next check in {}ms",
                interval.as_millis()
            ));
            platform::sleep(interval).await;
        }
        on_loaded();
    });
}

fn ensure_registered() {
    let component = ALOOMA_COMPONENT.clone();
    let _ = module::register_component(component);
}

/// Registers the alooma component in the global registry. Idempotent;
/// [`alooma_provider`] and [`get_alooma`] call it on your behalf.
pub fn register_alooma_component() {
    ensure_registered();
}

/// Bootstrap-phase accessor for `module`'s alooma settings.
///
/// The returned provider stages configuration for the not-yet-created
/// service; once [`get_alooma`] has produced the service the settings are
/// frozen.
pub fn alooma_provider(module: &AnalyticsModule) -> AloomaProvider {
    ensure_registered();
    AloomaProvider::new(module::get_provider(module, ALOOMA_COMPONENT_NAME))
}

/// Returns the module's alooma facade, creating it on first call.
///
/// `None` targets the default module. Creation requires an installed client
/// handle: without one this fails with `alooma/global-missing` and nothing
/// is memoized, so the call can be retried after the handle is installed.
pub fn get_alooma(module: Option<AnalyticsModule>) -> AloomaResult<Arc<Alooma>> {
    ensure_registered();
    let module = match module {
        Some(module) => module,
        None => module::get_module(None).map_err(|error| internal_error(error.to_string()))?,
    };
    let binding = GlobalAloomaBinding::shared();
    if !binding.inner().is_installed() {
        return Err(global_missing(GLOBAL_MISSING_MESSAGE));
    }
    let provider = module::get_provider(&module, ALOOMA_COMPONENT_NAME);
    provider
        .resolve::<Alooma>()
        .map_err(|error| internal_error(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alooma::error::AloomaErrorCode;
    use crate::test_support::{
        global_test_guard, reset_environment, unique_module, RecordingGlobal,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn object(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn install(global: &Arc<RecordingGlobal>) {
        GlobalAloomaBinding::shared()
            .inner()
            .install(global.clone() as Arc<dyn crate::alooma::AloomaGlobal>);
    }

    #[test]
    fn resolving_without_an_installed_handle_fails() {
        let _guard = global_test_guard();
        reset_environment();
        let module = unique_module();

        let error = get_alooma(Some(module.clone())).unwrap_err();
        assert_eq!(error.code, AloomaErrorCode::GlobalMissing);
        assert!(error.message().contains("Did you forget to install"));
        assert!(!module::get_provider(&module, "alooma").is_initialized());

        // Installing the handle afterwards makes the same call succeed.
        let recording = RecordingGlobal::new(true);
        install(&recording);
        get_alooma(Some(module)).unwrap();
    }

    #[test]
    fn first_resolution_initializes_the_client_once() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        let module = unique_module();
        let provider = alooma_provider(&module);
        provider.set_api_key("token-123").unwrap();
        provider
            .set_config(object(json!({ "track_pageview": false })))
            .unwrap();

        let first = get_alooma(Some(module.clone())).unwrap();
        let second = get_alooma(Some(module)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let init_calls = recording.calls_for(RootMethod::Init.into());
        assert_eq!(init_calls.len(), 1);
        assert_eq!(
            init_calls[0],
            vec![json!("token-123"), json!({ "track_pageview": false })]
        );
        assert_eq!(first.settings().api_key.as_deref(), Some("token-123"));
    }

    #[test]
    fn unconfigured_service_initializes_with_null_arguments() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        let module = unique_module();
        get_alooma(Some(module)).unwrap();

        let init_calls = recording.calls_for(RootMethod::Init.into());
        assert_eq!(init_calls[0], vec![Value::Null, Value::Null]);
    }

    #[test]
    fn api_key_without_config_initializes_with_a_null_config() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        let module = unique_module();
        alooma_provider(&module).set_api_key("ABC123").unwrap();
        get_alooma(Some(module)).unwrap();

        let init_calls = recording.calls_for(RootMethod::Init.into());
        assert_eq!(init_calls[0], vec![json!("ABC123"), Value::Null]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn super_properties_register_once_the_client_reports_loaded() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        let module = unique_module();
        let provider = alooma_provider(&module);
        provider
            .set_super_properties(object(json!({ "plan": "pro" })))
            .unwrap();

        get_alooma(Some(module)).unwrap();
        platform::sleep(Duration::from_millis(25)).await;

        let register_calls = recording.calls_for(RootMethod::Register.into());
        assert_eq!(register_calls.len(), 1);
        assert_eq!(register_calls[0], vec![json!({ "plan": "pro" })]);

        // init happened before the watcher got around to registering.
        let paths: Vec<MethodPath> = recording
            .calls()
            .into_iter()
            .map(|(path, _args)| path)
            .collect();
        assert_eq!(
            paths,
            vec![RootMethod::Init.into(), RootMethod::Register.into()]
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn watcher_waits_for_the_loaded_marker() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(false);
        install(&recording);

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        watch_async_load(
            GlobalAloomaBinding::shared(),
            Duration::from_millis(5),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        platform::sleep(Duration::from_millis(25)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        recording.set_loaded(true);
        platform::sleep(Duration::from_millis(25)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn watcher_without_super_properties_stays_quiet() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        get_alooma(Some(unique_module())).unwrap();
        platform::sleep(Duration::from_millis(25)).await;

        assert!(recording
            .calls_for(RootMethod::Register.into())
            .is_empty());
    }

    #[test]
    fn settings_freeze_once_the_service_exists() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        let module = unique_module();
        let provider = alooma_provider(&module);
        provider.set_api_key("token-before").unwrap();
        get_alooma(Some(module)).unwrap();

        let error = provider.set_api_key("token-after").unwrap_err();
        assert_eq!(error.code, AloomaErrorCode::SettingsFrozen);
        // Reads keep working and show the original value.
        assert_eq!(provider.api_key().as_deref(), Some("token-before"));
    }

    #[test]
    fn empty_writes_leave_stored_values_untouched() {
        let _guard = global_test_guard();
        reset_environment();

        let module = unique_module();
        let provider = alooma_provider(&module);

        provider.set_api_key("").unwrap();
        assert_eq!(provider.api_key(), None);

        provider.set_api_key("token-9").unwrap();
        provider.set_api_key("").unwrap();
        assert_eq!(provider.api_key().as_deref(), Some("token-9"));

        provider.set_config(serde_json::Map::new()).unwrap();
        assert_eq!(provider.config(), None);
        provider.set_super_properties(serde_json::Map::new()).unwrap();
        assert_eq!(provider.super_properties(), None);
    }

    #[test]
    fn facade_forwards_every_method_path() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        let alooma = get_alooma(Some(unique_module())).unwrap();
        let people = alooma.people();
        let args = [json!("probe")];

        alooma.init(&args).unwrap();
        alooma.push(&args).unwrap();
        alooma.disable(&args).unwrap();
        alooma.track(&args).unwrap();
        alooma.track_links(&args).unwrap();
        alooma.track_forms(&args).unwrap();
        alooma.register(&args).unwrap();
        alooma.register_once(&args).unwrap();
        alooma.unregister(&args).unwrap();
        alooma.identify(&args).unwrap();
        alooma.get_distinct_id(&args).unwrap();
        alooma.alias(&args).unwrap();
        alooma.set_config(&args).unwrap();
        alooma.get_config(&args).unwrap();
        alooma.get_property(&args).unwrap();
        people.set(&args).unwrap();
        people.set_once(&args).unwrap();
        people.increment(&args).unwrap();
        people.append(&args).unwrap();
        people.track_charge(&args).unwrap();
        people.clear_charges(&args).unwrap();
        people.delete_user(&args).unwrap();

        for path in MethodPath::ALL {
            // The factory already called init once.
            let expected = if path == MethodPath::Root(RootMethod::Init) {
                2
            } else {
                1
            };
            assert_eq!(recording.calls_for(path).len(), expected, "{path}");
        }
    }

    #[test]
    fn calls_bind_to_the_handle_installed_at_call_time() {
        let _guard = global_test_guard();
        reset_environment();
        let first = RecordingGlobal::new(true);
        install(&first);

        let alooma = get_alooma(Some(unique_module())).unwrap();

        let second = RecordingGlobal::new(true);
        install(&second);
        alooma.track(&[json!("after swap")]).unwrap();

        assert!(first.calls_for(RootMethod::Track.into()).is_empty());
        assert_eq!(second.calls_for(RootMethod::Track.into()).len(), 1);

        // Removing the handle entirely turns calls into errors.
        GlobalAloomaBinding::shared().inner().reset();
        let error = alooma.track(&[json!("orphaned")]).unwrap_err();
        assert_eq!(error.code, AloomaErrorCode::GlobalMissing);
    }

    #[test]
    fn collaborator_results_and_errors_pass_through() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        recording.stub_result(RootMethod::GetDistinctId.into(), json!("user-7"));
        recording.fail_path(RootMethod::TrackLinks.into());
        install(&recording);

        let alooma = get_alooma(Some(unique_module())).unwrap();

        assert_eq!(alooma.get_distinct_id(&[]).unwrap(), json!("user-7"));
        let error = alooma.track_links(&[json!("#nav")]).unwrap_err();
        assert_eq!(error.code, AloomaErrorCode::NotCallable);
        assert!(error.message().contains("track_links"));
    }

    #[test]
    fn get_alooma_defaults_to_the_default_module() {
        let _guard = global_test_guard();
        reset_environment();

        // No default module yet.
        let error = get_alooma(None).unwrap_err();
        assert_eq!(error.code, AloomaErrorCode::Internal);
        assert!(error.message().contains("initialize_module"));

        let recording = RecordingGlobal::new(true);
        install(&recording);
        let module = module::initialize_module(None).unwrap();
        let alooma = get_alooma(None).unwrap();
        assert_eq!(alooma.module(), &module);
    }

    #[test]
    fn malformed_staged_options_fail_resolution() {
        let _guard = global_test_guard();
        reset_environment();
        let recording = RecordingGlobal::new(true);
        install(&recording);

        let module = unique_module();
        module::get_provider(&module, "alooma")
            .configure(json!("not an options object"))
            .unwrap();

        let error = get_alooma(Some(module)).unwrap_err();
        assert_eq!(error.code, AloomaErrorCode::Internal);
        assert!(error.message().contains("invalid alooma settings"));
        assert!(recording.calls().is_empty());
    }
}
