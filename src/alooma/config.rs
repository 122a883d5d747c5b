use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::alooma::error::{internal_error, settings_frozen, AloomaResult};
use crate::component::Provider;

/// Configuration handed to the client during service creation.
///
/// `api_key` and `config` become the two arguments of the client's `init`
/// call; `super_properties` are registered once the client reports that its
/// asynchronous bootstrap has finished.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AloomaSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_properties: Option<Map<String, Value>>,
}

impl AloomaSettings {
    pub(crate) fn from_options(options: &Value) -> Result<Self, serde_json::Error> {
        if options.is_null() {
            return Ok(AloomaSettings::default());
        }
        serde_json::from_value(options.clone())
    }

    pub(crate) fn to_options(&self) -> AloomaResult<Value> {
        serde_json::to_value(self)
            .map_err(|error| internal_error(format!("failed to encode alooma settings: {error}")))
    }
}

/// Bootstrap-phase view of the alooma service: reads and stages the settings
/// the factory will consume.
///
/// Writes are staged on the module's `alooma` provider, so they become
/// frozen the moment the service instance is created; a later write fails
/// with `alooma/settings-frozen`. Writing an empty value is a read in
/// disguise and leaves the stored value untouched, mirroring the get-or-set
/// accessors this adapter was ported from.
#[derive(Clone, Debug)]
pub struct AloomaProvider {
    provider: Provider,
}

impl AloomaProvider {
    pub(crate) fn new(provider: Provider) -> Self {
        AloomaProvider { provider }
    }

    /// Snapshot of everything staged so far.
    pub fn settings(&self) -> AloomaSettings {
        AloomaSettings::from_options(&self.provider.options()).unwrap_or_default()
    }

    pub fn api_key(&self) -> Option<String> {
        self.settings().api_key
    }

    /// Stages the project token. An empty string is a no-op read.
    pub fn set_api_key(&self, api_key: impl Into<String>) -> AloomaResult<()> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Ok(());
        }
        self.update(|settings| settings.api_key = Some(api_key))
    }

    pub fn config(&self) -> Option<Map<String, Value>> {
        self.settings().config
    }

    /// Stages the client configuration object. An empty map is a no-op read.
    pub fn set_config(&self, config: Map<String, Value>) -> AloomaResult<()> {
        if config.is_empty() {
            return Ok(());
        }
        self.update(|settings| settings.config = Some(config))
    }

    pub fn super_properties(&self) -> Option<Map<String, Value>> {
        self.settings().super_properties
    }

    /// Stages the properties registered once the client has loaded. An empty
    /// map is a no-op read.
    pub fn set_super_properties(&self, super_properties: Map<String, Value>) -> AloomaResult<()> {
        if super_properties.is_empty() {
            return Ok(());
        }
        self.update(|settings| settings.super_properties = Some(super_properties))
    }

    fn update(&self, mutate: impl FnOnce(&mut AloomaSettings)) -> AloomaResult<()> {
        let mut settings = self.settings();
        mutate(&mut settings);
        self.provider.configure(settings.to_options()?).map_err(|_| {
            settings_frozen("alooma settings cannot change once the service has been created")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn settings_round_trip_through_options() {
        let settings = AloomaSettings {
            api_key: Some("token-1".to_string()),
            config: Some(object(json!({ "track_pageview": false }))),
            super_properties: None,
        };
        let options = settings.to_options().unwrap();
        assert_eq!(
            options,
            json!({
                "api_key": "token-1",
                "config": { "track_pageview": false },
            })
        );
        let decoded = AloomaSettings::from_options(&options).unwrap();
        assert_eq!(decoded, settings);
    }

    #[test]
    fn null_options_decode_to_defaults() {
        let decoded = AloomaSettings::from_options(&Value::Null).unwrap();
        assert_eq!(decoded, AloomaSettings::default());
    }

    #[test]
    fn unexpected_options_fail_to_decode() {
        assert!(AloomaSettings::from_options(&json!({ "api_key": 42 })).is_err());
        assert!(AloomaSettings::from_options(&json!("just a string")).is_err());
    }
}
