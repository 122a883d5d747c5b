/// Name given to the module created when no explicit name is supplied,
/// matching the module name the original AngularJS shim registered itself
/// under.
pub const DEFAULT_MODULE_NAME: &str = "analytics.alooma";
