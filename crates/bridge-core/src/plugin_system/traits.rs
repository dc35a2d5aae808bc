use crate::codec::{MethodCall, MethodResponse};
use crate::plugin_system::version::VersionRange;

/// A native plugin attached to a host registrar.
///
/// The host owns the instance once it is registered and keeps it alive for as
/// long as its channel can receive calls.
pub trait Plugin: Send + Sync {
    /// Name of the plugin; also the name of its method channel.
    fn name(&self) -> &'static str;

    /// The version of the plugin
    fn version(&self) -> &str;

    /// Bridge API versions this plugin works with.
    fn compatible_api_versions(&self) -> Vec<VersionRange>;

    /// Methods answered with something other than "not implemented".
    fn supported_methods(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Answers one call. Runs synchronously on the delivering thread and
    /// produces exactly one response; unknown methods get
    /// [`MethodResponse::NotImplemented`].
    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse;
}
