//! The registration sequence shared by every plugin variant.
use std::sync::Arc;

use crate::channel::MethodChannel;
use crate::kernel::error::Result;
use crate::plugin_system::init::{InitGuard, InitPolicy, NativeInitializer, run_initializer};
use crate::plugin_system::registrar::PluginRegistrar;
use crate::plugin_system::traits::Plugin;

/// Registers one plugin with `registrar`.
///
/// Runs `initializer` according to `policy`, builds the plugin with `build`
/// (which sees the registrar, e.g. to capture its view), transfers ownership
/// to the registrar and finally opens the plugin's method channel. If the
/// registrar refuses the plugin no channel is opened.
pub fn register_with_registrar<F>(
    registrar: &dyn PluginRegistrar,
    policy: InitPolicy,
    guard: &InitGuard,
    initializer: &dyn NativeInitializer,
    build: F,
) -> Result<MethodChannel>
where
    F: FnOnce(&dyn PluginRegistrar) -> Arc<dyn Plugin>,
{
    run_initializer(policy, guard, initializer);

    let plugin = build(registrar);
    registrar.add_plugin(Arc::clone(&plugin))?;

    let channel = MethodChannel::standard(registrar.messenger(), plugin.name());
    attach_plugin(&channel, plugin);
    log::info!(
        "Registered '{}' with registrar {}",
        channel.name(),
        registrar.id()
    );
    Ok(channel)
}

/// Routes every call on `channel` to `plugin`.
pub fn attach_plugin(channel: &MethodChannel, plugin: Arc<dyn Plugin>) {
    channel.set_method_call_handler(move |call, result| {
        let response = plugin.handle_method_call(&call);
        result.respond_with(response);
    });
}
