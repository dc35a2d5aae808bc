use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::codec::{EncodableValue, MethodCall, MethodResponse};
use crate::kernel::Host;
use crate::platform::{VersionProbe, ViewHandle, platform_version_string};
use crate::plugin_system::{NativeInitializer, Plugin, PluginRegistrar, VersionRange};

pub const TEST_CHANNEL: &str = "test_plugin";

/// Plugin answering both bridge methods from what it captured at registration.
pub struct TestPlugin {
    view: Option<ViewHandle>,
    probe: Arc<dyn VersionProbe>,
}

impl TestPlugin {
    pub fn build(registrar: &dyn PluginRegistrar) -> Arc<dyn Plugin> {
        Arc::new(Self {
            view: registrar.view(),
            probe: registrar.version_probe(),
        })
    }
}

impl Plugin for TestPlugin {
    fn name(&self) -> &'static str {
        TEST_CHANNEL
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        vec![VersionRange::from_str("^0.1").unwrap()]
    }

    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            "getFlutterView" => MethodResponse::Success(EncodableValue::I64(
                self.view.map(ViewHandle::as_wire_id).unwrap_or(0),
            )),
            "getPlatformVersion" => {
                MethodResponse::Success(platform_version_string(self.probe.as_ref()).into())
            }
            "fail" => MethodResponse::Error {
                code: "failed".to_string(),
                message: None,
                details: call.arguments.clone(),
            },
            _ => MethodResponse::NotImplemented,
        }
    }
}

#[derive(Default)]
pub struct CountingInitializer {
    runs: AtomicUsize,
}

impl CountingInitializer {
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl NativeInitializer for CountingInitializer {
    fn name(&self) -> &str {
        "test_plugin_init"
    }

    fn initialize(&self) {
        self.runs.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn setup_host() -> Host {
    Host::new().expect("Failed to create host")
}
