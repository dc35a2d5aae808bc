use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::channel::error::ChannelError;
use crate::channel::{BinaryMessenger, BinaryReply};
use crate::codec::{MethodCall, MethodCodec, MethodResponse, StandardMethodCodec};
use crate::kernel::constants;
use crate::kernel::error::{Error, HostLifecyclePhase, Result};
use crate::platform::{StaticVersionProbe, VersionProbe, ViewHandle};
use crate::plugin_system::registrar::{HostRegistrar, PluginRegistrar, RegistrarId};
use crate::plugin_system::version::ApiVersion;
use crate::storage::BridgeConfig;

/// In-process host application.
///
/// Hands out one registrar per window and delivers encoded method calls to
/// the channel of a given window.
pub struct Host {
    registrars: Mutex<Vec<Arc<HostRegistrar>>>,
    next_id: AtomicU64,
    api_version: ApiVersion,
    probe: Arc<dyn VersionProbe>,
    codec: StandardMethodCodec,
    shut_down: AtomicBool,
}

impl Host {
    /// Creates a host whose OS version is unknown.
    pub fn new() -> Result<Self> {
        Self::with_version_probe(Arc::new(StaticVersionProbe::unknown()))
    }

    pub fn with_version_probe(probe: Arc<dyn VersionProbe>) -> Result<Self> {
        log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);
        let api_version = ApiVersion::from_str(constants::API_VERSION)
            .map_err(crate::plugin_system::error::PluginSystemError::from)?;
        log::debug!("Bridge API version {}", api_version);

        Ok(Self {
            registrars: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            api_version,
            probe,
            codec: StandardMethodCodec::new(),
            shut_down: AtomicBool::new(false),
        })
    }

    /// Creates a host with the OS version configured in `config`.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        Self::with_version_probe(config.version_probe()?)
    }

    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Creates a registrar for a window, optionally backed by a native view.
    pub async fn create_registrar(&self, view: Option<ViewHandle>) -> Result<Arc<HostRegistrar>> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(Error::HostLifecycleError {
                phase: HostLifecyclePhase::Registration,
                message: "Host has been shut down".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let registrar = Arc::new(HostRegistrar::new(
            id,
            view,
            Arc::clone(&self.probe),
            self.api_version.clone(),
        ));
        self.registrars.lock().await.push(Arc::clone(&registrar));

        match view {
            Some(view) => log::debug!("Created registrar {} for view {}", id, view),
            None => log::debug!("Created registrar {} without a view", id),
        }
        Ok(registrar)
    }

    pub async fn registrar(&self, id: RegistrarId) -> Option<Arc<HostRegistrar>> {
        let registrars = self.registrars.lock().await;
        registrars.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn registrar_count(&self) -> usize {
        self.registrars.lock().await.len()
    }

    /// Plugins owned by registrar `id`, in registration order.
    pub async fn registrar_plugins(&self, id: RegistrarId) -> Option<Vec<String>> {
        self.registrar(id).await.map(|r| r.plugin_names())
    }

    /// Encodes `call`, delivers it on `channel` of registrar `id` and decodes the reply.
    ///
    /// The empty reply from an installed handler is
    /// [`MethodResponse::NotImplemented`]; a channel without a handler is
    /// [`Error::ChannelNotFound`].
    pub async fn invoke_method(
        &self,
        id: RegistrarId,
        channel: &str,
        call: &MethodCall,
    ) -> Result<MethodResponse> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(Error::HostLifecycleError {
                phase: HostLifecyclePhase::Delivery,
                message: "Host has been shut down".to_string(),
            });
        }
        let messenger = self
            .registrar(id)
            .await
            .ok_or(Error::RegistrarNotFound(id))?
            .host_messenger();
        if !messenger.has_handler(channel) {
            return Err(Error::ChannelNotFound(channel.to_string()));
        }

        let message = self.codec.encode_method_call(call)?;
        let (reply, receiver) = BinaryReply::channel(channel);
        log::debug!("Invoking '{}' on channel '{}' of registrar {}", call.method, channel, id);
        if !messenger.deliver(channel, &message, reply) {
            return Err(Error::ChannelNotFound(channel.to_string()));
        }

        let bytes = receiver.await.map_err(|_| ChannelError::ReplyLost {
            channel: channel.to_string(),
        })?;
        let response = self.codec.decode_response(&bytes)?;
        log::trace!("Reply on channel '{}': {:?}", channel, response);
        Ok(response)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    /// Tears registrars down in reverse creation order, detaching every handler.
    pub async fn shutdown(&self) -> Result<()> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            log::debug!("Host already shut down");
            return Ok(());
        }

        log::info!("Shutting down host...");
        let mut registrars = self.registrars.lock().await;
        while let Some(registrar) = registrars.pop() {
            log::debug!("Tearing down registrar {}", registrar.id());
            registrar.teardown();
        }
        log::info!("Host shutdown complete.");
        Ok(())
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("api_version", &self.api_version)
            .field("registrars_created", &self.next_id.load(Ordering::SeqCst).saturating_sub(1))
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}
