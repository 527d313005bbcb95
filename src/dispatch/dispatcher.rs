//! Command dispatcher implementation

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::command::Command;
use super::race::race;
use crate::launcher::LauncherClient;
use crate::native::{CallbackRegistry, NativeChannel};
use crate::store::ConfigStore;
use crate::transport::{TransportKind, TransportProbe};
use crate::{Error, Result};

/// Version string the Remote backend reports for `get-version`
pub const REMOTE_BROWSER_VERSION: &str = "139.0.0.0";

/// Normalized command result: every branch of every transport resolves to
/// this one shape
#[derive(Debug, Clone, serde::Serialize)]
pub struct Response {
    pub data: Value,
}

impl Response {
    fn of(data: Value) -> Self {
        Self { data }
    }

    fn ok() -> Self {
        Self::of(Value::String("ok".to_string()))
    }

    fn null() -> Self {
        Self::of(Value::Null)
    }
}

/// The command bridge
///
/// Routes commands to the native channel (token + registry + timeout race)
/// or the launcher REST service, and normalizes both into [`Response`].
#[derive(Debug)]
pub struct CommandDispatcher {
    probe: TransportProbe,
    channel: Option<Arc<dyn NativeChannel>>,
    registry: Arc<CallbackRegistry>,
    launcher: LauncherClient,
    store: Arc<ConfigStore>,
    default_timeout: Duration,
}

impl CommandDispatcher {
    /// Create a dispatcher; the transport is probed once here and never again
    pub fn new(
        channel: Option<Arc<dyn NativeChannel>>,
        registry: Arc<CallbackRegistry>,
        launcher: LauncherClient,
        store: Arc<ConfigStore>,
        default_timeout: Duration,
    ) -> Self {
        let probe = TransportProbe::detect(channel.as_ref());
        Self {
            probe,
            channel,
            registry,
            launcher,
            store,
            default_timeout,
        }
    }

    /// The transport this dispatcher settled on
    pub fn transport(&self) -> TransportKind {
        self.probe.kind()
    }

    /// The registry host responses must be delivered into
    pub fn registry(&self) -> Arc<CallbackRegistry> {
        Arc::clone(&self.registry)
    }

    /// Dispatch with the default timeout
    pub async fn dispatch(&self, command: Command, params: Vec<Value>) -> Result<Response> {
        self.dispatch_with_timeout(command, params, self.default_timeout)
            .await
    }

    /// Dispatch with an explicit timeout
    pub async fn dispatch_with_timeout(
        &self,
        command: Command,
        params: Vec<Value>,
        timeout: Duration,
    ) -> Result<Response> {
        match self.probe.kind() {
            TransportKind::Native => {
                self.dispatch_native(command.wire_name(), params, timeout)
                    .await
            }
            TransportKind::Remote => self.dispatch_remote(command, params).await,
        }
    }

    /// Dispatch by raw command name
    ///
    /// On the native transport any name is forwarded verbatim; only the
    /// Remote backend has a closed command set, where an unrecognized name
    /// resolves `{ data: null }` with a diagnostic, never an error.
    pub async fn dispatch_named(&self, name: &str, params: Vec<Value>) -> Result<Response> {
        match Command::from_name(name) {
            Some(command) => self.dispatch(command, params).await,
            None if self.probe.is_native() => {
                self.dispatch_native(name, params, self.default_timeout)
                    .await
            }
            None => {
                warn!("Unknown command: {}", name);
                Ok(Response::null())
            }
        }
    }

    /// Native path: register a token, invoke, race the response
    async fn dispatch_native(
        &self,
        method: &str,
        params: Vec<Value>,
        timeout: Duration,
    ) -> Result<Response> {
        let channel = self
            .channel
            .as_ref()
            .ok_or_else(|| Error::internal("native transport selected without a channel"))?;

        let token = CallbackRegistry::next_token();
        let receiver = self.registry.register(&token, method).await;

        let mut args = Vec::with_capacity(params.len() + 1);
        args.push(Value::String(token.clone()));
        args.extend(params);

        debug!("Native call {} ({})", method, token);
        if let Err(e) = channel.invoke(method, args).await {
            self.registry.discard(&token).await;
            return Err(e);
        }

        match race(receiver, timeout, method).await {
            Ok(Ok(value)) => Ok(Response::of(value)),
            Ok(Err(_)) => Err(Error::transport(format!(
                "native channel dropped call {}",
                method
            ))),
            Err(timeout_err) => {
                // The call is abandoned, not cancelled: drop the entry so a
                // late response finds nothing to resolve.
                self.registry.discard(&token).await;
                Err(timeout_err)
            }
        }
    }

    /// Remote path: fixed mapping from command to launcher/store behavior
    async fn dispatch_remote(&self, command: Command, params: Vec<Value>) -> Result<Response> {
        debug!("Remote command {:?}", command);

        match command {
            Command::Launch => {
                let id = param_id(&params)?;
                let profile = self
                    .store
                    .find_profile(id)
                    .await
                    .ok_or(Error::ProfileNotFound(id))?;
                let result = self.launcher.launch(&profile).await?;
                Ok(Response::of(result))
            }

            Command::ListProfiles => {
                let profiles = self.store.list_profiles().await;
                Ok(Response::of(serde_json::json!({ "users": profiles })))
            }

            // Writes go through ConfigStore directly; acknowledged as a no-op.
            Command::SetProfiles => Ok(Response::ok()),

            Command::ListRunning => match self.launcher.running().await {
                Ok(running) => Ok(Response::of(running)),
                Err(e) => {
                    warn!("Listing running instances failed: {}", e);
                    Ok(Response::of(serde_json::json!([])))
                }
            },

            Command::DeleteInstance => {
                let id = param_id(&params)?;
                if let Err(e) = self.launcher.stop(id).await {
                    warn!("Best-effort stop of instance {} failed: {}", id, e);
                }
                Ok(Response::ok())
            }

            Command::GetGlobalData => {
                Ok(Response::of(Value::Object(self.store.global_data().await)))
            }

            Command::SetGlobalData => {
                let key = params
                    .first()
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| Error::configuration("set-global-data requires a key"))?;
                let value = params.get(1).cloned().unwrap_or(Value::Null);
                self.store.set_global(key, value).await?;
                Ok(Response::ok())
            }

            Command::GetVersion => Ok(Response::of(Value::String(
                REMOTE_BROWSER_VERSION.to_string(),
            ))),

            Command::CheckProxy => {
                let alive = self.launcher.status().await.is_ok();
                Ok(Response::of(Value::Bool(alive)))
            }

            Command::SetGeo => {
                info!("setIpGeo is not supported by the launcher backend");
                Ok(Response::ok())
            }
        }
    }
}

/// Extract a profile/instance id from the first positional parameter
fn param_id(params: &[Value]) -> Result<u64> {
    let first = params
        .first()
        .ok_or_else(|| Error::configuration("command requires an id parameter"))?;

    match first {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| Error::configuration("id must be a positive integer")),
        Value::String(s) => s
            .parse()
            .map_err(|_| Error::configuration(format!("invalid id: {}", s))),
        _ => Err(Error::configuration("id must be a number or string")),
    }
}
