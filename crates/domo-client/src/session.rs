//! Controller session and command dispatch
//!
//! A [`Session`] owns the session identifier issued at login and the
//! sequence counter (`cseq`) the controller uses to order requests. Every
//! dispatching method takes `&mut self`, so a session can only have one
//! request in flight and the controller always observes a strictly
//! increasing `cseq`. Share a session between tasks through
//! [`SharedSession`].

use crate::http::HttpTransport;
use crate::items::ItemCatalog;
use crate::transport::Transport;
use domo_config::DomoConfig;
use domo_core::entities::{
    AnalogInput, Camera, FeatureList, LightFloor, ListPayload, Relay, ThermoFloor, Timer, User,
    UserList,
};
use domo_core::{
    client_id, resolve_light_id, season_params, switch_params, thermostat_params,
    validate_action_params, validate_response, ActId, Command, DomoError, DomoResult, Envelope,
    Season, SwitchKind, ThermoMode, INITIAL_CSEQ,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// A session shared between tasks; the mutex serializes dispatch
pub type SharedSession = Arc<tokio::sync::Mutex<Session>>;

/// HTTP status the reachability probe must return
const PROBE_OK: u16 = 200;

/// Logical session with an Eti/Domo controller
pub struct Session {
    host: String,
    transport: Arc<dyn Transport>,
    session_id: String,
    cseq: u64,
    items: ItemCatalog,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("session_id", &self.session_id)
            .field("cseq", &self.cseq)
            .field("items", &self.items.len())
            .finish()
    }
}

impl Session {
    /// Probe the configured controller over HTTP and return an
    /// unauthenticated session
    pub async fn connect(config: &DomoConfig) -> DomoResult<Self> {
        let base_url = config.base_url();
        let transport = HttpTransport::new(base_url.clone(), config.timeout())?;
        Self::with_transport(base_url, Arc::new(transport)).await
    }

    /// Connect and log in with the configured credentials
    pub async fn open(config: &DomoConfig) -> DomoResult<Self> {
        let mut session = Self::connect(config).await?;
        session.login(&config.username, &config.password).await?;
        Ok(session)
    }

    /// Probe `host` through `transport` and return an unauthenticated session
    ///
    /// Fails with `ServerUnavailable` when the probe errors or answers with
    /// anything but 200.
    #[instrument(skip_all, fields(host = %host.as_ref()))]
    pub async fn with_transport(
        host: impl AsRef<str>,
        transport: Arc<dyn Transport>,
    ) -> DomoResult<Self> {
        let host = host.as_ref().to_string();

        match transport.probe().await {
            Ok(PROBE_OK) => {}
            Ok(status) => {
                warn!(status, "Controller probe returned unexpected status");
                return Err(DomoError::ServerUnavailable {
                    host,
                    reason: format!("probe returned HTTP {status}"),
                });
            }
            Err(e) => {
                warn!(error = %e, "Controller probe failed");
                return Err(DomoError::ServerUnavailable {
                    host,
                    reason: e.to_string(),
                });
            }
        }

        debug!("Controller reachable");

        Ok(Self {
            host,
            transport,
            session_id: String::new(),
            cseq: INITIAL_CSEQ,
            items: ItemCatalog::new(),
        })
    }

    /// Wrap the session for sharing between tasks
    pub fn into_shared(self) -> SharedSession {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Identifier issued at login, empty until then
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Sequence number the next command will carry
    pub fn cseq(&self) -> u64 {
        self.cseq
    }

    pub fn is_authenticated(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// Result of the last successful [`Session::refresh_all`]
    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    /// Register with the controller
    ///
    /// On success the issued session id is stored; the sequence counter is
    /// left alone. Any rejection yields `UnauthorizedLogin` and leaves the
    /// session unauthenticated. A session that is already authenticated
    /// keeps its id and the call is refused.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> DomoResult<()> {
        if self.is_authenticated() {
            return Err(DomoError::rejected("session is already authenticated"));
        }

        let envelope = Envelope::registration(username, password);
        let response = self.transport.post_command(&envelope.to_json()?).await?;

        let unauthorized = || DomoError::UnauthorizedLogin {
            username: username.to_string(),
        };

        let response = validate_response(response).map_err(|e| {
            warn!(error = %e, "Login rejected");
            unauthorized()
        })?;

        match client_id(&response) {
            Some(id) => {
                self.session_id = id.to_string();
                info!(session_id = %self.session_id, "Logged in");
                Ok(())
            }
            None => {
                warn!("Login acknowledged without a client id");
                Err(unauthorized())
            }
        }
    }

    /// Ping the controller with the current session id
    ///
    /// Returns whether the controller still recognises the session. The
    /// sequence counter is not consumed.
    pub async fn keep_alive(&mut self) -> DomoResult<bool> {
        self.ensure_authenticated()?;

        let envelope = Envelope::keep_alive(self.session_id.as_str());
        let response = self.transport.post_command(&envelope.to_json()?).await?;

        match validate_response(response) {
            Ok(_) => Ok(true),
            Err(e) if e.is_request_error() => {
                debug!(error = %e, "Keep-alive not acknowledged");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Dispatch a catalog command by symbolic name
    ///
    /// `extra` is merged into the nested message after the command's default
    /// parameters. Returns the full acknowledged response. State-changing
    /// commands are followed by [`Session::refresh_all`], with the same
    /// caveat as [`Session::switch`].
    pub async fn execute(&mut self, name: &str, extra: Map<String, Value>) -> DomoResult<Value> {
        let command = Command::resolve(name)?;
        self.execute_command(command, extra).await
    }

    /// Dispatch a catalog command, refreshing the item catalog after a
    /// state-changing one
    pub async fn execute_command(
        &mut self,
        command: Command,
        extra: Map<String, Value>,
    ) -> DomoResult<Value> {
        let response = self.dispatch(command, extra).await?;
        if command.is_mutating() {
            self.refresh_all().await?;
        }
        Ok(response)
    }

    /// Send one command and validate the answer
    ///
    /// The sequence counter advances only when the controller acknowledges
    /// the command, and never for the user listing.
    #[instrument(skip(self, extra), fields(cmd_name = command.wire_name(), cseq = self.cseq))]
    async fn dispatch(&mut self, command: Command, extra: Map<String, Value>) -> DomoResult<Value> {
        self.ensure_authenticated()?;
        validate_action_params(command, &extra)?;

        let envelope = Envelope::for_command(command, &self.session_id, self.cseq, extra);
        let body = envelope.to_json()?;
        trace!(envelope = %body, "Dispatching");

        let response = self.transport.post_command(&body).await?;
        let response = validate_response(response).map_err(|e| {
            warn!(error = %e, "Command rejected");
            e
        })?;

        if command.advances_cseq() {
            self.cseq += 1;
        }
        debug!(next_cseq = self.cseq, "Command acknowledged");

        Ok(response)
    }

    /// Re-pull every list the session may see
    ///
    /// The feature list decides which categories are fetched. The stored
    /// catalog is replaced only when every list call succeeds.
    #[instrument(skip(self))]
    pub async fn refresh_all(&mut self) -> DomoResult<()> {
        let features = self.features().await?;
        let mut items = ItemCatalog::new();

        for feature in features {
            let Some(command) = Command::for_feature(&feature) else {
                debug!(feature = %feature, "No list command for feature, skipping");
                continue;
            };
            let payload = self.dispatch(command, Map::new()).await?;
            items.insert(feature, payload);
        }

        debug!(categories = items.len(), "Item catalog refreshed");
        self.items = items;
        Ok(())
    }

    /// Switch a light or relay, then refresh the item catalog
    ///
    /// An error after the switch was acknowledged comes from the refresh:
    /// the device has already changed state while [`Session::items`] still
    /// holds the previous catalog.
    pub async fn switch(&mut self, kind: SwitchKind, act_id: ActId, on: bool) -> DomoResult<Value> {
        let params = switch_params(act_id, on);
        self.execute_command(kind.command(), params).await
    }

    /// Set a thermostat zone's mode and set-point, then refresh the item
    /// catalog
    ///
    /// As with [`Session::switch`], a refresh failure is reported after the
    /// zone was already reconfigured.
    pub async fn configure_thermostat(
        &mut self,
        act_id: ActId,
        mode: ThermoMode,
        celsius: f64,
    ) -> DomoResult<Value> {
        let params = thermostat_params(act_id, mode, celsius)?;
        self.execute_command(Command::ThermostatZoneConfig, params).await
    }

    /// Change the plant season, then refresh the item catalog
    ///
    /// As with [`Session::switch`], a refresh failure is reported after the
    /// season was already changed.
    pub async fn set_season(&mut self, season: Season) -> DomoResult<Value> {
        self.execute_command(Command::ThermostatSeason, season_params(season)).await
    }

    /// Switch a light addressed by floor, room and light name
    pub async fn switch_light_by_name(
        &mut self,
        floor: &str,
        room: &str,
        light: &str,
        on: bool,
    ) -> DomoResult<Value> {
        let act_id = self.resolve_light_id(floor, room, light).await?;
        self.switch(SwitchKind::Light, act_id, on).await
    }

    /// Look a light up in a freshly fetched lights tree
    pub async fn resolve_light_id(
        &mut self,
        floor: &str,
        room: &str,
        light: &str,
    ) -> DomoResult<ActId> {
        let floors = self.lights().await?;
        resolve_light_id(&floors, floor, room, light)
    }

    /// Look a light up in the cached lights tree without a network call
    pub fn cached_light_id(&self, floor: &str, room: &str, light: &str) -> DomoResult<ActId> {
        let floors = match self.items.get(Command::Lights.symbol()) {
            Some(payload) => decode::<ListPayload<LightFloor>>(payload.clone())?.array,
            None => Vec::new(),
        };
        resolve_light_id(&floors, floor, room, light)
    }

    pub async fn lights(&mut self) -> DomoResult<Vec<LightFloor>> {
        self.list(Command::Lights).await
    }

    pub async fn thermostats(&mut self) -> DomoResult<Vec<ThermoFloor>> {
        self.list(Command::Thermoregulation).await
    }

    pub async fn timers(&mut self) -> DomoResult<Vec<Timer>> {
        self.list(Command::Timers).await
    }

    pub async fn analog_inputs(&mut self) -> DomoResult<Vec<AnalogInput>> {
        self.list(Command::AnalogInputs).await
    }

    pub async fn relays(&mut self) -> DomoResult<Vec<Relay>> {
        self.list(Command::Relays).await
    }

    pub async fn cameras(&mut self) -> DomoResult<Vec<Camera>> {
        self.list(Command::Cameras).await
    }

    pub async fn users(&mut self) -> DomoResult<Vec<User>> {
        let response = self.dispatch(Command::Users, Map::new()).await?;
        Ok(decode::<UserList>(response)?.sl_users_list)
    }

    /// Categories the session is permitted to see
    pub async fn features(&mut self) -> DomoResult<Vec<String>> {
        let response = self.dispatch(Command::Features, Map::new()).await?;
        Ok(decode::<FeatureList>(response)?.list)
    }

    async fn list<T: DeserializeOwned>(&mut self, command: Command) -> DomoResult<Vec<T>> {
        let response = self.dispatch(command, Map::new()).await?;
        Ok(decode::<ListPayload<T>>(response)?.array)
    }

    fn ensure_authenticated(&self) -> DomoResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(DomoError::NotAuthenticated)
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> DomoResult<T> {
    Ok(serde_json::from_value(value)?)
}
