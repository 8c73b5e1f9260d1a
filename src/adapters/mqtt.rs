//! MQTT transport adapter.
//!
//! Implements [`TransportPort`] on top of the WiFi station and an MQTT
//! client.  A connection attempt brings the station up first, then waits
//! for the broker session.  Publishing is fire-and-forget: failures are
//! logged and counted, never returned to the monitor core.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `EspMqttClient`; a background thread drains
//!   the connection and mirrors the session state into an `AtomicBool`.
//! - **all other targets**: an in-memory broker that records every publish
//!   and can be scripted to refuse connections.

#[cfg(target_os = "espidf")]
use std::sync::Arc;
#[cfg(target_os = "espidf")]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(target_os = "espidf")]
use std::time::{Duration, Instant};

#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
use log::{info, warn};

use super::wifi::WifiAdapter;
use crate::app::ports::{TransportError, TransportPort};
use crate::config::NetworkConfig;

/// How long one `try_connect` waits for the broker CONNACK.
#[cfg(target_os = "espidf")]
const SESSION_WAIT: Duration = Duration::from_secs(3);

/// One recorded publish (host simulation).
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub topic: String,
    pub body: Vec<u8>,
}

#[cfg(not(target_os = "espidf"))]
impl Published {
    pub fn body_str(&self) -> &str {
        core::str::from_utf8(&self.body).unwrap_or("")
    }
}

pub struct MqttTransport {
    wifi: WifiAdapter,
    network: NetworkConfig,
    publish_failures: u32,
    #[cfg(target_os = "espidf")]
    client: Option<EspMqttClient<'static>>,
    #[cfg(target_os = "espidf")]
    session_up: Arc<AtomicBool>,
    #[cfg(not(target_os = "espidf"))]
    sim_session_up: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_refusals_left: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_published: Vec<Published>,
}

impl MqttTransport {
    pub fn new(wifi: WifiAdapter, network: NetworkConfig) -> Self {
        Self {
            wifi,
            network,
            publish_failures: 0,
            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(target_os = "espidf")]
            session_up: Arc::new(AtomicBool::new(false)),
            #[cfg(not(target_os = "espidf"))]
            sim_session_up: false,
            #[cfg(not(target_os = "espidf"))]
            sim_refusals_left: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_published: Vec::new(),
        }
    }

    pub fn wifi(&self) -> &WifiAdapter {
        &self.wifi
    }

    pub fn wifi_mut(&mut self) -> &mut WifiAdapter {
        &mut self.wifi
    }

    /// Publishes the client rejected since boot.
    pub fn publish_failures(&self) -> u32 {
        self.publish_failures
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn session_up(&self) -> bool {
        self.session_up.load(Ordering::Acquire)
    }

    #[cfg(target_os = "espidf")]
    fn start_client(&mut self) -> Result<(), TransportError> {
        let conf = MqttClientConfiguration {
            client_id: Some(self.network.mqtt_client_id),
            ..Default::default()
        };
        let (client, mut conn) = EspMqttClient::new(self.network.mqtt_url, &conf).map_err(|e| {
            warn!("MQTT: client init failed: {:?}", e);
            TransportError::BrokerUnreachable
        })?;

        let session = Arc::clone(&self.session_up);
        std::thread::Builder::new()
            .name("mqtt-poll".into())
            .stack_size(6 * 1024)
            .spawn(move || {
                while let Ok(event) = conn.next() {
                    match event.payload() {
                        EventPayload::Connected(_) => {
                            info!("MQTT: session up");
                            session.store(true, Ordering::Release);
                        }
                        EventPayload::Disconnected => {
                            warn!("MQTT: session lost");
                            session.store(false, Ordering::Release);
                        }
                        EventPayload::Error(e) => warn!("MQTT: {:?}", e),
                        _ => {}
                    }
                }
                session.store(false, Ordering::Release);
                warn!("MQTT: connection closed, poll thread exiting");
            })
            .map_err(|e| {
                warn!("MQTT: poll thread spawn failed: {}", e);
                TransportError::BrokerUnreachable
            })?;

        self.client = Some(client);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn connect_broker(&mut self) -> Result<(), TransportError> {
        // The client reconnects on its own once created; we only wait.
        if self.client.is_none() {
            self.start_client()?;
        }
        let deadline = Instant::now() + SESSION_WAIT;
        while Instant::now() < deadline {
            if self.session_up() {
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        Err(TransportError::BrokerUnreachable)
    }

    #[cfg(target_os = "espidf")]
    fn send(&mut self, topic: &str, body: &[u8]) -> bool {
        match self.client.as_mut() {
            Some(client) => match client.publish(topic, QoS::AtLeastOnce, false, body) {
                Ok(_) => true,
                Err(e) => {
                    warn!("MQTT: publish to {} failed: {:?}", topic, e);
                    false
                }
            },
            None => false,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn session_up(&self) -> bool {
        self.sim_session_up
    }

    #[cfg(not(target_os = "espidf"))]
    fn connect_broker(&mut self) -> Result<(), TransportError> {
        if self.sim_refusals_left > 0 {
            self.sim_refusals_left -= 1;
            return Err(TransportError::BrokerUnreachable);
        }
        info!("MQTT(sim): session up as '{}'", self.network.mqtt_client_id);
        self.sim_session_up = true;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn send(&mut self, topic: &str, body: &[u8]) -> bool {
        if !self.sim_session_up {
            warn!("MQTT(sim): publish to {} while disconnected", topic);
            return false;
        }
        self.sim_published.push(Published {
            topic: topic.to_owned(),
            body: body.to_vec(),
        });
        true
    }

    /// Make the next `n` broker connection attempts fail.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_refuse_next(&mut self, n: u32) {
        self.sim_refusals_left = n;
    }

    /// Drop the broker session (the link stays up).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_drop_session(&mut self) {
        self.sim_session_up = false;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_published(&self) -> &[Published] {
        &self.sim_published
    }
}

// ── TransportPort implementation ──────────────────────────────

impl TransportPort for MqttTransport {
    fn is_connected(&self) -> bool {
        self.wifi.is_connected() && self.session_up()
    }

    fn try_connect(&mut self) -> Result<(), TransportError> {
        if self.wifi.connect().is_err() {
            return Err(TransportError::LinkDown);
        }
        info!("MQTT: connecting to {}", self.network.mqtt_url);
        self.connect_broker()
    }

    fn publish(&mut self, topic: &str, body: &[u8]) {
        if !self.send(topic, body) {
            self.publish_failures = self.publish_failures.saturating_add(1);
        }
    }
}
