// Broker Task - MQTT-Session mit Publish auf das Notification-Topic
//
// Der rust-mqtt Client borrowt Socket und Buffer für die Lebensdauer
// einer Session. Deshalb lebt er exklusiv in diesem Task; der Fan-out
// spricht ihn über das BrokerOp/BrokerOutcome-Channel-Paar an. Pro Op
// geht genau ein Outcome zurück - die Retry-Policy (ein Reconnect, ein
// Retry) liegt komplett beim BrokerPublisher im Core.

use defmt::{Debug2Format, error, info, warn};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer, with_timeout};

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use publisher_core::{BrokerLink, TransportError};

use crate::config::*;
use crate::tasks::wifi::wait_for_network;
use crate::{BrokerOp, BrokerOpReceiver, BrokerOpSender, BrokerOutcomeReceiver, BrokerOutcomeSender};

/// Wartezeit nach fehlgeschlagenem unaufgefordertem Verbindungsaufbau
const SESSION_RETRY_DELAY_SECS: u64 = 5;

// ============================================================================
// BrokerHandle: Channel-Client für den BrokerPublisher
// ============================================================================

/// BrokerLink-Implementierung über das Op/Outcome-Channel-Paar
///
/// Lebt im Fan-out Task und leitet connect/publish an den
/// Session-Task weiter. Jede Operation blockiert bis ihr Outcome
/// zurückkommt.
pub struct BrokerHandle {
    ops: BrokerOpSender,
    outcomes: BrokerOutcomeReceiver,
}

impl BrokerHandle {
    pub fn new(ops: BrokerOpSender, outcomes: BrokerOutcomeReceiver) -> Self {
        Self { ops, outcomes }
    }
}

impl BrokerLink for BrokerHandle {
    async fn connect(&mut self) -> Result<(), TransportError> {
        self.ops.send(BrokerOp::Reconnect).await;
        self.outcomes.receive().await
    }

    async fn publish(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let mut buf = heapless::Vec::new();
        // Payload stammt aus einer Message und passt damit immer
        if buf.extend_from_slice(payload).is_err() {
            return Err(TransportError::SendFailed);
        }
        self.ops.send(BrokerOp::Publish(buf)).await;
        self.outcomes.receive().await
    }
}

// ============================================================================
// Broker Session Task
// ============================================================================

/// Wie eine Session zu Ende ging
enum SessionEnd {
    /// Verbindungsaufbau gescheitert; nach Delay still neu versuchen
    Idle,
    /// Reconnect-Op empfangen; sofort neu verbinden und Outcome melden
    Reconnect,
}

/// MQTT Session Task - läuft parallel zu anderen Tasks
///
/// Baut die Broker-Verbindung auf (initial unaufgefordert, danach auf
/// Reconnect-Ops hin) und bedient Publish-Ops auf dem
/// Notification-Topic.
#[embassy_executor::task]
pub async fn broker_session_task(
    stack: &'static Stack<'static>,
    ops: BrokerOpReceiver,
    outcomes: BrokerOutcomeSender,
) {
    info!("MQTT: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("MQTT: Network ready");

    // Der erste Verbindungsaufbau passiert ohne anstehende Op,
    // darf also kein Outcome melden
    let mut ack_connect = false;

    loop {
        match run_session(stack, &ops, &outcomes, ack_connect).await {
            SessionEnd::Reconnect => {
                ack_connect = true;
            }
            SessionEnd::Idle => {
                ack_connect = false;
                Timer::after(Duration::from_secs(SESSION_RETRY_DELAY_SECS)).await;
            }
        }
    }
}

/// Eine komplette Session: verbinden, Ops bedienen, Ende melden
///
/// Die Buffer leben nur für diese Session - mit dem Rückgabewert
/// endet auch der Borrow des Clients auf Socket und Buffer.
async fn run_session(
    stack: &'static Stack<'static>,
    ops: &BrokerOpReceiver,
    outcomes: &BrokerOutcomeSender,
    ack_connect: bool,
) -> SessionEnd {
    // TCP- und MQTT-Buffer, session-scoped
    let mut rx_buffer = [0u8; 4096];
    let mut tx_buffer = [0u8; 4096];
    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    // DNS Lookup
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = match resolve_hostname(stack, MQTT_BROKER).await {
        Ok(ip) => ip,
        Err(e) => {
            error!("MQTT: DNS lookup failed: {}", e);
            return fail_session_open(ops, outcomes, ack_connect).await;
        }
    };
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    // TCP Connect
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(10)));

    if socket.connect((broker_ip, MQTT_PORT)).await.is_err() {
        error!("MQTT: TCP connect to {}:{} failed", MQTT_BROKER, MQTT_PORT);
        return fail_session_open(ops, outcomes, ack_connect).await;
    }
    info!("MQTT: TCP connected");

    // MQTT Client Configuration
    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.add_username(MQTT_USERNAME);
    config.add_password(MQTT_PASSWORD);
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    // MQTT CONNECT
    if client.connect_to_broker().await.is_err() {
        error!("MQTT: CONNECT handshake failed");
        return fail_session_open(ops, outcomes, ack_connect).await;
    }
    info!("MQTT: Connected to broker");

    if ack_connect {
        outcomes.send(Ok(())).await;
    }

    // Ops bedienen bis ein Reconnect verlangt wird
    loop {
        match ops.receive().await {
            BrokerOp::Publish(payload) => {
                let result = client
                    .send_message(MQTT_TOPIC, &payload, QualityOfService::QoS0, false)
                    .await;

                match result {
                    Ok(()) => {
                        info!("MQTT: Published {} bytes to '{}'", payload.len(), MQTT_TOPIC);
                        outcomes.send(Ok(())).await;
                    }
                    Err(e) => {
                        // Session bleibt bestehen; der Core entscheidet
                        // über Reconnect und Retry
                        warn!("MQTT: Publish failed: {}", Debug2Format(&e));
                        outcomes.send(Err(TransportError::SendFailed)).await;
                    }
                }
            }
            BrokerOp::Reconnect => {
                info!("MQTT: Reconnect requested, tearing down session");
                return SessionEnd::Reconnect;
            }
        }
    }
}

/// Gescheiterter Verbindungsaufbau: anstehende Ops sofort beantworten
///
/// Ohne das würde der Fan-out ewig auf ein Outcome warten, das nie
/// kommt. Eine anstehende Publish-Op wird mit NotConnected verworfen.
async fn fail_session_open(
    ops: &BrokerOpReceiver,
    outcomes: &BrokerOutcomeSender,
    ack_connect: bool,
) -> SessionEnd {
    if ack_connect {
        outcomes.send(Err(TransportError::ConnectFailed)).await;
    }
    while let Ok(op) = ops.try_receive() {
        let outcome = match op {
            BrokerOp::Publish(_) => Err(TransportError::NotConnected),
            BrokerOp::Reconnect => Err(TransportError::ConnectFailed),
        };
        outcomes.send(outcome).await;
    }
    SessionEnd::Idle
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, &'static str> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => {
            for addr in addrs {
                if let IpAddress::Ipv4(ipv4) = addr {
                    return Ok(ipv4);
                }
            }
            Err("no A record")
        }
        Ok(Err(_)) => Err("query failed"),
        Err(_) => Err("timeout"),
    }
}
