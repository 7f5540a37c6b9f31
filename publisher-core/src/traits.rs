//! Transport Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zu den Transporten
//! ohne konkrete Implementierung.

use crate::types::{Message, TransportError};

/// Trait für den Radio-Link (LoRa)
///
/// Abstrahiert das rohe Senden eines Pakets über den Funk-Link.
///
/// # Implementierungen
/// - **Production:** Sx127x (SPI-Treiber in publisher-firmware)
/// - **Testing:** MockRadioLink (in-memory Mock)
#[allow(async_fn_in_trait)]
pub trait RadioLink {
    /// Sendet ein Paket; best effort, kein Acknowledgment
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

/// Trait für den Broker-Link (MQTT)
///
/// Abstrahiert die Verbindung zum Pub/Sub-Broker. Das Topic ist
/// Konfiguration des Links, nicht der Policy-Schicht.
///
/// # Implementierungen
/// - **Production:** BrokerHandle (Channel zum MQTT-Session-Task)
/// - **Testing:** MockBrokerLink (in-memory Mock)
#[allow(async_fn_in_trait)]
pub trait BrokerLink {
    /// Baut die Verbindung zum Broker (neu) auf
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Published ein Payload auf dem konfigurierten Topic
    async fn publish(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

/// Capability-Trait: "sende eine Message über einen Outbound-Kanal"
///
/// `publish` wirft nie über die eigene Grenze hinaus - jedes Ergebnis
/// kommt als `Result` zurück und wird vom Fan-out konsumiert.
#[allow(async_fn_in_trait)]
pub trait TransportPublisher {
    /// Name des Transports für Log-Ausgaben
    fn name(&self) -> &'static str;

    /// Versucht die Message zu senden; inklusive transport-eigener Retries
    async fn publish(&mut self, message: &Message) -> Result<(), TransportError>;
}
