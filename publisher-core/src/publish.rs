//! TransportPublisher-Varianten
//!
//! RadioPublisher: best effort, kein Retry.
//! BrokerPublisher: genau ein Reconnect + ein Retry nach dem ersten
//! Fehlschlag, danach wird die Message verworfen (kein Queuing).

use crate::traits::{BrokerLink, RadioLink, TransportPublisher};
use crate::types::{Message, TransportError};

/// Obergrenze an Publish-Versuchen pro Message beim Broker
/// (initialer Versuch + genau ein Retry nach Reconnect)
pub const MAX_PUBLISH_ATTEMPTS: u8 = 2;

/// Publisher für den Packet-Radio-Link (LoRa)
///
/// Ein Fehlschlag wird gemeldet und die Message verworfen -
/// der Funk-Link kennt kein Acknowledgment.
pub struct RadioPublisher<R: RadioLink> {
    link: R,
}

impl<R: RadioLink> RadioPublisher<R> {
    pub fn new(link: R) -> Self {
        Self { link }
    }

    pub fn link_ref(&self) -> &R {
        &self.link
    }
}

impl<R: RadioLink> TransportPublisher for RadioPublisher<R> {
    fn name(&self) -> &'static str {
        "LoRa"
    }

    async fn publish(&mut self, message: &Message) -> Result<(), TransportError> {
        self.link.send(message.as_bytes()).await
    }
}

/// Publisher für die Broker-Verbindung (MQTT)
///
/// Retry-Policy: schlägt der erste Publish fehl, wird genau einmal
/// reconnected und genau einmal dieselbe Message erneut versucht.
/// Schlägt auch das fehl, wird der Fehler gemeldet und die Message
/// verworfen - keine weiteren Versuche, kein Nachliefern.
pub struct BrokerPublisher<B: BrokerLink> {
    link: B,
}

impl<B: BrokerLink> BrokerPublisher<B> {
    pub fn new(link: B) -> Self {
        Self { link }
    }

    pub fn link_ref(&self) -> &B {
        &self.link
    }
}

impl<B: BrokerLink> TransportPublisher for BrokerPublisher<B> {
    fn name(&self) -> &'static str {
        "MQTT"
    }

    async fn publish(&mut self, message: &Message) -> Result<(), TransportError> {
        match self.link.publish(message.as_bytes()).await {
            Ok(()) => Ok(()),
            Err(_first) => {
                // Ein Reconnect, dann ein Retry derselben Message.
                // Schlägt schon der Reconnect fehl, gibt es keinen
                // zweiten Publish-Versuch.
                self.link.connect().await?;
                self.link.publish(message.as_bytes()).await
            }
        }
    }
}
