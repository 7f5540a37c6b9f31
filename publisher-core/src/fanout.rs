//! Fan-out - eine Message an alle Transporte, mit Failure-Isolation
//!
//! Ein Fehlschlag eines Publishers verhindert nie den Aufruf des
//! nächsten und steigt nie über `publish_all` hinaus auf. Ergebnisse
//! kommen als `FanoutReport` zurück und werden vom Aufrufer geloggt.

use crate::traits::TransportPublisher;
use crate::types::{Message, PublishRequest, PublishTarget, TransportError};

/// Generische Meldung die der Gate-Konsument nach jedem konsumierten
/// Signal über alle Transporte schickt
pub const BUTTON_EVENT_MESSAGE: &str = "Button pressed";

/// Ergebnis eines Fan-out-Durchlaufs
///
/// Für gezielte Einzel-Publishes bleibt der nicht angesprochene
/// Transport `Ok(())`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutReport {
    pub radio: Result<(), TransportError>,
    pub broker: Result<(), TransportError>,
}

impl FanoutReport {
    pub fn all_ok(&self) -> bool {
        self.radio.is_ok() && self.broker.is_ok()
    }
}

/// Fan-out-Koordinator über beide Transporte
///
/// Besitzt die Publisher exklusiv; kein anderer Code fasst die
/// darunterliegenden Verbindungen an.
pub struct Fanout<R: TransportPublisher, B: TransportPublisher> {
    radio: R,
    broker: B,
}

impl<R: TransportPublisher, B: TransportPublisher> Fanout<R, B> {
    pub fn new(radio: R, broker: B) -> Self {
        Self { radio, broker }
    }

    /// Ruft `publish` auf jedem registrierten Publisher auf
    ///
    /// Kehrt erst zurück wenn beide versucht wurden, unabhängig vom
    /// Einzelergebnis. Feste Reihenfolge: erst Radio, dann Broker.
    pub async fn publish_all(&mut self, message: &Message) -> FanoutReport {
        let radio = self.radio.publish(message).await;
        let broker = self.broker.publish(message).await;
        FanoutReport { radio, broker }
    }

    /// Wendet einen Publish-Request an (voller Fan-out oder gezielter
    /// Einzel-Transport)
    pub async fn dispatch(&mut self, request: &PublishRequest) -> FanoutReport {
        match request.target {
            PublishTarget::All => self.publish_all(&request.message).await,
            PublishTarget::Radio => FanoutReport {
                radio: self.radio.publish(&request.message).await,
                broker: Ok(()),
            },
            PublishTarget::Broker => FanoutReport {
                radio: Ok(()),
                broker: self.broker.publish(&request.message).await,
            },
        }
    }

    pub fn radio_name(&self) -> &'static str {
        self.radio.name()
    }

    pub fn broker_name(&self) -> &'static str {
        self.broker.name()
    }
}
