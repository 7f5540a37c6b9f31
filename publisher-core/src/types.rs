//! Core Types für die Trigger-zu-Fanout-Koordination
//!
//! Datenstrukturen ohne Hardware-Dependencies

use heapless::String;

/// Maximale Länge eines Notification-Payloads in Bytes
///
/// Reicht für alle festen Meldungen ("Button pressed-LED turned ON" etc.)
/// mit großzügiger Reserve. Längere Texte werden abgeschnitten.
pub const MESSAGE_CAPACITY: usize = 192;

/// Outbound Notification-Payload
///
/// Einmal konstruiert unveränderlich; wird per Event erzeugt und nach dem
/// Versand über alle Transporte verworfen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String<MESSAGE_CAPACITY>,
}

impl Message {
    /// Erstellt eine Message aus einem Text
    ///
    /// Text länger als `MESSAGE_CAPACITY` wird an einer Zeichengrenze
    /// abgeschnitten statt einen Fehler zu liefern - ein zu langer
    /// Notification-Text darf den Versand nicht verhindern.
    pub fn new(text: &str) -> Self {
        let mut buf = String::new();
        for ch in text.chars() {
            if buf.push(ch).is_err() {
                break;
            }
        }
        Self { text: buf }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Ziel eines Publish-Requests
///
/// Die Control Surface kann gezielt einen einzelnen Transport ansprechen
/// (`/publish/lora`, `/publish/mqtt`) oder den vollen Fan-out auslösen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishTarget {
    All,
    Radio,
    Broker,
}

/// Publish-Request von einer Trigger-Quelle an den Fan-out-Task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub target: PublishTarget,
    pub message: Message,
}

impl PublishRequest {
    pub fn all(message: impl Into<Message>) -> Self {
        Self {
            target: PublishTarget::All,
            message: message.into(),
        }
    }

    pub fn radio(message: impl Into<Message>) -> Self {
        Self {
            target: PublishTarget::Radio,
            message: message.into(),
        }
    }

    pub fn broker(message: impl Into<Message>) -> Self {
        Self {
            target: PublishTarget::Broker,
            message: message.into(),
        }
    }
}

/// Fehler-Typ für Transport-Operationen
///
/// Wird von den Links an der Task-Grenze aus den konkreten Fehlern
/// (DNS, TCP, MQTT, SPI) erzeugt. Verlässt nie den Fan-out:
/// `publish_all` protokolliert Fehler, propagiert sie aber nicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Keine aktive Verbindung zum Gegenüber
    NotConnected,
    /// Verbindungsaufbau (Reconnect) fehlgeschlagen
    ConnectFailed,
    /// Senden fehlgeschlagen
    SendFailed,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Message {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TransportError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TransportError::NotConnected => defmt::write!(fmt, "not connected"),
            TransportError::ConnectFailed => defmt::write!(fmt, "connect failed"),
            TransportError::SendFailed => defmt::write!(fmt, "send failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PublishTarget {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PublishTarget::All => defmt::write!(fmt, "all"),
            PublishTarget::Radio => defmt::write!(fmt, "lora"),
            PublishTarget::Broker => defmt::write!(fmt, "mqtt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_keeps_short_text() {
        let msg = Message::new("LED turned ON");
        assert_eq!(msg.as_str(), "LED turned ON");
    }

    #[test]
    fn test_message_truncates_oversized_text() {
        let mut long = heapless::String::<512>::new();
        for _ in 0..300 {
            long.push('x').unwrap();
        }
        let msg = Message::new(long.as_str());
        assert_eq!(msg.as_str().len(), MESSAGE_CAPACITY);
    }
}
