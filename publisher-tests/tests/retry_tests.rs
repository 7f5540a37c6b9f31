//! Host-Tests für die Broker-Retry-Policy
//!
//! BrokerPublisher: genau ein Reconnect + ein Retry nach dem ersten
//! Fehlschlag, nie ein dritter Versuch für dieselbe Message.

use std::collections::VecDeque;

use embassy_futures::block_on;
use publisher_core::{
    BrokerLink, BrokerPublisher, MAX_PUBLISH_ATTEMPTS, Message, TransportError,
    TransportPublisher,
};

// ============================================================================
// Mock BrokerLink mit skriptbaren Ergebnissen
// ============================================================================

#[derive(Default)]
struct MockBrokerLink {
    /// Vorab festgelegte Ergebnisse für publish(); leer = Ok
    publish_script: VecDeque<Result<(), TransportError>>,
    /// Vorab festgelegte Ergebnisse für connect(); leer = Ok
    connect_script: VecDeque<Result<(), TransportError>>,
    publish_attempts: usize,
    connect_attempts: usize,
}

impl MockBrokerLink {
    fn scripted(
        publish: &[Result<(), TransportError>],
        connect: &[Result<(), TransportError>],
    ) -> Self {
        Self {
            publish_script: publish.iter().copied().collect(),
            connect_script: connect.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl BrokerLink for MockBrokerLink {
    async fn connect(&mut self) -> Result<(), TransportError> {
        self.connect_attempts += 1;
        self.connect_script.pop_front().unwrap_or(Ok(()))
    }

    async fn publish(&mut self, _payload: &[u8]) -> Result<(), TransportError> {
        self.publish_attempts += 1;
        self.publish_script.pop_front().unwrap_or(Ok(()))
    }
}

fn publish(publisher: &mut BrokerPublisher<MockBrokerLink>) -> Result<(), TransportError> {
    block_on(publisher.publish(&Message::new("Button pressed")))
}

// ============================================================================
// Tests
// ============================================================================

const SEND_FAILED: Result<(), TransportError> = Err(TransportError::SendFailed);
const CONNECT_FAILED: Result<(), TransportError> = Err(TransportError::ConnectFailed);

#[test]
fn test_success_on_first_attempt_skips_reconnect() {
    let mut publisher = BrokerPublisher::new(MockBrokerLink::default());

    assert_eq!(publish(&mut publisher), Ok(()));

    let link = publisher.link_ref();
    assert_eq!(link.publish_attempts, 1);
    assert_eq!(link.connect_attempts, 0);
}

#[test]
fn test_failure_triggers_one_reconnect_and_one_retry() {
    let link = MockBrokerLink::scripted(&[SEND_FAILED], &[]);
    let mut publisher = BrokerPublisher::new(link);

    // Erster Versuch scheitert, Reconnect klappt, Retry klappt
    assert_eq!(publish(&mut publisher), Ok(()));

    let link = publisher.link_ref();
    assert_eq!(link.publish_attempts, 2);
    assert_eq!(link.connect_attempts, 1);
}

#[test]
fn test_no_third_attempt_after_retry_failure() {
    let link = MockBrokerLink::scripted(&[SEND_FAILED, SEND_FAILED, Ok(())], &[]);
    let mut publisher = BrokerPublisher::new(link);

    assert_eq!(publish(&mut publisher), SEND_FAILED);

    // Genau MAX_PUBLISH_ATTEMPTS (= 2) Versuche, der dritte Eintrag im
    // Script bleibt unangetastet
    let link = publisher.link_ref();
    assert_eq!(link.publish_attempts, MAX_PUBLISH_ATTEMPTS as usize);
    assert_eq!(link.publish_script.len(), 1);
}

#[test]
fn test_failed_reconnect_skips_the_retry() {
    let link = MockBrokerLink::scripted(&[SEND_FAILED], &[CONNECT_FAILED]);
    let mut publisher = BrokerPublisher::new(link);

    assert_eq!(publish(&mut publisher), CONNECT_FAILED);

    let link = publisher.link_ref();
    assert_eq!(link.publish_attempts, 1);
    assert_eq!(link.connect_attempts, 1);
}

#[test]
fn test_next_message_gets_fresh_attempts() {
    let link = MockBrokerLink::scripted(&[SEND_FAILED, SEND_FAILED, Ok(())], &[]);
    let mut publisher = BrokerPublisher::new(link);

    // Erste Message wird nach zwei Fehlversuchen verworfen...
    assert!(publish(&mut publisher).is_err());
    // ...die nächste bekommt wieder ihre eigenen Versuche und klappt
    assert_eq!(publish(&mut publisher), Ok(()));
    assert_eq!(publisher.link_ref().publish_attempts, 3);
}
