//! Host-Tests für den Fan-out: Failure-Isolation und Dispatch
//!
//! Die Mocks implementieren TransportPublisher direkt und protokollieren
//! jede empfangene Message über ein geteiltes Handle.

use std::cell::RefCell;
use std::rc::Rc;

use embassy_futures::block_on;
use publisher_core::{
    Fanout, Message, PublishRequest, TransportError, TransportPublisher,
};

// ============================================================================
// Mock TransportPublisher
// ============================================================================

type MessageLog = Rc<RefCell<Vec<String>>>;

struct MockPublisher {
    name: &'static str,
    log: MessageLog,
    fail_all: bool,
}

impl MockPublisher {
    fn new(name: &'static str) -> (Self, MessageLog) {
        let log: MessageLog = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                name,
                log: log.clone(),
                fail_all: false,
            },
            log,
        )
    }

    fn failing(name: &'static str) -> (Self, MessageLog) {
        let (mut publisher, log) = Self::new(name);
        publisher.fail_all = true;
        (publisher, log)
    }
}

impl TransportPublisher for MockPublisher {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn publish(&mut self, message: &Message) -> Result<(), TransportError> {
        self.log.borrow_mut().push(message.as_str().to_string());
        if self.fail_all {
            return Err(TransportError::SendFailed);
        }
        Ok(())
    }
}

// ============================================================================
// Tests: publish_all
// ============================================================================

#[test]
fn test_publish_all_reaches_both_transports() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let report = block_on(fanout.publish_all(&Message::new("LED turned ON")));

    assert!(report.all_ok());
    assert_eq!(radio_log.borrow().as_slice(), ["LED turned ON"]);
    assert_eq!(broker_log.borrow().as_slice(), ["LED turned ON"]);
}

#[test]
fn test_radio_failure_does_not_stop_broker() {
    let (radio, _radio_log) = MockPublisher::failing("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let report = block_on(fanout.publish_all(&Message::new("hello")));

    assert_eq!(report.radio, Err(TransportError::SendFailed));
    assert_eq!(report.broker, Ok(()));
    // Der Broker hat dieselbe Message trotzdem bekommen
    assert_eq!(broker_log.borrow().as_slice(), ["hello"]);
}

#[test]
fn test_broker_failure_does_not_hide_radio_delivery() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, _broker_log) = MockPublisher::failing("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let report = block_on(fanout.publish_all(&Message::new("hello")));

    assert_eq!(report.radio, Ok(()));
    assert_eq!(report.broker, Err(TransportError::SendFailed));
    assert_eq!(radio_log.borrow().as_slice(), ["hello"]);
}

#[test]
fn test_publish_all_returns_after_both_attempts_even_if_both_fail() {
    let (radio, radio_log) = MockPublisher::failing("LoRa");
    let (broker, broker_log) = MockPublisher::failing("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let report = block_on(fanout.publish_all(&Message::new("x")));

    assert!(!report.all_ok());
    assert_eq!(radio_log.borrow().len(), 1);
    assert_eq!(broker_log.borrow().len(), 1);
}

// ============================================================================
// Tests: dispatch (gezielte Einzel-Transporte)
// ============================================================================

#[test]
fn test_dispatch_radio_only_bypasses_broker() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let request = PublishRequest::radio(Message::new("Message from HTTP"));
    let report = block_on(fanout.dispatch(&request));

    assert!(report.all_ok());
    assert_eq!(radio_log.borrow().as_slice(), ["Message from HTTP"]);
    assert!(broker_log.borrow().is_empty());
}

#[test]
fn test_dispatch_broker_only_bypasses_radio() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let request = PublishRequest::broker(Message::new("Message from HTTP"));
    block_on(fanout.dispatch(&request));

    assert!(radio_log.borrow().is_empty());
    assert_eq!(broker_log.borrow().as_slice(), ["Message from HTTP"]);
}

#[test]
fn test_dispatch_all_equals_publish_all() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let request = PublishRequest::all(Message::new("Message from HTTP"));
    block_on(fanout.dispatch(&request));

    assert_eq!(radio_log.borrow().as_slice(), ["Message from HTTP"]);
    assert_eq!(broker_log.borrow().as_slice(), ["Message from HTTP"]);
}
