//! Host-Tests für die Trigger-zu-Fanout-Koordination
//!
//! Spielt die End-to-End-Szenarien ohne Hardware durch: Button-Press
//! mit Doppel-Notification, HTTP-Routen gegen den Fan-out, Debounce
//! im Zusammenspiel mit dem Gate. Die "Scheduler-Disziplin" der
//! Firmware (Request-Channel vor Gate) wird hier von Hand nachgestellt.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use publisher_core::fanout::BUTTON_EVENT_MESSAGE;
use publisher_core::{
    ButtonDebounce, DeviceState, Fanout, Message, PublishRequest, Route, SignalGate,
    TransportError, TransportPublisher, apply_route,
};

// ============================================================================
// Mock TransportPublisher
// ============================================================================

type MessageLog = Rc<RefCell<Vec<String>>>;

struct MockPublisher {
    name: &'static str,
    log: MessageLog,
}

impl MockPublisher {
    fn new(name: &'static str) -> (Self, MessageLog) {
        let log: MessageLog = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                name,
                log: log.clone(),
            },
            log,
        )
    }
}

impl TransportPublisher for MockPublisher {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn publish(&mut self, message: &Message) -> Result<(), TransportError> {
        self.log.borrow_mut().push(message.as_str().to_string());
        Ok(())
    }
}

/// Nachgestellter Fan-out-Durchlauf: erst alle anstehenden Requests,
/// dann ein eventuell anstehendes Gate-Signal - dieselbe Reihenfolge
/// wie der select-Loop des Fan-out-Tasks.
fn drain(
    fanout: &mut Fanout<MockPublisher, MockPublisher>,
    queue: &mut VecDeque<PublishRequest>,
    gate: &SignalGate<NoopRawMutex>,
) {
    while let Some(request) = queue.pop_front() {
        block_on(fanout.dispatch(&request));
    }
    if gate.try_consume() {
        block_on(fanout.publish_all(&Message::new(BUTTON_EVENT_MESSAGE)));
    }
}

// ============================================================================
// Tests: Button-Press End-to-End
// ============================================================================

#[test]
fn test_button_press_produces_two_notifications_in_order() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let gate: SignalGate<NoopRawMutex> = SignalGate::new();
    let mut queue: VecDeque<PublishRequest> = VecDeque::new();
    let mut state = DeviceState::new();
    let mut debounce = ButtonDebounce::new(25);

    // Press erkannt: Toggle, zustands-spezifische Message, Gate-Signal
    assert!(debounce.poll(true));
    let on = state.toggle();
    assert!(on);
    queue.push_back(PublishRequest::all(state.button_message()));
    gate.signal();

    drain(&mut fanout, &mut queue, &gate);

    // Beide Transporte: erst die zustands-spezifische, dann die generische
    let expected = ["Button pressed-LED turned ON", "Button pressed"];
    assert_eq!(radio_log.borrow().as_slice(), expected);
    assert_eq!(broker_log.borrow().as_slice(), expected);
}

#[test]
fn test_press_burst_coalesces_generic_notifications() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, _) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let gate: SignalGate<NoopRawMutex> = SignalGate::new();
    let mut queue: VecDeque<PublishRequest> = VecDeque::new();
    let mut state = DeviceState::new();

    // Zwei Events bevor der Konsument dran war: zwei spezifische
    // Messages, aber nur EIN anstehendes Gate-Signal
    for _ in 0..2 {
        state.toggle();
        queue.push_back(PublishRequest::all(state.button_message()));
        gate.signal();
    }

    drain(&mut fanout, &mut queue, &gate);

    assert_eq!(
        radio_log.borrow().as_slice(),
        [
            "Button pressed-LED turned ON",
            "Button pressed-LED turned OFF",
            "Button pressed",
        ]
    );
}

#[test]
fn test_debounced_double_press_toggles_once() {
    let mut debounce = ButtonDebounce::new(25);
    let mut state = DeviceState::new();

    // Zwei Detektionen im Abstand < 250 ms (hier: direkt folgende Polls)
    if debounce.poll(true) {
        state.toggle();
    }
    if debounce.poll(true) {
        state.toggle();
    }

    assert!(state.is_on());
}

// ============================================================================
// Tests: HTTP-Routen gegen den Fan-out
// ============================================================================

#[test]
fn test_led_on_route_end_to_end() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let gate: SignalGate<NoopRawMutex> = SignalGate::new();
    let mut queue: VecDeque<PublishRequest> = VecDeque::new();
    let mut state = DeviceState::new();

    let route = Route::from_request(b"GET /led/on HTTP/1.1\r\n\r\n");
    let (_, request) = apply_route(route, &mut state);
    queue.extend(request);

    drain(&mut fanout, &mut queue, &gate);

    assert!(state.is_on());
    assert_eq!(radio_log.borrow().as_slice(), ["LED turned ON"]);
    assert_eq!(broker_log.borrow().as_slice(), ["LED turned ON"]);
}

#[test]
fn test_unknown_route_causes_no_transport_calls() {
    let (radio, radio_log) = MockPublisher::new("LoRa");
    let (broker, broker_log) = MockPublisher::new("MQTT");
    let mut fanout = Fanout::new(radio, broker);

    let gate: SignalGate<NoopRawMutex> = SignalGate::new();
    let mut queue: VecDeque<PublishRequest> = VecDeque::new();
    let mut state = DeviceState::new();

    let route = Route::from_request(b"GET /unknown HTTP/1.1\r\n\r\n");
    let (reply, request) = apply_route(route, &mut state);
    queue.extend(request);

    drain(&mut fanout, &mut queue, &gate);

    assert_eq!(reply, publisher_core::Reply::Text("404 Not Found"));
    assert!(!state.is_on());
    assert!(radio_log.borrow().is_empty());
    assert!(broker_log.borrow().is_empty());
}

#[test]
fn test_http_trigger_does_not_signal_the_gate() {
    // Die HTTP-Handler publishen direkt über den Request-Channel;
    // das Gate gehört ausschließlich dem Button-Pfad
    let gate: SignalGate<NoopRawMutex> = SignalGate::new();
    let mut state = DeviceState::new();

    let (_, request) = apply_route(Route::PublishAll, &mut state);
    assert!(request.is_some());
    assert!(!gate.is_signaled());
}
