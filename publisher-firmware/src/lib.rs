// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von publisher-core
pub use publisher_core::{
    BUTTON_EVENT_MESSAGE, BrokerLink, BrokerPublisher, ButtonDebounce, DeviceState, Fanout,
    FanoutReport, MESSAGE_CAPACITY, Message, PublishRequest, PublishTarget, RadioLink,
    RadioPublisher, Reply, Route, SignalGate, TransportError, TransportPublisher, apply_route,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Diese Type-Aliase vereinfachen die Lesbarkeit der Funktionssignaturen.
// Statt:  Sender<'static, NoopRawMutex, PublishRequest, 4>
// Nutze:  PublishRequestSender

/// Gate für Button-Events (ein Slot, verschmilzt Bursts zu einem Event)
/// NoopRawMutex reicht: alle Tasks laufen auf demselben Executor
pub type NotifyGate = SignalGate<NoopRawMutex>;

/// Channel für Publish-Requests (HTTP/Button → Fan-out Task)
/// - 4: Nachrichten-Kapazität (kurze Bursts puffern, dann Backpressure)
pub type PublishRequestChannel = Channel<NoopRawMutex, PublishRequest, 4>;

/// Sender für Publish-Requests (HTTP/Button → Fan-out Task)
pub type PublishRequestSender = Sender<'static, NoopRawMutex, PublishRequest, 4>;

/// Receiver für Publish-Requests (Fan-out Task empfängt)
pub type PublishRequestReceiver = Receiver<'static, NoopRawMutex, PublishRequest, 4>;

// ============================================================================
// Broker-Session Rendezvous
// ============================================================================
//
// Der rust-mqtt Client borrowt seine Buffer und den TcpSocket für die
// Lebensdauer einer Session. Deshalb lebt der Client exklusiv im
// Broker-Session-Task; der Fan-out Task spricht ihn über ein
// Op/Outcome-Channel-Paar an (genau ein Outcome pro Op).

/// Operation an die Broker-Session
pub enum BrokerOp {
    /// Publish einer Notification auf das konfigurierte Topic
    Publish(heapless::Vec<u8, MESSAGE_CAPACITY>),
    /// Session abreißen und neu verbinden
    Reconnect,
}

/// Ergebnis einer BrokerOp
pub type BrokerOutcome = Result<(), TransportError>;

/// Channel für Broker-Operationen (Fan-out → Session Task)
/// - 1: Rendezvous, der Fan-out wartet ohnehin auf das Outcome
pub type BrokerOpChannel = Channel<NoopRawMutex, BrokerOp, 1>;

/// Sender für Broker-Operationen
pub type BrokerOpSender = Sender<'static, NoopRawMutex, BrokerOp, 1>;

/// Receiver für Broker-Operationen (Session Task empfängt)
pub type BrokerOpReceiver = Receiver<'static, NoopRawMutex, BrokerOp, 1>;

/// Channel für Broker-Ergebnisse (Session Task → Fan-out)
pub type BrokerOutcomeChannel = Channel<NoopRawMutex, BrokerOutcome, 1>;

/// Sender für Broker-Ergebnisse
pub type BrokerOutcomeSender = Sender<'static, NoopRawMutex, BrokerOutcome, 1>;

/// Receiver für Broker-Ergebnisse (Fan-out wartet hierauf)
pub type BrokerOutcomeReceiver = Receiver<'static, NoopRawMutex, BrokerOutcome, 1>;
