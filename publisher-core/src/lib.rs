//! Publisher Core - Platform-agnostic Coordination Logic
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Typen, Traits und die komplette Trigger-zu-Fanout-Logik:
//! Signal-Gate, Publisher-Varianten mit Retry, Fan-out-Dispatch,
//! Button-Entprellung und das HTTP-Routing der Control Surface.

#![no_std]

pub mod button;
pub mod fanout;
pub mod gate;
pub mod http;
pub mod publish;
pub mod state;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use button::ButtonDebounce;
pub use fanout::{BUTTON_EVENT_MESSAGE, Fanout, FanoutReport};
pub use gate::SignalGate;
pub use http::{Reply, Route, apply_route};
pub use publish::{BrokerPublisher, MAX_PUBLISH_ATTEMPTS, RadioPublisher};
pub use state::DeviceState;
pub use traits::{BrokerLink, RadioLink, TransportPublisher};
pub use types::{MESSAGE_CAPACITY, Message, PublishRequest, PublishTarget, TransportError};
