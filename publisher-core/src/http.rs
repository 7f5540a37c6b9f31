//! HTTP-Routing der Control Surface
//!
//! Feste Pfad-Tabelle, eine Request-Line, eine Response, Verbindung zu.
//! Die HTTP-Methode wird effektiv als GET behandelt.
//!
//! Bewusst beibehaltene Eigenheit: JEDE Response wird als
//! `HTTP/1.1 200 OK` geframed, auch die Not-Found-Antwort trägt den
//! 404-Text nur im Body (siehe DESIGN.md).

use crate::state::DeviceState;
use crate::types::{Message, PublishRequest};

/// Einzige Status-Line + Header die der Server je schreibt
pub const RESPONSE_HEADER: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n";

// Feste Response-Bodies der Pfad-Tabelle
pub const BODY_LED_ON: &str = "LED turned on";
pub const BODY_LED_OFF: &str = "LED turned off";
pub const BODY_PUBLISH_ALL: &str = "Published to all protocols";
pub const BODY_PUBLISH_LORA: &str = "Published to LoRa";
pub const BODY_PUBLISH_MQTT: &str = "Published to MQTT";
pub const BODY_NOT_FOUND: &str = "404 Not Found";

// Feste Notification-Texte der HTTP-Handler
pub const MSG_FROM_HTTP: &str = "Message from HTTP";
pub const MSG_LED_ON: &str = "LED turned ON";
pub const MSG_LED_OFF: &str = "LED turned OFF";

/// Route der Control Surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// `/` - Control-Page, keine Seiteneffekte
    ControlPage,
    /// `/led/on` - LED an + publish_all("LED turned ON")
    LedOn,
    /// `/led/off` - LED aus + publish_all("LED turned OFF")
    LedOff,
    /// `/led/status` - Zustand lesen, nichts publishen
    LedStatus,
    /// `/publish/all` - publish_all("Message from HTTP")
    PublishAll,
    /// `/publish/lora` - nur Radio, Gate und Broker werden umgangen
    PublishLora,
    /// `/publish/mqtt` - nur Broker, Gate und Radio werden umgangen
    PublishMqtt,
    /// Unbekannter Pfad oder kaputte Request-Line
    NotFound,
}

impl Route {
    /// Pfad → Route, exakte Matches ohne Query-Behandlung
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Route::ControlPage,
            "/led/on" => Route::LedOn,
            "/led/off" => Route::LedOff,
            "/led/status" => Route::LedStatus,
            "/publish/all" => Route::PublishAll,
            "/publish/lora" => Route::PublishLora,
            "/publish/mqtt" => Route::PublishMqtt,
            _ => Route::NotFound,
        }
    }

    /// Routet einen rohen Request-Puffer
    ///
    /// Eine Request-Line ohne extrahierbaren Pfad (fehlende Teile,
    /// kein UTF-8) wird als Routing-Fehler behandelt statt den Task
    /// zu beenden.
    pub fn from_request(raw: &[u8]) -> Self {
        match parse_request_path(raw) {
            Some(path) => Route::from_path(path),
            None => Route::NotFound,
        }
    }
}

/// Response-Inhalt eines Handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Control-Page-Markup (liegt beim Aufrufer, nicht in dieser Crate)
    Page,
    /// Fester Text-Body
    Text(&'static str),
}

/// Wendet eine Route auf den Device-Zustand an
///
/// Mutiert `state` wo die Route das verlangt und liefert den
/// Response-Body plus den gegebenenfalls auszulösenden Publish-Request.
/// Der Request wird vom Aufrufer an den Fan-out übergeben; `/led/on`
/// published bei JEDEM Aufruf, nicht nur bei Zustandswechsel.
pub fn apply_route(route: Route, state: &mut DeviceState) -> (Reply, Option<PublishRequest>) {
    match route {
        Route::ControlPage => (Reply::Page, None),
        Route::LedOn => {
            state.set(true);
            (
                Reply::Text(BODY_LED_ON),
                Some(PublishRequest::all(Message::new(MSG_LED_ON))),
            )
        }
        Route::LedOff => {
            state.set(false);
            (
                Reply::Text(BODY_LED_OFF),
                Some(PublishRequest::all(Message::new(MSG_LED_OFF))),
            )
        }
        Route::LedStatus => (Reply::Text(state.status_text()), None),
        Route::PublishAll => (
            Reply::Text(BODY_PUBLISH_ALL),
            Some(PublishRequest::all(Message::new(MSG_FROM_HTTP))),
        ),
        Route::PublishLora => (
            Reply::Text(BODY_PUBLISH_LORA),
            Some(PublishRequest::radio(Message::new(MSG_FROM_HTTP))),
        ),
        Route::PublishMqtt => (
            Reply::Text(BODY_PUBLISH_MQTT),
            Some(PublishRequest::broker(Message::new(MSG_FROM_HTTP))),
        ),
        Route::NotFound => (Reply::Text(BODY_NOT_FOUND), None),
    }
}

/// Extrahiert den Pfad aus der ersten Request-Line
///
/// Erwartet "METHOD SP PATH SP VERSION"; nur die erste Zeile wird
/// betrachtet, kein Body-Parsing.
pub fn parse_request_path(raw: &[u8]) -> Option<&str> {
    let text = core::str::from_utf8(raw).ok()?;
    let request_line = text.split("\r\n").next()?;

    let mut parts = request_line.split(' ');
    let _method = parts.next()?;
    let path = parts.next()?;
    if path.is_empty() {
        return None;
    }
    Some(path)
}
