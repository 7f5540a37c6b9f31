//! DeviceState - Zustand der Indikator-LED
//!
//! Reiner Zustand ohne Hardware-Dependencies. Die Pin-Ansteuerung
//! übernimmt der Indicator-Wrapper in publisher-firmware.

use crate::types::Message;

/// An/Aus-Zustand der Indikator-LED
///
/// Wird nur von den Trigger-Quellen (Button-Poller, HTTP-Handler)
/// mutiert; lesen darf jeder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceState {
    on: bool,
}

impl DeviceState {
    pub const fn new() -> Self {
        Self { on: false }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set(&mut self, on: bool) {
        self.on = on;
    }

    /// Invertiert den Zustand und liefert den neuen Wert
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Statustext für `/led/status`
    pub fn status_text(&self) -> &'static str {
        if self.on { "LED is ON" } else { "LED is OFF" }
    }

    /// Zustands-spezifische Meldung die der Button-Poller sofort
    /// nach dem Toggle über alle Transporte schickt
    pub fn button_message(&self) -> Message {
        Message::new(if self.on {
            "Button pressed-LED turned ON"
        } else {
            "Button pressed-LED turned OFF"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_off() {
        let state = DeviceState::new();
        assert!(!state.is_on());
        assert_eq!(state.status_text(), "LED is OFF");
    }

    #[test]
    fn test_toggle_roundtrip() {
        let mut state = DeviceState::new();
        assert!(state.toggle());
        assert!(!state.toggle());
    }

    #[test]
    fn test_set_is_unconditional() {
        let mut state = DeviceState::new();
        state.set(true);
        state.set(true);
        assert!(state.is_on());
        assert_eq!(state.status_text(), "LED is ON");
    }

    #[test]
    fn test_button_message_follows_state() {
        let mut state = DeviceState::new();
        state.toggle();
        assert_eq!(state.button_message().as_str(), "Button pressed-LED turned ON");
        state.toggle();
        assert_eq!(state.button_message().as_str(), "Button pressed-LED turned OFF");
    }
}
