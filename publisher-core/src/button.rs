//! Button-Entprellung als tick-basierte State Machine
//!
//! Der Poller tastet den Pin in festem Intervall ab (10 ms) und
//! meldet einen Press-Event nur beim Übergang idle → pressed.
//! Danach läuft ein Cooldown-Fenster (250 ms) in dem weitere
//! Detektionen ignoriert werden.

/// Entprell-Zustand des Button-Pollers
///
/// `poll()` wird einmal pro Abtast-Intervall mit dem rohen Pegel
/// aufgerufen. Die Erkennung ist level-getriggert:
/// bleibt der Button nach Ablauf des Cooldowns gedrückt, feuert der
/// nächste Poll erneut.
#[derive(Debug, Clone, Copy)]
pub struct ButtonDebounce {
    cooldown_polls: u16,
    remaining: u16,
}

impl ButtonDebounce {
    /// `cooldown_polls`: Anzahl Abtastungen die nach einem Event
    /// ignoriert werden (Cooldown-Dauer / Poll-Intervall)
    pub const fn new(cooldown_polls: u16) -> Self {
        Self {
            cooldown_polls,
            remaining: 0,
        }
    }

    /// Hilfsrechnung: Cooldown-Dauer in Abtastungen
    pub const fn polls_for(cooldown_ms: u64, poll_interval_ms: u64) -> u16 {
        (cooldown_ms / poll_interval_ms) as u16
    }

    /// Verarbeitet eine Abtastung; `true` = entprellter Press-Event
    pub fn poll(&mut self, pressed: bool) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
            return false;
        }
        if pressed {
            self.remaining = self.cooldown_polls;
            return true;
        }
        false
    }

    pub fn in_cooldown(&self) -> bool {
        self.remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 250 ms Cooldown bei 10 ms Poll-Intervall
    const COOLDOWN_POLLS: u16 = 25;

    #[test]
    fn test_press_fires_once() {
        let mut debounce = ButtonDebounce::new(COOLDOWN_POLLS);
        assert!(debounce.poll(true));
        assert!(debounce.in_cooldown());
    }

    #[test]
    fn test_presses_within_cooldown_are_ignored() {
        let mut debounce = ButtonDebounce::new(COOLDOWN_POLLS);
        assert!(debounce.poll(true));

        // Alle weiteren Detektionen innerhalb von 250 ms: ignoriert
        let mut events = 0;
        for _ in 0..COOLDOWN_POLLS {
            if debounce.poll(true) {
                events += 1;
            }
        }
        assert_eq!(events, 0);
    }

    #[test]
    fn test_fires_again_after_cooldown() {
        let mut debounce = ButtonDebounce::new(COOLDOWN_POLLS);
        assert!(debounce.poll(true));
        for _ in 0..COOLDOWN_POLLS {
            debounce.poll(false);
        }
        assert!(debounce.poll(true));
    }

    #[test]
    fn test_held_button_refires_after_cooldown() {
        // Level-getriggert: gehaltener Button feuert nach Ablauf des
        // Cooldowns erneut
        let mut debounce = ButtonDebounce::new(COOLDOWN_POLLS);
        let mut events = 0;
        for _ in 0..(2 * (COOLDOWN_POLLS as usize + 1)) {
            if debounce.poll(true) {
                events += 1;
            }
        }
        assert_eq!(events, 2);
    }

    #[test]
    fn test_idle_without_press_stays_idle() {
        let mut debounce = ButtonDebounce::new(COOLDOWN_POLLS);
        for _ in 0..100 {
            assert!(!debounce.poll(false));
        }
    }
}
