//! SignalGate - Single-Slot Signaling zwischen Triggern und Fan-out
//!
//! Binäre Semaphore-Semantik über `embassy_sync::signal::Signal`:
//! ein Slot, `signal()` ist idempotent solange bereits signalisiert.
//! Bewusst KEIN Mutex und KEINE Queue - mehrere Trigger-Bursts
//! kollabieren zu genau einer anstehenden Notification.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

/// Single-Slot Signal-Gate
///
/// Produzenten (Button-Poller, HTTP-Handler) rufen `signal()`,
/// der eine Fan-out-Konsument wartet mit `wait_and_consume()`.
///
/// # Constraint: genau ein Konsument
/// Pro `armed → signaled` Übergang löst genau EIN `wait_and_consume()`
/// auf. Mehrere Konsumenten würden um dieses eine Signal konkurrieren
/// und sich gegenseitig aushungern - das Design verlässt sich darauf,
/// dass nur der Fan-out-Task konsumiert.
pub struct SignalGate<M: RawMutex> {
    inner: Signal<M, ()>,
}

impl<M: RawMutex> SignalGate<M> {
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    /// Übergang armed → signaled; No-op wenn bereits signaled
    pub fn signal(&self) {
        self.inner.signal(());
    }

    /// Suspendiert den Aufrufer bis signaled, konsumiert das Signal
    /// (signaled → armed) und kehrt zurück. Kein Fehlerfall möglich.
    pub async fn wait_and_consume(&self) {
        self.inner.wait().await;
    }

    /// Non-blocking Variante: konsumiert ein anstehendes Signal falls
    /// vorhanden. Für Host-Tests der Coalescing-Eigenschaft.
    pub fn try_consume(&self) -> bool {
        self.inner.try_take().is_some()
    }

    /// Liest den Zustand ohne zu konsumieren
    pub fn is_signaled(&self) -> bool {
        self.inner.signaled()
    }
}

impl<M: RawMutex> Default for SignalGate<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_signal_then_consume() {
        let gate: SignalGate<NoopRawMutex> = SignalGate::new();
        assert!(!gate.is_signaled());

        gate.signal();
        assert!(gate.is_signaled());
        assert!(gate.try_consume());
        assert!(!gate.is_signaled());
    }

    #[test]
    fn test_burst_coalesces_to_one_signal() {
        let gate: SignalGate<NoopRawMutex> = SignalGate::new();

        // Rapid repeated signals dürfen keine Queue aufbauen
        gate.signal();
        gate.signal();
        gate.signal();

        assert!(gate.try_consume());
        assert!(!gate.try_consume());
    }

    #[test]
    fn test_consume_without_signal_is_empty() {
        let gate: SignalGate<NoopRawMutex> = SignalGate::new();
        assert!(!gate.try_consume());
    }
}
