//! Host-Tests für das SignalGate
//!
//! Laufen auf dem Host (x86_64); der async Wait-Pfad wird von Hand
//! gepollt, die Coalescing-Eigenschaft über die non-blocking API geprüft.

use core::pin::pin;
use core::task::{Context, Poll, Waker};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use publisher_core::SignalGate;

fn noop_cx() -> Context<'static> {
    Context::from_waker(Waker::noop())
}

// ============================================================================
// Tests: Coalescing (ein Slot, keine Queue)
// ============================================================================

#[test]
fn test_signal_burst_unblocks_exactly_one_consume() {
    let gate: SignalGate<NoopRawMutex> = SignalGate::new();

    // Beliebig viele signal() vor dem ersten Konsum...
    for _ in 0..10 {
        gate.signal();
    }

    // ...lösen genau einen Konsum aus
    assert!(gate.try_consume());
    assert!(!gate.try_consume());
}

#[test]
fn test_each_signal_transition_yields_one_consume() {
    let gate: SignalGate<NoopRawMutex> = SignalGate::new();

    gate.signal();
    assert!(gate.try_consume());

    // Nach dem Konsum ist das Gate wieder armed
    gate.signal();
    assert!(gate.try_consume());
    assert!(!gate.try_consume());
}

// ============================================================================
// Tests: async Wait-Pfad
// ============================================================================

#[test]
fn test_wait_suspends_until_signaled() {
    let gate: SignalGate<NoopRawMutex> = SignalGate::new();
    let mut cx = noop_cx();

    let mut fut = pin!(gate.wait_and_consume());
    assert_eq!(fut.as_mut().poll(&mut cx), Poll::Pending);

    gate.signal();
    assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(()));

    // Das Signal wurde atomar konsumiert
    assert!(!gate.is_signaled());
}

#[test]
fn test_wait_consumes_coalesced_burst_once() {
    let gate: SignalGate<NoopRawMutex> = SignalGate::new();
    let mut cx = noop_cx();

    gate.signal();
    gate.signal();
    gate.signal();

    {
        let mut fut = pin!(gate.wait_and_consume());
        assert_eq!(fut.as_mut().poll(&mut cx), Poll::Ready(()));
    }

    // Der Burst war EIN Übergang armed → signaled: ein zweiter Wait hängt
    let mut second = pin!(gate.wait_and_consume());
    assert_eq!(second.as_mut().poll(&mut cx), Poll::Pending);
}
