// Indicator: Status-LED plus DeviceState hinter einem blocking Mutex
//
// Button-Task und HTTP-Task greifen beide auf LED und Zustand zu.
// Beide Zugriffe sind kurz und synchron, deshalb reicht ein
// blocking_mutex mit RefCell (NoopRawMutex: ein Executor, ein Core).

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use esp_hal::gpio::Output;

use publisher_core::{DeviceState, Message, PublishRequest, Reply, Route, apply_route};

struct IndicatorInner {
    pin: Output<'static>,
    state: DeviceState,
}

/// Status-LED mit gekoppeltem Gerätezustand
///
/// Der LED-Pegel folgt immer dem DeviceState: jede Zustandsänderung
/// schreibt sofort den Pin. Es gibt keinen Weg, die beiden zu
/// desynchronisieren.
pub struct Indicator {
    inner: Mutex<NoopRawMutex, RefCell<IndicatorInner>>,
}

impl Indicator {
    /// Übernimmt den LED-Pin; Startzustand ist aus
    pub fn new(mut pin: Output<'static>) -> Self {
        pin.set_low();
        Self {
            inner: Mutex::new(RefCell::new(IndicatorInner {
                pin,
                state: DeviceState::new(),
            })),
        }
    }

    /// Setzt den Zustand explizit und zieht den Pin nach
    pub fn set(&self, on: bool) {
        self.inner.lock(|inner| {
            let inner = &mut *inner.borrow_mut();
            inner.state.set(on);
            Self::drive(&mut inner.pin, on);
        });
    }

    /// Invertiert den Zustand; gibt den neuen Zustand zurück
    pub fn toggle(&self) -> bool {
        self.inner.lock(|inner| {
            let inner = &mut *inner.borrow_mut();
            let on = inner.state.toggle();
            Self::drive(&mut inner.pin, on);
            on
        })
    }

    pub fn is_on(&self) -> bool {
        self.inner.lock(|inner| inner.borrow().state.is_on())
    }

    /// Statustext für /led/status ("LED is ON" / "LED is OFF")
    pub fn status_text(&self) -> &'static str {
        self.inner.lock(|inner| inner.borrow().state.status_text())
    }

    /// Notification-Text nach einem Button-Toggle
    pub fn button_message(&self) -> Message {
        self.inner
            .lock(|inner| inner.borrow().state.button_message())
    }

    /// Wendet eine HTTP-Route auf den Zustand an und zieht den Pin nach
    ///
    /// Gibt die Reply für den Client und den eventuell auszulösenden
    /// PublishRequest zurück (wie publisher_core::apply_route).
    pub fn apply(&self, route: Route) -> (Reply, Option<PublishRequest>) {
        self.inner.lock(|inner| {
            let inner = &mut *inner.borrow_mut();
            let result = apply_route(route, &mut inner.state);
            let on = inner.state.is_on();
            Self::drive(&mut inner.pin, on);
            result
        })
    }

    fn drive(pin: &mut Output<'static>, on: bool) {
        if on {
            pin.set_high();
        } else {
            pin.set_low();
        }
    }
}
