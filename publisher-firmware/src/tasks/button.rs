// Button Task - Pollt den BOOT-Taster und löst Notifications aus
use defmt::info;
use embassy_time::{Duration, Timer};
use esp_hal::gpio::Input;

use publisher_core::{ButtonDebounce, PublishRequest};

use crate::config::{BUTTON_COOLDOWN_MS, BUTTON_POLL_INTERVAL_MS};
use crate::hal::Indicator;
use crate::{NotifyGate, PublishRequestSender};

/// Button Task - läuft parallel zu anderen Tasks
///
/// Pollt den Taster alle 10 ms. Ein erkannter Press (active-low,
/// Cooldown 250 ms):
/// - toggelt LED und Gerätezustand über den Indicator
/// - schickt die zustands-spezifische Notification an den Fan-out
/// - signalisiert das Gate für die generische "Button pressed"-Meldung
///
/// Gehaltener Taster feuert nach Ablauf des Cooldowns erneut.
#[embassy_executor::task]
pub async fn button_task(
    button: Input<'static>,
    indicator: &'static Indicator,
    requests: PublishRequestSender,
    gate: &'static NotifyGate,
) {
    info!(
        "Button: Task started (poll every {} ms)",
        BUTTON_POLL_INTERVAL_MS
    );

    let mut debounce = ButtonDebounce::new(ButtonDebounce::polls_for(
        BUTTON_COOLDOWN_MS,
        BUTTON_POLL_INTERVAL_MS,
    ));

    loop {
        // BOOT-Taster ist active-low (Pull-Up, Drücken zieht auf GND)
        let pressed = button.is_low();

        if debounce.poll(pressed) {
            let on = indicator.toggle();
            info!("Button: Pressed, LED is now {}", if on { "ON" } else { "OFF" });

            requests
                .send(PublishRequest::all(indicator.button_message()))
                .await;
            gate.signal();
        }

        Timer::after(Duration::from_millis(BUTTON_POLL_INTERVAL_MS)).await;
    }
}
