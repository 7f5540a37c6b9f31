// WiFi Task - Netzwerk-Anbindung für Broker und Control Surface
//
// Die Assoziation ist Vorbedingung für MQTT und HTTP; beide Tasks
// warten über wait_for_network() bis hier eine IP steht. Der Funk-Link
// (LoRa) hängt NICHT am WLAN und sendet auch ohne Verbindung.
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice};

use crate::config::{WIFI_PASSWORD, WIFI_SSID};

/// Wartezeit nach einem fehlgeschlagenen Assoziations-Schritt
const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// WiFi Connection Task
///
/// Hält die Station-Verbindung am Leben: konfigurieren, starten,
/// assoziieren, auf Disconnect warten, von vorn. Der Task gibt nie
/// auf; Broker- und HTTP-Task warten derweil in wait_for_network().
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("WiFi: Bringing up station interface");

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            let client_config = ModeConfig::Client(
                ClientConfig::default()
                    .with_ssid(WIFI_SSID.into())
                    .with_password(WIFI_PASSWORD.into()),
            );

            if let Err(e) = controller.set_config(&client_config) {
                error!("WiFi: Station config rejected: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            if let Err(e) = controller.start_async().await {
                error!("WiFi: Controller start failed: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            info!("WiFi: Station started");
        }

        info!("WiFi: Associating with '{}'...", WIFI_SSID);
        match controller.connect_async().await {
            Ok(_) => {
                info!("WiFi: Associated");
            }
            Err(e) => {
                error!("WiFi: Association failed: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }
        }

        // Verbunden bleiben bis der AP uns rauswirft
        controller
            .wait_for_event(esp_radio::wifi::WifiEvent::StaDisconnected)
            .await;
        warn!("WiFi: Lost association, reconnecting...");

        Timer::after(Duration::from_secs(2)).await;
    }
}

/// Network Task
///
/// Treibt den embassy-net Stack: prozessiert ein- und ausgehende
/// Pakete für MQTT-Socket, HTTP-Listener und DNS.
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Loggt die Netzwerk-Konfiguration sobald der DHCP-Server eine
/// Adresse vergeben hat - ab dann ist die Control Surface erreichbar.
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() {
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }

    info!("WiFi: Link is up, waiting for IP address...");

    loop {
        if let Some(config) = stack.config_v4() {
            info!("WiFi: Got IP address!");
            info!("  IP:      {}", Debug2Format(&config.address.address()));
            info!("  Gateway: {}", Debug2Format(&config.gateway));
            info!("  DNS:     {}", Debug2Format(&config.dns_servers));
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}

/// Wartet bis Netzwerk-Verbindung verfügbar ist
///
/// Prüft kontinuierlich Link-Status und DHCP-Konfiguration; Broker-
/// und HTTP-Task blockieren hierauf bevor sie Sockets öffnen.
pub async fn wait_for_network(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() && stack.config_v4().is_some() {
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}
