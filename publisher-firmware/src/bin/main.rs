// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::rng::Rng;
use esp_hal::spi::Mode;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_unified_publisher::config::{EXTRA_HEAP_SIZE, LORA_SPI_FREQUENCY_KHZ, WIFI_HEAP_SIZE};
use esp_unified_publisher::hal::{Indicator, Sx127x};
use esp_unified_publisher::tasks::{
    BrokerHandle, broker_session_task, button_task, connection_task, dhcp_task, fanout_task,
    http_server_task, net_task,
};
use esp_unified_publisher::{
    BrokerOpChannel, BrokerOutcomeChannel, NotifyGate, PublishRequestChannel,
};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net
    // 6 Sockets: MQTT (1) + HTTP-Listener (1) + DNS/DHCP + Reserve
    static RESOURCES: static_cell::StaticCell<StackResources<6>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Status-LED + Gerätezustand (geteilt zwischen Button- und HTTP-Task)
    let led_pin = Output::new(peripherals.GPIO8, Level::Low, OutputConfig::default());
    static INDICATOR: static_cell::StaticCell<Indicator> = static_cell::StaticCell::new();
    let indicator = &*INDICATOR.init(Indicator::new(led_pin));

    // BOOT-Taster (active-low, interner Pull-Up)
    let button_pin = Input::new(
        peripherals.GPIO9,
        InputConfig::default().with_pull(Pull::Up),
    );

    // SX127x LoRa-Modul am SPI2
    let spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_khz(LORA_SPI_FREQUENCY_KHZ))
            .with_mode(Mode::_0),
    )
    .expect("Failed to initialize SPI")
    .with_sck(peripherals.GPIO19)
    .with_mosi(peripherals.GPIO18)
    .with_miso(peripherals.GPIO20);

    let lora_cs = Output::new(peripherals.GPIO21, Level::High, OutputConfig::default());
    let lora_reset = Output::new(peripherals.GPIO22, Level::High, OutputConfig::default());
    let lora = Sx127x::new(spi, lora_cs, lora_reset);

    // Koordinations-Primitiven: Gate (Button-Events) und Request-Channel
    static GATE: static_cell::StaticCell<NotifyGate> = static_cell::StaticCell::new();
    let gate = &*GATE.init(NotifyGate::new());

    static REQUESTS: static_cell::StaticCell<PublishRequestChannel> =
        static_cell::StaticCell::new();
    let requests = &*REQUESTS.init(PublishRequestChannel::new());

    // Op/Outcome-Channel-Paar zur Broker-Session
    static BROKER_OPS: static_cell::StaticCell<BrokerOpChannel> = static_cell::StaticCell::new();
    let broker_ops = &*BROKER_OPS.init(BrokerOpChannel::new());

    static BROKER_OUTCOMES: static_cell::StaticCell<BrokerOutcomeChannel> =
        static_cell::StaticCell::new();
    let broker_outcomes = &*BROKER_OUTCOMES.init(BrokerOutcomeChannel::new());

    let broker = BrokerHandle::new(broker_ops.sender(), broker_outcomes.receiver());

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Spawn Broker-Session (besitzt den MQTT-Client exklusiv)
    spawner
        .spawn(broker_session_task(
            stack,
            broker_ops.receiver(),
            broker_outcomes.sender(),
        ))
        .unwrap();

    // Spawn Fan-out (besitzt beide Publisher, konsumiert Gate + Requests)
    spawner
        .spawn(fanout_task(lora, broker, requests.receiver(), gate))
        .unwrap();

    // Spawn Button Task (toggelt LED, triggert Notifications)
    spawner
        .spawn(button_task(button_pin, indicator, requests.sender(), gate))
        .unwrap();

    // Spawn HTTP Server (eine Verbindung zur Zeit, Port 80)
    spawner
        .spawn(http_server_task(stack, indicator, requests.sender()))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
