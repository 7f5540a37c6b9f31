// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die Status-LED (Push-Pull Output)
pub const LED_GPIO_PIN: u8 = 8;

// ============================================================================
// Button Konfiguration
// ============================================================================

/// GPIO-Pin für den Button (BOOT-Taster, active-low mit Pull-Up)
pub const BUTTON_GPIO_PIN: u8 = 9;

/// Poll-Intervall für den Button in Millisekunden
pub const BUTTON_POLL_INTERVAL_MS: u64 = 10;

/// Cooldown nach erkanntem Press in Millisekunden
/// Innerhalb dieses Fensters werden weitere Detektionen ignoriert
pub const BUTTON_COOLDOWN_MS: u64 = 250;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// Gesamt-Heap: ~100 KB für WiFi-Stack

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
/// Wird zur Build-Zeit aus der Environment Variable MQTT_BROKER geladen
/// Setze diese in .env file (siehe .env.example)
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt), 8883 (TLS)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
/// Eindeutige Kennung für diesen ESP32-C6
/// Wird zur Build-Zeit aus der Environment Variable MQTT_CLIENT_ID geladen
/// Setze diese in .env file (siehe .env.example)
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Username für die Broker-Authentifizierung
/// Wird zur Build-Zeit aus der Environment Variable MQTT_USERNAME geladen
/// Setze diese in .env file (siehe .env.example)
pub const MQTT_USERNAME: &str = env!(
    "MQTT_USERNAME",
    "MQTT Username nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Passwort für die Broker-Authentifizierung
/// Wird zur Build-Zeit aus der Environment Variable MQTT_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const MQTT_PASSWORD: &str = env!(
    "MQTT_PASSWORD",
    "MQTT Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Publish Topic für alle Notifications
pub const MQTT_TOPIC: &str = "notification";

/// MQTT Keep-Alive in Sekunden
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// MQTT Buffer-Größe in Bytes
/// Muss groß genug für MQTT-Pakete sein
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// HTTP Server Port
pub const HTTP_PORT: u16 = 80;

/// HTTP Buffer-Größe in Bytes
/// Für die Request-Line und die Response-Header
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
/// Für eingehende TCP-Daten vom Client
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
/// Für ausgehende TCP-Daten zum Client
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// TCP Socket Timeout in Sekunden
/// Hängende Clients geben den Server nach dieser Zeit wieder frei
pub const HTTP_SOCKET_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// LoRa Konfiguration (SX127x)
// ============================================================================

/// Trägerfrequenz in Hz (433 MHz ISM-Band)
pub const LORA_FREQUENCY_HZ: u32 = 433_000_000;

/// Sendeleistung in dBm (PA_BOOST, 2-17 dBm)
pub const LORA_TX_POWER_DBM: u8 = 2;

/// Spreading Factor (SF7-SF12)
pub const LORA_SPREADING_FACTOR: u8 = 8;

/// Präambel-Länge in Symbolen
pub const LORA_PREAMBLE_LENGTH: u16 = 8;

/// Sync Word (0x12 = privates Netz, 0x34 = LoRaWAN)
pub const LORA_SYNC_WORD: u8 = 0x12;

/// Timeout für einen TX-Vorgang in Millisekunden
pub const LORA_TX_TIMEOUT_MS: u64 = 2000;

/// SPI Taktfrequenz für das Funkmodul in kHz
pub const LORA_SPI_FREQUENCY_KHZ: u32 = 10_000;

/// SPI-Pins zum SX127x Funkmodul
pub const LORA_SCK_GPIO_PIN: u8 = 19;
pub const LORA_MOSI_GPIO_PIN: u8 = 18;
pub const LORA_MISO_GPIO_PIN: u8 = 20;
pub const LORA_CS_GPIO_PIN: u8 = 21;
pub const LORA_RESET_GPIO_PIN: u8 = 22;
