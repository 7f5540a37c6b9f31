// SX127x LoRa-Transceiver Treiber (TX-only)
//
// Minimaler Treiber für den Sendepfad: Init auf 433 MHz / SF8 / BW125 /
// CR 4/5, dann FIFO füllen, TX-Mode, auf TxDone pollen. Kein RX, kein
// Interrupt-Pin - DIO0 bleibt unbeschaltet, TxDone wird per SPI gepollt.

use embassy_time::{Duration, Instant, Timer};
use embedded_hal::spi::SpiBus;
use esp_hal::gpio::Output;

use publisher_core::{RadioLink, TransportError};

use crate::config::{
    LORA_FREQUENCY_HZ, LORA_PREAMBLE_LENGTH, LORA_SPREADING_FACTOR, LORA_SYNC_WORD,
    LORA_TX_POWER_DBM, LORA_TX_TIMEOUT_MS,
};

// ============================================================================
// Register-Adressen (SX1276/77/78/79 Datenblatt, LoRa-Page)
// ============================================================================

const REG_FIFO: u8 = 0x00;
const REG_OP_MODE: u8 = 0x01;
const REG_FRF_MSB: u8 = 0x06;
const REG_FRF_MID: u8 = 0x07;
const REG_FRF_LSB: u8 = 0x08;
const REG_PA_CONFIG: u8 = 0x09;
const REG_FIFO_ADDR_PTR: u8 = 0x0D;
const REG_FIFO_TX_BASE_ADDR: u8 = 0x0E;
const REG_IRQ_FLAGS: u8 = 0x12;
const REG_MODEM_CONFIG_1: u8 = 0x1D;
const REG_MODEM_CONFIG_2: u8 = 0x1E;
const REG_PREAMBLE_MSB: u8 = 0x20;
const REG_PREAMBLE_LSB: u8 = 0x21;
const REG_PAYLOAD_LENGTH: u8 = 0x22;
const REG_MODEM_CONFIG_3: u8 = 0x26;
const REG_SYNC_WORD: u8 = 0x39;
const REG_VERSION: u8 = 0x42;

// OpMode-Bits
const MODE_LONG_RANGE: u8 = 0x80;
const MODE_SLEEP: u8 = 0x00;
const MODE_STDBY: u8 = 0x01;
const MODE_TX: u8 = 0x03;

// IRQ-Flags
const IRQ_TX_DONE: u8 = 0x08;

/// Chip-Revision laut REG_VERSION beim SX1276/77/78/79
const EXPECTED_VERSION: u8 = 0x12;

/// Maximale LoRa-Payload (FIFO-Größe)
const MAX_PAYLOAD_LEN: usize = 255;

/// Fehler-Typ für den SX127x-Treiber
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Sx127xError {
    /// SPI-Transfer fehlgeschlagen
    Spi,
    /// REG_VERSION lieferte einen unerwarteten Wert (Modul nicht verbunden?)
    VersionMismatch(u8),
    /// TxDone kam nicht innerhalb des Timeouts
    TxTimeout,
}

/// SX127x Transceiver hinter einem SPI-Bus mit manuellem CS
///
/// Generisch über SpiBus, damit der Treiber nicht an den esp-hal
/// SPI-Typ gebunden ist.
pub struct Sx127x<SPI: SpiBus> {
    spi: SPI,
    cs: Output<'static>,
    reset: Output<'static>,
}

impl<SPI: SpiBus> Sx127x<SPI> {
    pub fn new(spi: SPI, mut cs: Output<'static>, reset: Output<'static>) -> Self {
        cs.set_high();
        Self { spi, cs, reset }
    }

    /// Hardware-Reset, Versions-Check und Modem-Konfiguration
    ///
    /// Parameter: 433 MHz, SF8, BW 125 kHz, CR 4/5, Präambel 8,
    /// Sync Word 0x12, PA_BOOST mit minimaler Leistung.
    pub async fn init(&mut self) -> Result<(), Sx127xError> {
        // Reset-Puls: Pin mindestens 100 µs low, dann 5 ms Anlaufzeit
        self.reset.set_low();
        Timer::after(Duration::from_millis(1)).await;
        self.reset.set_high();
        Timer::after(Duration::from_millis(5)).await;

        let version = self.read_register(REG_VERSION)?;
        if version != EXPECTED_VERSION {
            return Err(Sx127xError::VersionMismatch(version));
        }

        // LoRa-Mode lässt sich nur im Sleep-Mode umschalten
        self.write_register(REG_OP_MODE, MODE_LONG_RANGE | MODE_SLEEP)?;
        Timer::after(Duration::from_millis(1)).await;

        // Trägerfrequenz: frf = freq * 2^19 / 32 MHz
        let frf = ((LORA_FREQUENCY_HZ as u64) << 19) / 32_000_000;
        self.write_register(REG_FRF_MSB, (frf >> 16) as u8)?;
        self.write_register(REG_FRF_MID, (frf >> 8) as u8)?;
        self.write_register(REG_FRF_LSB, frf as u8)?;

        // Modem: BW 125 kHz | CR 4/5 | expliziter Header
        self.write_register(REG_MODEM_CONFIG_1, 0x72)?;
        // Spreading Factor in den oberen 4 Bits
        self.write_register(REG_MODEM_CONFIG_2, LORA_SPREADING_FACTOR << 4)?;
        // AGC an
        self.write_register(REG_MODEM_CONFIG_3, 0x04)?;

        self.write_register(REG_PREAMBLE_MSB, (LORA_PREAMBLE_LENGTH >> 8) as u8)?;
        self.write_register(REG_PREAMBLE_LSB, LORA_PREAMBLE_LENGTH as u8)?;

        self.write_register(REG_SYNC_WORD, LORA_SYNC_WORD)?;

        // PA_BOOST-Ausgang, OutputPower = dBm - 2 (Bereich 2-17 dBm)
        self.write_register(REG_PA_CONFIG, 0x80 | (LORA_TX_POWER_DBM - 2))?;

        // TX nutzt das komplette FIFO ab Adresse 0
        self.write_register(REG_FIFO_TX_BASE_ADDR, 0x00)?;

        self.write_register(REG_OP_MODE, MODE_LONG_RANGE | MODE_STDBY)?;
        Timer::after(Duration::from_millis(1)).await;

        defmt::info!("LoRa: SX127x initialized (433 MHz, SF8, BW125)");
        Ok(())
    }

    /// Sendet eine Payload und wartet auf TxDone
    ///
    /// Payloads über 255 Bytes werden abgeschnitten (FIFO-Grenze).
    pub async fn transmit(&mut self, payload: &[u8]) -> Result<(), Sx127xError> {
        let payload = &payload[..payload.len().min(MAX_PAYLOAD_LEN)];

        self.write_register(REG_OP_MODE, MODE_LONG_RANGE | MODE_STDBY)?;

        // FIFO füllen
        self.write_register(REG_FIFO_ADDR_PTR, 0x00)?;
        for &byte in payload {
            self.write_register(REG_FIFO, byte)?;
        }
        self.write_register(REG_PAYLOAD_LENGTH, payload.len() as u8)?;

        // TX starten und auf TxDone pollen
        self.write_register(REG_OP_MODE, MODE_LONG_RANGE | MODE_TX)?;

        let deadline = Instant::now() + Duration::from_millis(LORA_TX_TIMEOUT_MS);
        loop {
            let flags = self.read_register(REG_IRQ_FLAGS)?;
            if flags & IRQ_TX_DONE != 0 {
                // TxDone-Flag durch Schreiben löschen
                self.write_register(REG_IRQ_FLAGS, IRQ_TX_DONE)?;
                return Ok(());
            }
            if Instant::now() >= deadline {
                self.write_register(REG_OP_MODE, MODE_LONG_RANGE | MODE_STDBY)?;
                return Err(Sx127xError::TxTimeout);
            }
            Timer::after(Duration::from_millis(1)).await;
        }
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Sx127xError> {
        // MSB 0 = Lese-Zugriff
        let mut buf = [address & 0x7F, 0x00];
        self.cs.set_low();
        let result = self.spi.transfer_in_place(&mut buf);
        self.cs.set_high();
        result.map_err(|_| Sx127xError::Spi)?;
        Ok(buf[1])
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Sx127xError> {
        // MSB 1 = Schreib-Zugriff
        let buf = [address | 0x80, value];
        self.cs.set_low();
        let result = self.spi.write(&buf);
        self.cs.set_high();
        result.map_err(|_| Sx127xError::Spi)
    }
}

impl<SPI: SpiBus> RadioLink for Sx127x<SPI> {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.transmit(payload).await.map_err(|e| {
            defmt::warn!("LoRa: TX failed: {}", e);
            TransportError::SendFailed
        })
    }
}
