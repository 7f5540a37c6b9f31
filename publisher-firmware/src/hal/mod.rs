// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe: die Status-LED mit
// gekoppeltem Gerätezustand und den SX127x LoRa-Transceiver.

pub mod indicator;
pub mod sx127x;

pub use indicator::Indicator;
pub use sx127x::{Sx127x, Sx127xError};
