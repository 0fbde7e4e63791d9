//! Segnalazione dello stato della configurazione tramite il LED del CYW43.
//!
//! * LED acceso fisso: configurazione valida.
//! * Gruppi di lampeggi: configurazione mancante o non valida, il numero di
//!   lampeggi indica il tipo di errore (vedi [`blink_count`]).

use cyw43::Control;
use embassy_time::{Duration, Ticker, Timer};
use netconfig::{ConfigError, Key, NetworkConfig};

pub const ELAPSED_SECS: u64 = 60;

const BLINK: Duration = Duration::from_millis(250);
const PAUSE: Duration = Duration::from_secs(2);

/// Esito del caricamento della configurazione al boot.
pub enum Status {
    Ready(NetworkConfig),
    Fault(ConfigError),
}

/// Numero di lampeggi per ogni tipo di errore.
///
/// * 2 - credenziali WiFi mancanti o ancora quelle del template
/// * 3 - indirizzo Ethernet mancante
/// * 4 - valore presente ma non valido
pub fn blink_count(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingConfiguration {
            key: Key::WifiSsid | Key::WifiPassword,
            ..
        } => 2,
        ConfigError::MissingConfiguration { .. } => 3,
        ConfigError::InvalidValue { .. } => 4,
    }
}

#[embassy_executor::task]
/// Task che mostra lo stato sul LED e lo logga periodicamente
///
/// # Argomenti
/// * `control` - Controller del chip CYW43 (il LED è sul GPIO 0)
/// * `status` - Esito del caricamento della configurazione
///
/// # Ritorna
/// * ! - Non ritorna mai
pub async fn status_task(mut control: Control<'static>, status: Status) -> ! {
    match status {
        Status::Ready(config) => {
            control.gpio_set(0, true).await;
            let mut ticker = Ticker::every(Duration::from_secs(ELAPSED_SECS));
            loop {
                log::info!("[ready] {config}");
                ticker.next().await;
            }
        }
        Status::Fault(err) => {
            let blinks = blink_count(&err);
            loop {
                log::error!("{err}: copy network.example.cfg to network.cfg, fill it in and rebuild");
                // il messaggio viene ripetuto ogni ELAPSED_SECS / 2 cicli di lampeggi
                for _ in 0..ELAPSED_SECS / 2 {
                    for _ in 0..blinks {
                        control.gpio_set(0, true).await;
                        Timer::after(BLINK).await;
                        control.gpio_set(0, false).await;
                        Timer::after(BLINK).await;
                    }
                    Timer::after(PAUSE).await;
                }
            }
        }
    }
}
