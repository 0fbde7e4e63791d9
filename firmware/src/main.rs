//! Questa applicazione per Raspberry Pico 2 W
//! carica la configurazione di rete (credenziali WiFi e
//! indirizzo IP statico per Ethernet) incorporata a tempo di
//! compilazione e si rifiuta di proseguire se contiene ancora
//! i valori segnaposto del template.
//! Lo stato viene mostrato con il LED collegato al chip WiFi CYW43
//! e loggato su USB.

#![no_std]
#![no_main]

mod configuration;
mod status;
#[macro_use]
mod utility;

use crate::configuration::load_network_config;
use crate::status::{Status, status_task};
use cyw43_pio::{PioSpi, RM2_CLOCK_DIVIDER};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIO0, USB};
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use panic_persist as _;
use static_cell::StaticCell;

// Program metadata for `picotool info`.
// This isn't needed, but it's recommended to have these minimal entries.
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico-netconfig"),
    embassy_rp::binary_info::rp_program_description!(
        c"Questo programma gira su Pico 2 W e verifica la configurazione di rete."
    ),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

// Interrupt handlers
bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

bind_interrupts!(struct UsbIrqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

/// Entry point principale secondo Embassy
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // Parte il logger su USB
    let driver = Driver::new(p.USB, UsbIrqs);
    spawner.must_spawn(logger_task(driver));
    if let Some(panic_message) = panic_persist::get_panic_message_utf8() {
        log::error!("{panic_message}");
        loop {
            embassy_time::Timer::after_secs(5).await;
        }
    }

    // Firmware files for the CYW43xxx WiFi chip, needed to drive its LED.
    // Download them from the embassy repository (cyw43-firmware/).
    let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        // SPI communication won't work if the speed is too high, so we use a divider larger than `DEFAULT_CLOCK_DIVIDER`.
        // See: https://github.com/embassy-rs/embassy/issues/3960.
        RM2_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (_net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;

    // parte il task di gestione del chip WiFi
    spawner.must_spawn(cyw43_task(runner));
    panic_led_loop!(control);

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    let status = match load_network_config() {
        Ok(config) => {
            log::info!("WiFi SSID: {}", config.wifi.ssid());
            log::info!("Ethernet IP: {}", config.ethernet);
            defmt::info!("network configuration: {}", config);
            Status::Ready(config)
        }
        Err(err) => {
            log::error!("network configuration refused: {err}");
            defmt::error!("network configuration refused: {}", err);
            Status::Fault(err)
        }
    };

    spawner.must_spawn(status_task(control, status));
}

// Tasks that run in the background:
/// WIFI task runner
///
/// # Argomenti
/// * `runner` - cyw43 runner
///
/// # Ritorna
/// * ! - Non ritorna mai
#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
/// Logger task for USB
///
/// # Argomenti
/// * `driver` - USB driver
///
/// # Ritorna
/// * ! - Non ritorna mai
async fn logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
}
