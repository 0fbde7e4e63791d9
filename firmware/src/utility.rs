//! Macro di utility per la gestione dei panic persistiti.

/// Se al boot precedente è avvenuto un panic, accende il LED del CYW43,
/// logga il messaggio salvato e blocca il programma.
#[macro_export]
macro_rules! panic_led_loop {
    ($control:expr) => {
        if let Some(panic_message) = panic_persist::get_panic_message_utf8() {
            let _ = $control.gpio_set(0, true).await;
            log::error!("{panic_message}");
            loop {
                embassy_time::Timer::after_secs(5).await;
            }
        }
    };
}
