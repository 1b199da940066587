//! CodeLock maintenance image (`codelock-reset`).
//!
//! Alternate build entry point for bench use only: unconditionally
//! zeroes both persisted lockout fields, then parks in an inert
//! display-only loop until the device is reflashed with the normal
//! image. Never reachable from normal operation.
#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_hal::delay::Delay;
    use esp_idf_hal::gpio::{AnyIOPin, Output, PinDriver};
    use log::info;

    use codelock::adapters::delay::SysDelay;
    use codelock::adapters::nvs::NvsStore;
    use codelock::app::ports::{DelayPort, DisplayPort};
    use codelock::drivers::lcd::Hd44780;
    use codelock::lockout;
    use codelock::pins;

    fn output_pin(gpio: i32) -> anyhow::Result<PinDriver<'static, AnyIOPin, Output>> {
        // SAFETY: every GPIO number appears exactly once in `pins`.
        let pin = unsafe { AnyIOPin::new(gpio) };
        Ok(PinDriver::output(pin)?)
    }

    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("CodeLock maintenance reset v{}", env!("CARGO_PKG_VERSION"));

    let mut store = NvsStore::new()?;
    lockout::clear_persistent_state(&mut store);
    info!("Persisted lockout state cleared");

    let [d4, d5, d6, d7] = pins::LCD_DATA_GPIOS;
    let mut lcd = Hd44780::new(
        output_pin(pins::LCD_RS_GPIO)?,
        output_pin(pins::LCD_EN_GPIO)?,
        [output_pin(d4)?, output_pin(d5)?, output_pin(d6)?, output_pin(d7)?],
        Delay::new_default(),
    );
    lcd.init();

    let mut delay = SysDelay::new();

    // Hang here until the normal image is flashed back.
    loop {
        lcd.clear();
        delay.delay_ms(500);
        lcd.write("Device reset");
        lcd.set_cursor(1, 0);
        lcd.write("Reflash firmware");
        delay.delay_ms(500);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("codelock-reset is ESP32-S3 firmware; nothing to do on the host");
}
