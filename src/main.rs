//! CodeLock Firmware — Main Entry Point
//!
//! Hexagonal architecture on one blocking control loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  MatrixKeypad   Hd44780    RelayDriver   NvsStore        │
//! │  (KeypadPort)  (DisplayPort) (ActuatorPort) (StoragePort)│
//! │  SysDelay       LogEventSink                             │
//! │  (DelayPort)    (EventSink)                              │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ───────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │           AppService (pure logic)              │      │
//! │  │  PasscodeMachine · LockoutController           │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Boot order matters: the lockout recovery check runs before the
//! first keypad poll, so a power cycle can never skip a lockdown.
#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_hal::delay::Delay;
    use esp_idf_hal::gpio::{AnyIOPin, Input, Output, PinDriver, Pull};
    use log::info;

    use codelock::adapters::delay::SysDelay;
    use codelock::adapters::log_sink::LogEventSink;
    use codelock::adapters::nvs::NvsStore;
    use codelock::app::service::AppService;
    use codelock::config::LockConfig;
    use codelock::drivers::lcd::Hd44780;
    use codelock::drivers::matrix::MatrixKeypad;
    use codelock::drivers::relay::RelayDriver;
    use codelock::pins;

    fn output_pin(gpio: i32) -> anyhow::Result<PinDriver<'static, AnyIOPin, Output>> {
        // SAFETY: every GPIO number appears exactly once in `pins`,
        // so no pin is aliased.
        let pin = unsafe { AnyIOPin::new(gpio) };
        Ok(PinDriver::output(pin)?)
    }

    fn input_pin_pullup(gpio: i32) -> anyhow::Result<PinDriver<'static, AnyIOPin, Input>> {
        // SAFETY: see `output_pin`.
        let pin = unsafe { AnyIOPin::new(gpio) };
        let mut driver = PinDriver::input(pin)?;
        driver.set_pull(Pull::Up)?;
        Ok(driver)
    }

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("CodeLock v{}", env!("CARGO_PKG_VERSION"));

    let config = LockConfig::default();

    // ── 2. Peripherals ────────────────────────────────────────
    let [r0, r1, r2, r3] = pins::KEYPAD_ROW_GPIOS;
    let [c0, c1, c2, c3] = pins::KEYPAD_COL_GPIOS;
    let mut keypad = MatrixKeypad::new(
        [output_pin(r0)?, output_pin(r1)?, output_pin(r2)?, output_pin(r3)?],
        [
            input_pin_pullup(c0)?,
            input_pin_pullup(c1)?,
            input_pin_pullup(c2)?,
            input_pin_pullup(c3)?,
        ],
        Delay::new_default(),
        config.row_settle_ms,
    );

    let [d4, d5, d6, d7] = pins::LCD_DATA_GPIOS;
    let mut lcd = Hd44780::new(
        output_pin(pins::LCD_RS_GPIO)?,
        output_pin(pins::LCD_EN_GPIO)?,
        [output_pin(d4)?, output_pin(d5)?, output_pin(d6)?, output_pin(d7)?],
        Delay::new_default(),
    );
    lcd.init();

    let mut relay = RelayDriver::new(output_pin(pins::RELAY_GPIO)?, Delay::new_default());
    let mut store = NvsStore::new()?;
    let mut delay = SysDelay::new();
    let mut sink = LogEventSink::new();

    // ── 3. Boot sequencing + entry loop ───────────────────────
    let mut app = AppService::new(config)?;
    app.boot(&mut store, &mut lcd, &mut delay, &mut sink);
    app.run(&mut keypad, &mut store, &mut lcd, &mut relay, &mut delay, &mut sink)
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("codelock is ESP32-S3 firmware; on the host, run `cargo test --no-default-features`");
}
