//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the passcode machine and the lockout controller
//! and exposes a clean, hardware-agnostic API. All I/O flows through
//! port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   KeypadPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                  │        AppService         │
//!  DisplayPort ◀── │  Passcode · Lockout       │ ──▶ ActuatorPort
//!                  └──────────────────────────┘
//!                        ▲            ▼
//!                      StoragePort (NVS)
//! ```

use log::info;

use crate::config::LockConfig;
use crate::error::{Error, Result};
use crate::keypad::Symbol;
use crate::lockout::LockoutController;
use crate::passcode::{KeyOutcome, PasscodeMachine, Verdict};

use super::events::AppEvent;
use super::ports::{ActuatorPort, DelayPort, DisplayPort, EventSink, KeypadPort, StoragePort};

/// Orchestrates boot sequencing and the forever entry loop.
pub struct AppService {
    passcode: PasscodeMachine,
    lockout: LockoutController,
    config: LockConfig,
}

impl AppService {
    /// Construct the service from the compiled-in configuration.
    /// Fails if the secret code or policy constants are malformed.
    pub fn new(config: LockConfig) -> Result<Self> {
        config.validate().map_err(Error::Config)?;
        Ok(Self {
            passcode: PasscodeMachine::new(config.secret_code),
            lockout: LockoutController::new(&config),
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot sequencing: recover an interrupted lockdown (blocking until
    /// it expires), then show the entry prompt. Must run before the
    /// first [`poll_once`](Self::poll_once).
    pub fn boot(
        &mut self,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) {
        let resumed = self.lockout.recover_at_boot(store, display, delay, sink);
        sink.emit(&AppEvent::Started {
            resumed_lockdown: resumed,
        });
        info!("CodeLock ready (lockdown resumed at boot: {resumed})");
        self.show_prompt(display);
    }

    /// The forever entry loop: poll → dispatch → idle. Never returns.
    pub fn run(
        &mut self,
        keypad: &mut impl KeypadPort,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        actuator: &mut impl ActuatorPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.poll_once(keypad, store, display, actuator, delay, sink);
        }
    }

    /// One iteration of the entry loop — split out so tests can drive
    /// the loop a bounded number of times.
    pub fn poll_once(
        &mut self,
        keypad: &mut impl KeypadPort,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        actuator: &mut impl ActuatorPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) {
        match keypad.poll() {
            Some(symbol) => self.on_symbol(symbol, store, display, actuator, delay, sink),
            None => delay.delay_ms(self.config.scan_idle_ms),
        }
    }

    // ── Per-keystroke dispatch ────────────────────────────────

    /// Feed one debounced key press through the passcode machine and
    /// act on its outcome. On a failed submit this blocks through the
    /// denial hold and, past the threshold, through the whole lockdown
    /// countdown.
    pub fn on_symbol(
        &mut self,
        symbol: Symbol,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        actuator: &mut impl ActuatorPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) {
        match self.passcode.handle(symbol) {
            KeyOutcome::Accepted { filled } => {
                // Echo a mask character, never the symbol itself.
                display.write("*");
                sink.emit(&AppEvent::KeyAccepted { filled });
            }
            KeyOutcome::Ignored => {
                // Buffer already at secret length; keystroke dropped.
            }
            KeyOutcome::Cleared => {
                sink.emit(&AppEvent::BufferCleared);
                self.show_prompt(display);
            }
            KeyOutcome::Submitted(Verdict::Match) => {
                self.grant(store, display, actuator, sink);
                self.show_prompt(display);
            }
            KeyOutcome::Submitted(Verdict::Mismatch) => {
                self.lockout.record_failure(store, display, delay, sink);
                self.show_prompt(display);
            }
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn grant(
        &mut self,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        actuator: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        info!("Access granted");
        display.clear();
        display.write("Access granted!");
        sink.emit(&AppEvent::AccessGranted);
        actuator.pulse(self.config.grant_pulse_ms);
        self.lockout.record_success(store);
    }

    fn show_prompt(&self, display: &mut impl DisplayPort) {
        display.clear();
        display.write("Enter passcode:");
        display.set_cursor(1, 0);
    }
}
