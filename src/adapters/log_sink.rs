//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future audit-trail adapter would implement the same trait.
//!
//! Note that key events carry only buffer fill levels — the symbols
//! themselves never reach the log.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { resumed_lockdown } => {
                info!("START | resumed_lockdown={resumed_lockdown}");
            }
            AppEvent::KeyAccepted { filled } => {
                info!("KEY   | buffer={filled}");
            }
            AppEvent::BufferCleared => {
                info!("KEY   | cleared");
            }
            AppEvent::AccessGranted => {
                info!("AUTH  | granted");
            }
            AppEvent::AccessDenied { tries, max } => {
                info!("AUTH  | denied ({tries} of {max})");
            }
            AppEvent::LockdownStarted { secs } => {
                info!("LOCK  | started, {secs}s");
            }
            AppEvent::LockdownResumed { secs } => {
                info!("LOCK  | resumed after power loss, {secs}s remaining");
            }
            AppEvent::LockdownEnded => {
                info!("LOCK  | ended");
            }
        }
    }
}
