//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (keypad scanner, LCD, relay, NVS, delay source)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! All port operations are **infallible by contract**: hardware-level
//! faults are out of scope for the control loop, and the adapters absorb
//! backend errors internally (logging and degrading gracefully) rather
//! than propagating them into the domain.

use crate::keypad::Symbol;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Keypad port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Polled source of debounced key-press events.
pub trait KeypadPort {
    /// Run one full scan pass over the matrix.
    ///
    /// Returns the symbol of the first pressed key found, blocking
    /// internally until that key is released so a single physical press
    /// never repeat-fires. Returns `None` when no key is pressed.
    fn poll(&mut self) -> Option<Symbol>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character LCD)
// ───────────────────────────────────────────────────────────────

/// Two-line fixed-width text display.
pub trait DisplayPort {
    /// Blank the display and home the cursor.
    fn clear(&mut self);

    /// Move the cursor to `(line, col)`; line 0 is the top line.
    fn set_cursor(&mut self, line: u8, col: u8);

    /// Write text at the cursor, advancing it.
    fn write(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → strike relay)
// ───────────────────────────────────────────────────────────────

/// Binary lock actuator.
pub trait ActuatorPort {
    /// Assert the output, hold it for `duration_ms`, then deassert.
    /// Blocks for the full duration.
    fn pulse(&mut self, duration_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Durable storage for the two lockout fields.
///
/// Both fields live at fixed keys; writes are independent and each is
/// immediately durable. There is deliberately no transactional grouping
/// between them — partial-update corruption between the two fields is
/// an accepted risk of the storage layout.
///
/// Reads are total: a missing key (first boot) reads as `0`.
pub trait StoragePort {
    /// Remaining lockdown seconds; `> 0` means the device is locked.
    fn read_lockdown_remaining(&self) -> u16;

    /// Persist the remaining lockdown seconds.
    fn write_lockdown_remaining(&mut self, secs: u16);

    /// Consecutive wrong-attempt count.
    fn read_wrong_tries(&self) -> u8;

    /// Persist the wrong-attempt count.
    fn write_wrong_tries(&mut self, count: u8);
}

// ───────────────────────────────────────────────────────────────
// Delay port (driven adapter: domain → time source)
// ───────────────────────────────────────────────────────────────

/// Blocking delay source.
///
/// The entry loop and the lockdown countdown are synchronous by design;
/// this port is their only suspension point, which also makes the
/// countdown instantly testable with a zero-cost implementation.
pub trait DelayPort {
    /// Block the calling task for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (serial log, future audit trail, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
