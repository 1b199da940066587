//! Brute-force lockout controller.
//!
//! Two states, with the persisted `lockdown_remaining` field as the
//! single source of truth:
//!
//! ```text
//!   Unlocked ──[wrong_tries ≥ max]──▶ Locked(remaining)
//!       ▲                                   │ 1 Hz tick: display,
//!       │                                   │ decrement, persist
//!       └────────[remaining == 0]───────────┘
//! ```
//!
//! The lockout is evaluated and, if needed, run to completion at exactly
//! two points: once at boot (recovering a lockdown interrupted by power
//! loss) and once immediately after a failure crosses the threshold.
//! The countdown persists `lockdown_remaining` on every tick — trading
//! write volume for tamper resistance, so pulling the supply mid-lockdown
//! never shortens the wait. While the countdown runs, no input is read
//! at all; blocking *is* the security property.

use core::fmt::Write as _;

use heapless::String;
use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{DelayPort, DisplayPort, EventSink, StoragePort};
use crate::config::LockConfig;

/// Owns the lockout policy and is the sole writer of the two persisted
/// fields during normal operation.
pub struct LockoutController {
    max_wrong_tries: u8,
    lockdown_secs: u16,
    denial_hold_ms: u32,
}

impl LockoutController {
    pub fn new(config: &LockConfig) -> Self {
        Self {
            max_wrong_tries: config.max_wrong_tries,
            lockdown_secs: config.lockdown_secs,
            denial_hold_ms: config.denial_hold_ms,
        }
    }

    /// Boot-time entry check.
    ///
    /// If a lockdown was outstanding when power was lost, resume its
    /// countdown from the persisted remaining time — not from the full
    /// duration — and block until it expires. Returns whether a
    /// countdown had to run.
    pub fn recover_at_boot(
        &self,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let remaining = store.read_lockdown_remaining();
        if remaining == 0 {
            return false;
        }
        warn!("Boot: interrupted lockdown found, {remaining}s remaining");
        sink.emit(&AppEvent::LockdownResumed { secs: remaining });
        self.run_countdown(remaining, store, display, delay, sink);
        true
    }

    /// Record one failed submit.
    ///
    /// Increments and persists `wrong_tries`, shows the denial message
    /// for the configured hold time, and — when the new count reaches
    /// the threshold — enters the lockdown and runs its countdown
    /// synchronously before returning. The caller regains control only
    /// when entry is permitted again.
    pub fn record_failure(
        &self,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) {
        // Persist the count before anything user-visible happens, so a
        // power cycle during the denial message still counts the attempt.
        let tries = store.read_wrong_tries().saturating_add(1);
        store.write_wrong_tries(tries);
        warn!("Access denied ({tries} of {})", self.max_wrong_tries);

        display.clear();
        display.write("Access denied!");
        let mut line: String<16> = String::new();
        let _ = write!(line, "{tries} of {} tries", self.max_wrong_tries);
        display.set_cursor(1, 0);
        display.write(&line);

        sink.emit(&AppEvent::AccessDenied {
            tries,
            max: self.max_wrong_tries,
        });

        delay.delay_ms(self.denial_hold_ms);

        if tries >= self.max_wrong_tries {
            store.write_lockdown_remaining(self.lockdown_secs);
            info!("Wrong-try threshold crossed, locking for {}s", self.lockdown_secs);
            sink.emit(&AppEvent::LockdownStarted {
                secs: self.lockdown_secs,
            });
            self.run_countdown(self.lockdown_secs, store, display, delay, sink);
        }
    }

    /// Record a successful submit: the attempt counter starts over.
    pub fn record_success(&self, store: &mut impl StoragePort) {
        store.write_wrong_tries(0);
    }

    /// Locked → Unlocked countdown. One tick per second: display the
    /// remaining time, sleep, then decrement the in-memory and persisted
    /// value together. Persisting after the sleep keeps the stored value
    /// from ever running ahead of real elapsed time.
    fn run_countdown(
        &self,
        start: u16,
        store: &mut impl StoragePort,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
    ) {
        display.clear();
        display.write("Device locked");

        let mut remaining = start;
        while remaining > 0 {
            display.set_cursor(1, 0);
            display.write(&countdown_line(remaining));
            delay.delay_ms(1000);
            remaining -= 1;
            store.write_lockdown_remaining(remaining);
        }

        store.write_lockdown_remaining(0);
        store.write_wrong_tries(0);
        info!("Lockdown expired, entry permitted");
        sink.emit(&AppEvent::LockdownEnded);
    }
}

/// Zero both persisted fields. Used by the maintenance/reset image only;
/// never reachable from normal operation.
pub fn clear_persistent_state(store: &mut impl StoragePort) {
    store.write_lockdown_remaining(0);
    store.write_wrong_tries(0);
}

/// Second line of the lockdown screen, e.g. `Wait 04 m 59 s`.
fn countdown_line(remaining: u16) -> String<16> {
    let mins = remaining / 60;
    let secs = remaining % 60;
    let mut line = String::new();
    let _ = write!(line, "Wait {mins:02} m {secs:02} s");
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal inline port doubles; the integration suite has richer ones.

    #[derive(Default)]
    struct MemStore {
        lockdown: u16,
        tries: u8,
        lockdown_writes: Vec<u16>,
    }

    impl StoragePort for MemStore {
        fn read_lockdown_remaining(&self) -> u16 {
            self.lockdown
        }
        fn write_lockdown_remaining(&mut self, secs: u16) {
            self.lockdown = secs;
            self.lockdown_writes.push(secs);
        }
        fn read_wrong_tries(&self) -> u8 {
            self.tries
        }
        fn write_wrong_tries(&mut self, count: u8) {
            self.tries = count;
        }
    }

    #[derive(Default)]
    struct NullDisplay;
    impl DisplayPort for NullDisplay {
        fn clear(&mut self) {}
        fn set_cursor(&mut self, _line: u8, _col: u8) {}
        fn write(&mut self, _text: &str) {}
    }

    #[derive(Default)]
    struct InstantDelay {
        slept_ms: u64,
    }
    impl DelayPort for InstantDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.slept_ms += u64::from(ms);
        }
    }

    #[derive(Default)]
    struct CapturingSink {
        events: Vec<AppEvent>,
    }
    impl EventSink for CapturingSink {
        fn emit(&mut self, event: &AppEvent) {
            self.events.push(*event);
        }
    }

    fn controller() -> LockoutController {
        LockoutController::new(&LockConfig::default())
    }

    #[test]
    fn countdown_line_formats_mm_ss() {
        assert_eq!(countdown_line(300).as_str(), "Wait 05 m 00 s");
        assert_eq!(countdown_line(299).as_str(), "Wait 04 m 59 s");
        assert_eq!(countdown_line(1).as_str(), "Wait 00 m 01 s");
    }

    #[test]
    fn boot_without_pending_lockdown_is_a_no_op() {
        let ctl = controller();
        let mut store = MemStore::default();
        let mut sink = CapturingSink::default();
        let resumed = ctl.recover_at_boot(
            &mut store,
            &mut NullDisplay,
            &mut InstantDelay::default(),
            &mut sink,
        );
        assert!(!resumed);
        assert!(sink.events.is_empty());
        assert!(store.lockdown_writes.is_empty());
    }

    #[test]
    fn boot_resumes_from_persisted_remaining_not_full_duration() {
        let ctl = controller();
        let mut store = MemStore {
            lockdown: 42,
            ..MemStore::default()
        };
        let mut delay = InstantDelay::default();
        let mut sink = CapturingSink::default();
        let resumed = ctl.recover_at_boot(&mut store, &mut NullDisplay, &mut delay, &mut sink);

        assert!(resumed);
        assert_eq!(sink.events.first(), Some(&AppEvent::LockdownResumed { secs: 42 }));
        // 42 one-second ticks, each persisting the decremented value.
        assert_eq!(delay.slept_ms, 42_000);
        assert_eq!(store.lockdown_writes.first(), Some(&41));
        assert_eq!(store.lockdown, 0);
        assert_eq!(store.tries, 0);
        assert_eq!(sink.events.last(), Some(&AppEvent::LockdownEnded));
    }

    #[test]
    fn failure_below_threshold_only_counts() {
        let ctl = controller();
        let mut store = MemStore::default();
        let mut delay = InstantDelay::default();
        let mut sink = CapturingSink::default();

        ctl.record_failure(&mut store, &mut NullDisplay, &mut delay, &mut sink);
        assert_eq!(store.tries, 1);
        assert_eq!(store.lockdown, 0);
        // Only the denial hold elapsed, no countdown.
        assert_eq!(delay.slept_ms, 2000);
        assert_eq!(sink.events, vec![AppEvent::AccessDenied { tries: 1, max: 3 }]);
    }

    #[test]
    fn third_failure_locks_and_runs_full_countdown() {
        let ctl = controller();
        let mut store = MemStore {
            tries: 2,
            ..MemStore::default()
        };
        let mut delay = InstantDelay::default();
        let mut sink = CapturingSink::default();

        ctl.record_failure(&mut store, &mut NullDisplay, &mut delay, &mut sink);

        assert!(sink
            .events
            .contains(&AppEvent::LockdownStarted { secs: 300 }));
        assert_eq!(sink.events.last(), Some(&AppEvent::LockdownEnded));
        // Denial hold + 300 countdown seconds.
        assert_eq!(delay.slept_ms, 2000 + 300_000);
        // Expiry resets both fields.
        assert_eq!(store.lockdown, 0);
        assert_eq!(store.tries, 0);
    }

    #[test]
    fn wrong_tries_persisted_before_denial_hold() {
        let ctl = controller();
        let mut store = MemStore::default();
        ctl.record_failure(
            &mut store,
            &mut NullDisplay,
            &mut InstantDelay::default(),
            &mut CapturingSink::default(),
        );
        ctl.record_failure(
            &mut store,
            &mut NullDisplay,
            &mut InstantDelay::default(),
            &mut CapturingSink::default(),
        );
        assert_eq!(store.tries, 2);
    }

    #[test]
    fn success_resets_counter_from_any_value() {
        let ctl = controller();
        let mut store = MemStore {
            tries: 2,
            ..MemStore::default()
        };
        ctl.record_success(&mut store);
        assert_eq!(store.tries, 0);
    }

    #[test]
    fn clear_persistent_state_zeroes_both_fields() {
        let mut store = MemStore {
            lockdown: 123,
            tries: 2,
            ..MemStore::default()
        };
        clear_persistent_state(&mut store);
        assert_eq!(store.lockdown, 0);
        assert_eq!(store.tries, 0);
    }
}
