//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them — log to serial today, feed
//! an audit trail tomorrow.

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot sequencing finished; `resumed_lockdown` is true when an
    /// interrupted lockdown had to run to completion first.
    Started { resumed_lockdown: bool },

    /// A data symbol was appended to the candidate buffer.
    /// Carries the buffer fill level, never the symbol itself.
    KeyAccepted { filled: usize },

    /// The candidate buffer was emptied by the clear key.
    BufferCleared,

    /// Submitted code matched; the strike relay was pulsed.
    AccessGranted,

    /// Submitted code did not match.
    AccessDenied { tries: u8, max: u8 },

    /// The wrong-attempt threshold was crossed; countdown begins.
    LockdownStarted { secs: u16 },

    /// A power-interrupted lockdown was found at boot and resumed.
    LockdownResumed { secs: u16 },

    /// The countdown reached zero; entry is permitted again.
    LockdownEnded,
}
