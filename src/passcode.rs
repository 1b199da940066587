//! Passcode entry state machine.
//!
//! Accumulates data symbols into a fixed-capacity candidate buffer and
//! reacts to the two control keys:
//!
//! ```text
//!              ┌──────────── clear ───────────┐
//!              ▼                              │
//!   AwaitingInput ──data──▶ AwaitingInput ────┤
//!              │                              │
//!            submit                         submit
//!              ▼                              ▼
//!       Verdict::{Match,Mismatch}   (buffer reset either way)
//! ```
//!
//! The machine is pure: it owns no I/O and reports every keystroke's
//! effect as a [`KeyOutcome`] for the service layer to act on. The
//! candidate buffer lives in a `heapless::Vec`, so entry never
//! allocates and can never overrun.

use heapless::Vec;

use crate::keypad::{Symbol, SymbolKind};

/// Capacity of the candidate buffer. The compiled-in secret must fit.
pub const MAX_CODE_LEN: usize = 8;

/// Result of comparing the candidate buffer to the secret code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Exact equality: same length, same symbols in order.
    Match,
    /// Anything else — short, long, or differing contents.
    Mismatch,
}

/// Effect of feeding one symbol into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A data symbol was appended; `filled` is the new buffer length.
    /// The caller should echo one mask character.
    Accepted { filled: usize },
    /// A data symbol arrived with the buffer already full — dropped.
    Ignored,
    /// The clear key emptied the buffer.
    Cleared,
    /// The submit key compared the buffer against the secret.
    /// The buffer is already reset when this is returned.
    Submitted(Verdict),
}

/// The passcode entry machine.
///
/// Holds the secret (fixed for the process lifetime) and the mutable
/// candidate buffer. The buffer is reset on clear, on submit, and when
/// the machine is constructed at boot.
pub struct PasscodeMachine {
    secret: Vec<char, MAX_CODE_LEN>,
    buffer: Vec<char, MAX_CODE_LEN>,
}

impl PasscodeMachine {
    /// Build the machine around a validated secret code.
    ///
    /// The secret is assumed to have passed
    /// [`LockConfig::validate`](crate::config::LockConfig::validate);
    /// characters beyond [`MAX_CODE_LEN`] would be a build error and
    /// are truncated defensively here only in release builds.
    pub fn new(secret_code: &str) -> Self {
        let mut secret = Vec::new();
        for c in secret_code.chars() {
            if secret.push(c).is_err() {
                debug_assert!(false, "secret code exceeds MAX_CODE_LEN");
                break;
            }
        }
        Self {
            secret,
            buffer: Vec::new(),
        }
    }

    /// Feed one keypad symbol through the machine.
    pub fn handle(&mut self, symbol: Symbol) -> KeyOutcome {
        match symbol.kind() {
            SymbolKind::Clear => {
                self.buffer.clear();
                KeyOutcome::Cleared
            }
            SymbolKind::Submit => {
                let verdict = self.verify();
                self.buffer.clear();
                KeyOutcome::Submitted(verdict)
            }
            SymbolKind::Data => {
                if self.buffer.len() >= self.secret.len() {
                    // Already at secret length: further data symbols are
                    // meaningless before submit/clear and must never
                    // overrun the buffer.
                    return KeyOutcome::Ignored;
                }
                // Capacity >= secret length, so this push cannot fail.
                let _ = self.buffer.push(symbol.as_char());
                KeyOutcome::Accepted {
                    filled: self.buffer.len(),
                }
            }
        }
    }

    /// Current fill level of the candidate buffer.
    pub fn filled(&self) -> usize {
        self.buffer.len()
    }

    /// Length of the configured secret.
    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }

    /// Full-equality comparison: length and contents must both match.
    fn verify(&self) -> Verdict {
        if self.buffer.len() == self.secret.len() && self.buffer == self.secret {
            Verdict::Match
        } else {
            Verdict::Mismatch
        }
    }
}
