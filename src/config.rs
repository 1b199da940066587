//! Build-time configuration.
//!
//! Everything here is compiled into the firmware. There is deliberately
//! no runtime or NVS-backed override path: the secret code and lockout
//! policy are part of the device image.

use crate::keypad::{Symbol, SymbolKind};
use crate::passcode::MAX_CODE_LEN;

/// Core lock configuration.
#[derive(Debug, Clone)]
pub struct LockConfig {
    /// The secret passcode. Data symbols from the keypad alphabet only
    /// (no `C`/`#`), at most [`MAX_CODE_LEN`] characters.
    pub secret_code: &'static str,

    /// Consecutive wrong attempts that trigger a lockdown.
    pub max_wrong_tries: u8,
    /// Lockdown duration in seconds once the threshold is crossed.
    pub lockdown_secs: u16,

    /// How long the denial message stays on screen (milliseconds).
    pub denial_hold_ms: u32,
    /// Relay pulse width on a successful unlock (milliseconds).
    pub grant_pulse_ms: u32,

    /// Settle + debounce delay after driving a keypad row (milliseconds).
    pub row_settle_ms: u32,
    /// Idle delay between full scan passes that found no key (milliseconds).
    pub scan_idle_ms: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            secret_code: "1337",

            max_wrong_tries: 3,
            lockdown_secs: 300, // 5 minutes

            denial_hold_ms: 2000,
            grant_pulse_ms: 2000,

            row_settle_ms: 2,
            scan_idle_ms: 10,
        }
    }
}

impl LockConfig {
    /// Check that the secret code fits the keypad alphabet and buffer.
    /// Called once at startup; a bad secret is a build mistake, not a
    /// runtime condition.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.secret_code.is_empty() {
            return Err("secret_code must not be empty");
        }
        if self.secret_code.chars().count() > MAX_CODE_LEN {
            return Err("secret_code exceeds MAX_CODE_LEN");
        }
        for c in self.secret_code.chars() {
            match Symbol::from_char(c).map(Symbol::kind) {
                Some(SymbolKind::Data) => {}
                Some(_) => return Err("secret_code must not contain control keys"),
                None => return Err("secret_code contains a non-keypad character"),
            }
        }
        if self.max_wrong_tries == 0 {
            return Err("max_wrong_tries must be at least 1");
        }
        if self.lockdown_secs == 0 {
            return Err("lockdown_secs must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = LockConfig::default();
        c.validate().unwrap();
        assert_eq!(c.secret_code, "1337");
        assert_eq!(c.max_wrong_tries, 3);
        assert_eq!(c.lockdown_secs, 300);
        assert!(c.grant_pulse_ms > 0);
        assert!(c.denial_hold_ms > 0);
    }

    #[test]
    fn control_keys_rejected_in_secret() {
        let c = LockConfig {
            secret_code: "12C4",
            ..LockConfig::default()
        };
        assert!(c.validate().is_err());

        let c = LockConfig {
            secret_code: "#137",
            ..LockConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn non_keypad_characters_rejected() {
        let c = LockConfig {
            secret_code: "12x4",
            ..LockConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn overlong_secret_rejected() {
        let c = LockConfig {
            secret_code: "123456789",
            ..LockConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn empty_secret_rejected() {
        let c = LockConfig {
            secret_code: "",
            ..LockConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
