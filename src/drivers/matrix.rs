//! 4×4 matrix keypad scanner.
//!
//! ## Electrical model
//!
//! The four row lines are push-pull outputs idling HIGH; the four
//! column lines are inputs with pull-ups. Scanning drives one row LOW
//! at a time, waits a short settle/debounce interval (wire capacitance
//! makes column 0 invisible without it), then samples the columns: a
//! pressed key in the active row pulls its column LOW.
//!
//! ## Press semantics
//!
//! One event per physical press. When a closed contact is found, the
//! scanner busy-waits until the key is released (plus a release
//! debounce) before reporting it, so holding a key never repeat-fires.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::KeypadPort;
use crate::keypad::{Symbol, COLS, ROWS};

/// Generic matrix scanner; implements [`KeypadPort`].
pub struct MatrixKeypad<O, I, D> {
    rows: [O; ROWS],
    cols: [I; COLS],
    delay: D,
    settle_ms: u32,
}

impl<O: OutputPin, I: InputPin, D: DelayNs> MatrixKeypad<O, I, D> {
    /// `settle_ms` is the per-row settle + debounce interval.
    pub fn new(rows: [O; ROWS], cols: [I; COLS], delay: D, settle_ms: u32) -> Self {
        Self {
            rows,
            cols,
            delay,
            settle_ms,
        }
    }

    /// Park all row lines inactive (HIGH).
    fn idle_rows(&mut self) {
        for row in &mut self.rows {
            let _ = row.set_high();
        }
    }

    /// Block until the key in `col` opens again, then debounce the
    /// release. The contract of this driver: a key held down stalls the
    /// scan, it never produces a second event.
    fn wait_for_release(&mut self, col: usize) {
        while self.cols[col].is_low().unwrap_or(false) {
            self.delay.delay_ms(1);
        }
        self.delay.delay_ms(self.settle_ms);
    }
}

impl<O: OutputPin, I: InputPin, D: DelayNs> KeypadPort for MatrixKeypad<O, I, D> {
    fn poll(&mut self) -> Option<Symbol> {
        for row in 0..ROWS {
            self.idle_rows();
            let _ = self.rows[row].set_low();
            self.delay.delay_ms(self.settle_ms);

            for col in 0..COLS {
                if self.cols[col].is_low().unwrap_or(false) {
                    self.wait_for_release(col);
                    self.idle_rows();
                    return Symbol::from_position(row, col);
                }
            }
        }
        self.idle_rows();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::collections::VecDeque;

    /// Output pin recording level changes.
    #[derive(Default)]
    struct RecOut {
        lows: usize,
    }

    impl embedded_hal::digital::ErrorType for RecOut {
        type Error = Infallible;
    }

    impl OutputPin for RecOut {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.lows += 1;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    /// Input pin replaying a scripted sequence of `is_low` readings;
    /// repeats the last reading once the script runs out.
    struct ScriptIn {
        reads: VecDeque<bool>,
        last: bool,
    }

    impl ScriptIn {
        fn new(reads: &[bool]) -> Self {
            Self {
                reads: reads.iter().copied().collect(),
                last: false,
            }
        }

        fn open() -> Self {
            Self::new(&[])
        }
    }

    impl embedded_hal::digital::ErrorType for ScriptIn {
        type Error = Infallible;
    }

    impl InputPin for ScriptIn {
        fn is_low(&mut self) -> Result<bool, Infallible> {
            if let Some(v) = self.reads.pop_front() {
                self.last = v;
            }
            Ok(self.last)
        }
        fn is_high(&mut self) -> Result<bool, Infallible> {
            self.is_low().map(|l| !l)
        }
    }

    /// Delay that just counts.
    #[derive(Default)]
    struct NullDelay {
        total_ns: u64,
    }

    impl DelayNs for NullDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn rows() -> [RecOut; 4] {
        [
            RecOut::default(),
            RecOut::default(),
            RecOut::default(),
            RecOut::default(),
        ]
    }

    #[test]
    fn empty_scan_returns_none() {
        let cols = [
            ScriptIn::open(),
            ScriptIn::open(),
            ScriptIn::open(),
            ScriptIn::open(),
        ];
        let mut kp = MatrixKeypad::new(rows(), cols, NullDelay::default(), 2);
        assert_eq!(kp.poll(), None);
        // Every row was driven low exactly once during the pass.
        for row in &kp.rows {
            assert_eq!(row.lows, 1);
        }
    }

    #[test]
    fn press_decodes_by_position() {
        // Key at row 2, col 1 → '8'. Column 1 reads open for rows 0–1,
        // closed for row 2, then open again (release).
        let cols = [
            ScriptIn::open(),
            ScriptIn::new(&[false, false, true, false]),
            ScriptIn::open(),
            ScriptIn::open(),
        ];
        let mut kp = MatrixKeypad::new(rows(), cols, NullDelay::default(), 2);
        let sym = kp.poll().unwrap();
        assert_eq!(sym.as_char(), '8');
    }

    #[test]
    fn blocks_until_release() {
        // Pressed during row 0, stays closed for 5 release polls.
        let cols = [
            ScriptIn::new(&[true, true, true, true, true, true, false]),
            ScriptIn::open(),
            ScriptIn::open(),
            ScriptIn::open(),
        ];
        let mut kp = MatrixKeypad::new(rows(), cols, NullDelay::default(), 2);
        let sym = kp.poll().unwrap();
        assert_eq!(sym.as_char(), '1');
        // Scan stopped at row 0; rows 1–3 were never driven.
        assert_eq!(kp.rows[0].lows, 1);
        assert_eq!(kp.rows[1].lows, 0);
    }

    #[test]
    fn first_column_found_wins() {
        // Two keys in row 0: cols 0 and 2 both closed; col 0 reported.
        let cols = [
            ScriptIn::new(&[true, false]),
            ScriptIn::open(),
            ScriptIn::new(&[true, false]),
            ScriptIn::open(),
        ];
        let mut kp = MatrixKeypad::new(rows(), cols, NullDelay::default(), 2);
        assert_eq!(kp.poll().unwrap().as_char(), '1');
    }
}
