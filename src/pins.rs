//! GPIO / peripheral pin assignments for the CodeLock main board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers. Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// Keypad matrix (4 rows driven as outputs, 4 columns read with pull-ups)
// ---------------------------------------------------------------------------

/// Row drive outputs, active LOW, top row first.
pub const KEYPAD_ROW_GPIOS: [i32; 4] = [4, 5, 6, 7];
/// Column sense inputs with internal pull-ups; a pressed key pulls the
/// column LOW through the active row.
pub const KEYPAD_COL_GPIOS: [i32; 4] = [8, 9, 10, 11];

// ---------------------------------------------------------------------------
// Character LCD (HD44780-compatible, 16×2, 4-bit parallel mode)
// ---------------------------------------------------------------------------

/// Register select: LOW = command, HIGH = data.
pub const LCD_RS_GPIO: i32 = 12;
/// Enable strobe, falling-edge latched.
pub const LCD_EN_GPIO: i32 = 13;
/// Data nibble D4–D7, least significant bit first.
pub const LCD_DATA_GPIOS: [i32; 4] = [14, 15, 16, 17];

// ---------------------------------------------------------------------------
// Lock actuator
// ---------------------------------------------------------------------------

/// Digital output driving the strike relay, active HIGH.
pub const RELAY_GPIO: i32 = 18;
