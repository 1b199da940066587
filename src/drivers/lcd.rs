//! HD44780-compatible 16×2 character LCD, 4-bit parallel mode.
//!
//! Six GPIO lines: register select, enable strobe, and the high data
//! nibble D4–D7. Each byte is shifted out as two nibbles latched on the
//! falling edge of the enable line. Timing follows the HD44780
//! datasheet with comfortable margins; the controller is write-only
//! here (the R/W line is strapped to ground on the board).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::DisplayPort;

/// Characters per display line.
pub const LINE_WIDTH: usize = 16;

// HD44780 command set (subset used here).
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the second line.
const LINE1_ADDR: u8 = 0x40;

/// Write-only HD44780 driver; implements [`DisplayPort`].
pub struct Hd44780<RS, EN, P, D> {
    rs: RS,
    en: EN,
    data: [P; 4],
    delay: D,
}

impl<RS, EN, P, D> Hd44780<RS, EN, P, D>
where
    RS: OutputPin,
    EN: OutputPin,
    P: OutputPin,
    D: DelayNs,
{
    /// `data` is D4–D7, least significant bit first.
    pub fn new(rs: RS, en: EN, data: [P; 4], delay: D) -> Self {
        Self { rs, en, data, delay }
    }

    /// Power-on initialisation into 4-bit, 2-line mode.
    /// Must be called once before any other operation.
    pub fn init(&mut self) {
        // > 40 ms after Vcc rise before the controller accepts commands.
        self.delay.delay_ms(50);
        let _ = self.rs.set_low();

        // Magic reset sequence: 8-bit function set three times, then
        // switch to 4-bit. Single nibbles — the controller is still in
        // 8-bit mode and only looks at D4–D7.
        self.write_nibble(0x03);
        self.delay.delay_ms(5);
        self.write_nibble(0x03);
        self.delay.delay_us(150);
        self.write_nibble(0x03);
        self.delay.delay_us(150);
        self.write_nibble(0x02);
        self.delay.delay_us(150);

        self.command(CMD_FUNCTION_4BIT_2LINE);
        self.command(CMD_DISPLAY_ON);
        self.command(CMD_ENTRY_MODE_INC);
        self.command(CMD_CLEAR);
        self.delay.delay_ms(2);
    }

    fn command(&mut self, byte: u8) {
        let _ = self.rs.set_low();
        self.write_byte(byte);
    }

    fn write_char(&mut self, byte: u8) {
        let _ = self.rs.set_high();
        self.write_byte(byte);
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
        // Ordinary commands/data complete within 37 µs.
        self.delay.delay_us(50);
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if nibble >> bit & 1 == 1 {
                let _ = pin.set_high();
            } else {
                let _ = pin.set_low();
            }
        }
        self.pulse_enable();
    }

    fn pulse_enable(&mut self) {
        let _ = self.en.set_high();
        self.delay.delay_us(1);
        let _ = self.en.set_low();
        self.delay.delay_us(1);
    }
}

impl<RS, EN, P, D> DisplayPort for Hd44780<RS, EN, P, D>
where
    RS: OutputPin,
    EN: OutputPin,
    P: OutputPin,
    D: DelayNs,
{
    fn clear(&mut self) {
        self.command(CMD_CLEAR);
        // Clear is the one slow command (1.52 ms).
        self.delay.delay_ms(2);
    }

    fn set_cursor(&mut self, line: u8, col: u8) {
        let col = col.min(LINE_WIDTH as u8 - 1);
        let addr = if line == 0 { col } else { LINE1_ADDR + col };
        self.command(CMD_SET_DDRAM | addr);
    }

    fn write(&mut self, text: &str) {
        for c in text.chars() {
            // The HD44780 character ROM covers printable ASCII.
            let byte = if c.is_ascii() { c as u8 } else { b'?' };
            self.write_char(byte);
        }
    }
}
