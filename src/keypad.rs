//! 4×3 matrix keypad scanner
//!
//! # Theory of operation
//!
//! Rows are outputs, columns are inputs pulled up. To look at one row we drive
//! it low and every other row high; a pressed key in that row then shorts its
//! column low. Rows are visited top to bottom and, within a row, columns left
//! to right, so the first key found in that order wins.
//!
//! Only positions that carry a key in [`LAYOUT`] are ever sampled. On the
//! bottom row that means the middle column alone.
//!
//! # Blocking
//!
//! A scan that finds a key waits out the debounce interval and then spins until
//! the key is released. There is no timeout: a key that is never released (or
//! a column shorted to ground) blocks [`Keypad::scan_once`] forever. A scan that
//! finds nothing returns [`KeyCode::NoKey`] straight away.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};
use log::debug;

use crate::{error::line, Result};

/// Number of row lines
pub const ROWS: usize = 4;
/// Number of column lines
pub const COLS: usize = 3;

/// Digit printed on each key, `None` where no key is fitted
pub const LAYOUT: [[Option<u8>; COLS]; ROWS] = [
    [Some(7), Some(8), Some(9)],
    [Some(4), Some(5), Some(6)],
    [Some(1), Some(2), Some(3)],
    [None, Some(0), None],
];

/// Result of one scan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    /// A key carrying this digit was pressed and released
    Digit(u8),
    /// Nothing was pressed
    NoKey,
}

impl KeyCode {
    /// The ASCII character for a digit
    pub fn to_ascii(self) -> Option<u8> {
        match self {
            KeyCode::Digit(digit) => Some(b'0' + digit),
            KeyCode::NoKey => None,
        }
    }
}

/// Keypad driver owning its row and column lines
pub struct Keypad<RowPin, ColPin>
where
    RowPin: OutputPin,
    ColPin: InputPin,
{
    rows: [RowPin; ROWS],
    cols: [ColPin; COLS],
}

impl<RowPin, ColPin> Keypad<RowPin, ColPin>
where
    RowPin: OutputPin,
    ColPin: InputPin,
{
    /// Rows top to bottom, columns left to right
    pub fn new(rows: [RowPin; ROWS], cols: [ColPin; COLS]) -> Self {
        Self { rows, cols }
    }

    /// Give the lines back
    pub fn free(self) -> ([RowPin; ROWS], [ColPin; COLS]) {
        (self.rows, self.cols)
    }

    /// Scan the whole matrix once
    ///
    /// Returns the first pressed key after it has been debounced for
    /// `debounce_us` and released, or [`KeyCode::NoKey`] without waiting. See
    /// the module docs for why this can block forever.
    pub fn scan_once(&mut self, delayer: &mut impl DelayNs, debounce_us: u32) -> Result<KeyCode> {
        for (row, keys) in LAYOUT.iter().enumerate() {
            self.drive_row(row)?;

            for (col, key) in keys.iter().enumerate() {
                let Some(digit) = *key else {
                    continue;
                };

                if self.cols[col].is_low().map_err(line)? {
                    debug!("key down");
                    delayer.delay_us(debounce_us);
                    self.wait_release(col)?;
                    return Ok(KeyCode::Digit(digit));
                }
            }
        }

        Ok(KeyCode::NoKey)
    }

    /// Drive `active` low and every other row high
    fn drive_row(&mut self, active: usize) -> Result<()> {
        self.rows
            .iter_mut()
            .enumerate()
            .try_for_each(|(row, pin)| match row == active {
                true => pin.set_low().map_err(line),
                false => pin.set_high().map_err(line),
            })
    }

    /// Spin until column `col` reads high again; no timeout
    fn wait_release(&mut self, col: usize) -> Result<()> {
        while self.cols[col].is_low().map_err(line)? {
            core::hint::spin_loop();
        }
        Ok(())
    }
}
