//! 4×3 membrane keypad scanner.
//!
//! Columns are open-drain outputs released HIGH; rows are pulled-up
//! inputs. A scan pulls one column LOW at a time and reads every row: a
//! LOW row means the key at (row, column) is closed. The first closed key in scan order
//! wins when several are held.
//!
//! [`MatrixKeypad::poll`] debounces the scanned key and reports each press
//! exactly once, on the tick where it becomes stable. Holding a key does
//! not repeat; releasing it reports nothing.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{Error, Result};

pub const ROWS: usize = 4;
pub const COLS: usize = 3;

/// Legends printed on the membrane, row-major.
pub const KEYMAP: [[char; COLS]; ROWS] = [
    ['1', '2', '3'],
    ['4', '5', '6'],
    ['7', '8', '9'],
    ['*', '0', '#'],
];

pub struct MatrixKeypad<R, C> {
    rows: [R; ROWS],
    cols: [C; COLS],
    debounce_ms: u32,
    candidate: Option<char>,
    candidate_since_ms: u32,
    stable: Option<char>,
}

impl<R: InputPin, C: OutputPin> MatrixKeypad<R, C> {
    /// Take ownership of the pins and release every column.
    pub fn new(rows: [R; ROWS], mut cols: [C; COLS], debounce_ms: u32) -> Result<Self> {
        for col in &mut cols {
            col.set_high().map_err(Error::gpio)?;
        }
        Ok(Self {
            rows,
            cols,
            debounce_ms,
            candidate: None,
            candidate_since_ms: 0,
            stable: None,
        })
    }

    /// Raw scan of the matrix, no debounce.
    pub fn scan(&mut self) -> Result<Option<char>> {
        for (c, col) in self.cols.iter_mut().enumerate() {
            col.set_low().map_err(Error::gpio)?;
            let mut found = None;
            for (r, row) in self.rows.iter_mut().enumerate() {
                if row.is_low().map_err(Error::gpio)? {
                    found = Some(KEYMAP[r][c]);
                    break;
                }
            }
            col.set_high().map_err(Error::gpio)?;
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// Scan and return a key the first time it is seen stable.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<char>> {
        let raw = self.scan()?;
        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since_ms = now_ms;
            return Ok(None);
        }
        if raw != self.stable && now_ms.wrapping_sub(self.candidate_since_ms) >= self.debounce_ms {
            self.stable = raw;
            return Ok(raw);
        }
        Ok(None)
    }
}
