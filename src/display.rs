//! Status text for the 16×2 character display.
//!
//! [`compose`] turns the alarm state into two lines of text;
//! [`DisplayText::centered`] pads them for the panel. Redraws only happen
//! when the composed text differs from what is already on screen.

use core::fmt::Write;

use heapless::String;

use crate::alarm::AlarmState;
use crate::config::MILLIS_PER_MINUTE;

/// Character columns on the LCD.
pub const LCD_WIDTH: usize = 16;

/// One display line, at most [`LCD_WIDTH`] characters.
pub type Line = String<LCD_WIDTH>;

const MILLIS_PER_SECOND: u32 = 1000;

/// Two lines of display text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayText {
    pub line1: Line,
    pub line2: Line,
}

impl DisplayText {
    /// Build from string slices, truncating anything past the panel width.
    pub fn new(line1: &str, line2: &str) -> Self {
        Self {
            line1: truncated(line1),
            line2: truncated(line2),
        }
    }

    /// Boot splash screen.
    pub fn splash() -> Self {
        Self::new("** Gate Alarm **", "**   Welcome  **")
    }

    /// Both lines centred within the panel width (`left = (16 - len) / 2`).
    pub fn centered(&self) -> (Line, Line) {
        (center(&self.line1), center(&self.line2))
    }
}

/// Compose the status text for the current state.
///
/// Priority: numeric entry, infinite suspension, timed suspension countdown,
/// gate open, all clear.
pub fn compose(state: &AlarmState, now_ms: u32) -> DisplayText {
    if state.is_editing() {
        let mut value = Line::new();
        let _ = write!(value, "{}", state.entry().value());
        return DisplayText {
            line1: truncated("Enter delay:"),
            line2: value,
        };
    }

    let suspension = state.suspension();
    if suspension.is_infinite() {
        return DisplayText::new("Alarm", "Suspended");
    }
    if let Some(remaining) = suspension.remaining_ms(now_ms) {
        return DisplayText {
            line1: truncated("Alarm paused for"),
            line2: countdown(remaining),
        };
    }

    if state.is_gate_open() {
        DisplayText::new("** GATE **", "** OPEN **")
    } else {
        DisplayText::new("OK", "")
    }
}

/// `M:SS` with seconds zero-padded.
fn countdown(remaining_ms: u32) -> Line {
    let mins = remaining_ms / MILLIS_PER_MINUTE;
    let secs = (remaining_ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    let mut line = Line::new();
    let _ = write!(line, "{}:{:02}", mins, secs);
    line
}

fn truncated(s: &str) -> Line {
    let mut line = Line::new();
    for c in s.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}

fn center(text: &str) -> Line {
    let len = text.chars().count().min(LCD_WIDTH);
    let left = (LCD_WIDTH - len) / 2;
    let mut line = Line::new();
    for _ in 0..left {
        let _ = line.push(' ');
    }
    let _ = line.push_str(text);
    line
}

/// Tracks the text on screen and decides when a redraw is due.
#[derive(Debug, Clone)]
pub struct DisplayRefresher {
    interval_ms: u32,
    last_compose_ms: Option<u32>,
    shown: Option<DisplayText>,
}

impl DisplayRefresher {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_compose_ms: None,
            shown: None,
        }
    }

    /// Whether the throttle interval has passed since the last composition.
    pub fn is_due(&self, now_ms: u32) -> bool {
        match self.last_compose_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) > self.interval_ms,
        }
    }

    /// Record a composition. Returns `true` if `text` differs from what is
    /// on screen, in which case the caller must redraw.
    pub fn update(&mut self, text: DisplayText, now_ms: u32) -> bool {
        self.last_compose_ms = Some(now_ms);
        if self.shown.as_ref() == Some(&text) {
            return false;
        }
        self.shown = Some(text);
        true
    }

    /// Forget the on-screen text so the next composition always redraws
    /// (used after the splash screen overwrote the panel).
    pub fn invalidate(&mut self) {
        self.shown = None;
        self.last_compose_ms = None;
    }

    pub fn shown(&self) -> Option<&DisplayText> {
        self.shown.as_ref()
    }
}
