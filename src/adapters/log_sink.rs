//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{debug, info, warn};

use crate::alarm::Suspension;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | splash shown, outputs low"),
            AppEvent::KeyPressed(key) => debug!("KEY   | '{}'", key.as_char()),
            AppEvent::GateOpened => warn!("GATE  | opened"),
            AppEvent::Reset => info!("GATE  | reset"),
            AppEvent::AlarmActivated => warn!("ALARM | sounding"),
            AppEvent::AlarmSilenced => info!("ALARM | silenced"),
            AppEvent::EntryStarted(v) => debug!("ENTRY | started, value={}", v),
            AppEvent::EntryUpdated(v) => debug!("ENTRY | value={}", v),
            AppEvent::SuspensionChanged(s) => match s {
                Suspension::Off => info!("SUSP  | cancelled"),
                Suspension::Timed { duration_ms, .. } => {
                    info!("SUSP  | timed, {} ms", duration_ms);
                }
                Suspension::Infinite => info!("SUSP  | until further notice"),
            },
            AppEvent::SuspensionExpired => info!("SUSP  | expired"),
            AppEvent::DisplayUpdated(text) => {
                debug!("LCD   | {:?} / {:?}", text.line1.as_str(), text.line2.as_str());
            }
            AppEvent::BacklightChanged(on) => {
                debug!("LCD   | backlight {}", if *on { "on" } else { "off" });
            }
        }
    }
}
