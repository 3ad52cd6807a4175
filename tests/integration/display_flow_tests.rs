//! What the LCD shows as the controller moves through its states.

use gatealarm::app::events::AppEvent;
use gatealarm::display::{DisplayText, compose};

use crate::mock_hw::Rig;

fn shown(rig: &Rig) -> (String, String) {
    let text = rig.app.shown_text().expect("text drawn");
    (text.line1.to_string(), text.line2.to_string())
}

#[test]
fn splash_drawn_at_start() {
    let rig = Rig::new();
    assert_eq!(
        rig.hw.last_render(),
        Some(("** Gate Alarm **", "**   Welcome  **"))
    );
    assert!(rig.app.shown_text().is_none());
}

#[test]
fn first_tick_replaces_splash_with_status() {
    let mut rig = Rig::new();
    rig.tick_at(1);
    assert_eq!(shown(&rig), ("OK".into(), String::new()));
    let (line1, _) = rig.hw.last_render().expect("rendered");
    assert_eq!(line1, "       OK");
}

#[test]
fn gate_open_text() {
    let mut rig = Rig::new();
    rig.hw.gate = true;
    rig.tick_at(1);
    assert_eq!(shown(&rig), ("** GATE **".into(), "** OPEN **".into()));
    assert_eq!(rig.hw.last_render(), Some(("   ** GATE **", "   ** OPEN **")));
}

#[test]
fn entry_shows_typed_value() {
    let mut rig = Rig::new();
    rig.press("12");
    rig.run_until(1000, 10);
    assert_eq!(shown(&rig), ("Enter delay:".into(), "12".into()));
}

#[test]
fn entry_overrides_suspension_text() {
    let mut rig = Rig::new();
    rig.press("#");
    rig.run_until(1000, 10);
    assert_eq!(shown(&rig), ("Alarm".into(), "Suspended".into()));

    rig.press("3");
    rig.run_until(2000, 10);
    assert_eq!(shown(&rig), ("Enter delay:".into(), "3".into()));
}

#[test]
fn timed_suspension_counts_down() {
    let mut rig = Rig::new();
    rig.hw.gate = true;
    rig.press("12#");
    let started = rig.now();

    let at_start = compose(rig.app.state(), started);
    assert_eq!(at_start, DisplayText::new("Alarm paused for", "12:00"));

    let later = compose(rig.app.state(), started + 60_500);
    assert_eq!(later.line2.as_str(), "10:59");

    let last_second = compose(rig.app.state(), started + 12 * 60_000 - 500);
    assert_eq!(last_second.line2.as_str(), "0:00");
}

#[test]
fn countdown_redrawn_about_once_per_second() {
    let mut rig = Rig::new();
    rig.press("5#");
    let renders_before = rig.hw.renders.len();
    let t = rig.now();
    rig.run_until(t + 10_000, 10);
    let redraws = rig.hw.renders.len() - renders_before;
    assert!((9..=12).contains(&redraws), "{} redraws", redraws);
}

#[test]
fn unchanged_text_not_redrawn() {
    let mut rig = Rig::new();
    rig.tick_at(1);
    rig.run_until(60_000, 10);
    assert_eq!(rig.hw.renders.len(), 2);
    let updates = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::DisplayUpdated(_)))
        .count();
    assert_eq!(updates, 1);
}

#[test]
fn reset_returns_to_ok() {
    let mut rig = Rig::new();
    rig.hw.gate = true;
    rig.tick_at(1);
    rig.hw.gate = false;
    rig.press("*");
    rig.run_until(1000, 10);
    assert_eq!(shown(&rig), ("OK".into(), String::new()));
}
