//! End-to-end alarm scenarios through `AlarmService::tick` with mock ports.

use gatealarm::alarm::{Key, Phase, Suspension};
use gatealarm::app::events::AppEvent;

use crate::mock_hw::Rig;

const TWELVE_MINUTES_MS: u32 = 12 * 60_000;

fn open_gate_at(rig: &mut Rig, now_ms: u32) {
    rig.hw.gate = true;
    rig.tick_at(now_ms);
}

// ── Gate and alarm ────────────────────────────────────────────

#[test]
fn start_pulls_every_output_low() {
    let rig = Rig::new();
    assert!(!rig.hw.buzzer);
    assert!(!rig.hw.alarm_led);
    assert!(!rig.hw.heartbeat_led);
    assert!(rig.hw.backlight);
    assert_eq!(rig.sink.events.first(), Some(&AppEvent::BacklightChanged(true)));
    assert!(rig.sink.events.contains(&AppEvent::Started));
}

#[test]
fn gate_open_sounds_alarm_immediately() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);

    assert_eq!(rig.app.state().phase(), Phase::Open);
    assert!(rig.app.state().is_sounding());
    assert!(rig.hw.buzzer);
    assert!(rig.hw.alarm_led);
    assert_eq!(rig.sink.count(&AppEvent::GateOpened), 1);
    assert_eq!(rig.sink.count(&AppEvent::AlarmActivated), 1);
}

#[test]
fn buzzer_follows_on_off_cadence() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);

    // 1500 ms on, 1000 ms off, one tick held at the cycle rebase
    for t in 11..=2600 {
        rig.tick_at(t);
        let expected = t < 1510 || t >= 2512;
        assert_eq!(rig.hw.buzzer, expected, "buzzer at {} ms", t);
    }
}

#[test]
fn alarm_led_flashes_quarter_second() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);

    for t in 11..=700 {
        rig.tick_at(t);
        let expected = t < 260 || t >= 512;
        assert_eq!(rig.hw.alarm_led, expected, "alarm LED at {} ms", t);
    }
}

#[test]
fn closing_gate_does_not_clear_alarm() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);
    rig.hw.gate = false;
    rig.run_until(5000, 10);

    assert!(rig.app.state().is_gate_open());
    assert!(rig.app.state().is_sounding());
}

#[test]
fn star_resets_everything() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);
    rig.hw.gate = false;
    rig.press("*");

    let state = rig.app.state();
    assert_eq!(state.phase(), Phase::Idle);
    assert!(!state.is_sounding());
    assert_eq!(state.suspension(), Suspension::Off);
    assert!(!rig.hw.buzzer);
    assert!(!rig.hw.alarm_led);
    assert!(rig.sink.events.contains(&AppEvent::Reset));
    assert!(rig.sink.events.contains(&AppEvent::AlarmSilenced));

    rig.run_until(10_000, 10);
    assert!(!rig.app.state().is_gate_open());
}

#[test]
fn reset_with_gate_still_open_relatches_next_tick() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);
    rig.press("*");
    assert!(!rig.app.state().is_gate_open());

    rig.tick_at(rig.now() + 10);
    assert!(rig.app.state().is_gate_open());
    assert!(rig.hw.buzzer);
    assert_eq!(rig.sink.count(&AppEvent::GateOpened), 2);
}

// ── Suspension ────────────────────────────────────────────────

#[test]
fn twelve_hash_suspends_for_twelve_minutes() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);
    rig.press("12#"); // '#' lands at t = 40

    assert_eq!(
        rig.app.state().suspension(),
        Suspension::Timed {
            duration_ms: TWELVE_MINUTES_MS,
            started_ms: 40,
        }
    );
    assert!(!rig.app.state().is_sounding());
    assert!(!rig.hw.buzzer);
    assert!(rig.hw.heartbeat_led);

    // Exactly at the boundary the suspension still holds
    rig.tick_at(40 + TWELVE_MINUTES_MS);
    assert!(rig.app.state().is_suspended());
    assert!(!rig.hw.buzzer);

    rig.tick_at(40 + TWELVE_MINUTES_MS + 1);
    assert!(!rig.app.state().is_suspended());
    assert!(rig.app.state().is_sounding());
    assert!(rig.hw.buzzer);
    assert_eq!(rig.sink.count(&AppEvent::SuspensionExpired), 1);
    assert_eq!(rig.sink.count(&AppEvent::AlarmActivated), 2);
}

#[test]
fn alarm_led_keeps_flashing_while_suspended() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);
    rig.press("#");

    let mut seen_on = false;
    let mut seen_off = false;
    for t in (rig.now() + 1)..(rig.now() + 1000) {
        rig.tick_at(t);
        seen_on |= rig.hw.alarm_led;
        seen_off |= !rig.hw.alarm_led;
        assert!(!rig.hw.buzzer);
    }
    assert!(seen_on && seen_off);
}

#[test]
fn zero_hash_cancels_suspension() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 10);
    rig.press("#");
    assert_eq!(rig.app.state().suspension(), Suspension::Infinite);
    assert!(!rig.hw.buzzer);

    rig.press("0#");
    assert_eq!(rig.app.state().suspension(), Suspension::Off);
    assert!(rig.app.state().is_sounding());
    assert!(rig.hw.buzzer);
}

#[test]
fn bare_hash_suspends_indefinitely() {
    let mut rig = Rig::new();
    rig.press("#");
    assert_eq!(rig.app.state().suspension(), Suspension::Infinite);

    let t = rig.now() + 10;
    open_gate_at(&mut rig, t);
    rig.run_until(rig.now() + 60 * 60_000, 1000);

    assert!(rig.app.state().is_gate_open());
    assert!(!rig.app.state().is_sounding());
    assert!(!rig.hw.buzzer);
    assert!(rig.hw.heartbeat_led);
}

#[test]
fn suspension_before_gate_opens_keeps_quiet_until_expiry() {
    let mut rig = Rig::new();
    rig.press("1#"); // '#' at t = 20
    open_gate_at(&mut rig, 1000);
    assert!(!rig.app.state().is_sounding());
    assert!(rig.hw.alarm_led);

    rig.tick_at(20 + 60_000);
    assert!(!rig.app.state().is_sounding());
    rig.tick_at(20 + 60_001);
    assert!(rig.app.state().is_sounding());
}

#[test]
fn new_entry_replaces_running_suspension() {
    let mut rig = Rig::new();
    rig.press("5#");
    assert!(rig.app.state().suspension().is_timed());
    rig.press("#");
    assert_eq!(rig.app.state().suspension(), Suspension::Infinite);
    rig.press("2#");
    assert!(rig.app.state().suspension().is_timed());
    assert_eq!(
        rig.app.state().suspension().remaining_ms(rig.now()),
        Some(2 * 60_000)
    );
}

#[test]
fn star_abandons_entry() {
    let mut rig = Rig::new();
    rig.press("12*");
    assert!(!rig.app.state().is_editing());
    assert_eq!(rig.app.state().suspension(), Suspension::Off);
    assert_eq!(rig.app.status().entry, None);
}

#[test]
fn status_reports_entry_in_progress() {
    let mut rig = Rig::new();
    rig.press("42");
    let status = rig.app.status();
    assert_eq!(status.phase, Phase::Idle);
    assert_eq!(status.entry, Some(42));
    assert!(!status.sounding);
    assert_eq!(rig.sink.count(&AppEvent::EntryStarted(4)), 1);
    assert_eq!(rig.sink.count(&AppEvent::EntryUpdated(42)), 1);
}

#[test]
fn out_of_range_digit_from_port_is_dropped() {
    let mut rig = Rig::new();
    rig.hw.keys.push_back(Key::Digit(42));
    rig.tick_at(10);
    assert!(!rig.app.state().is_editing());
    assert_eq!(rig.sink.count(&AppEvent::EntryStarted(0)), 0);

    rig.press("#");
    assert_eq!(rig.app.state().suspension(), Suspension::Infinite);
}

#[test]
fn entry_saturates_at_one_day() {
    let mut rig = Rig::new();
    rig.press("99999#");
    assert_eq!(
        rig.app.state().suspension().remaining_ms(rig.now()),
        Some(1440 * 60_000)
    );
}

// ── Heartbeat ─────────────────────────────────────────────────

#[test]
fn heartbeat_blips_when_not_suspended() {
    let mut rig = Rig::new();
    rig.tick_at(50);
    assert!(rig.hw.heartbeat_led);
    rig.tick_at(150);
    assert!(!rig.hw.heartbeat_led);
    rig.tick_at(8000);
    assert!(!rig.hw.heartbeat_led);
    rig.tick_at(8101); // cycle rebase, level held
    assert!(!rig.hw.heartbeat_led);
    rig.tick_at(8150);
    assert!(rig.hw.heartbeat_led);
}

#[test]
fn heartbeat_solid_while_suspended() {
    let mut rig = Rig::new();
    rig.press("#");
    let start = rig.now();
    for t in (start..start + 20_000).step_by(10) {
        rig.tick_at(t);
        assert!(rig.hw.heartbeat_led, "heartbeat at {} ms", t);
    }
}

// ── Backlight ─────────────────────────────────────────────────

#[test]
fn backlight_times_out_when_idle() {
    let mut rig = Rig::new();
    rig.tick_at(1); // first status text re-arms at t = 1
    rig.run_until(10_000, 10);
    assert!(rig.hw.backlight);

    rig.tick_at(10_001);
    assert!(!rig.hw.backlight);
    assert_eq!(rig.sink.count(&AppEvent::BacklightChanged(false)), 1);

    rig.run_until(60_000, 10);
    assert!(!rig.hw.backlight);
    assert_eq!(rig.sink.count(&AppEvent::BacklightChanged(false)), 1);
}

#[test]
fn backlight_rearmed_once_per_text_change() {
    let mut rig = Rig::new();
    assert_eq!(rig.app.pulses().backlight.rearm_count(), 1);

    rig.tick_at(1);
    rig.run_until(5000, 10);
    assert_eq!(rig.app.pulses().backlight.rearm_count(), 2);
    assert_eq!(rig.hw.renders.len(), 2);

    rig.press("5");
    rig.run_until(5500, 10);
    assert_eq!(rig.app.pulses().backlight.rearm_count(), 3);
    assert_eq!(rig.hw.renders.len(), 3);
}

#[test]
fn backlight_held_while_gate_open() {
    let mut rig = Rig::new();
    open_gate_at(&mut rig, 1);
    rig.run_until(30_000, 10);
    assert!(rig.hw.backlight);
}

#[test]
fn backlight_held_while_editing() {
    let mut rig = Rig::new();
    rig.press("7");
    rig.run_until(30_000, 10);
    assert!(rig.app.state().is_editing());
    assert!(rig.hw.backlight);
}

#[test]
fn bare_hash_wakes_backlight() {
    let mut rig = Rig::new();
    rig.tick_at(1);
    rig.run_until(10_001, 10);
    assert!(!rig.hw.backlight);

    rig.press("#");
    assert!(rig.hw.backlight);

    // Infinite suspension does not exempt the backlight
    rig.run_until(25_000, 10);
    assert!(!rig.hw.backlight);
}
