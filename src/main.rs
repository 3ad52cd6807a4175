//! Gate alarm firmware entry point.
//!
//! Hexagonal architecture driven by a single cooperative polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter             LogEventSink       SystemClock    │
//! │  (Sensor+Keypad+Display      (EventSink)        (ClockPort)    │
//! │   +Signal)                                                     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            AlarmService (pure logic)                   │    │
//! │  │  AlarmState · PulseScheduler · DisplayRefresher        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, InputOutput, Output, PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use gatealarm::adapters::hardware::{HardwareAdapter, SignalPins};
use gatealarm::adapters::log_sink::LogEventSink;
use gatealarm::adapters::time::SystemClock;
use gatealarm::app::service::AlarmService;
use gatealarm::config::SystemConfig;
use gatealarm::drivers::keypad::MatrixKeypad;
use gatealarm::drivers::lcd::I2cLcd;
use gatealarm::drivers::reed_switch::DebouncedInput;
use gatealarm::pins;

/// Pause between loop iterations. Short enough for keypad responsiveness,
/// long enough to let the idle task feed the task watchdog.
const LOOP_PERIOD_MS: u32 = 10;

type InPin = PinDriver<'static, AnyIOPin, Input>;
type OutPin = PinDriver<'static, AnyOutputPin, Output>;
type ColPin = PinDriver<'static, AnyIOPin, InputOutput>;

fn input_pin(gpio: i32) -> Result<InPin> {
    // SAFETY: every GPIO number in `pins` is claimed exactly once, here.
    let mut pin = PinDriver::input(unsafe { AnyIOPin::new(gpio) })?;
    pin.set_pull(Pull::Up)?;
    Ok(pin)
}

fn output_pin(gpio: i32) -> Result<OutPin> {
    // SAFETY: as above.
    let mut pin = PinDriver::output(unsafe { AnyOutputPin::new(gpio) })?;
    pin.set_low()?;
    Ok(pin)
}

/// Keypad column: open-drain, released until the scan pulls it LOW.
/// Two keys held in one row must not short a LOW column to a HIGH one.
fn column_pin(gpio: i32) -> Result<ColPin> {
    // SAFETY: as above.
    let mut pin = PinDriver::input_output_od(unsafe { AnyIOPin::new(gpio) })?;
    pin.set_high()?;
    Ok(pin)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Gate Alarm v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let gate = DebouncedInput::new(input_pin(pins::MAGNET_SWITCH_GPIO)?, true, config.debounce_ms);

    let [r0, r1, r2, r3] = pins::KEYPAD_ROW_GPIOS;
    let [c0, c1, c2] = pins::KEYPAD_COL_GPIOS;
    let keypad = MatrixKeypad::new(
        [input_pin(r0)?, input_pin(r1)?, input_pin(r2)?, input_pin(r3)?],
        [column_pin(c0)?, column_pin(c1)?, column_pin(c2)?],
        config.debounce_ms,
    )?;

    // SAFETY: as above.
    let (sda, scl) = unsafe {
        (
            AnyIOPin::new(pins::I2C_SDA_GPIO),
            AnyIOPin::new(pins::I2C_SCL_GPIO),
        )
    };
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        sda,
        scl,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let lcd = I2cLcd::new(i2c, Ets, config.lcd_i2c_address);

    let signals = SignalPins {
        buzzer: output_pin(pins::ALARM_BUZZER_GPIO)?,
        alarm_led: output_pin(pins::ALARM_LED_GPIO)?,
        heartbeat_led: output_pin(pins::HEARTBEAT_LED_GPIO)?,
    };

    let mut hw = HardwareAdapter::new(gate, keypad, lcd, signals);
    if let Err(e) = hw.init() {
        // Keep going: the alarm outputs matter more than the display
        error!("LCD init failed: {}", e);
    }

    // ── 4. Application service ────────────────────────────────
    let clock = SystemClock::new();
    let mut log_sink = LogEventSink::new();
    let mut app = AlarmService::new(config);

    app.start(&clock, &mut hw, &mut log_sink);
    FreeRtos::delay_ms(app.config().splash_duration_ms);

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    loop {
        app.tick(&clock, &mut hw, &mut log_sink);
        FreeRtos::delay_ms(LOOP_PERIOD_MS);
    }
}
