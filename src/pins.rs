//! GPIO / peripheral pin assignments for the gate alarm board.
//!
//! Single source of truth: the device binary references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Gate sensor
// ---------------------------------------------------------------------------

/// Reed switch on the gate post, wired in parallel with a test button.
/// Pulled up; LOW = magnet away (gate open) or test button pressed.
pub const MAGNET_SWITCH_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Piezo buzzer driver transistor (active HIGH).
pub const ALARM_BUZZER_GPIO: i32 = 25;
/// Red alarm LED (active HIGH).
pub const ALARM_LED_GPIO: i32 = 26;
/// Green heartbeat LED (active HIGH).
pub const HEARTBEAT_LED_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// 4×3 membrane keypad
// ---------------------------------------------------------------------------

/// Row inputs, top to bottom (pulled up, LOW when a key in the row is
/// pressed while its column is driven LOW).
pub const KEYPAD_ROW_GPIOS: [i32; 4] = [13, 14, 16, 17];
/// Column outputs (open-drain), left to right.
pub const KEYPAD_COL_GPIOS: [i32; 3] = [18, 19, 23];

// ---------------------------------------------------------------------------
// I²C bus (16×2 LCD with PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// Bus clock for the LCD backpack.
pub const I2C_FREQ_HZ: u32 = 100_000;
