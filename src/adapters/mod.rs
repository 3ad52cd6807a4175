//! Concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                      |
//! |------------|--------------|----------------------------------|
//! | `hardware` | SensorPort   | Reed switch GPIO                 |
//! |            | KeypadPort   | 4×3 matrix keypad GPIO           |
//! |            | DisplayPort  | 16×2 LCD over I²C                |
//! |            | SignalPort   | Buzzer and LED GPIO              |
//! | `log_sink` | EventSink    | Serial log output                |
//! | `time`     | ClockPort    | ESP32 system timer               |

pub mod hardware;
pub mod log_sink;
pub mod time;
