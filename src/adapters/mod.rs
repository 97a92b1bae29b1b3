//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                   |
//! |-------------|---------------------|-------------------------------|
//! | `hardware`  | KeypadPort          | Keypad matrix GPIO            |
//! |             | DisplayPort         | Text frame buffer             |
//! |             | BuzzerPort          | Buzzer GPIO                   |
//! |             | SensorPort          | LM35 ADC, ultrasonic GPIO     |
//! |             | SerialLinkPort      | Console UART                  |
//! | `log_sink`  | EventSink           | Serial log output             |
//! | `nvs`       | ConfigPort          | NVS / in-memory store         |
//! |             | EepromPort          |                               |
//! | `serial`    | SerialLinkPort      | Any `std::io::Write`          |
//! | `time`      | ClockPort           | 1 kHz tick counter            |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod serial;
pub mod time;
