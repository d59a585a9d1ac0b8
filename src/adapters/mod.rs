//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                      | Connects to              |
//! |------------|---------------------------------|--------------------------|
//! | `hal`      | ButtonPort, PwmPort,            | any `embedded-hal` 1.0   |
//! |            | WhiteLedPort                    | pin / PWM channel        |
//! | `hardware` | all of the above, plus          | ESP32-C3 GPIO, LEDC,     |
//! |            | SleepController, InterruptSource| light sleep, GPIO ISR    |
//! | `log_sink` | EventSink                       | Serial log output        |

pub mod hal;
#[cfg(target_os = "espidf")]
pub mod hardware;
pub mod log_sink;
