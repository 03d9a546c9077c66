//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements  | Connects to                    |
//! |---------------|-------------|--------------------------------|
//! | `config_file` | ConfigPort  | JSON parameter file            |
//! | `log_sink`    | EventSink   | `log` facade                   |
//! | `stdio`       | EventSink   | stdout status topic            |
//! |               | (producer)  | stdin frames, publish ticker   |
//! | `time`        | TimePort    | `std::time::Instant`           |

pub mod config_file;
pub mod log_sink;
pub mod stdio;
pub mod time;
