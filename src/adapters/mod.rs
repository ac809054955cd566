//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter       | Implements    | Connects to                      |
//! |---------------|---------------|----------------------------------|
//! | `io_link`     | ActuatorLink  | serial port / any `io::Write`    |
//! | `queued_link` | ActuatorLink  | outbound channel + writer thread |
//! | `log_sink`    | EventSink     | `log` facade                     |

pub mod io_link;
pub mod log_sink;
pub mod queued_link;
