//! Observability: structured JSON logging of typed events
//!
//! ```ignore
//! use tabserve::observability::{log_event, Event};
//!
//! log_event(Event::QueryComplete, &[("dataset", "people.csv"), ("rows", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a typed event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
