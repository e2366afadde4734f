//! Observable events
//!
//! Every line the server logs carries one of these event names.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    ConfigLoaded,
    ServerStart,
    ServerStopped,

    // Queries
    /// Query answered
    QueryComplete,
    /// Query refused with a client error
    QueryRejected,
    /// Query failed on the server side
    QueryFailed,
    /// Query abandoned after the request timeout
    QueryTimeout,

    // Introspection
    IntrospectComplete,
    /// One dataset could not be described
    DatasetLoadFailed,

    // Accounts
    UserRegistered,
    LoginSucceeded,
    LoginFailed,
    /// Request to a protected route without a valid token
    AuthRejected,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::ServerStopped => "SERVER_STOPPED",

            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryFailed => "QUERY_FAILED",
            Event::QueryTimeout => "QUERY_TIMEOUT",

            Event::IntrospectComplete => "INTROSPECT_COMPLETE",
            Event::DatasetLoadFailed => "DATASET_LOAD_FAILED",

            Event::UserRegistered => "USER_REGISTERED",
            Event::LoginSucceeded => "LOGIN_SUCCEEDED",
            Event::LoginFailed => "LOGIN_FAILED",
            Event::AuthRejected => "AUTH_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryRejected
            | Event::DatasetLoadFailed
            | Event::LoginFailed
            | Event::AuthRejected => Severity::Warn,
            Event::QueryFailed | Event::QueryTimeout => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_upper_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::ServerStart,
            Event::ServerStopped,
            Event::QueryComplete,
            Event::QueryRejected,
            Event::QueryFailed,
            Event::QueryTimeout,
            Event::IntrospectComplete,
            Event::DatasetLoadFailed,
            Event::UserRegistered,
            Event::LoginSucceeded,
            Event::LoginFailed,
            Event::AuthRejected,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::QueryComplete.severity(), Severity::Info);
        assert_eq!(Event::QueryRejected.severity(), Severity::Warn);
        assert_eq!(Event::QueryTimeout.severity(), Severity::Error);
        assert_eq!(format!("{}", Event::ServerStart), "SERVER_START");
    }
}
