//! Observable events
//!
//! Every log line names one of these; free-form event strings are only
//! used by [`super::ObservationScope`].

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    BootStart,
    BootComplete,
    ConfigLoaded,
    ServerListening,
    ShutdownStart,

    // Store lifecycle
    StoreOpened,
    StoreClosed,

    // Mutations
    RecordCreated,
    RecordUpdated,
    RecordDeleted,
    /// Create or update refused by field validation
    RecordRejected,
    /// Gateway write failed; the mutation was rolled back
    PersistFailed,

    // Access
    AuthRejected,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreClosed => "STORE_CLOSED",
            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::PersistFailed => "PERSIST_FAILED",
            Event::AuthRejected => "AUTH_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::RecordRejected | Event::AuthRejected => Severity::Warn,
            Event::PersistFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
