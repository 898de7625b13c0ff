//! Monitoring events and the observers that receive them.
//!
//! Every top-level operation takes an `&dyn Observer` and reports notable occurrences to it
//! synchronously, on the calling thread. Events are fire-and-forget: nothing in the crate
//! stores them.

use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warn,
    Error,
    Debug,
}
impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }
}
impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single notification: what happened, how serious it is and an optional detail
/// (usually the affected path or the error text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub severity: Severity,
    pub message: String,
    pub data: Option<String>,
}
impl Event {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            data: None,
        }
    }
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, message)
    }
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, message)
    }
    pub fn with_data(mut self, data: impl fmt::Display) -> Self {
        self.data = Some(data.to_string());
        self
    }
}
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(data) => write!(f, "[{}] {}: {}", self.severity, self.message, data),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Sink for [`Event`]s.
///
/// Implementations must not panic: the operations that call `notify` do not guard against it.
pub trait Observer {
    fn notify(&self, event: &Event);
}
impl<F> Observer for F
where
    F: Fn(&Event),
{
    fn notify(&self, event: &Event) {
        self(event)
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;
impl Observer for NullObserver {
    fn notify(&self, _event: &Event) {}
}

/// Forwards events to the [`log`] facade at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;
impl Observer for LogObserver {
    fn notify(&self, event: &Event) {
        let level = match event.severity {
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error => log::Level::Error,
            Severity::Debug => log::Level::Debug,
        };
        match &event.data {
            Some(data) => log::log!(level, "{}: {}", event.message, data),
            None => log::log!(level, "{}", event.message),
        }
    }
}

/// Keeps every event it receives, in arrival order.
#[derive(Debug, Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
}
impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
    pub fn with_severity(&self, severity: Severity) -> Vec<Event> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.severity == severity)
            .cloned()
            .collect()
    }
    pub fn count(&self, severity: Severity) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.severity == severity)
            .count()
    }
}
impl Observer for Recorder {
    fn notify(&self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}
