//! Constructor-supplied diagnostic sink.
//!
//! Every trace line the client writes goes through a [`Diagnostics`] value held
//! by the client. By default it forwards to the process-wide [`log`] logger,
//! which stays silent until the application installs one; an explicit sink
//! (any [`log::Log`] implementation) can be injected through
//! [`ClientBuilder::diagnostics`](crate::ClientBuilder::diagnostics) instead.
//! Nothing the client does depends on whether a line was recorded.

use std::fmt;
use std::sync::Arc;

use log::{Level, Log, Record};

const TARGET: &str = "active24_dns";

/// Leveled diagnostic sink.
#[derive(Clone, Default)]
pub struct Diagnostics {
    sink: Option<Arc<dyn Log>>,
}

impl Diagnostics {
    /// Send diagnostics to `sink` instead of the global `log` logger.
    pub fn new(sink: Arc<dyn Log>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Forward to the global `log` logger (the default).
    pub fn global() -> Self {
        Self::default()
    }

    pub(crate) fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let record = Record::builder()
            .args(args)
            .level(level)
            .target(TARGET)
            .module_path_static(Some(module_path!()))
            .build();

        match &self.sink {
            Some(sink) => {
                if sink.enabled(record.metadata()) {
                    sink.log(&record);
                }
            }
            None => {
                if level <= log::max_level() && log::logger().enabled(record.metadata()) {
                    log::logger().log(&record);
                }
            }
        }
    }

    pub(crate) fn trace(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Trace, args);
    }

    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    pub(crate) fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("sink", &if self.sink.is_some() { "custom" } else { "global" })
            .finish()
    }
}
