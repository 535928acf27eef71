//! Diagnostic logging setup. Records and results go to the sink, not here.

mod format;

pub use format::StructuredLogger;
