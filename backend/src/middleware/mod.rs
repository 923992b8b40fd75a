//! HTTP middleware shared across the application.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace, TraceId};
