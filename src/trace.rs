//! Optional structured logging.
//!
//! With the `tracing` feature enabled, `trace_event!` forwards to the
//! matching [`tracing`](https://docs.rs/tracing) macro under the `multicast`
//! target. Without it, the fields are only borrowed so that values computed
//! solely for logging do not trigger unused-variable warnings.

macro_rules! trace_event {
    ($level:ident, $message:literal $(, $field:ident)* $(,)?) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!(target: "multicast", $($field,)* $message);
        #[cfg(not(feature = "tracing"))]
        let _ = ($(&$field,)*);
    }};
}
