//! Notification sinks consuming new-review events.
//!
//! Both sinks iterate the reconciler's ordered event list independently;
//! neither is threaded through the detection pipeline itself.

pub(crate) mod console;
pub(crate) mod email;
