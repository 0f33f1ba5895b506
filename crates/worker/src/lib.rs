//! Invocation runtime primitives shared by the trigger host and gateways.
//!
//! Every trigger event runs as one independent task. This crate keeps the
//! spawning, classification and draining of those tasks in one place:
//! * [`TaskClass`]: execution classes used for logging and scheduling
//! * [`spawn_blocking`]: classified entry point for blocking I/O
//! * [`InvocationPool`]: bounded in-flight pool drained before shutdown

mod budget;
mod class;
mod join_set;
mod panic;
mod runtime;
mod spawn;

pub use budget::DrainReport;
pub use class::TaskClass;
pub use panic::join_error_panic_message;
pub use runtime::InvocationPool;
pub use spawn::spawn_blocking;
