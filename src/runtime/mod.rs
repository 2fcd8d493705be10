//! Single-owner async screen task and event stream APIs.

/// Cancellable deferred work bound to the screen task.
pub mod deferred;
/// Event stream types emitted by the runtime.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
