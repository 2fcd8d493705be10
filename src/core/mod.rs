//! In-memory authoritative collection and list-window helpers.

/// Authoritative contact collection and id generation.
pub mod store;
/// Display-only pagination window.
pub mod window;
