//! Shared identifiers and screen defaults.

/// Opaque, time-based contact identifier.
pub type ContactId = String;
/// Dialing prefix such as `+1`.
pub type DialCode = String;
/// Milliseconds since the Unix epoch.
pub type TimestampMs = u64;

/// Storage key under which the whole collection is persisted.
pub const CONTACTS_KEY: &str = "contacts";
/// Number of contacts rendered before the first scroll-end.
pub const DEFAULT_INITIAL_WINDOW: usize = 5;
/// Growth of the rendered window per simulated fetch.
pub const DEFAULT_PAGE_STEP: usize = 5;
/// Artificial latency of one simulated fetch.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1_000;
