//! Static country reference data and the selection capability.

/// Country selector trait and its presentation variants.
pub mod selector;
/// Dialing-code table.
pub mod table;
