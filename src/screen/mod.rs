//! Screen-level state and its reducer.

/// Screen state, reducer, and view snapshot.
pub mod state;
