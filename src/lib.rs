//! Team contact list: an in-memory contact collection persisted as one JSON
//! blob in key-value storage, a display-only paginated list window, and an
//! add-contact form, driven by a single-owner screen task.
//!
//! # Examples
//!
//! Reducer usage with [`screen::state::ScreenState`]:
//! ```
//! use teamroster::{
//!     action::{Action, Effect},
//!     core::window::ListWindow,
//!     country::selector::PickerSelector,
//!     screen::state::ScreenState,
//! };
//!
//! let mut state = ScreenState::new(ListWindow::default(), Box::new(PickerSelector::new()));
//! state.apply(Action::OpenForm).expect("open");
//! state.apply(Action::SetName("Ada".to_string())).expect("name");
//! state.apply(Action::SetNumber("5551234567".to_string())).expect("number");
//! let effects = state.apply(Action::Submit { now_ms: 1 }).expect("submit");
//! assert!(matches!(effects[0], Effect::Persist { .. }));
//! assert_eq!(state.store().len(), 1);
//! ```
//!
//! Runtime usage with SQLite storage:
//! ```no_run
//! use teamroster::{
//!     country::selector::DropdownSelector,
//!     persist::sqlite::SqliteStorage,
//!     runtime::handle::{spawn_screen, ScreenConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let storage = SqliteStorage::open("contacts.db").expect("open sqlite");
//! let handle = spawn_screen(
//!     Box::new(storage),
//!     Box::new(DropdownSelector::new()),
//!     ScreenConfig::default(),
//! );
//! handle.open_form().await.expect("open");
//! handle.set_name("Ada").await.expect("name");
//! handle.set_number("5551234567").await.expect("number");
//! let _id = handle.submit().await.expect("submit");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Screen actions and requested side effects.
pub mod action;
/// Contact records and drafts.
pub mod contact;
/// In-memory collection and list-window helpers.
pub mod core;
/// Country table and selector capability.
pub mod country;
/// Add-contact form state machine.
pub mod form;
/// Key-value persistence of the whole collection.
pub mod persist;
/// Single-owner async runtime and events.
pub mod runtime;
/// Screen state reducer and view snapshot.
pub mod screen;
/// Shared identifiers and defaults.
pub mod types;
