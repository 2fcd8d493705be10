//! Screen actions and the side effects they request.

use thiserror::Error;

use crate::{
    contact::{Contact, ContactDraft},
    form::ValidationError,
    runtime::events::ScreenEvent,
    types::{ContactId, TimestampMs},
};

/// Input to [`crate::screen::state::ScreenState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Startup load finished.
    Loaded {
        /// Collection read from storage.
        contacts: Vec<Contact>,
    },
    /// The list was scrolled to its end.
    EndReached,
    /// The simulated fetch delay elapsed.
    PageLoaded,
    /// Show the add-contact form.
    OpenForm,
    /// Dismiss the form without saving.
    CancelForm,
    /// Name field changed.
    SetName(String),
    /// Number field changed.
    SetNumber(String),
    /// Country widget search text changed.
    SetCountryQuery(String),
    /// A country was picked.
    SelectCountry(String),
    /// Save button pressed.
    Submit {
        /// Clock reading used for the new id.
        now_ms: TimestampMs,
    },
    /// Trash button pressed on a row.
    Delete {
        /// Row to remove.
        id: ContactId,
    },
    /// Put back a collection after a failed write.
    Restore {
        /// Collection as it was before the failed mutation.
        contacts: Vec<Contact>,
        /// Form input of a submit whose write failed; reopens the form.
        draft: Option<ContactDraft>,
    },
}

/// Single-record change applied on top of the stored collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    /// Append a newly created contact.
    Append(Contact),
    /// Filter out every contact with this id.
    Remove(ContactId),
}

impl StoreWrite {
    /// Form input to hand back when this write fails.
    pub fn draft(&self) -> Option<ContactDraft> {
        match self {
            Self::Append(contact) => Some(ContactDraft::from(contact)),
            Self::Remove(_) => None,
        }
    }
}

/// Work the runtime performs after a transition, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Rewrite the stored collection with `write` applied to `previous`.
    Persist {
        /// Change made in memory.
        write: StoreWrite,
        /// Collection before the change; restored if the write fails.
        previous: Vec<Contact>,
    },
    /// Start the deferred window growth.
    ScheduleGrowth,
    /// Publish an event to subscribers.
    Emit(ScreenEvent),
}

/// Transition refused by the reducer; state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Form input or selection was invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
