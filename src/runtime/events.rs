//! Runtime event stream payloads.

use crate::{form::ValidationError, types::ContactId};

/// Events emitted from the screen task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Startup load applied.
    Loaded {
        /// Contacts now in memory.
        count: usize,
    },
    /// Startup load failed; the list stays empty.
    LoadFailed {
        /// Storage or decode error text.
        reason: String,
    },
    /// A contact was added and written.
    Added {
        /// New contact id.
        id: ContactId,
    },
    /// A delete was written.
    Deleted {
        /// Requested id.
        id: ContactId,
        /// False when no contact had that id.
        removed: bool,
    },
    /// Simulated fetch started; the list footer shows a spinner.
    LoadingStarted,
    /// Simulated fetch finished.
    WindowGrown {
        /// New nominal window size.
        window: usize,
    },
    /// Add-contact form shown.
    FormOpened,
    /// Add-contact form hidden.
    FormClosed,
    /// Active country changed.
    CountrySelected {
        /// Selected dialing code.
        code: String,
        /// New number length limit.
        max_number_len: usize,
    },
    /// Submit refused; the form stays open.
    SubmitRejected {
        /// Why the input was refused.
        reason: ValidationError,
    },
    /// A write failed and the in-memory collection was rolled back.
    PersistFailed {
        /// Storage error text.
        reason: String,
    },
}
