use std::{path::Path, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{
    sync::{Mutex, broadcast, mpsc, oneshot},
    time::Duration,
};
use tracing::{debug, error, info, warn};

use crate::{
    action::{Action, ActionError, Effect, StoreWrite},
    contact::Contact,
    core::{
        store::now_ms,
        window::{EndReachedPolicy, ListWindow, ScrollMetrics},
    },
    country::selector::CountrySelector,
    form::ValidationError,
    persist::{ContactRepository, KeyValueStorage, PersistError},
    screen::state::{ScreenState, ScreenView},
    types::{CONTACTS_KEY, ContactId, DEFAULT_INITIAL_WINDOW, DEFAULT_PAGE_DELAY_MS, DEFAULT_PAGE_STEP},
};

use super::{deferred::DeferredTask, events::ScreenEvent};

/// Failures reported to [`ScreenHandle`] callers.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Input refused; nothing changed.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// Write failed and was rolled back.
    #[error("storage: {0}")]
    Persist(#[from] PersistError),
    /// The screen task has stopped.
    #[error("screen task is gone")]
    ChannelClosed,
}

impl From<ActionError> for RuntimeError {
    fn from(value: ActionError) -> Self {
        match value {
            ActionError::Validation(err) => Self::Validation(err),
        }
    }
}

/// Failure loading a [`ScreenConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path as given.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// File is not valid config TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Screen tuning, loadable from TOML.
///
/// ```toml
/// storage_key = "contacts"
/// initial_window = 5
/// page_step = 5
/// page_delay_ms = 1000
/// seed_defaults = true
/// end_reached = { kind = "fraction", value = 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Key the collection blob is stored under.
    pub storage_key: String,
    /// Rows shown before any scrolling.
    pub initial_window: usize,
    /// Rows added per simulated page.
    pub page_step: usize,
    /// Simulated fetch delay.
    pub page_delay_ms: u64,
    /// Show built-in contacts when nothing is stored.
    pub seed_defaults: bool,
    /// How close to the end a scroll must get to load more.
    pub end_reached: EndReachedPolicy,
    /// Pending command capacity.
    pub command_queue_bound: usize,
    /// Broadcast buffer per subscriber.
    pub event_capacity: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            storage_key: CONTACTS_KEY.to_string(),
            initial_window: DEFAULT_INITIAL_WINDOW,
            page_step: DEFAULT_PAGE_STEP,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            seed_defaults: true,
            end_reached: EndReachedPolicy::default(),
            command_queue_bound: 64,
            event_capacity: 256,
        }
    }
}

impl ScreenConfig {
    /// Parses TOML; missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// Cloneable handle to a running screen task.
pub struct ScreenHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<ScreenEvent>,
}

impl Clone for ScreenHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Dispatch {
        action: Action,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Scrolled {
        metrics: ScrollMetrics,
        resp: oneshot::Sender<bool>,
    },
    Submit {
        resp: oneshot::Sender<Result<ContactId, RuntimeError>>,
    },
    Delete {
        id: ContactId,
        resp: oneshot::Sender<Result<bool, RuntimeError>>,
    },
    View {
        resp: oneshot::Sender<ScreenView>,
    },
    Contacts {
        resp: oneshot::Sender<Vec<Contact>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Starts the screen task. The stored collection is loaded before the first
/// command is handled.
pub fn spawn_screen(
    storage: Box<dyn KeyValueStorage>,
    selector: Box<dyn CountrySelector>,
    config: ScreenConfig,
) -> ScreenHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<ScreenEvent>(config.event_capacity.max(1));
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<()>();

    let mut task = ScreenTask {
        state: ScreenState::new(
            ListWindow::new(config.initial_window, config.page_step),
            selector,
        ),
        repo: Arc::new(Mutex::new(ContactRepository::with_key(
            storage,
            config.storage_key.clone(),
        ))),
        events_tx: events_tx.clone(),
        tick_tx,
        growth: None,
        config,
    };

    tokio::spawn(async move {
        task.load().await;

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    if task.handle_command(cmd).await {
                        break;
                    }
                }
                Some(()) = tick_rx.recv() => {
                    task.growth = None;
                    let _ = task.dispatch(Action::PageLoaded).await;
                }
            }
        }

        if task.growth.take().is_some() {
            debug!("cancelled pending page growth");
        }
        info!("screen task stopped");
    });

    ScreenHandle { cmd_tx, events_tx }
}

impl ScreenHandle {
    /// New receiver for events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ScreenEvent> {
        self.events_tx.subscribe()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn dispatch(&self, action: Action) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Dispatch { action, resp }).await?
    }

    /// Render-ready snapshot.
    pub async fn view(&self) -> Result<ScreenView, RuntimeError> {
        self.request(|resp| Command::View { resp }).await
    }

    /// Whole in-memory collection, not just the visible window.
    pub async fn contacts(&self) -> Result<Vec<Contact>, RuntimeError> {
        self.request(|resp| Command::Contacts { resp }).await
    }

    /// Starts a page load unless one is in flight.
    pub async fn end_reached(&self) -> Result<(), RuntimeError> {
        self.dispatch(Action::EndReached).await
    }

    /// Reports a scroll position; returns whether it counted as end reached.
    pub async fn scrolled(&self, metrics: ScrollMetrics) -> Result<bool, RuntimeError> {
        self.request(|resp| Command::Scrolled { metrics, resp }).await
    }

    /// Shows the add-contact form.
    pub async fn open_form(&self) -> Result<(), RuntimeError> {
        self.dispatch(Action::OpenForm).await
    }

    /// Hides the form, keeping typed input.
    pub async fn cancel_form(&self) -> Result<(), RuntimeError> {
        self.dispatch(Action::CancelForm).await
    }

    /// Sets the name field.
    pub async fn set_name(&self, name: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Action::SetName(name.into())).await
    }

    /// Sets the number field, cut to the active country length.
    pub async fn set_number(&self, number: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Action::SetNumber(number.into())).await
    }

    /// Sets the country widget search text.
    pub async fn set_country_query(&self, query: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Action::SetCountryQuery(query.into())).await
    }

    /// Picks the country with dialing code `code`.
    pub async fn select_country(&self, code: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Action::SelectCountry(code.into())).await
    }

    /// Saves the form. The id is returned only once the write succeeded.
    pub async fn submit(&self) -> Result<ContactId, RuntimeError> {
        self.request(|resp| Command::Submit { resp }).await?
    }

    /// Returns whether a contact with `id` existed.
    pub async fn delete(&self, id: impl Into<String>) -> Result<bool, RuntimeError> {
        let id = id.into();
        self.request(|resp| Command::Delete { id, resp }).await?
    }

    /// Stops the task, cancelling any pending page growth.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }
}

struct ScreenTask {
    state: ScreenState,
    repo: Arc<Mutex<ContactRepository>>,
    events_tx: broadcast::Sender<ScreenEvent>,
    tick_tx: mpsc::UnboundedSender<()>,
    growth: Option<DeferredTask>,
    config: ScreenConfig,
}

impl ScreenTask {
    async fn load(&mut self) {
        let seed = self.config.seed_defaults;
        let repo = Arc::clone(&self.repo);
        let loaded = tokio::task::spawn_blocking(move || {
            let repo = repo.blocking_lock();
            repo.load(seed)
        })
        .await
        .map_err(|e| PersistError::Message(format!("join error: {e}")))
        .and_then(|r| r);

        match loaded {
            Ok(contacts) => {
                info!(count = contacts.len(), "contacts loaded");
                let _ = self.dispatch(Action::Loaded { contacts }).await;
            }
            Err(err) => {
                error!(%err, "failed to load contacts; starting empty");
                let _ = self.events_tx.send(ScreenEvent::LoadFailed {
                    reason: err.to_string(),
                });
            }
        }
    }

    async fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Dispatch { action, resp } => {
                let _ = resp.send(self.dispatch(action).await);
            }
            Command::Scrolled { metrics, resp } => {
                let reached = self.config.end_reached.is_end_reached(&metrics);
                if reached {
                    let _ = self.dispatch(Action::EndReached).await;
                }
                let _ = resp.send(reached);
            }
            Command::Submit { resp } => {
                let out = match self.state.submit(now_ms()) {
                    Ok((id, effects)) => self.run_effects(effects).await.map(|()| id),
                    Err(err) => {
                        let err = RuntimeError::from(err);
                        if let RuntimeError::Validation(reason) = &err {
                            debug!(%reason, "submit rejected");
                            let _ = self.events_tx.send(ScreenEvent::SubmitRejected {
                                reason: reason.clone(),
                            });
                        }
                        Err(err)
                    }
                };
                let _ = resp.send(out);
            }
            Command::Delete { id, resp } => {
                let (removed, effects) = self.state.delete(id);
                let out = self.run_effects(effects).await.map(|()| removed);
                let _ = resp.send(out);
            }
            Command::View { resp } => {
                let _ = resp.send(self.state.view());
            }
            Command::Contacts { resp } => {
                let _ = resp.send(self.state.store().to_vec());
            }
            Command::Shutdown { resp } => {
                self.growth = None;
                let _ = resp.send(());
                return true;
            }
        }

        false
    }

    async fn dispatch(&mut self, action: Action) -> Result<(), RuntimeError> {
        let effects = self.state.apply(action)?;
        self.run_effects(effects).await
    }

    /// Runs effects in order. A failed write rolls the collection back,
    /// reopens the form for a failed submit, and drops the remaining effects
    /// of the batch.
    async fn run_effects(&mut self, effects: Vec<Effect>) -> Result<(), RuntimeError> {
        for effect in effects {
            match effect {
                Effect::Persist { write, previous } => {
                    let draft = write.draft();
                    let result = persist(Arc::clone(&self.repo), previous.clone(), write).await;
                    if let Err(err) = result {
                        error!(%err, "failed to write contacts; rolling back");
                        let restore = Action::Restore {
                            contacts: previous,
                            draft,
                        };
                        if let Err(restore_err) = self.state.apply(restore) {
                            warn!(%restore_err, "form input could not be restored");
                        }
                        let _ = self.events_tx.send(ScreenEvent::PersistFailed {
                            reason: err.to_string(),
                        });
                        return Err(err.into());
                    }
                }
                Effect::ScheduleGrowth => {
                    self.growth = Some(DeferredTask::spawn(
                        self.config.page_delay(),
                        self.tick_tx.clone(),
                        (),
                    ));
                }
                Effect::Emit(event) => {
                    let _ = self.events_tx.send(event);
                }
            }
        }
        Ok(())
    }
}

async fn persist(
    repo: Arc<Mutex<ContactRepository>>,
    previous: Vec<Contact>,
    write: StoreWrite,
) -> Result<(), PersistError> {
    let written = tokio::task::spawn_blocking(move || {
        let mut repo = repo.blocking_lock();
        match write {
            StoreWrite::Append(contact) => repo.save_contact(&previous, contact),
            StoreWrite::Remove(id) => repo.delete_by_id(&previous, &id),
        }
    })
    .await
    .map_err(|e| PersistError::Message(format!("join error: {e}")))??;
    debug!(count = written.len(), "contacts written");
    Ok(())
}
