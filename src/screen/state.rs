use crate::{
    action::{Action, ActionError, Effect, StoreWrite},
    contact::Contact,
    core::{store::ContactStore, window::ListWindow},
    country::selector::CountrySelector,
    form::{AddContactForm, FormPhase},
    runtime::events::ScreenEvent,
    types::{ContactId, TimestampMs},
};

/// Everything the contact-list screen owns.
///
/// [`ScreenState::apply`] is the only mutator. It never touches storage or
/// timers; those come back as [`Effect`]s for the caller to run after the
/// transition.
pub struct ScreenState {
    store: ContactStore,
    window: ListWindow,
    form: AddContactForm,
}

/// One selectable row of the country widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOption {
    /// Dialing code submitted on selection.
    pub code: String,
    /// Widget-specific row text.
    pub label: String,
}

/// Render-ready copy of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    /// Rendered prefix of the collection.
    pub visible: Vec<Contact>,
    /// Size of the whole collection.
    pub total: usize,
    /// Nominal window size; may exceed `total`.
    pub window: usize,
    /// Footer spinner flag.
    pub loading: bool,
    /// Modal visibility.
    pub form_phase: FormPhase,
    /// Name field text.
    pub form_name: String,
    /// Number field text.
    pub form_number: String,
    /// Active dialing code.
    pub selected_code: String,
    /// Number field length limit.
    pub max_number_len: usize,
    /// Rows the country widget lists.
    pub country_options: Vec<CountryOption>,
}

impl ScreenState {
    /// Empty screen with a closed form.
    pub fn new(window: ListWindow, selector: Box<dyn CountrySelector>) -> Self {
        Self {
            store: ContactStore::new(),
            window,
            form: AddContactForm::new(selector),
        }
    }

    /// Whole in-memory collection.
    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Pagination state.
    pub fn window(&self) -> &ListWindow {
        &self.window
    }

    /// Add-contact form state.
    pub fn form(&self) -> &AddContactForm {
        &self.form
    }

    /// Contacts inside the current window.
    pub fn visible(&self) -> Vec<Contact> {
        self.store.window_cloned(self.window.size())
    }

    /// Applies one action and returns the effects to run, in order.
    pub fn apply(&mut self, action: Action) -> Result<Vec<Effect>, ActionError> {
        let effects = match action {
            Action::Loaded { contacts } => {
                self.store.replace_all(contacts);
                vec![Effect::Emit(ScreenEvent::Loaded {
                    count: self.store.len(),
                })]
            }
            Action::EndReached => {
                if self.window.begin_load() {
                    vec![
                        Effect::Emit(ScreenEvent::LoadingStarted),
                        Effect::ScheduleGrowth,
                    ]
                } else {
                    Vec::new()
                }
            }
            Action::PageLoaded => {
                if !self.window.is_loading() {
                    return Ok(Vec::new());
                }
                let window = self.window.finish_load();
                vec![Effect::Emit(ScreenEvent::WindowGrown { window })]
            }
            Action::OpenForm => {
                if self.form.is_open() {
                    return Ok(Vec::new());
                }
                self.form.open();
                vec![Effect::Emit(ScreenEvent::FormOpened)]
            }
            Action::CancelForm => {
                if !self.form.is_open() {
                    return Ok(Vec::new());
                }
                self.form.cancel();
                vec![Effect::Emit(ScreenEvent::FormClosed)]
            }
            Action::SetName(name) => {
                self.form.set_name(name);
                Vec::new()
            }
            Action::SetNumber(number) => {
                self.form.set_number(&number);
                Vec::new()
            }
            Action::SetCountryQuery(query) => {
                self.form.set_country_query(&query);
                Vec::new()
            }
            Action::SelectCountry(code) => {
                let entry = self.form.select_country(&code)?;
                vec![Effect::Emit(ScreenEvent::CountrySelected {
                    code: entry.code.to_string(),
                    max_number_len: entry.phone_length,
                })]
            }
            Action::Submit { now_ms } => self.submit(now_ms)?.1,
            Action::Delete { id } => self.delete(id).1,
            Action::Restore { contacts, draft } => {
                self.store.replace_all(contacts);
                if let Some(draft) = draft {
                    self.form.restore(draft)?;
                }
                Vec::new()
            }
        };
        Ok(effects)
    }

    /// Accepts the form into the collection, returning the new id.
    pub fn submit(&mut self, now_ms: TimestampMs) -> Result<(ContactId, Vec<Effect>), ActionError> {
        let draft = self.form.submit()?;
        let previous = self.store.to_vec();
        let contact = self.store.insert(draft, now_ms);
        let effects = vec![
            Effect::Persist {
                write: StoreWrite::Append(contact.clone()),
                previous,
            },
            Effect::Emit(ScreenEvent::Added {
                id: contact.id.clone(),
            }),
            Effect::Emit(ScreenEvent::FormClosed),
        ];
        Ok((contact.id, effects))
    }

    /// Drops `id` from the collection; the flag tells whether it was present.
    /// The filtered collection is written either way.
    pub fn delete(&mut self, id: ContactId) -> (bool, Vec<Effect>) {
        let previous = self.store.to_vec();
        let removed = self.store.remove(&id).is_some();
        let effects = vec![
            Effect::Persist {
                write: StoreWrite::Remove(id.clone()),
                previous,
            },
            Effect::Emit(ScreenEvent::Deleted { id, removed }),
        ];
        (removed, effects)
    }

    /// Render-ready snapshot of the whole screen.
    pub fn view(&self) -> ScreenView {
        let selector = self.form.selector();
        let selected = self.form.selected_country();
        ScreenView {
            visible: self.visible(),
            total: self.store.len(),
            window: self.window.size(),
            loading: self.window.is_loading(),
            form_phase: self.form.phase(),
            form_name: self.form.name().to_string(),
            form_number: self.form.number().to_string(),
            selected_code: selected.code.to_string(),
            max_number_len: self.form.max_number_len(),
            country_options: selector
                .options()
                .into_iter()
                .map(|entry| CountryOption {
                    code: entry.code.to_string(),
                    label: selector.label(entry),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        country::selector::{DropdownSelector, PickerSelector},
        form::ValidationError,
    };

    fn state() -> ScreenState {
        ScreenState::new(ListWindow::default(), Box::new(PickerSelector::new()))
    }

    fn contacts(n: usize) -> Vec<Contact> {
        (1..=n)
            .map(|i| Contact {
                id: i.to_string(),
                name: format!("Member {i}"),
                country_code: "+1".to_string(),
                number: "5551234567".to_string(),
            })
            .collect()
    }

    fn fill_form(state: &mut ScreenState, number: &str) {
        state.apply(Action::OpenForm).expect("open");
        state.apply(Action::SetName("Ada".to_string())).expect("name");
        state.apply(Action::SetNumber(number.to_string())).expect("number");
    }

    #[test]
    fn scroll_end_schedules_once_until_page_loads() {
        let mut s = state();
        s.apply(Action::Loaded { contacts: contacts(12) }).expect("load");
        assert_eq!(s.visible().len(), 5);

        let effects = s.apply(Action::EndReached).expect("end");
        assert!(effects.contains(&Effect::ScheduleGrowth));
        assert!(s.apply(Action::EndReached).expect("end").is_empty());

        s.apply(Action::PageLoaded).expect("page");
        assert_eq!(s.visible().len(), 10);
        s.apply(Action::EndReached).expect("end");
        s.apply(Action::PageLoaded).expect("page");
        assert_eq!(s.visible().len(), 12);
        assert_eq!(s.window().size(), 15);

        assert!(s.apply(Action::PageLoaded).expect("stale").is_empty());
        assert_eq!(s.window().size(), 15);
    }

    #[test]
    fn valid_submit_appends_and_requests_full_write() {
        let mut s = state();
        s.apply(Action::Loaded { contacts: contacts(2) }).expect("load");
        fill_form(&mut s, "5551234567");

        let effects = s.apply(Action::Submit { now_ms: 42 }).expect("submit");
        let Effect::Persist {
            write: StoreWrite::Append(added),
            previous,
        } = &effects[0]
        else {
            panic!("expected persist first, got {effects:?}");
        };
        assert_eq!(previous.len(), 2);
        assert_eq!(s.store().len(), 3);
        assert_eq!(added.name, "Ada");
        assert_eq!(added.country_code, "+1");
        assert_eq!(s.store().to_vec()[2], *added);
        assert!(effects.contains(&Effect::Emit(ScreenEvent::Added {
            id: added.id.clone()
        })));
        assert!(!s.form().is_open());
    }

    #[test]
    fn one_digit_short_creates_nothing() {
        let mut s = state();
        fill_form(&mut s, "555123456");
        let err = s.apply(Action::Submit { now_ms: 1 }).expect_err("rejected");
        assert!(matches!(
            err,
            ActionError::Validation(ValidationError::NumberLength {
                expected: 10,
                actual: 9
            })
        ));
        assert!(s.store().is_empty());
        assert!(s.form().is_open());
    }

    #[test]
    fn one_digit_long_is_cut_by_the_input_limit() {
        let mut s = state();
        fill_form(&mut s, "55512345678");
        assert_eq!(s.view().form_number, "5551234567");
        s.apply(Action::Submit { now_ms: 1 }).expect("accepted");
        assert_eq!(s.store().len(), 1);
    }

    #[test]
    fn delete_missing_id_still_writes_unchanged_collection() {
        let mut s = state();
        s.apply(Action::Loaded { contacts: contacts(3) }).expect("load");
        let effects = s.apply(Action::Delete { id: "9".to_string() }).expect("delete");
        assert_eq!(
            effects,
            vec![
                Effect::Persist {
                    write: StoreWrite::Remove("9".to_string()),
                    previous: contacts(3),
                },
                Effect::Emit(ScreenEvent::Deleted {
                    id: "9".to_string(),
                    removed: false
                }),
            ]
        );
    }

    #[test]
    fn restore_puts_back_previous_collection() {
        let mut s = state();
        s.apply(Action::Loaded { contacts: contacts(3) }).expect("load");
        s.apply(Action::Delete { id: "2".to_string() }).expect("delete");
        assert_eq!(s.store().len(), 2);
        s.apply(Action::Restore {
            contacts: contacts(3),
            draft: None,
        })
        .expect("restore");
        assert_eq!(s.store().to_vec(), contacts(3));
        assert!(!s.form().is_open());
    }

    #[test]
    fn restore_after_failed_submit_reopens_form_with_input() {
        let mut s = state();
        s.apply(Action::Loaded { contacts: contacts(1) }).expect("load");
        fill_form(&mut s, "5551234567");
        let effects = s.apply(Action::Submit { now_ms: 7 }).expect("submit");
        let Effect::Persist { write, previous } = effects[0].clone() else {
            panic!("expected persist first, got {effects:?}");
        };

        s.apply(Action::Restore {
            contacts: previous,
            draft: write.draft(),
        })
        .expect("restore");
        let view = s.view();
        assert_eq!(view.total, 1);
        assert_eq!(view.form_phase, FormPhase::Open);
        assert_eq!(view.form_name, "Ada");
        assert_eq!(view.form_number, "5551234567");
        assert_eq!(view.selected_code, "+1");
    }

    #[test]
    fn view_reflects_selector_variant() {
        let mut s = ScreenState::new(ListWindow::default(), Box::new(DropdownSelector::new()));
        s.apply(Action::SetCountryQuery("united".to_string())).expect("query");
        let view = s.view();
        assert_eq!(view.country_options.len(), 2);
        assert_eq!(view.country_options[0].label, "🇺🇸 United States (+1)");
        assert_eq!(view.max_number_len, 10);
        assert_eq!(view.form_phase, FormPhase::Closed);
    }
}
