//! Add-contact form state machine.

use thiserror::Error;

use crate::{
    contact::ContactDraft,
    country::{selector::CountrySelector, table::CountryEntry},
};

/// Reasons a submit (or a country selection) is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Submit arrived while the form was not shown.
    #[error("form is not open")]
    FormClosed,
    /// Name field is empty.
    #[error("name is required")]
    EmptyName,
    /// Number does not have the selected country's digit count.
    #[error("number must have {expected} digits, got {actual}")]
    NumberLength {
        /// Required length for the selected country.
        expected: usize,
        /// Length entered.
        actual: usize,
    },
    /// Dialing code is not in the country table.
    #[error("unknown country code {0}")]
    UnknownCountry(String),
}

/// Visibility of the modal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Hidden.
    #[default]
    Closed,
    /// Shown and accepting input.
    Open,
}

/// Transient fields of the add-contact modal.
pub struct AddContactForm {
    phase: FormPhase,
    name: String,
    number: String,
    selector: Box<dyn CountrySelector>,
}

impl AddContactForm {
    /// Creates a closed form over the given country widget.
    pub fn new(selector: Box<dyn CountrySelector>) -> Self {
        Self {
            phase: FormPhase::Closed,
            name: String::new(),
            number: String::new(),
            selector,
        }
    }

    /// Current visibility.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// True while the modal accepts input.
    pub fn is_open(&self) -> bool {
        self.phase == FormPhase::Open
    }

    /// Name field text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number field text.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Active country table entry.
    pub fn selected_country(&self) -> &'static CountryEntry {
        self.selector.selected()
    }

    /// Input length limit, tracking the active country.
    pub fn max_number_len(&self) -> usize {
        self.selector.selected().phone_length
    }

    /// Country widget driving the selection.
    pub fn selector(&self) -> &dyn CountrySelector {
        self.selector.as_ref()
    }

    /// Shows the form with whatever was typed before.
    pub fn open(&mut self) {
        self.phase = FormPhase::Open;
    }

    /// Hides the form; typed fields survive until the next successful submit.
    pub fn cancel(&mut self) {
        self.phase = FormPhase::Closed;
    }

    /// Replaces the name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Stores `number`, cut to the active country's length.
    pub fn set_number(&mut self, number: &str) {
        let max = self.max_number_len();
        self.number = number.chars().take(max).collect();
    }

    /// Forwards search text to the country widget.
    pub fn set_country_query(&mut self, query: &str) {
        self.selector.set_query(query);
    }

    /// Switches the active country. The current number is kept as typed and
    /// re-checked on submit.
    pub fn select_country(&mut self, code: &str) -> Result<&'static CountryEntry, ValidationError> {
        self.selector.on_select(code)
    }

    /// Reopens the form holding `draft`, as it was just before a submit
    /// whose write did not go through.
    pub fn restore(&mut self, draft: ContactDraft) -> Result<(), ValidationError> {
        self.selector.on_select(&draft.country_code)?;
        self.name = draft.name;
        self.number = draft.number;
        self.phase = FormPhase::Open;
        Ok(())
    }

    /// Validates and, on success, closes the form and clears name and number.
    ///
    /// A rejected submit leaves every field and the phase unchanged.
    pub fn submit(&mut self) -> Result<ContactDraft, ValidationError> {
        if !self.is_open() {
            return Err(ValidationError::FormClosed);
        }
        let draft = ContactDraft {
            name: self.name.clone(),
            country_code: self.selector.selected().code.to_string(),
            number: self.number.clone(),
        };
        draft.validate()?;

        self.phase = FormPhase::Closed;
        self.name.clear();
        self.number.clear();
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::selector::{DropdownSelector, PickerSelector};

    fn open_form() -> AddContactForm {
        let mut form = AddContactForm::new(Box::new(PickerSelector::new()));
        form.open();
        form
    }

    #[test]
    fn exact_length_submit_closes_and_resets() {
        let mut form = open_form();
        form.set_name("Ada");
        form.set_number("5551234567");
        let draft = form.submit().expect("valid");
        assert_eq!(draft.country_code, "+1");
        assert_eq!(draft.number, "5551234567");
        assert_eq!(form.phase(), FormPhase::Closed);
        assert_eq!(form.name(), "");
        assert_eq!(form.number(), "");
        assert_eq!(form.selected_country().code, "+1");
    }

    #[test]
    fn one_digit_short_is_rejected_and_form_stays_open() {
        let mut form = open_form();
        form.set_name("Ada");
        form.set_number("555123456");
        assert_eq!(
            form.submit(),
            Err(ValidationError::NumberLength {
                expected: 10,
                actual: 9
            })
        );
        assert!(form.is_open());
        assert_eq!(form.number(), "555123456");
    }

    #[test]
    fn overlong_input_is_truncated_to_max_length() {
        let mut form = open_form();
        form.set_number("55512345678");
        assert_eq!(form.number(), "5551234567");
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut form = open_form();
        form.set_number("5551234567");
        assert_eq!(form.submit(), Err(ValidationError::EmptyName));
        assert!(form.is_open());
    }

    #[test]
    fn closed_form_refuses_submit() {
        let mut form = AddContactForm::new(Box::new(DropdownSelector::new()));
        form.set_name("Ada");
        form.set_number("5551234567");
        assert_eq!(form.submit(), Err(ValidationError::FormClosed));

        form.open();
        form.cancel();
        assert_eq!(form.name(), "Ada");
        assert_eq!(form.submit(), Err(ValidationError::FormClosed));
    }

    #[test]
    fn restore_reopens_with_submitted_input() {
        let mut form = open_form();
        form.select_country("+44").expect("select");
        form.set_name("James");
        form.set_number("7911123456");
        let draft = form.submit().expect("valid");
        form.select_country("+1").expect("select");

        form.restore(draft.clone()).expect("restore");
        assert!(form.is_open());
        assert_eq!(form.name(), "James");
        assert_eq!(form.number(), "7911123456");
        assert_eq!(form.selected_country().code, "+44");
        assert_eq!(form.submit(), Ok(draft));
    }

    #[test]
    fn country_change_updates_code_and_max_length() {
        let mut form = open_form();
        form.set_country_query("india");
        let entry = form.select_country("+91").expect("select");
        assert_eq!(entry.code, "+91");
        assert_eq!(form.max_number_len(), entry.phone_length);
        form.set_name("Priya");
        form.set_number("9876543210");
        assert_eq!(form.submit().expect("valid").country_code, "+91");
    }
}
