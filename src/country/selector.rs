//! Country selection capability injected into the add-contact form.
//!
//! The screen only depends on [`CountrySelector`]; the picker and dropdown
//! variants differ in the option list they expose and how they label it.

use crate::form::ValidationError;

use super::table::{self, CountryEntry};

/// Active-country capability backing the form's country widget.
pub trait CountrySelector: Send + 'static {
    /// Currently selected entry.
    fn selected(&self) -> &'static CountryEntry;

    /// Makes `code` the active country.
    ///
    /// Any code present in the table is accepted, independent of which
    /// options are currently listed.
    fn on_select(&mut self, code: &str) -> Result<&'static CountryEntry, ValidationError>;

    /// Entries the widget currently lists.
    fn options(&self) -> Vec<&'static CountryEntry> {
        table::countries().iter().collect()
    }

    /// Row text for `entry`.
    fn label(&self, entry: &CountryEntry) -> String;

    /// Updates the widget's search text. Non-searchable widgets ignore it.
    fn set_query(&mut self, _query: &str) {}
}

fn lookup(code: &str) -> Result<&'static CountryEntry, ValidationError> {
    table::find(code).ok_or_else(|| ValidationError::UnknownCountry(code.to_string()))
}

/// Native-picker-style single select over the whole table.
#[derive(Debug, Clone)]
pub struct PickerSelector {
    selected: &'static CountryEntry,
}

impl PickerSelector {
    /// Starts on the table's default country.
    pub fn new() -> Self {
        Self {
            selected: table::default_country(),
        }
    }
}

impl Default for PickerSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CountrySelector for PickerSelector {
    fn selected(&self) -> &'static CountryEntry {
        self.selected
    }

    fn on_select(&mut self, code: &str) -> Result<&'static CountryEntry, ValidationError> {
        self.selected = lookup(code)?;
        Ok(self.selected)
    }

    fn label(&self, entry: &CountryEntry) -> String {
        format!("{} {}", entry.flag, entry.code)
    }
}

/// Searchable dropdown; the query narrows the listed options.
#[derive(Debug, Clone)]
pub struct DropdownSelector {
    selected: &'static CountryEntry,
    query: String,
}

impl DropdownSelector {
    /// Starts on the table's default country with an empty query.
    pub fn new() -> Self {
        Self {
            selected: table::default_country(),
            query: String::new(),
        }
    }

    /// Current search text.
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Default for DropdownSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CountrySelector for DropdownSelector {
    fn selected(&self) -> &'static CountryEntry {
        self.selected
    }

    fn on_select(&mut self, code: &str) -> Result<&'static CountryEntry, ValidationError> {
        self.selected = lookup(code)?;
        self.query.clear();
        Ok(self.selected)
    }

    fn options(&self) -> Vec<&'static CountryEntry> {
        let needle = self.query.trim().to_lowercase();
        table::countries()
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.code.contains(&needle)
            })
            .collect()
    }

    fn label(&self, entry: &CountryEntry) -> String {
        format!("{} {} ({})", entry.flag, entry.name, entry.code)
    }

    fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }
}
