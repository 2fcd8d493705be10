//! Contact record, draft, and list presentation helpers.

use serde::{Deserialize, Serialize};

use crate::{
    country::table::{self, CountryEntry},
    form::ValidationError,
    types::{ContactId, DialCode},
};

/// Persisted team member contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Stable, time-based identifier.
    pub id: ContactId,
    /// Free-text display name.
    pub name: String,
    /// Dialing prefix of the contact's country.
    pub country_code: DialCode,
    /// National number digits.
    pub number: String,
}

impl Contact {
    /// Avatar text: the upper-cased first letter of each space-separated word.
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Number as shown under the name, e.g. `+1 5551234567`.
    pub fn display_number(&self) -> String {
        format!("{} {}", self.country_code, self.number)
    }
}

/// Accepted form input, not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    /// Display name.
    pub name: String,
    /// Dialing prefix of the selected country.
    pub country_code: DialCode,
    /// National number digits.
    pub number: String,
}

impl ContactDraft {
    /// Checks the creation-time invariant against the country table.
    ///
    /// Only emptiness of the name and the digit count are checked; the
    /// characters of `number` are taken as entered.
    pub fn validate(&self) -> Result<&'static CountryEntry, ValidationError> {
        let country = table::find(&self.country_code)
            .ok_or_else(|| ValidationError::UnknownCountry(self.country_code.clone()))?;
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let actual = self.number.chars().count();
        if actual != country.phone_length {
            return Err(ValidationError::NumberLength {
                expected: country.phone_length,
                actual,
            });
        }
        Ok(country)
    }

    /// Materializes the draft under `id`.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            country_code: self.country_code,
            number: self.number,
        }
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            country_code: contact.country_code.clone(),
            number: contact.number.clone(),
        }
    }
}

/// Built-in collection returned on first run when seeding is enabled.
pub fn default_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            country_code: "+1".to_string(),
            number: "2025550143".to_string(),
        },
        Contact {
            id: "2".to_string(),
            name: "Priya Sharma".to_string(),
            country_code: "+91".to_string(),
            number: "9876543210".to_string(),
        },
        Contact {
            id: "3".to_string(),
            name: "James Smith".to_string(),
            country_code: "+44".to_string(),
            number: "7911123456".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> Contact {
        Contact {
            id: "1".to_string(),
            name: name.to_string(),
            country_code: "+1".to_string(),
            number: "5551234567".to_string(),
        }
    }

    #[test]
    fn initials_take_first_letter_of_each_word() {
        assert_eq!(contact("ada lovelace").initials(), "AL");
        assert_eq!(contact("Grace  Hopper").initials(), "GH");
        assert_eq!(contact("").initials(), "");
    }

    #[test]
    fn serializes_with_camel_case_country_code() {
        let json = serde_json::to_value(contact("Ada")).expect("serialize");
        assert_eq!(json["countryCode"], "+1");
        assert_eq!(json["number"], "5551234567");
        assert!(json.get("country_code").is_none());
    }

    #[test]
    fn draft_validation_checks_length_and_name() {
        let ok = ContactDraft {
            name: "Ada".to_string(),
            country_code: "+1".to_string(),
            number: "5551234567".to_string(),
        };
        assert_eq!(ok.validate().expect("valid").code, "+1");

        let short = ContactDraft {
            number: "555123456".to_string(),
            ..ok.clone()
        };
        assert_eq!(
            short.validate(),
            Err(ValidationError::NumberLength {
                expected: 10,
                actual: 9
            })
        );

        let long = ContactDraft {
            number: "55512345678".to_string(),
            ..ok.clone()
        };
        assert_eq!(
            long.validate(),
            Err(ValidationError::NumberLength {
                expected: 10,
                actual: 11
            })
        );

        let unnamed = ContactDraft {
            name: String::new(),
            ..ok.clone()
        };
        assert_eq!(unnamed.validate(), Err(ValidationError::EmptyName));

        let unknown = ContactDraft {
            country_code: "+999".to_string(),
            ..ok
        };
        assert_eq!(
            unknown.validate(),
            Err(ValidationError::UnknownCountry("+999".to_string()))
        );
    }

    #[test]
    fn default_contacts_satisfy_creation_invariant() {
        for c in default_contacts() {
            let draft = ContactDraft {
                name: c.name.clone(),
                country_code: c.country_code.clone(),
                number: c.number.clone(),
            };
            assert!(draft.validate().is_ok(), "{c:?}");
        }
    }
}
