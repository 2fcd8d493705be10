//! Read-only dialing-code table.

/// One country's dialing prefix and required phone length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryEntry {
    /// English country name.
    pub name: &'static str,
    /// Dialing prefix, including the leading `+`.
    pub code: &'static str,
    /// Flag glyph.
    pub flag: &'static str,
    /// Required number of national digits.
    pub phone_length: usize,
}

static COUNTRIES: [CountryEntry; 3] = [
    CountryEntry {
        name: "United States",
        code: "+1",
        flag: "🇺🇸",
        phone_length: 10,
    },
    CountryEntry {
        name: "India",
        code: "+91",
        flag: "🇮🇳",
        phone_length: 10,
    },
    CountryEntry {
        name: "United Kingdom",
        code: "+44",
        flag: "🇬🇧",
        phone_length: 10,
    },
];

/// All known countries in display order.
pub fn countries() -> &'static [CountryEntry] {
    &COUNTRIES
}

/// Initial selection of a freshly opened form.
pub fn default_country() -> &'static CountryEntry {
    &COUNTRIES[0]
}

/// Looks up an entry by exact dialing code.
pub fn find(code: &str) -> Option<&'static CountryEntry> {
    COUNTRIES.iter().find(|c| c.code == code)
}
