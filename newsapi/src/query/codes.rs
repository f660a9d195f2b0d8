//! ISO language and country codes accepted by the API.

use std::str::FromStr;

use super::validation::{check_one_of, ValidationError};

/// Two-letter language codes accepted by `/v2/everything`.
pub const VALID_LANGUAGES: &[&str] = &[
    "ar", "de", "en", "es", "fr", "he", "it", "nl", "no", "pt", "ru", "sv", "ud", "zh",
];

/// Two-letter country codes accepted by `/v2/top-headlines`.
pub const VALID_COUNTRIES: &[&str] = &[
    "ae", "ar", "at", "au", "be", "bg", "br", "ca", "ch", "cn", "co", "cu", "cz", "de", "eg",
    "fr", "gb", "gr", "hk", "hu", "id", "ie", "il", "in", "it", "jp", "kr", "lt", "lv", "ma",
    "mx", "my", "ng", "nl", "no", "nz", "ph", "pl", "pt", "ro", "rs", "ru", "sa", "se", "sg",
    "si", "sk", "th", "tr", "tw", "ua", "us", "ve", "za",
];

/// A validated language code. Only obtainable from [`VALID_LANGUAGES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Language(&'static str);

impl Language {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Iterates every accepted language.
    pub fn all() -> impl Iterator<Item = Language> {
        VALID_LANGUAGES.iter().copied().map(Language)
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_one_of("language", s, VALID_LANGUAGES).map(Language)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated country code. Only obtainable from [`VALID_COUNTRIES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Country(&'static str);

impl Country {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Iterates every accepted country.
    pub fn all() -> impl Iterator<Item = Country> {
        VALID_COUNTRIES.iter().copied().map(Country)
    }
}

impl FromStr for Country {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_one_of("country", s, VALID_COUNTRIES).map(Country)
    }
}

impl AsRef<str> for Country {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
