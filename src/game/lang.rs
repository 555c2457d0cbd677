//! Localized user interface text.
//!
//! The table maps every text key to one string per language, in the order of [`Language::ALL`].

use crate::game::GameError;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const LANG_JSON: &str = include_str!("../../resources/lang.json");

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "eng")]
    English,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "ch")]
    Chinese,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Arabic, Language::Chinese];

    /// Column of this language in the text table.
    pub const fn index(self) -> usize {
        match self {
            Language::English => 0,
            Language::Arabic => 1,
            Language::Chinese => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Arabic => "ar",
            Language::Chinese => "ch",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|lang| lang.code() == s)
            .copied()
            .ok_or_else(|| GameError::UnknownLanguage(s.to_string()))
    }
}

#[derive(Debug)]
pub struct LanguageManager {
    table: HashMap<String, Vec<String>>,
    language: Language,
}

impl LanguageManager {
    /// Load the built-in text table.
    pub fn new() -> Result<Self, GameError> {
        Self::from_json(LANG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(LanguageManager {
            table: serde_json::from_str(json)?,
            language: Language::default(),
        })
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            debug!("switching language to {}", language);
        }
        self.language = language;
    }

    /// Returns `false` and keeps the current language if the code is unknown.
    pub fn set_language_code(&mut self, code: &str) -> bool {
        match code.parse::<Language>() {
            Ok(language) => {
                self.set_language(language);
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Returns `false` and keeps the current language if there is no language at `index`.
    pub fn set_language_index(&mut self, index: usize) -> bool {
        match Language::from_index(index) {
            Some(language) => {
                self.set_language(language);
                true
            }
            None => false,
        }
    }

    /// Text for `key` in the current language. Falls back to English if the entry has no
    /// translation, and to the key itself if there is no entry at all.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        let Some(texts) = self.table.get(key) else {
            warn!("no text for key '{}'", key);
            return key;
        };
        texts
            .get(self.language.index())
            .or_else(|| texts.first())
            .map_or(key, String::as_str)
    }
}
