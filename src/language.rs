use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-letter code selecting the locale of the summary API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Id,
    #[default]
    En,
}

impl LanguageCode {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::Id => "id",
            LanguageCode::En => "en",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entries of the language selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    Indonesia,
    #[default]
    Inggris,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Indonesia, Language::Inggris];

    pub fn label(self) -> &'static str {
        match self {
            Language::Indonesia => "Indonesia",
            Language::Inggris => "Inggris",
        }
    }

    pub fn code(self) -> LanguageCode {
        resolve(self.label())
    }

    /// The entry after this one, wrapping around.
    pub fn next(self) -> Language {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn from_label(label: &str) -> Option<Language> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }
}

/// Map a selector label to its language code. Unknown labels map to `en`.
pub fn resolve(label: &str) -> LanguageCode {
    match label {
        "Indonesia" => LanguageCode::Id,
        "Inggris" => LanguageCode::En,
        _ => LanguageCode::En,
    }
}
