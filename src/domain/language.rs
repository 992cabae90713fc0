use crate::utils::error::EtlError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Translations the fact provider serves, selected with the `lang` query
/// parameter. `Eng` is the provider default and is requested without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Eng,
    Cze,
    Ger,
    Ben,
    Esp,
    Rus,
    Por,
    Fil,
    Ukr,
    Urd,
    Ita,
    Zho,
    Kor,
}

impl Language {
    /// Extraction order.
    pub const ALL: [Language; 13] = [
        Language::Eng,
        Language::Cze,
        Language::Ger,
        Language::Ben,
        Language::Esp,
        Language::Rus,
        Language::Por,
        Language::Fil,
        Language::Ukr,
        Language::Urd,
        Language::Ita,
        Language::Zho,
        Language::Kor,
    ];

    pub const DEFAULT: Language = Language::Eng;

    pub fn code(self) -> &'static str {
        match self {
            Language::Eng => "eng",
            Language::Cze => "cze",
            Language::Ger => "ger",
            Language::Ben => "ben",
            Language::Esp => "esp",
            Language::Rus => "rus",
            Language::Por => "por",
            Language::Fil => "fil",
            Language::Ukr => "ukr",
            Language::Urd => "urd",
            Language::Ita => "ita",
            Language::Zho => "zho",
            Language::Kor => "kor",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Eng => "English",
            Language::Cze => "Czech",
            Language::Ger => "German",
            Language::Ben => "Bengali",
            Language::Esp => "Spanish",
            Language::Rus => "Russian",
            Language::Por => "Portuguese",
            Language::Fil => "Filipino",
            Language::Ukr => "Ukrainian",
            Language::Urd => "Urdu",
            Language::Ita => "Italian",
            Language::Zho => "Chinese",
            Language::Kor => "Korean",
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl FromStr for Language {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| EtlError::UnsupportedLanguageError {
                code: s.to_string(),
            })
    }
}
