use serde::{Deserialize, Serialize};

/// English variant, consulted by the stemmers and the fallback phonemizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Language {
    EnglishUS,
    EnglishGB,
}

impl Language {
    pub fn is_british(&self) -> bool {
        matches!(self, Language::EnglishGB)
    }
}
