//! Dictionary-driven phonemization.
//!
//! The lookup cascade runs, in order: the special-word table, a case
//! normalization heuristic, direct dictionary lookup, possessive
//! normalization, the three stemmers, and a final lowercase lookup. The
//! first rule producing a nonempty phoneme string wins.

use crate::error::LoadError;
use crate::language::Language;
use crate::stress::{self, PRIMARY, SECONDARY};
use crate::tag::Tag;
use crate::text;
use fancy_regex::Regex;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Vowels that license the American flap `ɾ` after `t`.
const US_TAPS: &str = "AIOWYiuæɑəɛɪɹʊʌ";

/// Single-character symbols the lexicon speaks as words.
const SYMBOL_CHARS: &str = "%&+@=";

/// Doubled final consonant (or `ck`) before `-ing`, as in `running`.
static DOUBLED_CONSONANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([bcdgklmnprstvxz])\1ing$|cking$").unwrap());

fn symbol_word(word: &str) -> Option<&'static str> {
    match word {
        "%" => Some("percent"),
        "&" => Some("and"),
        "+" => Some("plus"),
        "@" => Some("at"),
        "=" => Some("equals"),
        _ => None,
    }
}

fn address_word(word: &str) -> Option<&'static str> {
    match word {
        "." => Some("dot"),
        "/" => Some("slash"),
        _ => None,
    }
}

/// Word-to-phoneme dictionary with casing, stress and morphology handling.
///
/// Immutable after construction; lookups are pure.
#[derive(Debug)]
pub struct Lexicon {
    language: Language,
    dict: HashMap<String, String>,
}

impl Lexicon {
    /// Loads a JSON object mapping surface forms to phoneme strings.
    /// Non-string values are a fatal error.
    pub fn from_file(language: Language, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let entries: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| LoadError::Json {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_entries(language, entries))
    }

    /// Builds a lexicon from an in-memory dictionary, expanding case
    /// variants once.
    pub fn from_entries(language: Language, entries: HashMap<String, String>) -> Self {
        let dict = grow_dictionary(entries);
        info!(entries = dict.len(), ?language, "lexicon loaded");
        Self { language, dict }
    }

    /// True when the word resolves in the dictionary in any form, or is a
    /// single letter or speakable symbol.
    pub fn is_known(&self, word: &str) -> bool {
        if self.dict.contains_key(word) || self.dict.contains_key(&word.to_ascii_lowercase()) {
            return true;
        }
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.is_ascii_alphabetic() || SYMBOL_CHARS.contains(c),
            _ => false,
        }
    }

    /// Phonemizes `word`, deriving a stress adjustment from its casing and
    /// applying `base_stress` on top of the result. Returns the empty
    /// string when every rule fails.
    pub fn get(
        &self,
        word: &str,
        tag: &Tag,
        base_stress: Option<f64>,
        vowel_next: Option<bool>,
    ) -> String {
        let case_stress = if word == word.to_ascii_lowercase() {
            None
        } else if word == word.to_ascii_uppercase() {
            Some(2.0)
        } else {
            Some(0.5)
        };

        let ps = self
            .get_word(word, tag, case_stress, vowel_next)
            .unwrap_or_default();
        match base_stress {
            Some(s) if !ps.is_empty() => stress::apply_stress(&ps, s),
            _ => ps,
        }
    }

    fn get_word(
        &self,
        word: &str,
        tag: &Tag,
        stress: Option<f64>,
        vowel_next: Option<bool>,
    ) -> Option<String> {
        if let Some(ps) = self.lookup_special(word, tag, stress, vowel_next) {
            return Some(ps);
        }

        let lower = word.to_ascii_lowercase();
        let word = if self.prefers_lowercase(word, &lower, tag, stress) {
            lower.as_str()
        } else {
            word
        };

        if self.is_known(word) {
            if let Some(ps) = self.lookup(word, tag, stress) {
                return Some(ps);
            }
        }

        // Possessives: "dogs'" resolves through "dog's", a bare trailing
        // apostrophe is dropped.
        if let Some(base) = word.strip_suffix("s'") {
            let candidate = format!("{base}'s");
            if self.is_known(&candidate) {
                if let Some(ps) = self.lookup(&candidate, tag, stress) {
                    return Some(ps);
                }
            }
        }
        if let Some(base) = word.strip_suffix('\'') {
            if self.is_known(base) {
                if let Some(ps) = self.lookup(base, tag, stress) {
                    return Some(ps);
                }
            }
        }

        if let Some(ps) = self.stem_s(word, tag, stress) {
            return Some(ps);
        }
        if let Some(ps) = self.stem_ed(word, tag, stress) {
            return Some(ps);
        }
        let ing_stress = Some(stress.map_or(0.5, |s| s.max(0.5)));
        if let Some(ps) = self.stem_ing(word, tag, ing_stress) {
            return Some(ps);
        }

        self.dict.get(&lower).cloned()
    }

    /// Whether a cased word should be looked up in lowercase instead:
    /// all-caps or Capitalized words absent from the dictionary whose
    /// lowercase form resolves directly or through a stemmer. Proper nouns
    /// are exempt unless implausibly long for an acronym.
    fn prefers_lowercase(&self, word: &str, lower: &str, tag: &Tag, stress: Option<f64>) -> bool {
        word.len() > 1
            && word.replace('\'', "").chars().all(|c| c.is_ascii_alphabetic())
            && word != lower
            && (tag.as_str() != "NNP" || word.len() > 7)
            && !self.dict.contains_key(word)
            && (word == word.to_ascii_uppercase() || word[1..] == word[1..].to_ascii_lowercase())
            && (self.dict.contains_key(lower)
                || self.stem_s(lower, tag, stress).is_some()
                || self.stem_ed(lower, tag, stress).is_some()
                || self.stem_ing(lower, tag, stress).is_some())
    }

    /// Context-dependent pronunciations. Rules fire in order; the first
    /// match wins, and a match that produces nothing lets the cascade
    /// continue.
    fn lookup_special(
        &self,
        word: &str,
        tag: &Tag,
        stress: Option<f64>,
        vowel_next: Option<bool>,
    ) -> Option<String> {
        let t = tag.as_str();

        if t == "ADD" {
            if let Some(name) = address_word(word) {
                return self.lookup(name, &Tag::new(""), Some(-0.5));
            }
        }
        if let Some(name) = symbol_word(word) {
            return self.lookup(name, &Tag::new(""), None);
        }
        if word.contains('.')
            && word.chars().filter(|&c| c != '.').all(|c| c.is_ascii_alphabetic())
            && word.split('.').all(|piece| piece.len() < 3)
        {
            // Dotted acronym: spell it out.
            return self.lookup_nnp(word);
        }
        if word == "a" || word == "A" {
            return Some(if t == "DT" {
                "ɐ".to_string()
            } else {
                format!("{PRIMARY}A")
            });
        }
        if word == "am" || word == "Am" || word == "AM" {
            if t.starts_with("NN") {
                return self.lookup_nnp(word);
            }
            if vowel_next.is_none() || stress.is_some_and(|s| s > 0.0) {
                if let Some(ps) = self.dict.get("am") {
                    return Some(ps.clone());
                }
            }
            return Some("ɐm".to_string());
        }
        if word == "an" || word == "An" || word == "AN" {
            if word == "AN" && t.starts_with("NN") {
                return self.lookup_nnp(word);
            }
            return Some("ɐn".to_string());
        }
        if word == "I" && t == "PRP" {
            return Some(format!("{SECONDARY}I"));
        }
        if (word == "by" || word == "By" || word == "BY") && tag.parent() == "ADV" {
            return Some(format!("b{PRIMARY}I"));
        }
        if (word == "to" || word == "To" || word == "TO") && (t == "TO" || t == "IN") {
            return match vowel_next {
                None => self.dict.get("to").cloned(),
                Some(true) => Some("tʊ".to_string()),
                Some(false) => Some("tə".to_string()),
            };
        }
        if (word == "in" || word == "In" || word == "IN") && t != "NNP" {
            let mark = if vowel_next.is_none() && t != "IN" {
                PRIMARY.to_string()
            } else {
                String::new()
            };
            return Some(format!("{mark}ɪn"));
        }
        if (word == "the" || word == "The" || word == "THE") && t == "DT" {
            return Some(if vowel_next == Some(true) {
                "ði".to_string()
            } else {
                "ðə".to_string()
            });
        }
        if word.eq_ignore_ascii_case("vs") || word.eq_ignore_ascii_case("vs.") {
            return self.lookup("versus", &Tag::new(""), None);
        }
        if word == "used" || word == "Used" || word == "USED" {
            return self.dict.get("used").cloned();
        }
        None
    }

    /// Direct dictionary lookup with a lowercase fallback. Words that miss,
    /// and proper nouns whose entry carries no primary stress, are spelled
    /// letter by letter.
    fn lookup(&self, word: &str, tag: &Tag, stress: Option<f64>) -> Option<String> {
        let mut ps = self
            .dict
            .get(word)
            .or_else(|| self.dict.get(&word.to_ascii_lowercase()))
            .cloned();

        let spell = match &ps {
            None => true,
            Some(p) => tag.as_str() == "NNP" && !p.contains(PRIMARY),
        };
        if spell {
            if let Some(spelled) = self.lookup_nnp(word) {
                ps = Some(spelled);
            }
        }

        let ps = ps?;
        Some(match stress {
            Some(s) => stress::apply_stress(&ps, s),
            None => ps,
        })
    }

    /// Spells a word letter by letter from the single-letter entries,
    /// promoting the last secondary marker to a primary.
    fn lookup_nnp(&self, word: &str) -> Option<String> {
        let mut ps = String::new();
        for c in word.chars().filter(|c| c.is_alphabetic()) {
            let letter = self.dict.get(&c.to_ascii_uppercase().to_string())?;
            ps.push_str(letter);
        }
        if ps.is_empty() {
            return None;
        }

        let stressed = stress::apply_stress(&ps, 1.0);
        Some(match stressed.rfind(SECONDARY) {
            Some(idx) => {
                let mut out = stressed;
                out.replace_range(idx..idx + SECONDARY.len_utf8(), &PRIMARY.to_string());
                out
            }
            None => stressed,
        })
    }

    /// Plural and clitic `-s`.
    fn stem_s(&self, word: &str, tag: &Tag, stress: Option<f64>) -> Option<String> {
        if word.len() < 3 || !word.ends_with('s') {
            return None;
        }
        let n = word.len();
        let stem = if !word.ends_with("ss") && self.is_known(&word[..n - 1]) {
            word[..n - 1].to_string()
        } else if (word.ends_with("'s")
            || (n > 4 && word.ends_with("es") && !word.ends_with("ies")))
            && self.is_known(&word[..n - 2])
        {
            word[..n - 2].to_string()
        } else if n > 4 && word.ends_with("ies") {
            let base = format!("{}y", &word[..n - 3]);
            if !self.is_known(&base) {
                return None;
            }
            base
        } else {
            return None;
        };

        let ps = self.lookup(&stem, tag, stress)?;
        Some(append_s(&ps, self.language))
    }

    /// Past tense `-ed`.
    fn stem_ed(&self, word: &str, tag: &Tag, stress: Option<f64>) -> Option<String> {
        if word.len() < 4 || !word.ends_with('d') {
            return None;
        }
        let n = word.len();
        let stem = if !word.ends_with("dd") && self.is_known(&word[..n - 1]) {
            &word[..n - 1]
        } else if n > 4
            && word.ends_with("ed")
            && !word.ends_with("eed")
            && self.is_known(&word[..n - 2])
        {
            &word[..n - 2]
        } else {
            return None;
        };

        let ps = self.lookup(stem, tag, stress)?;
        Some(append_ed(&ps, self.language))
    }

    /// Progressive `-ing`.
    fn stem_ing(&self, word: &str, tag: &Tag, stress: Option<f64>) -> Option<String> {
        if word.len() < 5 || !word.ends_with("ing") {
            return None;
        }
        let n = word.len();
        let stem = if n > 5 && self.is_known(&word[..n - 3]) {
            word[..n - 3].to_string()
        } else if self.is_known(&format!("{}e", &word[..n - 3])) {
            format!("{}e", &word[..n - 3])
        } else if n > 5
            && DOUBLED_CONSONANT.is_match(word).unwrap_or(false)
            && self.is_known(&word[..n - 4])
        {
            word[..n - 4].to_string()
        } else {
            return None;
        };

        let ps = self.lookup(&stem, tag, stress)?;
        append_ing(&ps, self.language)
    }
}

fn append_s(ps: &str, language: Language) -> String {
    let Some(last) = ps.chars().last() else {
        return String::new();
    };
    if "ptkfθ".contains(last) {
        format!("{ps}s")
    } else if "szʃʒʧʤ".contains(last) {
        format!("{ps}{}z", if language.is_british() { 'ɪ' } else { 'ᵻ' })
    } else {
        format!("{ps}z")
    }
}

fn append_ed(ps: &str, language: Language) -> String {
    let chars: Vec<char> = ps.chars().collect();
    let Some(&last) = chars.last() else {
        return String::new();
    };
    let british = language.is_british();
    if "pkfθʃsʧ".contains(last) {
        format!("{ps}t")
    } else if last == 'd' {
        format!("{ps}{}d", if british { 'ɪ' } else { 'ᵻ' })
    } else if last != 't' {
        format!("{ps}d")
    } else if british || chars.len() < 2 {
        format!("{ps}ɪd")
    } else if US_TAPS.contains(chars[chars.len() - 2]) {
        // Flap the t: "heated" ends in ɾᵻd, not tᵻd.
        let trimmed: String = chars[..chars.len() - 1].iter().collect();
        format!("{trimmed}ɾᵻd")
    } else {
        format!("{ps}ᵻd")
    }
}

/// Returns `None` when the suffix cannot attach (British stems ending in a
/// schwa or length mark).
fn append_ing(ps: &str, language: Language) -> Option<String> {
    let chars: Vec<char> = ps.chars().collect();
    let last = *chars.last()?;
    if language.is_british() {
        if last == 'ə' || last == 'ː' {
            return None;
        }
    } else if last == 't' && chars.len() >= 2 && US_TAPS.contains(chars[chars.len() - 2]) {
        let trimmed: String = chars[..chars.len() - 1].iter().collect();
        return Some(format!("{trimmed}ɾɪŋ"));
    }
    Some(format!("{ps}ɪŋ"))
}

/// Expands case variants once at load time: all-lowercase keys gain a
/// Capitalized twin, Capitalized keys gain a lowercase twin. Existing
/// entries are never overwritten.
fn grow_dictionary(mut dict: HashMap<String, String>) -> HashMap<String, String> {
    let variants: Vec<(String, String)> = dict
        .iter()
        .filter(|(k, _)| k.len() >= 2)
        .filter_map(|(k, v)| {
            let lower = k.to_ascii_lowercase();
            if *k == lower {
                let capitalized = text::capitalize(k);
                (capitalized != *k && !dict.contains_key(&capitalized))
                    .then(|| (capitalized, v.clone()))
            } else if *k == text::capitalize(&lower) {
                (!dict.contains_key(&lower)).then(|| (lower, v.clone()))
            } else {
                None
            }
        })
        .collect();
    dict.extend(variants);
    dict
}
