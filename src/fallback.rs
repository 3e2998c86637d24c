//! Fallback phonemizer for words the lexicon cannot resolve.
//!
//! The word is syllabified bottom-up and each candidate syllable is
//! phonemized through the lexicon; a shortest-path recurrence keeps the
//! cheapest phonemization of every prefix, on the assumption that the best
//! reading of an unknown word is the shortest one. Works well on typical
//! English words and on many borrowed ones.

use crate::lexicon::Lexicon;
use crate::stress::{self, PRIMARY, SECONDARY};
use crate::tag::Tag;
use tracing::debug;

/// Longest candidate syllable, in letters.
const MAX_SYLLABLE_LEN: usize = 6;

/// Additive cost discouraging non-initial syllables that open on a vowel.
const VOWEL_ONSET_PENALTY: usize = 2;

/// Letters accepted as the vocalic core of a candidate syllable.
const ORTHO_VOWELS: &str = "aeiouy";

/// Sentinel appended when a syllable's silent final `e` abuts a following
/// syllable. Carried through verbatim.
// TODO: resolve the sentinel into a real vowel in a postprocessing pass.
const SILENT_E: &str = "Éœ";

/// Phonemizes `word` by minimum-total-length syllabification. Returns the
/// empty string when no complete syllabification exists.
pub fn phonemize(lexicon: &Lexicon, word: &str) -> String {
    let lword = word.to_ascii_lowercase();
    let letters: Vec<char> = lword.chars().collect();
    let n = letters.len();
    if n == 0 {
        return String::new();
    }

    let empty_tag = Tag::new("");

    // dp[i]: cheapest (cost, phonemes) covering letters[0..=i].
    let mut dp: Vec<Option<(usize, String)>> = vec![None; n];

    for i in 0..n {
        // Longest candidate first, so longer syllables win cost ties.
        for d in (0..=i.min(MAX_SYLLABLE_LEN - 1)).rev() {
            let syllable: String = letters[i - d..=i].iter().collect();
            if syllable.len() > 1 && !syllable.chars().any(|c| ORTHO_VOWELS.contains(c)) {
                continue;
            }
            if !lexicon.is_known(&syllable) {
                continue;
            }
            let mut phonemes = lexicon.get(&syllable, &empty_tag, None, None);
            if phonemes.is_empty() {
                continue;
            }

            if i < n - 1 && syllable.ends_with('e') {
                if let Some(last) = phonemes.chars().last() {
                    if stress::is_consonant(last) {
                        phonemes.push_str(SILENT_E);
                    }
                }
            }

            // Only the first syllable may keep a primary stress.
            if i > d {
                if let Some(pos) = phonemes.find(PRIMARY) {
                    phonemes.replace_range(pos..pos + PRIMARY.len_utf8(), &SECONDARY.to_string());
                }
            }

            let mut cost = phonemes.chars().count();
            if i > d && ORTHO_VOWELS.contains(letters[i - d]) {
                cost += VOWEL_ONSET_PENALTY;
            }

            let candidate = if i > d {
                let Some((prev_cost, prev_ps)) = &dp[i - d - 1] else {
                    continue;
                };
                (prev_cost + cost, format!("{prev_ps}{phonemes}"))
            } else {
                (cost, phonemes)
            };

            match &dp[i] {
                Some((best, _)) if *best <= candidate.0 => {}
                _ => dp[i] = Some(candidate),
            }
        }
    }

    match dp[n - 1].take() {
        Some((cost, phonemes)) => {
            debug!(word, cost, phonemes = %phonemes, "fallback syllabification");
            phonemes
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use std::collections::HashMap;

    fn lexicon(pairs: &[(&str, &str)]) -> Lexicon {
        let entries: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Lexicon::from_entries(Language::EnglishUS, entries)
    }

    fn letter_lexicon() -> Lexicon {
        lexicon(&[
            ("E", "'i"),
            ("H", "'eɪʧ"),
            ("L", "'ɛl"),
            ("N", "'ɛn"),
            ("O", "'OW"),
            ("P", "p'i"),
            ("X", "'ɛks"),
            ("Y", "w'I"),
        ])
    }

    #[test]
    fn empty_word_yields_empty() {
        let lex = lexicon(&[]);
        assert_eq!(phonemize(&lex, ""), "");
    }

    #[test]
    fn whole_word_syllable_wins() {
        let lex = lexicon(&[("cat", "k'æt"), ("C", "s'i"), ("A", "'eɪ"), ("T", "t'i")]);
        assert_eq!(phonemize(&lex, "cat"), "k'æt");
    }

    #[test]
    fn unknown_letters_block_syllabification() {
        // No entry covers "q" in any syllable.
        let lex = lexicon(&[("A", "'eɪ")]);
        assert_eq!(phonemize(&lex, "aqa"), "");
    }

    #[test]
    fn spelled_out_from_single_letters_is_nonempty() {
        let lex = letter_lexicon();
        let ps = phonemize(&lex, "xylophone");
        assert!(!ps.is_empty());
        // Non-initial syllables carry at most secondary stress.
        assert_eq!(ps.matches(PRIMARY).count(), 1, "got {ps}");
        assert!(ps.starts_with("'ɛks"), "got {ps}");
    }

    #[test]
    fn shorter_phonemization_is_preferred() {
        let lex = lexicon(&[
            ("ba", "bɑ"),
            ("na", "nɑ"),
            ("b", "b'i"),
            ("a", "ɐ"),
            ("n", "'ɛn"),
        ]);
        assert_eq!(phonemize(&lex, "banana"), "bɑnɑnɑ");
    }

    #[test]
    fn vowel_onset_boundaries_are_penalized() {
        // an|an|a pays the onset penalty twice; a|na|na pays it never.
        let lex = lexicon(&[("an", "ɑn"), ("na", "nɑ")]);
        assert_eq!(phonemize(&lex, "anana"), "'Anɑnɑ");
    }

    #[test]
    fn silent_e_marks_consonant_final_stems() {
        let lex = lexicon(&[("time", "t'Im"), ("R", "'ɑɹ")]);
        let ps = phonemize(&lex, "timer");
        assert!(ps.starts_with("t'ImÉœ"), "got {ps}");
    }

    #[test]
    fn word_final_silent_e_is_untouched() {
        let lex = lexicon(&[("time", "t'Im")]);
        assert_eq!(phonemize(&lex, "time"), "t'Im");
    }

    #[test]
    fn later_syllables_lose_primary_stress() {
        let lex = lexicon(&[("to", "t'u"), ("go", "ɡ'OW")]);
        assert_eq!(phonemize(&lex, "togo"), "t'uɡ,OW");
    }
}
