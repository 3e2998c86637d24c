//! Stress-marker algebra over phoneme strings.
//!
//! Phoneme strings interleave two marker codepoints with the IPA material:
//! `'` for primary stress and `,` for secondary stress. The operations here
//! are pure; they never change the non-marker codepoints.

/// Primary stress marker.
pub const PRIMARY: char = '\'';
/// Secondary stress marker.
pub const SECONDARY: char = ',';

/// Codepoints treated as vowels for stress placement.
pub const VOWELS: &str = "AIOQWYaiuæɑɒɔəɛɜɪʊʌᵻ";

/// IPA consonants. Used by the fallback to score syllable boundaries and by
/// the pipeline to derive the vowel-ahead hint.
pub const CONSONANTS: &str = "bdfhjklmnpstvwzðŋɡɹɾʃʒʤʧθ";

pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

pub fn is_consonant(c: char) -> bool {
    CONSONANTS.contains(c)
}

pub fn has_vowel(ps: &str) -> bool {
    ps.chars().any(is_vowel)
}

/// Rewrites the stress markers in `ps` towards the target level `stress`.
///
/// The level is compared exactly; callers pass values from the small set
/// `{-2, -1, -0.5, 0, 0.5, 1, 2}` and anything matching no rule leaves the
/// string unchanged.
pub fn apply_stress(ps: &str, stress: f64) -> String {
    let has_primary = ps.contains(PRIMARY);
    let has_secondary = ps.contains(SECONDARY);

    if stress < -1.0 {
        ps.chars()
            .filter(|&c| c != PRIMARY && c != SECONDARY)
            .collect()
    } else if stress == -1.0 || (stress == 0.0 || stress == 0.5) && has_primary {
        ps.replace(SECONDARY, "")
            .replace(PRIMARY, &SECONDARY.to_string())
    } else if (stress == 0.0 || stress == 0.5 || stress == 1.0) && !has_primary && !has_secondary {
        if !has_vowel(ps) {
            return ps.to_string();
        }
        restress(&format!("{SECONDARY}{ps}"))
    } else if stress >= 1.0 && !has_primary && has_secondary {
        ps.replace(SECONDARY, &PRIMARY.to_string())
    } else if stress > 1.0 && !has_primary && !has_secondary {
        if !has_vowel(ps) {
            return ps.to_string();
        }
        restress(&format!("{PRIMARY}{ps}"))
    } else {
        ps.to_string()
    }
}

/// Moves every stress marker to sit immediately before the next vowel.
///
/// A marker with no vowel after it keeps its position. Implemented as a
/// stable sort over fractional position keys: markers adopt the key
/// `vowel_index - 0.5`, everything else keeps its own index.
pub fn restress(ps: &str) -> String {
    let mut keyed: Vec<(f64, char)> = ps.chars().enumerate().map(|(i, c)| (i as f64, c)).collect();

    for i in 0..keyed.len() {
        let c = keyed[i].1;
        if c == PRIMARY || c == SECONDARY {
            if let Some(j) = (i + 1..keyed.len()).find(|&j| is_vowel(keyed[j].1)) {
                keyed[i].0 = j as f64 - 0.5;
            }
        }
    }

    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    keyed.into_iter().map(|(_, c)| c).collect()
}
