//! Pipeline orchestration: text to sentences to tagged tokens to phonemes.

use crate::error::LoadError;
use crate::fallback;
use crate::language::Language;
use crate::lexicon::Lexicon;
use crate::preprocess;
use crate::stress;
use crate::tag::Tag;
use crate::tagger::Tagger;
use crate::text;
use crate::tokenizer;
use std::path::Path;
use tracing::trace;

/// ASCII punctuation treated as decisive when scanning phonemes for the
/// vowel-ahead hint. Quote characters are excluded: they double as stress
/// markers.
const SCAN_PUNCTUATION: &str = "!#$%&()*+,-./:;<=>?@[\\]^_{|}~";

/// The G2P engine: a lexicon plus an optional tagger.
pub struct G2P {
    lexicon: Lexicon,
    tagger: Option<Tagger>,
}

impl G2P {
    /// Builds an engine from a mandatory lexicon file and an optional HMM
    /// parameter file. Without HMM parameters every token is tagged `XX`
    /// and the context-sensitive rules fire on a best-effort basis.
    pub fn new(
        language: Language,
        hmm_path: Option<&Path>,
        lexicon_path: &Path,
    ) -> Result<Self, LoadError> {
        let lexicon = Lexicon::from_file(language, lexicon_path)?;
        let tagger = hmm_path.map(Tagger::from_file).transpose()?;
        Ok(Self { lexicon, tagger })
    }

    /// Assembles an engine from already-loaded parts.
    pub fn from_parts(lexicon: Lexicon, tagger: Option<Tagger>) -> Self {
        Self { lexicon, tagger }
    }

    /// Phonemizes a single word: the lexicon first, then the syllabifying
    /// fallback for fully alphabetic words the lexicon cannot resolve.
    pub fn phonemize(
        &self,
        word: &str,
        tag: &Tag,
        base_stress: Option<f64>,
        vowel_next: Option<bool>,
    ) -> String {
        if word.is_empty() {
            return String::new();
        }
        let phonemes = self.lexicon.get(word, tag, base_stress, vowel_next);
        if !phonemes.is_empty() {
            return phonemes;
        }
        if text::is_alpha(word) {
            return fallback::phonemize(&self.lexicon, word);
        }
        String::new()
    }

    /// Converts `text` to a phoneme string. Whitespace is preserved and
    /// unphonemized punctuation passes through.
    pub fn process(&self, input: &str) -> String {
        let verbalized = preprocess::verbalize_numbers(input);
        let mut output = String::new();
        for sentence in preprocess::split_sentences(&verbalized) {
            self.process_sentence(&sentence, &mut output);
        }
        output
    }

    fn process_sentence(&self, sentence: &str, output: &mut String) {
        let mut tokens = tokenizer::tokenize(sentence);
        match &self.tagger {
            Some(tagger) => tagger.tag(&mut tokens),
            None => {
                for token in &mut tokens {
                    token.tag = Some(Tag::new("XX"));
                }
            }
        }

        let count = tokens.len();
        let mut vowel_next: Option<bool> = None;

        for (i, token) in tokens.iter().enumerate() {
            let tag = token.tag.clone().unwrap_or_else(|| Tag::new("XX"));
            let phonemes = self.phonemize(&token.text, &tag, None, vowel_next);
            trace!(word = %token.text, tag = %tag, phonemes = %phonemes, "token");

            if phonemes.is_empty() {
                let mut chars = token.text.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if c.is_ascii_punctuation() {
                        // A bare dot or hyphen glued between words is an
                        // artifact of subdivision, not punctuation.
                        let elided = (c == '.' || c == '-')
                            && token.whitespace.is_empty()
                            && i + 1 != count;
                        if !elided {
                            output.push(c);
                        }
                    }
                }
            } else {
                output.push_str(&phonemes);
            }

            for c in phonemes.chars() {
                if c.is_ascii() && SCAN_PUNCTUATION.contains(c) {
                    vowel_next = None;
                    break;
                } else if stress::is_vowel(c) {
                    vowel_next = Some(true);
                    break;
                } else if stress::is_consonant(c) {
                    vowel_next = Some(false);
                    break;
                }
            }

            output.push_str(&token.whitespace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::HmmParams;
    use std::collections::HashMap;

    fn entries(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lexicon() -> Lexicon {
        Lexicon::from_entries(
            Language::EnglishUS,
            entries(&[
                ("love", "l'ʌv"),
                ("it", "ɪt"),
                ("cat", "k'æt"),
                ("are", "ɑɹ"),
                ("sleep", "sl'ip"),
                ("used", "j'uzd"),
                ("twelfth", "tw'ɛlfθ"),
                ("twenty", "tw'ɛnti"),
                ("one", "w'ʌn"),
                ("day", "d'eɪ"),
                ("best", "b'ɛst"),
            ]),
        )
    }

    fn probs(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn nested(pairs: &[(&str, &[(&str, f64)])]) -> HashMap<String, HashMap<String, f64>> {
        pairs.iter().map(|(k, v)| (k.to_string(), probs(v))).collect()
    }

    fn tagger() -> Tagger {
        Tagger::from_params(HmmParams {
            start_prob: probs(&[("PRP", 0.4), ("VBP", 0.1), ("DT", 0.3), (".", 0.1), ("NNS", 0.1)]),
            emission: nested(&[
                ("PRP", &[("I", 0.9), ("it", 0.9)]),
                ("VBP", &[("love", 0.9), ("are", 0.9)]),
                ("DT", &[("the", 0.9)]),
                (".", &[("!", 0.9), (".", 0.9)]),
                ("NNS", &[("cats", 0.9)]),
            ]),
            transition: nested(&[
                ("PRP", &[("VBP", 0.8), (".", 0.1)]),
                ("VBP", &[("PRP", 0.5), ("DT", 0.3), ("NNS", 0.2)]),
                ("DT", &[("NNS", 0.8)]),
                ("NNS", &[("VBP", 0.5), (".", 0.3)]),
                (".", &[("PRP", 0.5)]),
            ]),
        })
        .unwrap()
    }

    fn engine() -> G2P {
        G2P::from_parts(lexicon(), Some(tagger()))
    }

    #[test]
    fn i_love_it() {
        assert_eq!(engine().process("I love it!"), ",I l'ʌv ɪt!");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(engine().process(""), "");
    }

    #[test]
    fn plural_and_article_resolve_in_context() {
        let out = engine().process("the cats are");
        assert_eq!(out, "ðə k'æts ɑɹ");
    }

    #[test]
    fn used_reads_verbatim_from_dictionary() {
        assert_eq!(engine().process("used"), "j'uzd");
    }

    #[test]
    fn numbers_are_verbalized_before_tagging() {
        assert_eq!(engine().process("twelfth"), "tw'ɛlfθ");
        assert_eq!(engine().process("12th"), "tw'ɛlfθ");
    }

    #[test]
    fn hyphen_between_subwords_is_elided() {
        assert_eq!(engine().process("twenty-one"), "tw'ɛntiw'ʌn");
    }

    #[test]
    fn unknown_punctuation_passes_through() {
        let out = engine().process("it (love)");
        assert_eq!(out, "ɪt (l'ʌv)");
    }

    #[test]
    fn quote_marks_pass_through() {
        assert_eq!(engine().process("\"it\""), "\"ɪt\"");
    }

    #[test]
    fn untagged_engine_marks_everything_xx() {
        let engine = G2P::from_parts(lexicon(), None);
        assert_eq!(engine.process("love it"), "l'ʌv ɪt");
    }

    #[test]
    fn unknown_word_without_fallback_entries_is_dropped() {
        let out = engine().process("it zzz it");
        assert_eq!(out, "ɪt  ɪt");
    }
}
