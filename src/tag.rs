use serde::{Deserialize, Serialize};
use std::fmt;

/// A part-of-speech tag.
///
/// Tags are opaque short strings (`NN`, `VBD`, `JJ`, ...) produced by the
/// tagger; the only structure imposed on them is the parent-category
/// collapse used by the lexicon's special-word rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(text: impl Into<String>) -> Self {
        Tag(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Collapses verb, noun, adverb and adjective subtags onto their parent
    /// category; every other tag is its own parent.
    pub fn parent(&self) -> &str {
        let tag = self.0.as_str();
        if tag == "VERB" || tag.starts_with("VB") {
            "VERB"
        } else if tag == "NOUN" || tag.starts_with("NN") {
            "NOUN"
        } else if tag.starts_with("ADV") || tag.starts_with("RB") {
            "ADV"
        } else if tag.starts_with("ADJ") || tag.starts_with("JJ") {
            "ADJ"
        } else {
            tag
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(text: &str) -> Self {
        Tag(text.to_string())
    }
}
