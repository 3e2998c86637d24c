use crate::tag::Tag;

/// A single token extracted from a sentence.
#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    /// The whitespace that followed the token in the source text, verbatim.
    pub whitespace: String,
    /// Whether this token opens its sentence.
    pub is_first: bool,
    /// Filled in by the tagger.
    pub tag: Option<Tag>,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            whitespace: String::new(),
            is_first: false,
            tag: None,
        }
    }
}
