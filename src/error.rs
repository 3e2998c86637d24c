use thiserror::Error;

/// Fatal construction-time failures.
///
/// Empty words, empty sentences and unknown words are not errors; they
/// phonemize to the empty string.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, a missing required field or a wrong value type.
    #[error("invalid JSON in {path}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// `start_prob` defines the tag universe and must not be empty.
    #[error("HMM parameters define no tags in start_prob")]
    EmptyTagUniverse,
}
