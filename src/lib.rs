//! An offline English grapheme-to-phoneme engine: HMM part-of-speech
//! tagging, lexicon-driven phonemization with stress and morphology
//! handling, and a syllabifying fallback for unknown words.

pub mod error;
pub mod fallback;
pub mod g2p;
pub mod language;
pub mod lexicon;
pub mod preprocess;
pub mod stress;
pub mod tag;
pub mod tagger;
pub mod text;
pub mod token;
pub mod tokenizer;

pub use error::LoadError;
pub use g2p::G2P;
pub use language::Language;
pub use lexicon::Lexicon;
pub use tag::Tag;
pub use tagger::Tagger;
pub use token::Token;
