//! Whitespace-preserving word and punctuation tokenizer.
//!
//! Whitespace delimits raw words; the whitespace run after a raw word is
//! attached verbatim to that word's final token. Within a raw word a few
//! characters carry separation rules; everything else outside ASCII
//! alphanumerics is split off as its own single-character token.

use crate::token::Token;

/// How a special character binds to its neighbours inside a raw word.
enum Separation {
    /// Never split: contractions and possessives stay whole.
    Join,
    /// Interior occurrences join, a trailing occurrence splits off.
    SplitTrailing,
    /// Always split, emitting the character as its own token.
    Divide,
}

/// Words that are never subdivided, compared lowercase. `vs.` must survive
/// intact for the lexicon's `versus` rule.
const SPECIAL_WORDS: &[&str] = &["vs.", "e.g.", "i.e."];

fn separation(c: char) -> Option<Separation> {
    match c {
        '\'' => Some(Separation::Join),
        '.' | ':' => Some(Separation::SplitTrailing),
        '-' | '/' => Some(Separation::Divide),
        _ => None,
    }
}

/// Splits a sentence into tokens, marking the first one.
pub fn tokenize(sentence: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0;

    while pos < sentence.len() {
        let rest = &sentence[pos..];
        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if word_len == 0 {
            pos += rest.len() - rest.trim_start().len();
            continue;
        }

        let raw = &rest[..word_len];
        let after = &rest[word_len..];
        let ws_len = after.len() - after.trim_start().len();

        let before = tokens.len();
        process_raw_word(raw, &mut tokens);
        if tokens.len() > before {
            if let Some(last) = tokens.last_mut() {
                last.whitespace = after[..ws_len].to_string();
            }
        }
        pos += word_len + ws_len;
    }

    if let Some(first) = tokens.first_mut() {
        first.is_first = true;
    }
    tokens
}

/// Splits a raw word at hard separators and hands the pieces to the
/// rule-driven chunk processing.
fn process_raw_word(raw: &str, tokens: &mut Vec<Token>) {
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        if !c.is_ascii_alphanumeric() && separation(c).is_none() {
            process_chunk(&raw[start..i], tokens);
            tokens.push(Token::new(c.to_string()));
            start = i + c.len_utf8();
        }
    }
    process_chunk(&raw[start..], tokens);
}

fn process_chunk(chunk: &str, tokens: &mut Vec<Token>) {
    if chunk.is_empty() {
        return;
    }
    if SPECIAL_WORDS.contains(&chunk.to_ascii_lowercase().as_str()) {
        tokens.push(Token::new(chunk));
        return;
    }

    let special = chunk
        .char_indices()
        .find_map(|(i, c)| separation(c).map(|rule| (i, c, rule)));
    let Some((i, c, rule)) = special else {
        tokens.push(Token::new(chunk));
        return;
    };
    let left = &chunk[..i];
    let right = &chunk[i + c.len_utf8()..];

    match rule {
        Separation::Join => tokens.push(Token::new(chunk)),
        Separation::SplitTrailing => {
            if right.is_empty() {
                process_chunk(left, tokens);
                tokens.push(Token::new(c.to_string()));
            } else {
                tokens.push(Token::new(chunk));
            }
        }
        Separation::Divide => {
            process_chunk(left, tokens);
            tokens.push(Token::new(c.to_string()));
            process_chunk(right, tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_words_and_keeps_whitespace() {
        let tokens = tokenize("I love  it");
        assert_eq!(texts(&tokens), ["I", "love", "it"]);
        assert_eq!(tokens[0].whitespace, " ");
        assert_eq!(tokens[1].whitespace, "  ");
        assert_eq!(tokens[2].whitespace, "");
        assert!(tokens[0].is_first);
        assert!(!tokens[1].is_first);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn punctuation_becomes_its_own_token() {
        let tokens = tokenize("I love it!");
        assert_eq!(texts(&tokens), ["I", "love", "it", "!"]);
        assert_eq!(tokens[2].whitespace, "");
        assert_eq!(tokens[3].whitespace, "");
    }

    #[test]
    fn contractions_and_possessives_stay_whole() {
        assert_eq!(texts(&tokenize("it's fine")), ["it's", "fine"]);
        assert_eq!(texts(&tokenize("the dogs' bone")), ["the", "dogs'", "bone"]);
    }

    #[test]
    fn trailing_dot_splits_off() {
        let tokens = tokenize("the day. next");
        assert_eq!(texts(&tokens), ["the", "day", ".", "next"]);
        // The split dot inherits the raw word's trailing whitespace.
        assert_eq!(tokens[2].whitespace, " ");
    }

    #[test]
    fn interior_dots_keep_the_word_whole() {
        assert_eq!(texts(&tokenize("U.S.A. beckons")), ["U.S.A.", "beckons"]);
        assert_eq!(texts(&tokenize("example.com")), ["example.com"]);
    }

    #[test]
    fn hyphens_and_slashes_divide() {
        assert_eq!(texts(&tokenize("twenty-one")), ["twenty", "-", "one"]);
        assert_eq!(texts(&tokenize("a/b")), ["a", "/", "b"]);
    }

    #[test]
    fn special_words_survive_intact() {
        assert_eq!(texts(&tokenize("cats vs. dogs")), ["cats", "vs.", "dogs"]);
        assert_eq!(texts(&tokenize("Vs. them")), ["Vs.", "them"]);
    }

    #[test]
    fn quotes_split_as_hard_separators() {
        assert_eq!(texts(&tokenize("\"yes\"")), ["\"", "yes", "\""]);
    }

    #[test]
    fn non_ascii_letters_split_as_hard_separators() {
        assert_eq!(texts(&tokenize("café")), ["caf", "é"]);
    }
}
