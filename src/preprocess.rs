//! Text preprocessing: number verbalization and sentence splitting.
//!
//! Both run before tokenization so the tagger and lexicon only ever see
//! spelled-out words.

use num2words::{Currency, Num2Words};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that end a sentence.
const SENTENCE_ENDINGS: &[char] = &['.', '?', '!', ';'];

/// Number span: signed integer or decimal.
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+-]?(?:\d+\.\d+|\.\d+|\d+)").unwrap());

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

fn currency_for(c: char) -> Option<Currency> {
    match c {
        '$' => Some(Currency::DOLLAR),
        '£' => Some(Currency::GBP),
        '€' => Some(Currency::EUR),
        _ => None,
    }
}

/// Splits text into sentences. A sentence runs through its trailing
/// terminal characters and the whitespace after them; text without a
/// terminal character is a single sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(end) = rest.find(SENTENCE_ENDINGS) else {
            sentences.push(rest.to_string());
            break;
        };
        let mut cut = end;
        cut += rest[cut..]
            .find(|c: char| !SENTENCE_ENDINGS.contains(&c))
            .unwrap_or(rest.len() - cut);
        cut += rest[cut..]
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len() - cut);
        sentences.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    sentences
}

/// Replaces every number span with its spoken form: cardinals by default,
/// ordinals when an `st`/`nd`/`rd`/`th` suffix follows, currency words when
/// a symbol sits directly before or after the span.
pub fn verbalize_numbers(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;

    for span in NUMBER.find_iter(text) {
        let before = &text[copied..span.start()];
        let after = &text[span.end()..];

        let prefix_currency = before.chars().last().and_then(currency_for);
        match before.chars().last() {
            Some(sym) if prefix_currency.is_some() => {
                output.push_str(&before[..before.len() - sym.len_utf8()]);
            }
            _ => output.push_str(before),
        }

        let suffix_currency = if prefix_currency.is_none() {
            after.chars().next().and_then(currency_for)
        } else {
            None
        };

        let mut consumed = 0;
        let spoken = if let Some(currency) = prefix_currency.or(suffix_currency) {
            if suffix_currency.is_some() {
                consumed = after.chars().next().map_or(0, char::len_utf8);
            }
            speak_currency(span.as_str(), currency)
        } else if !span.as_str().contains('.')
            && ORDINAL_SUFFIXES.iter().any(|s| after.starts_with(s))
        {
            consumed = 2;
            speak_ordinal(span.as_str())
        } else {
            speak_cardinal(span.as_str())
        };

        output.push_str(&spoken);
        copied = span.end() + consumed;
    }

    output.push_str(&text[copied..]);
    output
}

fn speak_cardinal(span: &str) -> String {
    let spoken = if span.contains('.') {
        span.parse::<f64>()
            .ok()
            .and_then(|v| Num2Words::new(v).to_words().ok())
    } else {
        span.parse::<i64>()
            .ok()
            .and_then(|v| Num2Words::new(v).to_words().ok())
    };
    spoken.unwrap_or_else(|| span.to_string())
}

fn speak_ordinal(span: &str) -> String {
    span.parse::<i64>()
        .ok()
        .and_then(|v| Num2Words::new(v).ordinal().to_words().ok())
        .unwrap_or_else(|| span.to_string())
}

fn speak_currency(span: &str, currency: Currency) -> String {
    let spoken = if span.contains('.') {
        span.parse::<f64>()
            .ok()
            .and_then(|v| Num2Words::new(v).currency(currency).to_words().ok())
    } else {
        span.parse::<i64>()
            .ok()
            .and_then(|v| Num2Words::new(v).currency(currency).to_words().ok())
    };
    spoken.unwrap_or_else(|| span.to_string())
}
