//! Tokenizer for sentiment scoring.
//!
//! Splits lowercased text on whitespace and punctuation while keeping
//! emoticon runs (`:)`, `>:(`) and emoji code points as standalone terms.
//! Clause punctuation becomes a [`Token::Break`] so negation and
//! intensifier scopes never leak across sentences.

use super::lexicon::{ascii_emoticons, emoticon_polarity, is_emoji_char};

/// One unit of tokenized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word, contraction, emoticon or emoji, lowercased.
    Term(String),
    /// Clause boundary (`.`, `,`, `;`, `!`, `?`, `:`).
    Break,
}

impl Token {
    pub fn as_term(&self) -> Option<&str> {
        match self {
            Self::Term(t) => Some(t),
            Self::Break => None,
        }
    }
}

const CLAUSE_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?', ':'];

/// Lowercase `text` and fold typographic apostrophes into `'`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Tokenize `text` into terms and clause breaks.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = normalize(text);
    let emoticons = ascii_emoticons();
    let mut out = Vec::new();

    for chunk in normalized.split_whitespace() {
        if emoticon_polarity(chunk).is_some() {
            out.push(Token::Term(chunk.to_string()));
            continue;
        }

        // A leading emoticon glued to a word (":)thanks"). Only emoticons
        // that end in punctuation are split off so ":dog" stays intact.
        let chunk = match emoticons.iter().find(|e| {
            chunk.len() > e.len()
                && chunk.starts_with(**e)
                && e.chars().last().is_some_and(|c| !c.is_alphanumeric())
        }) {
            Some(e) => {
                out.push(Token::Term(e.to_string()));
                &chunk[e.len()..]
            }
            None => chunk,
        };
        if emoticon_polarity(chunk).is_some() {
            out.push(Token::Term(chunk.to_string()));
            continue;
        }

        // A trailing emoticon glued to a word ("thanks:)"). Only emoticons
        // that start with punctuation are split off so "boxd" stays intact.
        let (body, trailing) = match emoticons.iter().find(|e| {
            chunk.len() > e.len()
                && chunk.ends_with(**e)
                && e.chars().next().is_some_and(|c| !c.is_alphanumeric())
        }) {
            Some(e) => (&chunk[..chunk.len() - e.len()], Some(*e)),
            None => (chunk, None),
        };

        scan_chunk(body, &mut out);

        if let Some(e) = trailing {
            out.push(Token::Term(e.to_string()));
        }
    }

    out
}

fn scan_chunk(chunk: &str, out: &mut Vec<Token>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut word = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            word.push(c);
            continue;
        }

        // Keep contractions like "don't" as one term.
        if c == '\'' && !word.is_empty() && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric())
        {
            word.push(c);
            continue;
        }

        flush(&mut word, out);

        if is_emoji_char(c) {
            out.push(Token::Term(c.to_string()));
        } else if CLAUSE_PUNCTUATION.contains(&c) {
            push_break(out);
        }
    }

    flush(&mut word, out);
}

fn flush(word: &mut String, out: &mut Vec<Token>) {
    if !word.is_empty() {
        out.push(Token::Term(std::mem::take(word)));
    }
}

fn push_break(out: &mut Vec<Token>) {
    if !matches!(out.last(), Some(Token::Break) | None) {
        out.push(Token::Break);
    }
}
