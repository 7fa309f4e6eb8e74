//! Static lexicon tables for sentiment scoring.
//!
//! Word lists, scope windows and weights live here as data so they can be
//! tuned without touching the scoring loop in [`super::analyzer`].

/// Words that push a message toward positive polarity.
pub const POSITIVE_WORDS: &[&str] = &[
    "amazing",
    "appreciate",
    "appreciated",
    "awesome",
    "beautiful",
    "best",
    "brilliant",
    "delighted",
    "easy",
    "enjoy",
    "enjoyed",
    "excellent",
    "fantastic",
    "fast",
    "fine",
    "fixed",
    "glad",
    "good",
    "grateful",
    "great",
    "happy",
    "helpful",
    "impressed",
    "love",
    "loved",
    "lovely",
    "nice",
    "perfect",
    "pleased",
    "quick",
    "resolved",
    "satisfied",
    "smooth",
    "solved",
    "thank",
    "thanks",
    "wonderful",
    "works",
];

/// Words that push a message toward negative polarity.
pub const NEGATIVE_WORDS: &[&str] = &[
    "absurd",
    "angry",
    "annoyed",
    "annoying",
    "awful",
    "bad",
    "broken",
    "confused",
    "confusing",
    "disappointed",
    "disappointing",
    "disgusted",
    "dissatisfied",
    "fail",
    "failed",
    "failing",
    "frustrated",
    "frustrating",
    "furious",
    "hate",
    "hated",
    "horrible",
    "incompetent",
    "mad",
    "pathetic",
    "poor",
    "problem",
    "ridiculous",
    "rude",
    "sad",
    "slow",
    "stupid",
    "terrible",
    "unacceptable",
    "unhappy",
    "upset",
    "useless",
    "waste",
    "worse",
    "worst",
    "wrong",
];

/// Markers that invert the polarity of the next sentiment token in scope.
pub const NEGATIONS: &[&str] = &[
    "not",
    "no",
    "never",
    "nothing",
    "nobody",
    "neither",
    "nor",
    "none",
    "cannot",
    "don't",
    "dont",
    "doesn't",
    "doesnt",
    "didn't",
    "didnt",
    "isn't",
    "isnt",
    "aren't",
    "arent",
    "wasn't",
    "wasnt",
    "weren't",
    "werent",
    "won't",
    "wont",
    "wouldn't",
    "wouldnt",
    "can't",
    "cant",
    "couldn't",
    "couldnt",
    "shouldn't",
    "shouldnt",
    "haven't",
    "havent",
    "hasn't",
    "hasnt",
    "hadn't",
    "hadnt",
    "ain't",
];

/// Markers that amplify the next sentiment token in scope.
pub const INTENSIFIERS: &[&str] = &[
    "very",
    "really",
    "extremely",
    "incredibly",
    "absolutely",
    "completely",
    "totally",
    "utterly",
    "highly",
    "truly",
    "so",
    "too",
    "super",
    "especially",
    "seriously",
    "terribly",
];

/// ASCII emoticons and emoji that read as positive. Stored lowercased.
pub const POSITIVE_EMOTICONS: &[&str] = &[
    ":)", ":-)", ":]", "=)", ":d", ":-d", "xd", ";)", ";-)", "<3", ":p", ":-p",
    "😀", "😃", "😄", "😁", "😊", "🙂", "😍", "🥰", "😎", "👍", "🎉", "❤", "❤️", "💯", "🙏",
];

/// ASCII emoticons and emoji that read as negative. Stored lowercased.
pub const NEGATIVE_EMOTICONS: &[&str] = &[
    ":(", ":-(", ":[", "=(", ":'(", ">:(", ":/", ":-/", ":|", "</3",
    "😞", "😟", "😠", "😡", "🤬", "😢", "😭", "😤", "😒", "🙁", "☹", "☹️", "👎", "💔",
];

/// Number of tokens after a negation marker whose polarity is flipped.
pub const NEGATION_WINDOW: usize = 3;

/// Number of tokens after an intensifier whose weight is scaled.
pub const INTENSIFIER_WINDOW: usize = 2;

/// Weight multiplier applied per active intensifier.
pub const INTENSIFIER_BOOST: f64 = 1.5;

/// Weight contributed by a lexicon word or emoticon.
pub const UNIT_WEIGHT: f64 = 1.0;

/// Divisor applied to the raw signed sum before `tanh` normalization.
pub const SCORE_SCALE: f64 = 2.0;

/// Raw absolute sum at which magnitude saturates at 1.0.
pub const MAGNITUDE_SATURATION: f64 = 4.0;

/// Confidence contributed per distinct signal token in a single text.
pub const CONFIDENCE_PER_SIGNAL: f64 = 0.25;

/// Message count at which conversation confidence saturates at 1.0.
pub const CONVERSATION_CONFIDENCE_SATURATION: f64 = 5.0;

/// Minimum message count before a trend is reported.
pub const MIN_TREND_MESSAGES: usize = 3;

/// Difference between window averages that counts as a real shift.
pub const TREND_EPSILON: f64 = 0.1;

/// Default score at or below which sentiment alone calls for a human.
pub const DEFAULT_ESCALATION_THRESHOLD: f64 = -0.5;

/// Polarity of a matched signal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Classification of a single token against the tables above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Word(Polarity),
    Emoticon(Polarity),
    Negation,
    Intensifier,
    Other,
}

/// Look a lowercased token up in every table. Emoticons win over words.
pub fn classify(token: &str) -> TokenClass {
    if let Some(polarity) = emoticon_polarity(token) {
        return TokenClass::Emoticon(polarity);
    }
    if NEGATIONS.contains(&token) {
        return TokenClass::Negation;
    }
    if INTENSIFIERS.contains(&token) {
        return TokenClass::Intensifier;
    }
    if POSITIVE_WORDS.contains(&token) {
        return TokenClass::Word(Polarity::Positive);
    }
    if NEGATIVE_WORDS.contains(&token) {
        return TokenClass::Word(Polarity::Negative);
    }
    TokenClass::Other
}

/// Polarity of an emoticon or emoji, if the token is one.
pub fn emoticon_polarity(token: &str) -> Option<Polarity> {
    if POSITIVE_EMOTICONS.contains(&token) {
        Some(Polarity::Positive)
    } else if NEGATIVE_EMOTICONS.contains(&token) {
        Some(Polarity::Negative)
    } else {
        None
    }
}

/// True when `c` starts or belongs to an emoji listed in the emoticon tables.
pub fn is_emoji_char(c: char) -> bool {
    !c.is_ascii()
        && POSITIVE_EMOTICONS
            .iter()
            .chain(NEGATIVE_EMOTICONS.iter())
            .any(|e| e.starts_with(c))
}

/// All ASCII emoticons, longest first, for prefix/suffix extraction.
pub fn ascii_emoticons() -> Vec<&'static str> {
    let mut all: Vec<&'static str> = POSITIVE_EMOTICONS
        .iter()
        .chain(NEGATIVE_EMOTICONS.iter())
        .copied()
        .filter(|e| e.is_ascii())
        .collect();
    all.sort_by_key(|e| std::cmp::Reverse(e.len()));
    all
}
