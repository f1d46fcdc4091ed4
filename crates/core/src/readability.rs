//! Readability scoring for slide text (Flesch reading ease).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::text::char_count;

/// Sentence terminators. Runs like `?!` or `...` end a single sentence.
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Coarse reading-level band derived from the Flesch score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
    VeryEasy,
    Easy,
    Standard,
    Difficult,
    VeryDifficult,
}

impl ReadingLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ReadingLevel::VeryEasy,
            s if s >= 70.0 => ReadingLevel::Easy,
            s if s >= 60.0 => ReadingLevel::Standard,
            s if s >= 30.0 => ReadingLevel::Difficult,
            _ => ReadingLevel::VeryDifficult,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityReport {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    /// Flesch reading ease clamped to `[0, 100]`. `None` when there are no words.
    pub score: Option<f64>,
    pub level: Option<ReadingLevel>,
}

/// Analyze `text` and produce a readability report.
pub fn analyze(text: &str) -> ReadabilityReport {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .collect();
    let word_count = words.len();
    let syllable_count = words.iter().map(|w| count_syllables(w)).sum();

    let sentence_count = if word_count == 0 {
        0
    } else {
        SENTENCE_END_RE
            .split(text)
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count()
            .max(1)
    };

    let score = (word_count > 0).then(|| {
        let words_per_sentence = word_count as f64 / sentence_count as f64;
        let syllables_per_word = syllable_count as f64 / word_count as f64;
        (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0)
    });

    ReadabilityReport {
        char_count: char_count(text),
        word_count,
        sentence_count,
        syllable_count,
        score,
        level: score.map(ReadingLevel::from_score),
    }
}

/// Heuristic syllable count: vowel groups, minus a silent trailing `e`.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    let silent_e = n > 2 && letters[n - 1] == 'e' && letters[n - 2] != 'l' && !is_vowel(letters[n - 2]);
    if silent_e && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}
