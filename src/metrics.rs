use serde::Serialize;

use crate::lexicon::Lexicon;
use crate::text;

/// Guard added to denominators that the score formulas specify it for.
pub const EPSILON: f64 = 1e-6;

/// Pronoun surface forms counted against raw tokens. Matching is by whole
/// token, and since the all-caps "US" is absent the country abbreviation is
/// never counted.
const PERSONAL_PRONOUNS: [&str; 9] = ["I", "we", "We", "my", "My", "ours", "Ours", "us", "Us"];

/// The flat scoring result for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub positive_score: usize,
    pub negative_score: usize,
    pub polarity_score: f64,
    pub subjective_score: f64,
    pub average_sentence_length: f64,
    pub complex_words_count: usize,
    pub complex_words_percentage: f64,
    pub fog_index: f64,
    pub average_words_per_sentence: f64,
    pub words_count: usize,
    pub syllable_count: usize,
    pub personal_pronouns_count: usize,
    pub average_word_length: f64,
}

/// Score a document.
///
/// All fields are pure functions of the inputs; scoring the same document
/// with the same lexicon twice yields identical records.
pub fn score(
    document: &str,
    raw_tokens: &[String],
    clean_tokens: &[String],
    lexicon: &Lexicon,
) -> ScoreRecord {
    let positive_score = clean_tokens
        .iter()
        .filter(|word| lexicon.is_positive(word))
        .count();
    let negative_score = clean_tokens
        .iter()
        .filter(|word| lexicon.is_negative(word))
        .count();

    let polarity_score = (positive_score as f64 - negative_score as f64)
        / (positive_score as f64 + negative_score as f64 + EPSILON);
    let subjective_score =
        (positive_score + negative_score) as f64 / (clean_tokens.len() as f64 + EPSILON);

    let sentences = text::sentence_count(document);
    let average_sentence_length = clean_tokens.len() as f64 / sentences as f64;

    let complex_words_count = clean_tokens
        .iter()
        .filter(|word| is_complex(word))
        .count();
    let complex_words_percentage = if clean_tokens.is_empty() {
        0.0
    } else {
        round2(100.0 * complex_words_count as f64 / clean_tokens.len() as f64)
    };

    ScoreRecord {
        positive_score,
        negative_score,
        polarity_score,
        subjective_score,
        average_sentence_length,
        complex_words_count,
        complex_words_percentage,
        fog_index: fog_index(average_sentence_length, complex_words_percentage),
        average_words_per_sentence: average_sentence_length,
        words_count: clean_tokens.len(),
        syllable_count: clean_tokens.iter().map(|word| syllables_per_word(word)).sum(),
        personal_pronouns_count: personal_pronouns_count(raw_tokens),
        average_word_length: average_word_length(raw_tokens),
    }
}

/// Heuristic syllable count of a single word.
///
/// Counts the vowel letters of the lowercased word, subtracts one for an
/// "es", "ed" or "e" ending, adds one for an "le" ending. The adjusted count
/// never drops below zero; if it would, the raw vowel count is reported.
pub fn syllables_per_word(word: &str) -> usize {
    let word = word.to_lowercase();
    let vowels = word
        .chars()
        .filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .count();

    let mut syllables = vowels as isize;
    if word.ends_with("es") || word.ends_with("ed") || word.ends_with('e') {
        syllables -= 1;
    }
    if word.ends_with("le") {
        syllables += 1;
    }

    if syllables < 0 {
        vowels
    } else {
        syllables as usize
    }
}

/// A word is complex when its heuristic syllable count exceeds two.
pub fn is_complex(word: &str) -> bool {
    syllables_per_word(word) > 2
}

/// Readability heuristic combining sentence length and complex-word density.
pub fn fog_index(average_sentence_length: f64, complex_words_percentage: f64) -> f64 {
    0.4 * (average_sentence_length + complex_words_percentage)
}

/// Whole-token pronoun occurrences in the raw, pre-cleaning token sequence.
pub fn personal_pronouns_count(raw_tokens: &[String]) -> usize {
    raw_tokens
        .iter()
        .filter(|token| PERSONAL_PRONOUNS.contains(&token.as_str()))
        .count()
}

/// Mean character length over the raw tokens, 0 for an empty sequence.
pub fn average_word_length(raw_tokens: &[String]) -> f64 {
    if raw_tokens.is_empty() {
        return 0.0;
    }
    let chars: usize = raw_tokens.iter().map(|token| token.chars().count()).sum();
    chars as f64 / raw_tokens.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
