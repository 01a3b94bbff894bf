use std::fs;
use std::path::Path;

use fnv::FnvHashSet;

use crate::error::LexiconError;

/// The word lists every metric is classified against.
///
/// All three sets hold lowercase words. Stop words are removed from the
/// positive and negative sets on construction, so a token can never count as
/// both a stop word and a dictionary word.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: FnvHashSet<String>,
    negative: FnvHashSet<String>,
    stop: FnvHashSet<String>,
}

impl Lexicon {
    /// Load the lexicon from three plaintext word lists, one word per line.
    ///
    /// Invalid utf-8 is decoded lossily; several of the commonly used
    /// dictionary files are latin-1 encoded.
    pub fn load<P: AsRef<Path>>(
        stop_words: P,
        positive_words: P,
        negative_words: P,
    ) -> Result<Self, LexiconError> {
        let stop = read_word_list(stop_words.as_ref())?;
        let positive = read_word_list(positive_words.as_ref())?;
        let negative = read_word_list(negative_words.as_ref())?;

        log::debug!(
            "loaded lexicon: {} stop, {} positive, {} negative words",
            stop.len(),
            positive.len(),
            negative.len()
        );

        Ok(Self::from_sets(positive, negative, stop))
    }

    /// Build a lexicon directly from word slices.
    pub fn from_words(positive: &[&str], negative: &[&str], stop: &[&str]) -> Self {
        Self::from_sets(
            positive.iter().map(|w| w.to_lowercase()).collect(),
            negative.iter().map(|w| w.to_lowercase()).collect(),
            stop.iter().map(|w| w.to_lowercase()).collect(),
        )
    }

    fn from_sets(
        mut positive: FnvHashSet<String>,
        mut negative: FnvHashSet<String>,
        stop: FnvHashSet<String>,
    ) -> Self {
        positive.retain(|word| !stop.contains(word));
        negative.retain(|word| !stop.contains(word));
        Self {
            positive,
            negative,
            stop,
        }
    }

    /// Whether the (lowercase) word is in the positive dictionary.
    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    /// Whether the (lowercase) word is in the negative dictionary.
    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    /// Whether the (lowercase) word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop.contains(word)
    }
}

/// Read a word list into a lowercase set, one word per line.
fn read_word_list(path: &Path) -> Result<FnvHashSet<String>, LexiconError> {
    let bytes = fs::read(path).map_err(|source| LexiconError::WordListUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_excluded_from_dictionaries() {
        let lexicon = Lexicon::from_words(&["good", "very"], &["bad", "very"], &["very", "the"]);
        assert!(lexicon.is_positive("good"));
        assert!(lexicon.is_negative("bad"));
        assert!(lexicon.is_stop_word("very"));
        assert!(!lexicon.is_positive("very"));
        assert!(!lexicon.is_negative("very"));
    }

    #[test]
    fn words_are_lowercased() {
        let lexicon = Lexicon::from_words(&["Great"], &["Terrible"], &["The"]);
        assert!(lexicon.is_positive("great"));
        assert!(lexicon.is_negative("terrible"));
        assert!(lexicon.is_stop_word("the"));
    }

    #[test]
    fn read_word_lists_from_files() {
        let dir = std::env::temp_dir().join("fogscore-lexicon-test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stop.txt"), "the\nis\n\n").unwrap();
        fs::write(dir.join("pos.txt"), "Great\nwonderful\n").unwrap();
        fs::write(dir.join("neg.txt"), "terrible\n").unwrap();

        let lexicon = Lexicon::load(
            dir.join("stop.txt"),
            dir.join("pos.txt"),
            dir.join("neg.txt"),
        )
        .unwrap();

        assert!(lexicon.is_stop_word("the"));
        assert!(lexicon.is_positive("great"));
        assert!(lexicon.is_negative("terrible"));
        assert!(!lexicon.is_stop_word(""));
    }

    #[test]
    fn missing_word_list_is_an_error() {
        let res = Lexicon::load(
            Path::new("/nonexistent/stop.txt"),
            Path::new("/nonexistent/pos.txt"),
            Path::new("/nonexistent/neg.txt"),
        );
        assert!(res.is_err());
    }
}
