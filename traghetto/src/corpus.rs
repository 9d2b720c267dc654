//! Tagged-corpus collaborator.
//!
//! Parses Brown-style tagged text (`word/TAG` tokens, one sentence per line),
//! splits it into train and test portions, and mines a [`Sample`] using the
//! window scheme of the tagging harness: words at offsets -1, 0, and +1 and
//! tags at offsets -2, -1, +1, and +2, truncated at sentence bounds.

use crate::context::Context;
use crate::errors::{Result, TraghettoError};
use crate::sample::Sample;

/// One token with its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    token: String,
    tag: String,
}

impl TaggedWord {
    /// Creates a new tagged word.
    pub fn new(token: String, tag: String) -> Self {
        Self { token, tag }
    }

    /// The lexical token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The tag label.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// An ordered sequence of tagged words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSentence {
    words: Vec<TaggedWord>,
}

impl TaggedSentence {
    /// Creates a sentence from tagged words.
    pub fn new(words: Vec<TaggedWord>) -> Self {
        Self { words }
    }

    /// The tagged words in sentence order.
    pub fn words(&self) -> &[TaggedWord] {
        &self.words
    }

    /// Gets the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Checks whether the sentence contains no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A tagged corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    sentences: Vec<TaggedSentence>,
}

impl Corpus {
    /// Parses Brown-style tagged text: one sentence per line, tokens of the
    /// form `word/TAG` separated by whitespace. The tag starts after the last
    /// slash, so tokens such as `1/2/cd` parse as the word `1/2`.
    ///
    /// # Errors
    ///
    /// [`TraghettoError::InvalidArgument`] when a token carries no tag
    /// separator.
    pub fn from_brown_text(text: &str) -> Result<Self> {
        let mut sentences = vec![];
        for line in text.lines() {
            let mut words = vec![];
            for token in line.split_whitespace() {
                let (word, tag) = token.rsplit_once('/').ok_or_else(|| {
                    TraghettoError::invalid_argument(
                        "text",
                        format!("token without tag separator: {token:?}"),
                    )
                })?;
                words.push(TaggedWord::new(word.to_string(), tag.to_string()));
            }
            if !words.is_empty() {
                sentences.push(TaggedSentence::new(words));
            }
        }
        Ok(Self { sentences })
    }

    /// The sentences in corpus order.
    pub fn sentences(&self) -> &[TaggedSentence] {
        &self.sentences
    }

    /// Gets the number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Checks whether the corpus contains no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Splits the corpus: the first `percentage` percent of sentences become
    /// the train corpus, the remainder the test corpus.
    pub fn split_train_test(&self, percentage: usize) -> (Self, Self) {
        let n_train = self.sentences.len() * percentage.min(100) / 100;
        let (train, test) = self.sentences.split_at(n_train);
        (
            Self {
                sentences: train.to_vec(),
            },
            Self {
                sentences: test.to_vec(),
            },
        )
    }

    /// Mines one event per word: the windowed context around the word paired
    /// with its gold tag.
    pub fn generate_sample(&self) -> Sample<String> {
        let mut sample = Sample::new();
        for sentence in &self.sentences {
            let words: Vec<&str> = sentence.words.iter().map(|w| w.token()).collect();
            let tags: Vec<&str> = sentence.words.iter().map(|w| w.tag()).collect();
            for index in 0..words.len() {
                let context = window_context(&words, &tags, index);
                sample.add(context, tags[index].to_string());
            }
        }
        sample
    }
}

/// Builds the classification context for one position of a tagged sentence.
///
/// The word window covers offsets -1, 0, and +1; the tag window covers
/// offsets -2, -1, +1, and +2. Offsets outside the sentence are simply
/// absent.
pub fn window_context<W, T>(words: &[W], tags: &[T], index: usize) -> Context<String>
where
    W: AsRef<str>,
    T: AsRef<str>,
{
    let mut context = Context::new().with_word(0, words[index].as_ref().to_string());
    if index >= 1 {
        context.set_word(-1, words[index - 1].as_ref().to_string());
        context.set_tag(-1, tags[index - 1].as_ref().to_string());
    }
    if index >= 2 {
        context.set_tag(-2, tags[index - 2].as_ref().to_string());
    }
    if index + 1 < words.len() {
        context.set_word(1, words[index + 1].as_ref().to_string());
        context.set_tag(1, tags[index + 1].as_ref().to_string());
    }
    if index + 2 < words.len() {
        context.set_tag(2, tags[index + 2].as_ref().to_string());
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROWN_EXCERPT: &str = "\
The/at Fulton/np-tl County/nn-tl Grand/jj-tl Jury/nn-tl said/vbd
The/at jury/nn further/rbr said/vbd in/in term-end/nn presentments/nns
It/pps recommended/vbd that/cs Fulton/np legislators/nns act/vb
Only/rb a/at relative/jj handful/nn of/in such/jj reports/nns
The/at jury/nn said/vbd it/pps did/dod find/vb
";

    #[test]
    fn test_from_brown_text() {
        let corpus = Corpus::from_brown_text(BROWN_EXCERPT).unwrap();

        assert_eq!(5, corpus.len());
        let first = &corpus.sentences()[0];
        assert_eq!(6, first.len());
        assert_eq!("The", first.words()[0].token());
        assert_eq!("at", first.words()[0].tag());
    }

    #[test]
    fn test_from_brown_text_slash_in_word() {
        let corpus = Corpus::from_brown_text("1/2/cd of/in").unwrap();

        let words = corpus.sentences()[0].words();
        assert_eq!("1/2", words[0].token());
        assert_eq!("cd", words[0].tag());
    }

    #[test]
    fn test_from_brown_text_missing_tag() {
        let result = Corpus::from_brown_text("The/at jury");

        assert!(matches!(
            result,
            Err(TraghettoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_brown_text_skips_blank_lines() {
        let corpus = Corpus::from_brown_text("The/at\n\njury/nn\n").unwrap();

        assert_eq!(2, corpus.len());
    }

    #[test]
    fn test_split_train_test() {
        let corpus = Corpus::from_brown_text(BROWN_EXCERPT).unwrap();

        let (train, test) = corpus.split_train_test(20);
        assert_eq!(1, train.len());
        assert_eq!(4, test.len());

        let (train, test) = corpus.split_train_test(100);
        assert_eq!(5, train.len());
        assert!(test.is_empty());
    }

    #[test]
    fn test_generate_sample_size() {
        let corpus = Corpus::from_brown_text(BROWN_EXCERPT).unwrap();
        let sample = corpus.generate_sample();

        let n_words: usize = corpus.sentences().iter().map(|s| s.len()).sum();
        assert_eq!(n_words, sample.len());
    }

    #[test]
    fn test_window_context_middle() {
        let words = ["The", "jury", "said"];
        let tags = ["at", "nn", "vbd"];

        let context = window_context(&words, &tags, 1);

        assert_eq!(Some(&"jury".to_string()), context.word(0));
        assert_eq!(Some(&"The".to_string()), context.word(-1));
        assert_eq!(Some(&"said".to_string()), context.word(1));
        assert_eq!(Some(&"at".to_string()), context.tag(-1));
        assert_eq!(Some(&"vbd".to_string()), context.tag(1));
        assert_eq!(None, context.tag(-2));
        assert_eq!(None, context.tag(2));
    }

    #[test]
    fn test_window_context_sentence_start() {
        let words = ["The", "jury", "said", "it"];
        let tags = ["at", "nn", "vbd", "pps"];

        let context = window_context(&words, &tags, 0);

        assert_eq!(Some(&"The".to_string()), context.word(0));
        assert_eq!(None, context.word(-1));
        assert_eq!(None, context.tag(-1));
        assert_eq!(Some(&"nn".to_string()), context.tag(1));
        assert_eq!(Some(&"vbd".to_string()), context.tag(2));
    }
}
