//! Lexicon collaborator: per-word most-frequent tags with default fallbacks.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use hashbrown::HashMap;

use crate::corpus::Corpus;
use crate::errors::Result;
use crate::model::LexiconDoc;

/// Word-to-tag lookup built from a tagged corpus.
///
/// Every word maps to the tag it was most frequently observed with. Words
/// absent from the lexicon fall back to a default tag, with a separate
/// default for capitalized words (proper nouns in most tag sets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, String>,
    default_tag: String,
    default_tag_capitalized: String,
}

impl Lexicon {
    /// Builds a lexicon from a tagged corpus.
    ///
    /// Frequency ties resolve to the lexicographically smallest tag so the
    /// result is independent of corpus order.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut counts: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
        for sentence in corpus.sentences() {
            for word in sentence.words() {
                *counts
                    .entry(word.token())
                    .or_default()
                    .entry(word.tag())
                    .or_insert(0) += 1;
            }
        }
        let mut entries = HashMap::with_capacity(counts.len());
        for (token, tag_counts) in counts {
            let best = tag_counts
                .iter()
                .max_by(|(tag_a, count_a), (tag_b, count_b)| {
                    count_a.cmp(count_b).then(tag_b.cmp(tag_a))
                })
                .map(|(&tag, _)| tag)
                .unwrap_or_default();
            entries.insert(token.to_string(), best.to_string());
        }
        Self {
            entries,
            default_tag: "NN".to_string(),
            default_tag_capitalized: "NP".to_string(),
        }
    }

    /// Overrides the default tags used for out-of-lexicon words.
    pub fn set_default_tags(&mut self, default_tag: String, default_tag_capitalized: String) {
        self.default_tag = default_tag;
        self.default_tag_capitalized = default_tag_capitalized;
    }

    /// Looks up a word, trying the exact form first and the lowercased form
    /// second.
    pub fn tag(&self, word: &str) -> Option<&str> {
        if let Some(tag) = self.entries.get(word) {
            return Some(tag);
        }
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Tags a word, falling back to the defaults when it is not in the
    /// lexicon: the capitalized default for words starting with an uppercase
    /// letter, the plain default otherwise.
    pub fn tag_word_with_defaults(&self, word: &str) -> &str {
        if let Some(tag) = self.tag(word) {
            return tag;
        }
        if word.chars().next().is_some_and(char::is_uppercase) {
            &self.default_tag_capitalized
        } else {
            &self.default_tag
        }
    }

    /// Gets the number of lexicon entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the lexicon contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the lexicon as a JSON document.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        LexiconDoc {
            entries: self
                .entries
                .iter()
                .map(|(word, tag)| (word.clone(), tag.clone()))
                .collect(),
            default_tag: self.default_tag.clone(),
            default_tag_capitalized: self.default_tag_capitalized.clone(),
        }
        .write(wtr)
    }

    /// Reads a lexicon from a JSON document.
    ///
    /// # Errors
    ///
    /// Read and deserialization errors are returned as is.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let doc = LexiconDoc::read(rdr)?;
        Ok(Self {
            entries: doc.entries.into_iter().collect(),
            default_tag: doc.default_tag,
            default_tag_capitalized: doc.default_tag_capitalized,
        })
    }

    /// Saves the lexicon to a file.
    ///
    /// # Errors
    ///
    /// I/O and serialization errors are returned as is.
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut wtr = BufWriter::new(File::create(path)?);
        self.write(&mut wtr)
    }

    /// Loads a lexicon from a file.
    ///
    /// # Errors
    ///
    /// I/O and deserialization errors are returned as is.
    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut rdr = BufReader::new(File::open(path)?);
        Self::read(&mut rdr)
    }
}
