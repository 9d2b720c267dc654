//! Part-of-speech tagger combining the lexicon baseline with the classifier.

use crate::classifier::{Classification, MaxentClassifier};
use crate::corpus::{window_context, TaggedWord};
use crate::lexicon::Lexicon;

/// Tagger driving the maximum entropy classifier over whole sentences.
///
/// Words are first tagged with the lexicon so tag windows are populated, then
/// each position is classified against its windowed context. When the
/// classifier has no evidence for a position, the lexicon's default tagging
/// decides.
pub struct PosTagger {
    lexicon: Lexicon,
    classifier: MaxentClassifier<String>,
}

impl PosTagger {
    /// Creates a new tagger.
    pub fn new(lexicon: Lexicon, classifier: MaxentClassifier<String>) -> Self {
        Self {
            lexicon,
            classifier,
        }
    }

    /// The lexicon used for the baseline pass and fallbacks.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The classifier used for the context-conditioned pass.
    pub fn classifier(&self) -> &MaxentClassifier<String> {
        &self.classifier
    }

    /// Tags a sentence with the lexicon alone.
    pub fn tag_with_lexicon<S>(&self, words: &[S]) -> Vec<TaggedWord>
    where
        S: AsRef<str>,
    {
        words
            .iter()
            .map(|word| {
                TaggedWord::new(
                    word.as_ref().to_string(),
                    self.lexicon.tag_word_with_defaults(word.as_ref()).to_string(),
                )
            })
            .collect()
    }

    /// Tags a sentence with the classifier, reading tag windows from the
    /// lexicon baseline and falling back to the lexicon defaults where the
    /// classifier reports no evidence.
    pub fn tag<S>(&self, words: &[S]) -> Vec<TaggedWord>
    where
        S: AsRef<str>,
    {
        let baseline = self.tag_with_lexicon(words);
        let baseline_tags: Vec<&str> = baseline.iter().map(|w| w.tag()).collect();
        let mut tagged = Vec::with_capacity(words.len());
        for (index, word) in words.iter().enumerate() {
            let context = window_context(words, &baseline_tags, index);
            let tag = match self.classifier.classify(&context) {
                Classification::Decided(tag) => tag,
                Classification::NoEvidence => self
                    .lexicon
                    .tag_word_with_defaults(word.as_ref())
                    .to_string(),
            };
            tagged.push(TaggedWord::new(word.as_ref().to_string(), tag));
        }
        tagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::feature::FeatureSet;

    fn tagger() -> PosTagger {
        let corpus = Corpus::from_brown_text(
            "the/at dog/nn runs/vbz\nthe/at cat/nn runs/vbz\na/at dog/nn sleeps/vbz",
        )
        .unwrap();
        let sample = corpus.generate_sample();
        let mut features = FeatureSet::new();
        sample.generate_features(&mut features);
        let mut classifier = MaxentClassifier::new(features, sample);
        classifier.train(50, 0.001).unwrap();
        let mut lexicon = Lexicon::from_corpus(&corpus);
        lexicon.set_default_tags("nn".to_string(), "np".to_string());
        PosTagger::new(lexicon, classifier)
    }

    #[test]
    fn test_tag_with_lexicon() {
        let tagger = tagger();

        let tagged = tagger.tag_with_lexicon(&["the", "dog", "runs"]);

        assert_eq!(3, tagged.len());
        assert_eq!("at", tagged[0].tag());
        assert_eq!("nn", tagged[1].tag());
        assert_eq!("vbz", tagged[2].tag());
    }

    #[test]
    fn test_tag_known_sentence() {
        let tagger = tagger();

        let tagged = tagger.tag(&["the", "cat", "sleeps"]);

        assert_eq!("at", tagged[0].tag());
        assert_eq!("nn", tagged[1].tag());
        assert_eq!("vbz", tagged[2].tag());
    }

    #[test]
    fn test_tag_falls_back_on_no_evidence() {
        let tagger = tagger();

        // A lone unseen word yields an empty activation set, so the lexicon
        // defaults decide.
        let tagged = tagger.tag(&["xylophone"]);
        assert_eq!("nn", tagged[0].tag());

        let tagged = tagger.tag(&["Fulton"]);
        assert_eq!("np", tagged[0].tag());
    }
}
