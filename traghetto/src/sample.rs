use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::codec::ElementCodec;
use crate::context::Context;
use crate::errors::Result;
use crate::feature::{Feature, FeatureSet};
use crate::model::{EventRecord, SampleDoc};

/// One observed (context, class) pair from a tagged training corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<V> {
    context: Context<V>,
    label: String,
}

impl<V> Event<V> {
    /// Creates a new event.
    pub fn new(context: Context<V>, label: String) -> Self {
        Self { context, label }
    }

    /// The observed context.
    pub fn context(&self) -> &Context<V> {
        &self.context
    }

    /// The observed class.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered sequence of events mined from a tagged training corpus.
///
/// Insertion order carries no semantics but is preserved so persisted samples
/// reproduce exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample<V> {
    events: Vec<Event<V>>,
}

impl<V> Default for Sample<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Sample<V> {
    /// Creates an empty sample.
    pub fn new() -> Self {
        Self { events: vec![] }
    }

    /// Appends an event. Duplicates are kept: each occurrence is evidence.
    pub fn add(&mut self, context: Context<V>, label: String) {
        self.events.push(Event::new(context, label));
    }

    /// Gets the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Checks whether the sample contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event<V>] {
        &self.events
    }
}

impl<V> Sample<V>
where
    V: Clone + Eq + Hash,
{
    /// Registers one candidate feature per attribute/value pair of every
    /// event's context, bound to that event's class.
    ///
    /// This is the sole feature-discovery mechanism: the feature space is
    /// exactly the set of attribute/value/class combinations observed in the
    /// training data, so the feature count is bounded by corpus diversity.
    pub fn generate_features(&self, feature_set: &mut FeatureSet<V>) {
        for event in &self.events {
            for (attribute, value) in event.context.attributes() {
                feature_set.insert(Feature::new(
                    attribute,
                    value.clone(),
                    event.label.clone(),
                ));
            }
        }
    }
}

impl<V> Sample<V> {
    /// Writes the sample as a JSON document.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W, C>(&self, wtr: &mut W, codec: &C) -> Result<()>
    where
        W: Write,
        C: ElementCodec<Element = V>,
    {
        let events = self
            .events
            .iter()
            .map(|event| EventRecord {
                word_window: event
                    .context
                    .word_window()
                    .iter()
                    .map(|(&offset, value)| (offset, codec.encode(value)))
                    .collect(),
                tag_window: event
                    .context
                    .tag_window()
                    .iter()
                    .map(|(&offset, value)| (offset, codec.encode(value)))
                    .collect(),
                label: event.label.clone(),
            })
            .collect();
        SampleDoc { events }.write(wtr)
    }

    /// Reads a sample from a JSON document, reviving element values through
    /// the codec.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error or the document is malformed, an error
    /// variant will be returned.
    pub fn read<R, C>(rdr: &mut R, codec: &C) -> Result<Self>
    where
        R: Read,
        C: ElementCodec<Element = V>,
    {
        let doc = SampleDoc::read(rdr)?;
        let mut events = Vec::with_capacity(doc.events.len());
        for record in doc.events {
            let mut context = Context::new();
            for (offset, raw) in record.word_window {
                context.set_word(offset, codec.decode(&raw)?);
            }
            for (offset, raw) in record.tag_window {
                context.set_tag(offset, codec.decode(&raw)?);
            }
            events.push(Event::new(context, record.label));
        }
        Ok(Self { events })
    }

    /// Saves the sample to a file.
    ///
    /// # Errors
    ///
    /// I/O and serialization errors are returned as is; no partial state is
    /// left in memory.
    pub fn save<P, C>(&self, path: P, codec: &C) -> Result<()>
    where
        P: AsRef<Path>,
        C: ElementCodec<Element = V>,
    {
        let mut wtr = BufWriter::new(File::create(path)?);
        self.write(&mut wtr, codec)
    }

    /// Loads a sample from a file.
    ///
    /// # Errors
    ///
    /// I/O and deserialization errors are returned as is.
    pub fn load<P, C>(path: P, codec: &C) -> Result<Self>
    where
        P: AsRef<Path>,
        C: ElementCodec<Element = V>,
    {
        let mut rdr = BufReader::new(File::open(path)?);
        Self::read(&mut rdr, codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::StringCodec;
    use crate::context::Attribute;

    fn three_event_sample() -> Sample<String> {
        let mut sample = Sample::new();
        sample.add(
            Context::new().with_word(0, "the".to_string()),
            "DT".to_string(),
        );
        sample.add(
            Context::new()
                .with_word(0, "dog".to_string())
                .with_tag(-1, "DT".to_string()),
            "NN".to_string(),
        );
        sample.add(
            Context::new()
                .with_word(0, "runs".to_string())
                .with_tag(-1, "NN".to_string()),
            "VBZ".to_string(),
        );
        sample
    }

    #[test]
    fn test_sample_add() {
        let sample = three_event_sample();

        assert_eq!(3, sample.len());
        assert_eq!("DT", sample.events()[0].label());
    }

    #[test]
    fn test_generate_features_counts() {
        let sample = three_event_sample();
        let mut fs = FeatureSet::new();
        sample.generate_features(&mut fs);

        // One feature per attribute/value pair per event: 1 + 2 + 2.
        assert_eq!(5, fs.len());
        assert!(fs.len() >= 3);
    }

    #[test]
    fn test_generate_features_dedup() {
        let mut sample = three_event_sample();
        // Repeat the first event; its feature already exists.
        sample.add(
            Context::new().with_word(0, "the".to_string()),
            "DT".to_string(),
        );
        let mut fs = FeatureSet::new();
        sample.generate_features(&mut fs);

        assert_eq!(5, fs.len());
    }

    #[test]
    fn test_generate_features_closed_world() {
        let sample = three_event_sample();
        let mut fs = FeatureSet::new();
        sample.generate_features(&mut fs);

        for feature in fs.features() {
            let observed = sample.events().iter().any(|event| {
                event
                    .context()
                    .attributes()
                    .any(|(a, v)| a == feature.attribute() && v == feature.value())
            });
            assert!(observed);
        }
        // A pair never observed must not yield a feature.
        let unseen = Context::new().with_word(0, "cat".to_string());
        assert!(fs.activations(&unseen).is_empty());
    }

    #[test]
    fn test_sample_round_trip() {
        let sample = three_event_sample();

        let mut buf = vec![];
        sample.write(&mut buf, &StringCodec).unwrap();
        let restored = Sample::read(&mut buf.as_slice(), &StringCodec).unwrap();

        assert_eq!(sample.len(), restored.len());
        assert_eq!(sample, restored);
    }

    #[test]
    fn test_sample_save_load() {
        let sample = three_event_sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");

        sample.save(&path, &StringCodec).unwrap();
        let restored = Sample::load(&path, &StringCodec).unwrap();

        assert_eq!(sample, restored);
    }

    #[test]
    fn test_sample_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let result = Sample::<String>::load(&path, &StringCodec);

        assert!(result.is_err());
    }

    #[test]
    fn test_generate_features_attribute_kinds() {
        let sample = three_event_sample();
        let mut fs = FeatureSet::new();
        sample.generate_features(&mut fs);

        let word_features = fs
            .features()
            .iter()
            .filter(|f| matches!(f.attribute(), Attribute::Word(_)))
            .count();
        assert_eq!(3, word_features);
        assert_eq!(2, fs.len() - word_features);
    }
}
