use std::fs::File;
use std::hash::Hash;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::codec::ElementCodec;
use crate::context::Context;
use crate::errors::{Result, TraghettoError};
use crate::feature::{Feature, FeatureSet};
use crate::model::{ClassifierDoc, FeatureRecord};
use crate::sample::Sample;
use crate::scaler::GisScaler;

/// Classification outcome.
///
/// `NoEvidence` is returned when no feature fires for the context at all: the
/// model then has no discriminative signal and a caller is expected to fall
/// back to an external default tagger. It is deliberately distinct from any
/// real class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The class with the highest conditional probability.
    Decided(String),

    /// No feature fired; the distribution is uniform and carries no signal.
    NoEvidence,
}

/// Report returned by [`MaxentClassifier::train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    /// Number of scaling iterations that ran.
    pub iterations: usize,

    /// Conditional log-likelihood of the sample at the last iteration.
    pub log_likelihood: f64,

    /// Whether the improvement criterion stopped training before the
    /// iteration cap.
    pub converged: bool,
}

/// Maximum entropy classifier over windowed contexts.
///
/// The classifier owns one weight per feature, aligned with the feature set's
/// positions. Weights start at zero and are only mutated by [`train`], which
/// runs Generalized Iterative Scaling against the training sample until the
/// log-likelihood improvement falls below a threshold or an iteration cap is
/// reached.
///
/// # Examples
///
/// ```
/// use traghetto::{Classification, Context, FeatureSet, MaxentClassifier, Sample};
///
/// let mut sample = Sample::new();
/// sample.add(
///     Context::new().with_word(0, "the".to_string()),
///     "DT".to_string(),
/// );
/// sample.add(
///     Context::new()
///         .with_word(0, "dog".to_string())
///         .with_tag(-1, "DT".to_string()),
///     "NN".to_string(),
/// );
///
/// let mut features = FeatureSet::new();
/// sample.generate_features(&mut features);
///
/// let mut classifier = MaxentClassifier::new(features, sample);
/// classifier.train(10, 0.001).unwrap();
///
/// let context = Context::new().with_word(0, "dog".to_string());
/// assert_eq!(
///     Classification::Decided("NN".to_string()),
///     classifier.classify(&context),
/// );
/// ```
///
/// [`train`]: MaxentClassifier::train
pub struct MaxentClassifier<V> {
    feature_set: FeatureSet<V>,
    sample: Sample<V>,
    weights: Vec<f64>,
    n_training_events: usize,
}

impl<V> MaxentClassifier<V>
where
    V: Clone + Eq + Hash,
{
    /// Creates an untrained classifier with all-zero weights.
    pub fn new(feature_set: FeatureSet<V>, sample: Sample<V>) -> Self {
        let weights = vec![0.0; feature_set.len()];
        let n_training_events = sample.len();
        Self {
            feature_set,
            sample,
            weights,
            n_training_events,
        }
    }

    /// The feature set this classifier was constructed over.
    pub fn feature_set(&self) -> &FeatureSet<V> {
        &self.feature_set
    }

    /// The training sample. Empty on a classifier restored from a file.
    pub fn sample(&self) -> &Sample<V> {
        &self.sample
    }

    /// Number of events the weights were trained against.
    pub fn n_training_events(&self) -> usize {
        self.n_training_events
    }

    /// The weight vector, aligned with the feature set's positions.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Trains the weights with Generalized Iterative Scaling.
    ///
    /// Each iteration matches model expectations against empirical
    /// expectations and applies the additive update
    /// `λ ← λ + ln(E_emp / E_model) / C`, where `C` is the maximum number of
    /// features firing together for any observed (context, class) pair.
    /// Features whose empirical or model expectation has no support are left
    /// untouched in that iteration.
    ///
    /// # Arguments
    ///
    /// * `max_iterations` - Hard cap on the number of iterations.
    /// * `min_improvement` - Training stops once the log-likelihood
    ///   improvement between consecutive iterations falls below this value.
    ///
    /// # Errors
    ///
    /// [`TraghettoError::EmptySample`] when the sample has no events and
    /// [`TraghettoError::EmptyFeatureSet`] when the feature set is empty.
    pub fn train(
        &mut self,
        max_iterations: usize,
        min_improvement: f64,
    ) -> Result<TrainingSummary> {
        if self.sample.is_empty() {
            return Err(TraghettoError::empty_sample());
        }
        if self.feature_set.is_empty() {
            return Err(TraghettoError::empty_feature_set());
        }
        let scaler = GisScaler::new(&self.sample, &self.feature_set);
        let mut summary = TrainingSummary {
            iterations: 0,
            log_likelihood: f64::NEG_INFINITY,
            converged: false,
        };
        for _ in 0..max_iterations {
            let step = scaler.step(&self.weights);
            self.weights = step.weights;
            summary.iterations += 1;
            let improvement = step.log_likelihood - summary.log_likelihood;
            summary.log_likelihood = step.log_likelihood;
            if improvement < min_improvement {
                summary.converged = true;
                break;
            }
        }
        Ok(summary)
    }

    fn scores(&self, active: &[u32]) -> Vec<f64> {
        let mut scores = vec![0.0; self.feature_set.labels().len()];
        for &position in active {
            let label_id = self.feature_set.position_label(position);
            scores[label_id as usize] += self.weights[position as usize];
        }
        scores
    }

    /// Conditional class probabilities for the given context.
    ///
    /// Probabilities are normalized over the full label universe and sum to
    /// one. When no feature fires, every class receives the same probability;
    /// [`classify`] reports that case as [`Classification::NoEvidence`].
    ///
    /// [`classify`]: MaxentClassifier::classify
    pub fn distribution(&self, context: &Context<V>) -> Vec<(String, f64)> {
        let labels = self.feature_set.labels();
        if labels.is_empty() {
            return vec![];
        }
        let scores = self.scores(&self.feature_set.activations(context));
        let max = scores.iter().fold(f64::NEG_INFINITY, |m, &s| m.max(s));
        let z: f64 = scores.iter().map(|&s| (s - max).exp()).sum();
        labels
            .iter()
            .zip(&scores)
            .map(|(label, &score)| (label.clone(), (score - max).exp() / z))
            .collect()
    }

    /// Classifies a context, returning the most probable class.
    ///
    /// Ties resolve to the label observed first during feature generation, so
    /// repeated calls are deterministic.
    pub fn classify(&self, context: &Context<V>) -> Classification {
        let active = self.feature_set.activations(context);
        if active.is_empty() {
            return Classification::NoEvidence;
        }
        let scores = self.scores(&active);
        let mut best = 0;
        for (label_id, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = label_id;
            }
        }
        Classification::Decided(self.feature_set.labels()[best].clone())
    }

    /// Deterministic digest over the weight vector.
    ///
    /// Persistence round-trips must reproduce this value exactly.
    pub fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for &weight in &self.weights {
            hasher.update(&weight.to_le_bytes());
        }
        hasher.finalize()
    }

    /// Writes the classifier state as a JSON document.
    ///
    /// The persisted shape is the ordered feature list, the aligned weight
    /// vector, the checksum, and the training-sample size. The sample itself
    /// is persisted separately via [`Sample::save`].
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W, C>(&self, wtr: &mut W, codec: &C) -> Result<()>
    where
        W: Write,
        C: ElementCodec<Element = V>,
    {
        let features = self
            .feature_set
            .features()
            .iter()
            .map(|feature| FeatureRecord {
                attribute: feature.attribute(),
                value: codec.encode(feature.value()),
                label: feature.label().to_string(),
            })
            .collect();
        ClassifierDoc {
            features,
            weights: self.weights.clone(),
            checksum: self.checksum(),
            n_training_events: self.n_training_events,
        }
        .write(wtr)
    }

    /// Reads a classifier from a JSON document.
    ///
    /// # Errors
    ///
    /// [`TraghettoError::InvalidModel`] when the weight vector length does not
    /// match the feature count or the stored checksum does not match the
    /// restored weights; read and decode errors are returned as is.
    pub fn read<R, C>(rdr: &mut R, codec: &C) -> Result<Self>
    where
        R: Read,
        C: ElementCodec<Element = V>,
    {
        let doc = ClassifierDoc::read(rdr)?;
        if doc.weights.len() != doc.features.len() {
            return Err(TraghettoError::invalid_model(format!(
                "weight vector length {} does not match feature count {}",
                doc.weights.len(),
                doc.features.len(),
            )));
        }
        let mut feature_set = FeatureSet::new();
        for record in doc.features {
            feature_set.insert(Feature::new(
                record.attribute,
                codec.decode(&record.value)?,
                record.label,
            ));
        }
        if feature_set.len() != doc.weights.len() {
            return Err(TraghettoError::invalid_model(
                "duplicate features in persisted feature list",
            ));
        }
        let classifier = Self {
            feature_set,
            sample: Sample::new(),
            weights: doc.weights,
            n_training_events: doc.n_training_events,
        };
        if classifier.checksum() != doc.checksum {
            return Err(TraghettoError::invalid_model(format!(
                "checksum mismatch: stored {}, restored {}",
                doc.checksum,
                classifier.checksum(),
            )));
        }
        Ok(classifier)
    }

    /// Saves the classifier to a file.
    ///
    /// # Errors
    ///
    /// I/O and serialization errors are returned as is; the in-memory
    /// classifier stays usable.
    pub fn save<P, C>(&self, path: P, codec: &C) -> Result<()>
    where
        P: AsRef<Path>,
        C: ElementCodec<Element = V>,
    {
        let mut wtr = BufWriter::new(File::create(path)?);
        self.write(&mut wtr, codec)
    }

    /// Loads a classifier from a file.
    ///
    /// # Errors
    ///
    /// I/O, deserialization, and validation errors are returned as is.
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

    fn trained_classifier() -> MaxentClassifier<String> {
        let sample = three_event_sample();
        let mut features = FeatureSet::new();
        sample.generate_features(&mut features);
        let mut classifier = MaxentClassifier::new(features, sample);
        classifier.train(10, 0.001).unwrap();
        classifier
    }

    #[test]
    fn test_train_empty_sample() {
        let sample = three_event_sample();
        let mut features = FeatureSet::new();
        sample.generate_features(&mut features);
        let mut classifier = MaxentClassifier::new(features, Sample::new());

        let result = classifier.train(10, 0.001);

        assert!(matches!(
            result,
            Err(TraghettoError::EmptySample(_))
        ));
    }

    #[test]
    fn test_train_empty_feature_set() {
        let mut classifier =
            MaxentClassifier::new(FeatureSet::new(), three_event_sample());

        let result = classifier.train(10, 0.001);

        assert!(matches!(
            result,
            Err(TraghettoError::EmptyFeatureSet(_))
        ));
    }

    #[test]
    fn test_train_terminates_and_classifies() {
        let sample = three_event_sample();
        let mut features = FeatureSet::new();
        sample.generate_features(&mut features);
        assert!(features.len() >= 3);

        let mut classifier = MaxentClassifier::new(features, sample);
        let summary = classifier.train(10, 0.001).unwrap();
        assert!(summary.iterations <= 10);
        assert!(summary.log_likelihood.is_finite());

        let context = Context::new()
            .with_word(0, "dog".to_string())
            .with_tag(-1, "DT".to_string());
        assert_eq!(
            Classification::Decided("NN".to_string()),
            classifier.classify(&context),
        );
    }

    #[test]
    fn test_classify_no_evidence() {
        let classifier = trained_classifier();

        let context = Context::new()
            .with_word(0, "zebra".to_string())
            .with_tag(-1, "XX".to_string());

        assert_eq!(Classification::NoEvidence, classifier.classify(&context));
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let classifier = trained_classifier();

        let context = Context::new()
            .with_word(0, "dog".to_string())
            .with_tag(-1, "DT".to_string());
        let distribution = classifier.distribution(&context);

        assert_eq!(3, distribution.len());
        let total: f64 = distribution.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_untrained_distribution_is_uniform() {
        let sample = three_event_sample();
        let mut features = FeatureSet::new();
        sample.generate_features(&mut features);
        let classifier = MaxentClassifier::new(features, sample);

        let context = Context::new().with_word(0, "dog".to_string());
        for (_, p) in classifier.distribution(&context) {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weights_stay_finite() {
        let sample = three_event_sample();
        let mut features = FeatureSet::new();
        sample.generate_features(&mut features);
        let mut classifier = MaxentClassifier::new(features, sample);
        classifier.train(100, 0.0).unwrap();

        assert!(classifier.weights().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_checksum_round_trip() {
        let classifier = trained_classifier();

        let mut buf = vec![];
        classifier.write(&mut buf, &StringCodec).unwrap();
        let restored = MaxentClassifier::read(&mut buf.as_slice(), &StringCodec).unwrap();

        assert_eq!(classifier.checksum(), restored.checksum());
        assert_eq!(
            classifier.n_training_events(),
            restored.n_training_events()
        );
        assert_eq!(classifier.feature_set().len(), restored.feature_set().len());
    }

    #[test]
    fn test_restored_classifier_classifies_identically() {
        let classifier = trained_classifier();
        let mut buf = vec![];
        classifier.write(&mut buf, &StringCodec).unwrap();
        let restored = MaxentClassifier::read(&mut buf.as_slice(), &StringCodec).unwrap();

        let context = Context::new()
            .with_word(0, "runs".to_string())
            .with_tag(-1, "NN".to_string());

        assert_eq!(classifier.classify(&context), restored.classify(&context));
        assert_eq!(
            classifier.distribution(&context),
            restored.distribution(&context)
        );
    }

    #[test]
    fn test_save_load() {
        let classifier = trained_classifier();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");

        classifier.save(&path, &StringCodec).unwrap();
        let restored =
            MaxentClassifier::<String>::load(&path, &StringCodec).unwrap();

        assert_eq!(classifier.checksum(), restored.checksum());
    }

    #[test]
    fn test_read_rejects_length_mismatch() {
        let json = serde_json::json!({
            "features": [
                {"attribute": {"Word": 0}, "value": "the", "label": "DT"},
            ],
            "weights": [0.5, 0.25],
            "checksum": 0,
            "n_training_events": 1,
        })
        .to_string();

        let result =
            MaxentClassifier::<String>::read(&mut json.as_bytes(), &StringCodec);

        assert!(matches!(
            result,
            Err(TraghettoError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_read_rejects_checksum_mismatch() {
        let classifier = trained_classifier();
        let mut buf = vec![];
        classifier.write(&mut buf, &StringCodec).unwrap();
        let mut doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        doc["checksum"] = serde_json::json!(123456789u32);
        let tampered = doc.to_string();

        let result =
            MaxentClassifier::<String>::read(&mut tampered.as_bytes(), &StringCodec);

        assert!(matches!(
            result,
            Err(TraghettoError::InvalidModel(_))
        ));
    }
}
