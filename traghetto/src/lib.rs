//! # Traghetto
//!
//! Traghetto is a maximum entropy (log-linear) classifier for part-of-speech
//! tagging. Binary indicator features are mined from observed (context, class)
//! pairs, weights are estimated with Generalized Iterative Scaling, and
//! classification returns a context-conditioned probability distribution over
//! the observed tag set.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use traghetto::{Corpus, FeatureSet, MaxentClassifier, StringCodec};
//!
//! let mut f = BufReader::new(File::open("corpus.txt").unwrap());
//! let text = std::io::read_to_string(&mut f).unwrap();
//! let corpus = Corpus::from_brown_text(&text).unwrap();
//!
//! let sample = corpus.generate_sample();
//! let mut features = FeatureSet::new();
//! sample.generate_features(&mut features);
//!
//! let mut classifier = MaxentClassifier::new(features, sample);
//! classifier.train(100, 0.001).unwrap();
//! classifier.save("classifier.json", &StringCodec).unwrap();
//! ```

mod classifier;
mod codec;
mod context;
mod corpus;
mod errors;
mod feature;
mod lexicon;
mod model;
mod sample;
mod scaler;
mod tagger;

pub use classifier::{Classification, MaxentClassifier, TrainingSummary};
pub use codec::{ElementCodec, StringCodec};
pub use context::{Attribute, Context};
pub use corpus::{window_context, Corpus, TaggedSentence, TaggedWord};
pub use errors::{Result, TraghettoError};
pub use feature::{Feature, FeatureSet};
pub use lexicon::Lexicon;
pub use sample::{Event, Sample};
pub use tagger::PosTagger;
