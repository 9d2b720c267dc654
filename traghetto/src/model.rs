//! Persisted document shapes.
//!
//! Samples and classifiers are stored as structured JSON documents. Element
//! values are kept in their codec-encoded string form; reviving them into the
//! domain type happens in the owning module, where the codec is available.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::context::Attribute;
use crate::errors::Result;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EventRecord {
    pub(crate) word_window: BTreeMap<i8, String>,
    pub(crate) tag_window: BTreeMap<i8, String>,
    pub(crate) label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SampleDoc {
    pub(crate) events: Vec<EventRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FeatureRecord {
    pub(crate) attribute: Attribute,
    pub(crate) value: String,
    pub(crate) label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ClassifierDoc {
    pub(crate) features: Vec<FeatureRecord>,
    pub(crate) weights: Vec<f64>,
    pub(crate) checksum: u32,
    pub(crate) n_training_events: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LexiconDoc {
    pub(crate) entries: BTreeMap<String, String>,
    pub(crate) default_tag: String,
    pub(crate) default_tag_capitalized: String,
}

macro_rules! impl_doc_io {
    ($($doc:ty),*) => {
        $(
            impl $doc {
                pub(crate) fn write<W>(&self, wtr: &mut W) -> Result<()>
                where
                    W: Write,
                {
                    serde_json::to_writer(wtr, self)?;
                    Ok(())
                }

                pub(crate) fn read<R>(rdr: &mut R) -> Result<Self>
                where
                    R: Read,
                {
                    Ok(serde_json::from_reader(rdr)?)
                }
            }
        )*
    };
}

impl_doc_io!(SampleDoc, ClassifierDoc, LexiconDoc);
