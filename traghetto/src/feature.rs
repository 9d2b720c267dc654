use std::fmt::Write as _;
use std::hash::Hash;

use hashbrown::HashMap;

use crate::context::{Attribute, Context};

/// Binary indicator predicate over (context, class) pairs.
///
/// A feature fires for a context and a candidate class exactly when the
/// context carries `value` under `attribute` and the candidate class equals
/// `label`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Feature<V> {
    attribute: Attribute,
    value: V,
    label: String,
}

impl<V> Feature<V> {
    /// Creates a new feature bound to one attribute/value pair and one class.
    pub fn new(attribute: Attribute, value: V, label: String) -> Self {
        Self {
            attribute,
            value,
            label,
        }
    }

    /// The attribute key this feature tests.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// The attribute value this feature tests.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The target class this feature is bound to.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered, deduplicated collection of features with a stable position index.
///
/// Positions align with the classifier's weight vector and are stable across
/// persistence. An activation index from attribute/value pairs to feature
/// positions makes the per-classification lookup proportional to the number of
/// attributes present in the context rather than to the total feature count.
pub struct FeatureSet<V> {
    features: Vec<Feature<V>>,
    positions: HashMap<Feature<V>, u32>,
    index: HashMap<Attribute, HashMap<V, Vec<u32>>>,
    labels: Vec<String>,
    label_ids: HashMap<String, u32>,
    position_labels: Vec<u32>,
}

impl<V> Default for FeatureSet<V>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FeatureSet<V>
where
    V: Clone + Eq + Hash,
{
    /// Creates an empty feature set.
    pub fn new() -> Self {
        Self {
            features: vec![],
            positions: HashMap::new(),
            index: HashMap::new(),
            labels: vec![],
            label_ids: HashMap::new(),
            position_labels: vec![],
        }
    }

    /// Gets the number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Checks whether the feature set contains no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Inserts a feature, deduplicating by its full tuple.
    ///
    /// # Returns
    ///
    /// The stable position of the feature, whether it was newly inserted or
    /// already present.
    pub fn insert(&mut self, feature: Feature<V>) -> u32 {
        if let Some(&position) = self.positions.get(&feature) {
            return position;
        }
        let position = u32::try_from(self.features.len()).unwrap();
        if !self.label_ids.contains_key(&feature.label) {
            let label_id = u32::try_from(self.labels.len()).unwrap();
            self.labels.push(feature.label.clone());
            self.label_ids.insert(feature.label.clone(), label_id);
        }
        self.position_labels.push(self.label_ids[&feature.label]);
        self.index
            .entry(feature.attribute)
            .or_default()
            .entry(feature.value.clone())
            .or_default()
            .push(position);
        self.positions.insert(feature.clone(), position);
        self.features.push(feature);
        position
    }

    /// Gets the feature at the given position.
    pub fn get(&self, position: u32) -> Option<&Feature<V>> {
        self.features.get(position as usize)
    }

    /// All features in position order.
    pub fn features(&self) -> &[Feature<V>] {
        &self.features
    }

    /// The target-class universe, in first-observation order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub(crate) fn label_id(&self, label: &str) -> Option<u32> {
        self.label_ids.get(label).copied()
    }

    /// Label id of the feature at the given position.
    pub(crate) fn position_label(&self, position: u32) -> u32 {
        self.position_labels[position as usize]
    }

    /// Positions of all features firing for any class given this context.
    ///
    /// Only the attribute/value pairs actually present in the context are
    /// looked up; attribute/value pairs never observed in training resolve to
    /// nothing.
    pub fn activations(&self, context: &Context<V>) -> Vec<u32> {
        let mut active = vec![];
        for (attribute, value) in context.attributes() {
            if let Some(positions) = self
                .index
                .get(&attribute)
                .and_then(|by_value| by_value.get(value))
            {
                active.extend_from_slice(positions);
            }
        }
        active
    }

    /// Diagnostic listing of all feature tuples, one per line.
    pub fn pretty_print(&self) -> String
    where
        V: std::fmt::Display,
    {
        let mut out = String::new();
        for (position, feature) in self.features.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}: ({}={}, {})",
                position, feature.attribute, feature.value, feature.label
            );
        }
        out
    }
}
