//! Generalized Iterative Scaling.
//!
//! Each iteration is a pure function of the current weight vector: the scaler
//! precomputes per-event feature activations and empirical expectations once,
//! then [`GisScaler::step`] returns a fresh weight vector together with the
//! conditional log-likelihood of the sample under the input weights. Model
//! expectations are reduced in parallel across events; the reduction is the
//! synchronization barrier between iterations.

use std::hash::Hash;

use rayon::prelude::*;

use crate::feature::FeatureSet;
use crate::sample::Sample;

// Features with empirical or model expectation at or below this floor have no
// usable support and keep their current weight.
const EXPECTATION_FLOOR: f64 = 1e-12;

/// Feature activations of one event, grouped by candidate label.
struct EventActivations {
    by_label: Vec<(u32, Vec<u32>)>,
    observed: Option<u32>,
}

/// Outcome of one scaling iteration.
pub(crate) struct IterationStep {
    pub(crate) weights: Vec<f64>,

    /// Conditional log-likelihood of the sample under the input weights.
    pub(crate) log_likelihood: f64,
}

pub(crate) struct GisScaler {
    activations: Vec<EventActivations>,
    empirical: Vec<f64>,
    n_features: usize,
    n_labels: usize,
    n_events: f64,

    /// Scaling constant, at least the maximum active-feature count over all
    /// observed (context, class) pairs.
    slack: f64,
}

impl GisScaler {
    pub(crate) fn new<V>(sample: &Sample<V>, features: &FeatureSet<V>) -> Self
    where
        V: Clone + Eq + Hash,
    {
        let mut empirical = vec![0.0; features.len()];
        let mut activations = Vec::with_capacity(sample.len());
        let mut max_active = 1;
        for event in sample.events() {
            let observed = features.label_id(event.label());
            let mut by_label: Vec<(u32, Vec<u32>)> = vec![];
            for position in features.activations(event.context()) {
                let label_id = features.position_label(position);
                match by_label.iter_mut().find(|(l, _)| *l == label_id) {
                    Some((_, positions)) => positions.push(position),
                    None => by_label.push((label_id, vec![position])),
                }
            }
            for (label_id, positions) in &by_label {
                max_active = max_active.max(positions.len());
                if Some(*label_id) == observed {
                    for &position in positions {
                        empirical[position as usize] += 1.0;
                    }
                }
            }
            activations.push(EventActivations { by_label, observed });
        }
        let n_events = sample.len() as f64;
        for e in &mut empirical {
            *e /= n_events;
        }
        Self {
            activations,
            empirical,
            n_features: features.len(),
            n_labels: features.labels().len(),
            slack: max_active as f64,
            n_events,
        }
    }

    /// Runs one iteration: `(weights_k) -> weights_{k+1}`.
    ///
    /// Model expectations are accumulated per event and summed pairwise; all
    /// contributions are additive, so the parallel reduction is exact up to
    /// floating-point association.
    pub(crate) fn step(&self, weights: &[f64]) -> IterationStep {
        let init = || (vec![0.0; self.n_features], 0.0);
        let (acc, log_likelihood) = self
            .activations
            .par_iter()
            .fold(init, |(mut acc, mut ll), event| {
                if event.by_label.is_empty() {
                    // No evidence: uniform distribution, no feature fires.
                    return (acc, ll);
                }
                let mut scores = vec![0.0; self.n_labels];
                for (label_id, positions) in &event.by_label {
                    let mut score = 0.0;
                    for &position in positions {
                        score += weights[position as usize];
                    }
                    scores[*label_id as usize] = score;
                }
                let max = scores.iter().fold(f64::NEG_INFINITY, |m, &s| m.max(s));
                let z: f64 = scores.iter().map(|&s| (s - max).exp()).sum();
                let log_z = max + z.ln();
                for (label_id, positions) in &event.by_label {
                    let p = (scores[*label_id as usize] - log_z).exp();
                    for &position in positions {
                        acc[position as usize] += p;
                    }
                }
                if let Some(observed) = event.observed {
                    ll += scores[observed as usize] - log_z;
                }
                (acc, ll)
            })
            .reduce(init, |(mut a, ll_a), (b, ll_b)| {
                for (x, y) in a.iter_mut().zip(&b) {
                    *x += *y;
                }
                (a, ll_a + ll_b)
            });

        let mut new_weights = weights.to_vec();
        for (position, weight) in new_weights.iter_mut().enumerate() {
            let empirical = self.empirical[position];
            let model = acc[position] / self.n_events;
            if empirical <= EXPECTATION_FLOOR || model <= EXPECTATION_FLOOR {
                continue;
            }
            let updated = *weight + (empirical / model).ln() / self.slack;
            debug_assert!(updated.is_finite());
            *weight = updated;
        }
        IterationStep {
            weights: new_weights,
            log_likelihood,
        }
    }
}
