// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{InfoSelError, Result};
use crate::estimators::approaches::discrete::histogram::CountHistogram;

/// Divide a count table by the instance count.
pub fn normalize(counts: ArrayView2<'_, u64>, n_instances: usize) -> Array2<f64> {
    let n = n_instances as f64;
    counts.mapv(|c| c as f64 / n)
}

/// Joint and marginal probability tables of every feature against the fixed
/// conditioning feature `z`.
///
/// Built once from the construction-time histograms and never mutated, so
/// redundancy queries read them without recomputing any normalization.
#[derive(Debug, Clone)]
pub struct ProbabilityTables {
    /// p(f, z), indexed `[f][z]`.
    joint: BTreeMap<usize, Array2<f64>>,
    /// p(f), the row sums of `joint`.
    marginal: BTreeMap<usize, Array1<f64>>,
    /// p(z).
    cond_marginal: Array1<f64>,
    n_features: usize,
}

impl ProbabilityTables {
    /// Normalize the histograms of every feature against `cond`.
    ///
    /// Fails if any histogram does not account for exactly `n_instances` instances.
    pub fn from_histograms(
        histograms: &BTreeMap<usize, CountHistogram>,
        cond: usize,
        n_instances: usize,
        n_features: usize,
    ) -> Result<Self> {
        let mut joint = BTreeMap::new();
        let mut marginal = BTreeMap::new();
        for (&feature, hist) in histograms {
            let total = hist.total();
            if total != n_instances as u64 {
                return Err(InfoSelError::DataShape(format!(
                    "histogram of feature {feature} counts {total} instances, expected {n_instances}"
                )));
            }
            let p = normalize(hist.counts(), n_instances);
            marginal.insert(feature, p.sum_axis(Axis(1)));
            joint.insert(feature, p);
        }

        let cond_marginal = joint
            .get(&cond)
            .map(|p: &Array2<f64>| p.sum_axis(Axis(0)))
            .ok_or(InfoSelError::FeatureOutOfRange {
                index: cond,
                n_features,
            })?;

        Ok(Self {
            joint,
            marginal,
            cond_marginal,
            n_features,
        })
    }

    fn missing(&self, feature: usize) -> InfoSelError {
        InfoSelError::FeatureOutOfRange {
            index: feature,
            n_features: self.n_features,
        }
    }

    /// p(f, z) for feature `f`.
    pub fn joint(&self, feature: usize) -> Result<ArrayView2<'_, f64>> {
        self.joint
            .get(&feature)
            .map(|p| p.view())
            .ok_or_else(|| self.missing(feature))
    }

    /// p(f) for feature `f`.
    pub fn marginal(&self, feature: usize) -> Result<ArrayView1<'_, f64>> {
        self.marginal
            .get(&feature)
            .map(|p| p.view())
            .ok_or_else(|| self.missing(feature))
    }

    /// p(z) of the conditioning feature.
    pub fn cond_marginal(&self) -> ArrayView1<'_, f64> {
        self.cond_marginal.view()
    }

    pub fn n_tables(&self) -> usize {
        self.joint.len()
    }
}
