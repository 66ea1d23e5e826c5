// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The information-theory engine.
//!
//! Construction resolves cardinalities, builds the histograms of every feature
//! against the fixed conditioning feature, normalizes them once and derives
//! relevances. Redundancy queries reuse those cached tables and only build the
//! 3-D histograms of the queried candidates.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{InfoSelError, Result};
use crate::estimators::approaches::discrete::cardinality::CardinalityTable;
use crate::estimators::approaches::discrete::probability::ProbabilityTables;
use crate::estimators::approaches::discrete::{Redundancy, mutual_information, redundancy};
use crate::estimators::traits::{ColumnStore, DatasetShape};
use crate::substrate::Broadcast;

pub struct InfoTheory<S: ColumnStore> {
    store: S,
    pool: rayon::ThreadPool,
    shape: DatasetShape,
    fixed_feature: usize,
    cardinalities: Broadcast<CardinalityTable>,
    tables: ProbabilityTables,
    relevances: BTreeMap<usize, f64>,
}

impl<S: ColumnStore> InfoTheory<S> {
    /// Build an engine for `store` conditioned on `fixed_feature`, using all available threads.
    pub fn initialize(
        store: S,
        fixed_feature: usize,
        n_instances: usize,
        n_features: usize,
    ) -> Result<Self> {
        Self::initialize_with_config(
            store,
            fixed_feature,
            n_instances,
            n_features,
            EngineConfig::default(),
        )
    }

    pub fn initialize_with_config(
        store: S,
        fixed_feature: usize,
        n_instances: usize,
        n_features: usize,
        config: EngineConfig,
    ) -> Result<Self> {
        let start = Instant::now();
        let shape = DatasetShape {
            n_instances,
            n_features,
        };
        if fixed_feature >= n_features {
            return Err(InfoSelError::FeatureOutOfRange {
                index: fixed_feature,
                n_features,
            });
        }
        if n_instances == 0 {
            return Err(InfoSelError::DataShape(
                "dataset declares no instances".to_string(),
            ));
        }

        let pool = config.build_pool()?;
        let (cardinalities, tables, relevances) = pool.install(|| -> Result<_> {
            store.validate(shape)?;
            let cardinalities = Broadcast::new(store.cardinalities(shape)?);
            let histograms = store.histograms(fixed_feature, &cardinalities, shape)?;
            let tables = ProbabilityTables::from_histograms(
                &histograms,
                fixed_feature,
                n_instances,
                n_features,
            )?;
            let relevances = (0..n_features)
                .into_par_iter()
                .filter(|&feature| feature != fixed_feature)
                .map(|feature| -> Result<(usize, f64)> {
                    let mi = mutual_information(tables.joint(feature)?, tables.cond_marginal());
                    Ok((feature, mi))
                })
                .collect::<Result<BTreeMap<_, _>>>()?;
            Ok((cardinalities, tables, relevances))
        })?;

        info!(
            layout = store.layout_name(),
            n_features,
            n_instances,
            fixed_feature,
            threads = pool.current_num_threads(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "initialized information-theory engine"
        );

        Ok(Self {
            store,
            pool,
            shape,
            fixed_feature,
            cardinalities,
            tables,
            relevances,
        })
    }

    fn check_feature(&self, feature: usize) -> Result<()> {
        if feature >= self.shape.n_features {
            return Err(InfoSelError::FeatureOutOfRange {
                index: feature,
                n_features: self.shape.n_features,
            });
        }
        Ok(())
    }

    /// I(X; Y) and I(X; Y | Z) for every candidate X, with Y = `target` and Z the fixed feature.
    ///
    /// Fails with an invalid-argument error if `candidates` is empty or any index
    /// (candidate or target) is not a feature of the dataset.
    pub fn get_redundancies(
        &self,
        candidates: impl IntoIterator<Item = usize>,
        target: usize,
    ) -> Result<BTreeMap<usize, Redundancy>> {
        let candidates: BTreeSet<usize> = candidates.into_iter().collect();
        if candidates.is_empty() {
            return Err(InfoSelError::EmptyCandidates);
        }
        self.check_feature(target)?;
        for &feature in &candidates {
            self.check_feature(feature)?;
        }

        let start = Instant::now();
        let redundancies = self.pool.install(|| -> Result<BTreeMap<usize, Redundancy>> {
            let histograms = self.store.conditional_histograms(
                &candidates,
                target,
                self.fixed_feature,
                &self.cardinalities,
                self.shape,
            )?;
            let marginal_y = self.tables.marginal(target)?;
            let joint_yz = self.tables.joint(target)?;
            let marginal_z = self.tables.cond_marginal();
            Ok(histograms
                .par_iter()
                .map(|(&feature, hist)| {
                    let r = redundancy(
                        hist,
                        self.shape.n_instances,
                        marginal_y,
                        joint_yz,
                        marginal_z,
                    );
                    (feature, r)
                })
                .collect())
        })?;

        debug!(
            candidates = candidates.len(),
            target,
            fixed_feature = self.fixed_feature,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "computed redundancies"
        );
        Ok(redundancies)
    }

    /// I(X; Z) for every feature X except the fixed feature Z.
    pub fn relevances(&self) -> &BTreeMap<usize, f64> {
        &self.relevances
    }

    /// Relevance of `feature`; `None` for the fixed feature itself.
    pub fn relevance(&self, feature: usize) -> Result<Option<f64>> {
        self.check_feature(feature)?;
        Ok(self.relevances.get(&feature).copied())
    }

    /// Cached p(f, z), indexed `[f][z]`.
    pub fn joint(&self, feature: usize) -> Result<ArrayView2<'_, f64>> {
        self.check_feature(feature)?;
        self.tables.joint(feature)
    }

    /// Cached p(f).
    pub fn marginal(&self, feature: usize) -> Result<ArrayView1<'_, f64>> {
        self.check_feature(feature)?;
        self.tables.marginal(feature)
    }

    pub fn cardinalities(&self) -> &CardinalityTable {
        &self.cardinalities
    }

    pub fn fixed_feature(&self) -> usize {
        self.fixed_feature
    }

    pub fn n_instances(&self) -> usize {
        self.shape.n_instances
    }

    pub fn n_features(&self) -> usize {
        self.shape.n_features
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
