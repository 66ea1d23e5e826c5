// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Instance-indexed sparse layout.
//!
//! Each feature is a map from instance id to code; instances without an entry
//! hold code 0. Histograms are built without materialising those implicit
//! zeros: a copy of the conditioning column's global frequency table is
//! decremented for every visited instance, and whatever mass remains is
//! flushed into the zero-code row (or plane) at the end.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use ndarray::ArrayView2;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{InfoSelError, Result};
use crate::estimators::approaches::discrete::cardinality::{CardinalityTable, cardinality_of};
use crate::estimators::approaches::discrete::discrete_utils::count_frequencies;
use crate::estimators::approaches::discrete::histogram::{ConditionalHistogram, CountHistogram};
use crate::estimators::traits::{ColumnStore, DatasetShape};
use crate::substrate::{Broadcast, Partitioned};

/// Codes of one feature keyed by instance id. Absent instances hold code 0.
pub type SparseColumn = HashMap<u64, u8>;

/// Sparse feature columns, partitioned by feature.
#[derive(Debug, Clone)]
pub struct SparseColumns {
    data: Partitioned<(usize, SparseColumn)>,
}

impl SparseColumns {
    pub fn new(columns: Vec<(usize, SparseColumn)>, n_partitions: usize) -> Self {
        Self {
            data: Partitioned::from_items(columns, n_partitions),
        }
    }

    pub fn from_partitioned(data: Partitioned<(usize, SparseColumn)>) -> Self {
        Self { data }
    }

    /// Transpose a row-major `instances x features` code matrix, keeping non-zero codes only.
    pub fn from_rows(rows: ArrayView2<'_, u8>, layout: &LayoutConfig) -> Result<Self> {
        layout.validate()?;
        let mut columns: Vec<SparseColumn> = vec![SparseColumn::new(); rows.ncols()];
        for ((instance, feature), &code) in rows.indexed_iter() {
            if code != 0 {
                columns[feature].insert(instance as u64, code);
            }
        }
        Ok(Self::new(
            columns.into_iter().enumerate().collect(),
            layout.n_partitions,
        ))
    }

    pub fn data(&self) -> &Partitioned<(usize, SparseColumn)> {
        &self.data
    }

    /// The column of `feature`, empty when the feature has no stored entries.
    pub fn column(&self, feature: usize) -> SparseColumn {
        self.data
            .filter(|(f, _)| *f == feature)
            .collect()
            .into_iter()
            .next()
            .map(|(_, column)| column)
            .unwrap_or_default()
    }
}

impl ColumnStore for SparseColumns {
    fn layout_name(&self) -> &'static str {
        "sparse"
    }

    fn validate(&self, shape: DatasetShape) -> Result<()> {
        let n = shape.n_instances as u64;
        let features = self.data.try_map_partitions(|part| {
            part.iter()
                .map(|(feature, column)| {
                    if *feature >= shape.n_features {
                        return Err(InfoSelError::DataShape(format!(
                            "column for feature {feature} but only {} features declared",
                            shape.n_features
                        )));
                    }
                    if let Some(instance) = column.keys().find(|&&id| id >= n) {
                        return Err(InfoSelError::DataShape(format!(
                            "feature {feature} has instance id {instance} but only {n} instances declared"
                        )));
                    }
                    Ok(*feature)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut seen = BTreeSet::new();
        for feature in features.collect() {
            if !seen.insert(feature) {
                return Err(InfoSelError::DataShape(format!(
                    "feature {feature} has more than one column"
                )));
            }
        }
        Ok(())
    }

    fn cardinalities(&self, shape: DatasetShape) -> Result<CardinalityTable> {
        let reduced = self
            .data
            .map_partitions(|part| {
                part.iter()
                    .map(|(feature, column)| (*feature, cardinality_of(column.values())))
                    .collect()
            })
            .reduce_by_key(usize::max);
        CardinalityTable::from_reduced(reduced, shape.n_features)
    }

    fn histograms(
        &self,
        cond: usize,
        cards: &Broadcast<CardinalityTable>,
        shape: DatasetShape,
    ) -> Result<BTreeMap<usize, CountHistogram>> {
        let start = Instant::now();
        let cond_column = Broadcast::new(self.column(cond));
        let cond_freq = Broadcast::new(count_frequencies(
            &cond_column,
            cards.get(cond)?,
            shape.n_instances,
        ));

        let local = self.data.try_map_partitions(|part| {
            part.iter()
                .map(|(feature, column)| {
                    let hist =
                        sparse_histogram(column, cards.get(*feature)?, &cond_column, &cond_freq)?;
                    Ok((*feature, hist))
                })
                .collect::<Result<Vec<_>>>()
        })?;
        let mut histograms = local.reduce_by_key(CountHistogram::merge);

        // Features with no stored column hold code 0 everywhere.
        let empty = SparseColumn::new();
        for feature in 0..shape.n_features {
            if !histograms.contains_key(&feature) {
                let hist = sparse_histogram(&empty, cards.get(feature)?, &cond_column, &cond_freq)?;
                histograms.insert(feature, hist);
            }
        }

        debug!(
            layout = "sparse",
            cond,
            features = histograms.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built histograms"
        );
        Ok(histograms)
    }

    fn conditional_histograms(
        &self,
        features: &BTreeSet<usize>,
        target: usize,
        cond: usize,
        cards: &Broadcast<CardinalityTable>,
        shape: DatasetShape,
    ) -> Result<BTreeMap<usize, ConditionalHistogram>> {
        let start = Instant::now();
        let selected = Broadcast::new(features.clone());
        let target_card = cards.get(target)?;
        let target_column = Broadcast::new(self.column(target));
        let cond_column = Broadcast::new(self.column(cond));
        let cond_freq = Broadcast::new(count_frequencies(
            &cond_column,
            cards.get(cond)?,
            shape.n_instances,
        ));
        let columns = ConditioningColumns {
            target: target_column.value(),
            target_card,
            cond: cond_column.value(),
            cond_freq: cond_freq.value(),
        };

        let local = self.data.try_map_partitions(|part| {
            part.iter()
                .filter(|(feature, _)| selected.contains(feature))
                .map(|(feature, column)| {
                    let hist =
                        sparse_conditional_histogram(column, cards.get(*feature)?, &columns)?;
                    Ok((*feature, hist))
                })
                .collect::<Result<Vec<_>>>()
        })?;
        let mut histograms = local.reduce_by_key(ConditionalHistogram::merge);

        let empty = SparseColumn::new();
        for &feature in selected.iter() {
            if !histograms.contains_key(&feature) {
                let hist = sparse_conditional_histogram(&empty, cards.get(feature)?, &columns)?;
                histograms.insert(feature, hist);
            }
        }

        debug!(
            layout = "sparse",
            target,
            cond,
            features = histograms.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built conditional histograms"
        );
        Ok(histograms)
    }
}

/// Read-only columns shared by every worker of a conditional pass.
struct ConditioningColumns<'a> {
    target: &'a SparseColumn,
    target_card: usize,
    cond: &'a SparseColumn,
    cond_freq: &'a [u64],
}

#[inline]
fn take_one(remaining: &mut [u64], code: u8) -> Result<()> {
    let slot = &mut remaining[code as usize];
    *slot = slot.checked_sub(1).ok_or_else(|| {
        InfoSelError::DataShape(format!(
            "more instances with code {code} than the conditioning column holds"
        ))
    })?;
    Ok(())
}

/// 2-D histogram `[x][y]` of one sparse column against a broadcast conditioning column.
pub fn sparse_histogram(
    column: &SparseColumn,
    x_card: usize,
    cond_column: &SparseColumn,
    cond_freq: &[u64],
) -> Result<CountHistogram> {
    let mut hist = CountHistogram::zeros(x_card, cond_freq.len());
    let mut remaining = cond_freq.to_vec();
    for (instance, &x) in column {
        let y = cond_column.get(instance).copied().unwrap_or(0);
        take_one(&mut remaining, y)?;
        hist.increment(x, y);
    }
    // Instances never stored in `column` have x = 0.
    for (y, &count) in remaining.iter().enumerate() {
        if count > 0 {
            hist.add(0, y as u8, count);
        }
    }
    Ok(hist)
}

fn sparse_conditional_histogram(
    column: &SparseColumn,
    x_card: usize,
    columns: &ConditioningColumns<'_>,
) -> Result<ConditionalHistogram> {
    let mut hist = ConditionalHistogram::zeros(columns.cond_freq.len(), x_card, columns.target_card);
    let mut remaining = columns.cond_freq.to_vec();

    for (instance, &x) in column {
        let y = columns.target.get(instance).copied().unwrap_or(0);
        let z = columns.cond.get(instance).copied().unwrap_or(0);
        take_one(&mut remaining, z)?;
        hist.increment(z, x, y);
    }

    // Stored in the target column but not in `column`: x = 0.
    for (instance, &y) in columns.target {
        if column.contains_key(instance) {
            continue;
        }
        let z = columns.cond.get(instance).copied().unwrap_or(0);
        take_one(&mut remaining, z)?;
        hist.increment(z, 0, y);
    }

    // Everything left has x = 0 and y = 0.
    for (z, &count) in remaining.iter().enumerate() {
        if count > 0 {
            hist.add(z as u8, 0, 0, count);
        }
    }
    Ok(hist)
}
