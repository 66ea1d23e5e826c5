// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::estimators::approaches::discrete::cardinality::CardinalityTable;
use crate::estimators::approaches::discrete::histogram::{ConditionalHistogram, CountHistogram};
use crate::substrate::Broadcast;

/// Declared size of a dataset: instance count and feature count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetShape {
    pub n_instances: usize,
    pub n_features: usize,
}

/// A partitioned feature-column dataset that can build count histograms.
///
/// Implemented by the sparse (instance-indexed) and dense (block-indexed)
/// layouts. Both must produce identical histograms for the same logical data.
pub trait ColumnStore: Send + Sync {
    /// Short layout name used in log events.
    fn layout_name(&self) -> &'static str;

    /// Fail-fast check of the stored data against the declared shape.
    fn validate(&self, shape: DatasetShape) -> Result<()>;

    /// Highest observed code + 1 for every feature in `[0, n_features)`.
    fn cardinalities(&self, shape: DatasetShape) -> Result<CardinalityTable>;

    /// 2-D histograms `[x][cond]` of every feature against the column `cond`.
    fn histograms(
        &self,
        cond: usize,
        cards: &Broadcast<CardinalityTable>,
        shape: DatasetShape,
    ) -> Result<BTreeMap<usize, CountHistogram>>;

    /// 3-D histograms `[cond][x][target]` for every feature `x` in `features`.
    fn conditional_histograms(
        &self,
        features: &BTreeSet<usize>,
        target: usize,
        cond: usize,
        cards: &Broadcast<CardinalityTable>,
        shape: DatasetShape,
    ) -> Result<BTreeMap<usize, ConditionalHistogram>>;
}
