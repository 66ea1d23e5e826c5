// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Block-indexed dense layout.
//!
//! Instances are cut into blocks; every feature carries one code array per
//! block, positionally aligned with the arrays of the other features for the
//! same block. Histograms are accumulated per partition and merged by feature.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use ndarray::{ArrayView2, s};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{InfoSelError, Result};
use crate::estimators::approaches::discrete::cardinality::{CardinalityTable, cardinality_of};
use crate::estimators::approaches::discrete::histogram::{ConditionalHistogram, CountHistogram};
use crate::estimators::traits::{ColumnStore, DatasetShape};
use crate::substrate::{Broadcast, Partitioned};

/// Codes of one feature for the instances of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseBlock {
    pub block: usize,
    pub codes: Vec<u8>,
}

/// Dense feature blocks, keyed by feature.
#[derive(Debug, Clone)]
pub struct DenseColumns {
    data: Partitioned<(usize, DenseBlock)>,
}

impl DenseColumns {
    pub fn new(records: Vec<(usize, DenseBlock)>, n_partitions: usize) -> Self {
        Self {
            data: Partitioned::from_items(records, n_partitions),
        }
    }

    pub fn from_partitioned(data: Partitioned<(usize, DenseBlock)>) -> Self {
        Self { data }
    }

    /// Cut a row-major `instances x features` code matrix into `block_size` blocks.
    pub fn from_rows(rows: ArrayView2<'_, u8>, layout: &LayoutConfig) -> Result<Self> {
        layout.validate()?;
        let (n_rows, n_cols) = rows.dim();
        let mut records = Vec::with_capacity(n_rows.div_ceil(layout.block_size) * n_cols);
        for (block, start) in (0..n_rows).step_by(layout.block_size).enumerate() {
            let end = (start + layout.block_size).min(n_rows);
            for feature in 0..n_cols {
                let codes = rows.slice(s![start..end, feature]).to_vec();
                records.push((feature, DenseBlock { block, codes }));
            }
        }
        Ok(Self::new(records, layout.n_partitions))
    }

    pub fn data(&self) -> &Partitioned<(usize, DenseBlock)> {
        &self.data
    }

    /// Code arrays of `feature` keyed by block id.
    pub fn blocks(&self, feature: usize) -> HashMap<usize, Vec<u8>> {
        self.data
            .filter(|(f, _)| *f == feature)
            .collect()
            .into_iter()
            .map(|(_, block)| (block.block, block.codes))
            .collect()
    }
}

/// The codes of the broadcast column aligned with `block`.
fn aligned<'a>(
    blocks: &'a HashMap<usize, Vec<u8>>,
    block: &DenseBlock,
    feature: usize,
    role: &str,
) -> Result<&'a [u8]> {
    let codes = blocks.get(&block.block).ok_or_else(|| {
        InfoSelError::DataShape(format!(
            "block {} of feature {feature} has no matching {role} block",
            block.block
        ))
    })?;
    if codes.len() != block.codes.len() {
        return Err(InfoSelError::DataShape(format!(
            "block {}: feature {feature} has {} codes but the {role} column has {}",
            block.block,
            block.codes.len(),
            codes.len()
        )));
    }
    Ok(codes)
}

impl ColumnStore for DenseColumns {
    fn layout_name(&self) -> &'static str {
        "dense"
    }

    fn validate(&self, shape: DatasetShape) -> Result<()> {
        let layout = self
            .data
            .map_partitions(|part| {
                part.iter()
                    .map(|(feature, block)| (*feature, block.block, block.codes.len()))
                    .collect()
            })
            .collect();

        let mut block_lens: BTreeMap<usize, usize> = BTreeMap::new();
        let mut blocks_per_feature: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for (feature, block, len) in layout {
            if feature >= shape.n_features {
                return Err(InfoSelError::DataShape(format!(
                    "block for feature {feature} but only {} features declared",
                    shape.n_features
                )));
            }
            if !blocks_per_feature.entry(feature).or_default().insert(block) {
                return Err(InfoSelError::DataShape(format!(
                    "feature {feature} has block {block} more than once"
                )));
            }
            match block_lens.entry(block) {
                Entry::Vacant(e) => {
                    e.insert(len);
                }
                Entry::Occupied(e) if *e.get() != len => {
                    return Err(InfoSelError::DataShape(format!(
                        "block {block} has {} codes in one feature but {len} in feature {feature}",
                        e.get()
                    )));
                }
                Entry::Occupied(_) => {}
            }
        }

        let total: usize = block_lens.values().sum();
        if total != shape.n_instances {
            return Err(InfoSelError::DataShape(format!(
                "blocks hold {total} instances but {} declared",
                shape.n_instances
            )));
        }
        for feature in 0..shape.n_features {
            let present = blocks_per_feature.get(&feature).map_or(0, BTreeSet::len);
            if present != block_lens.len() {
                return Err(InfoSelError::DataShape(format!(
                    "feature {feature} has {present} of {} blocks",
                    block_lens.len()
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
                    .map(|(feature, block)| (*feature, cardinality_of(&block.codes)))
                    .collect()
            })
            .reduce_by_key(usize::max);
        CardinalityTable::from_reduced(reduced, shape.n_features)
    }

    fn histograms(
        &self,
        cond: usize,
        cards: &Broadcast<CardinalityTable>,
        _shape: DatasetShape,
    ) -> Result<BTreeMap<usize, CountHistogram>> {
        let start = Instant::now();
        let cond_card = cards.get(cond)?;
        let cond_blocks = Broadcast::new(self.blocks(cond));

        let local = self.data.try_map_partitions(|part| {
            let mut acc: BTreeMap<usize, CountHistogram> = BTreeMap::new();
            for (feature, block) in part {
                let ys = aligned(&cond_blocks, block, *feature, "conditioning")?;
                let hist = match acc.entry(*feature) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => e.insert(CountHistogram::zeros(cards.get(*feature)?, cond_card)),
                };
                for (&x, &y) in block.codes.iter().zip(ys) {
                    hist.increment(x, y);
                }
            }
            Ok::<_, InfoSelError>(acc.into_iter().collect())
        })?;
        let histograms = local.reduce_by_key(CountHistogram::merge);

        debug!(
            layout = "dense",
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
        _shape: DatasetShape,
    ) -> Result<BTreeMap<usize, ConditionalHistogram>> {
        let start = Instant::now();
        let selected = Broadcast::new(features.clone());
        let target_card = cards.get(target)?;
        let cond_card = cards.get(cond)?;
        let target_blocks = Broadcast::new(self.blocks(target));
        let cond_blocks = Broadcast::new(self.blocks(cond));

        let local = self.data.try_map_partitions(|part| {
            let mut acc: BTreeMap<usize, ConditionalHistogram> = BTreeMap::new();
            for (feature, block) in part.iter().filter(|(f, _)| selected.contains(f)) {
                let ys = aligned(&target_blocks, block, *feature, "target")?;
                let zs = aligned(&cond_blocks, block, *feature, "conditioning")?;
                let hist = match acc.entry(*feature) {
                    Entry::Occupied(e) => e.into_mut(),
                    Entry::Vacant(e) => e.insert(ConditionalHistogram::zeros(
                        cond_card,
                        cards.get(*feature)?,
                        target_card,
                    )),
                };
                for ((&x, &y), &z) in block.codes.iter().zip(ys).zip(zs) {
                    hist.increment(z, x, y);
                }
            }
            Ok::<_, InfoSelError>(acc.into_iter().collect())
        })?;
        let histograms = local.reduce_by_key(ConditionalHistogram::merge);

        debug!(
            layout = "dense",
            target,
            cond,
            features = histograms.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built conditional histograms"
        );
        Ok(histograms)
    }
}
