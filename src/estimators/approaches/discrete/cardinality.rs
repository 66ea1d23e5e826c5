// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use crate::error::{InfoSelError, Result};
use crate::estimators::approaches::discrete::discrete_utils::MAX_CARDINALITY;

/// Number of distinct codes (highest observed code + 1) per feature.
///
/// Every feature in `[0, n_features)` has an entry; a feature whose codes are
/// all zero, or that has no stored entries at all, has cardinality 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityTable {
    cardinalities: Vec<usize>,
}

impl CardinalityTable {
    /// Build from the reduced per-feature maxima (already `max + 1`).
    pub fn from_reduced(reduced: BTreeMap<usize, usize>, n_features: usize) -> Result<Self> {
        let mut cardinalities = vec![1usize; n_features];
        for (feature, card) in reduced {
            let slot = cardinalities
                .get_mut(feature)
                .ok_or(InfoSelError::FeatureOutOfRange {
                    index: feature,
                    n_features,
                })?;
            *slot = card.clamp(1, MAX_CARDINALITY);
        }
        Ok(Self { cardinalities })
    }

    pub fn get(&self, feature: usize) -> Result<usize> {
        self.cardinalities
            .get(feature)
            .copied()
            .ok_or(InfoSelError::FeatureOutOfRange {
                index: feature,
                n_features: self.cardinalities.len(),
            })
    }

    pub fn n_features(&self) -> usize {
        self.cardinalities.len()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.cardinalities
    }
}

/// Cardinality of a block of codes: `max + 1`, or 1 when empty.
#[inline]
pub fn cardinality_of<'a>(codes: impl IntoIterator<Item = &'a u8>) -> usize {
    codes.into_iter().copied().max().map_or(1, |max| max as usize + 1)
}
