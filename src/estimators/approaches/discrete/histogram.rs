// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, Array3, ArrayView2, Axis};

/// Co-occurrence counts of a feature `x` with a conditioning column `y`, indexed `[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountHistogram {
    counts: Array2<u64>,
}

impl CountHistogram {
    pub fn zeros(x_card: usize, y_card: usize) -> Self {
        Self {
            counts: Array2::zeros((x_card, y_card)),
        }
    }

    pub fn from_counts(counts: Array2<u64>) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn increment(&mut self, x: u8, y: u8) {
        self.counts[[x as usize, y as usize]] += 1;
    }

    #[inline]
    pub fn add(&mut self, x: u8, y: u8, count: u64) {
        self.counts[[x as usize, y as usize]] += count;
    }

    /// Elementwise sum, used as the keyed-reduction op.
    pub fn merge(mut self, other: Self) -> Self {
        self.counts += &other.counts;
        self
    }

    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    pub fn counts(&self) -> ArrayView2<'_, u64> {
        self.counts.view()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.counts.dim()
    }
}

/// Co-occurrence counts of `x` and `y` per code of a conditioning feature `z`,
/// indexed `[z][x][y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalHistogram {
    counts: Array3<u64>,
}

impl ConditionalHistogram {
    pub fn zeros(z_card: usize, x_card: usize, y_card: usize) -> Self {
        Self {
            counts: Array3::zeros((z_card, x_card, y_card)),
        }
    }

    #[inline]
    pub fn increment(&mut self, z: u8, x: u8, y: u8) {
        self.counts[[z as usize, x as usize, y as usize]] += 1;
    }

    #[inline]
    pub fn add(&mut self, z: u8, x: u8, y: u8, count: u64) {
        self.counts[[z as usize, x as usize, y as usize]] += count;
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.counts += &other.counts;
        self
    }

    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    /// The `[x][y]` slice for conditioning code `z`.
    pub fn plane(&self, z: usize) -> ArrayView2<'_, u64> {
        self.counts.index_axis(Axis(0), z)
    }

    /// Counts of `[x][y]` with the conditioning dimension summed out.
    pub fn marginalize_condition(&self) -> CountHistogram {
        CountHistogram::from_counts(self.counts.sum_axis(Axis(0)))
    }

    pub fn dim(&self) -> (usize, usize, usize) {
        self.counts.dim()
    }
}
