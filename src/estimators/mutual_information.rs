// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::ArrayView2;

use crate::config::{EngineConfig, LayoutConfig};
use crate::error::Result;
use crate::estimators::approaches::discrete::dense::DenseColumns;
use crate::estimators::approaches::discrete::sparse::SparseColumns;
use crate::estimators::info_theory::InfoTheory;

/// Factory for information-theory engines over the two column layouts.
pub struct MutualInformation;

impl MutualInformation {
    /// Creates an engine over sparse, instance-indexed columns
    ///
    /// # Arguments
    ///
    /// * `data` - Sparse feature columns
    /// * `fixed_feature` - Conditioning feature (usually the label)
    /// * `n_instances` - Number of instances in the dataset
    /// * `n_features` - Number of features, including the fixed feature
    pub fn new_sparse(
        data: SparseColumns,
        fixed_feature: usize,
        n_instances: usize,
        n_features: usize,
    ) -> Result<InfoTheory<SparseColumns>> {
        InfoTheory::initialize(data, fixed_feature, n_instances, n_features)
    }

    /// Creates an engine over dense, block-indexed columns
    ///
    /// # Arguments
    ///
    /// * `data` - Dense feature blocks
    /// * `fixed_feature` - Conditioning feature (usually the label)
    /// * `n_instances` - Number of instances in the dataset
    /// * `n_features` - Number of features, including the fixed feature
    pub fn new_dense(
        data: DenseColumns,
        fixed_feature: usize,
        n_instances: usize,
        n_features: usize,
    ) -> Result<InfoTheory<DenseColumns>> {
        InfoTheory::initialize(data, fixed_feature, n_instances, n_features)
    }

    /// Sparse engine from a row-major `instances x features` code matrix.
    pub fn sparse_from_rows(
        rows: ArrayView2<'_, u8>,
        fixed_feature: usize,
        layout: &LayoutConfig,
        config: EngineConfig,
    ) -> Result<InfoTheory<SparseColumns>> {
        let (n_instances, n_features) = rows.dim();
        let data = SparseColumns::from_rows(rows, layout)?;
        InfoTheory::initialize_with_config(data, fixed_feature, n_instances, n_features, config)
    }

    /// Dense engine from a row-major `instances x features` code matrix.
    pub fn dense_from_rows(
        rows: ArrayView2<'_, u8>,
        fixed_feature: usize,
        layout: &LayoutConfig,
        config: EngineConfig,
    ) -> Result<InfoTheory<DenseColumns>> {
        let (n_instances, n_features) = rows.dim();
        let data = DenseColumns::from_rows(rows, layout)?;
        InfoTheory::initialize_with_config(data, fixed_feature, n_instances, n_features, config)
    }
}
