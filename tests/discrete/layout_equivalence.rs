// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infosel::config::EngineConfig;
use infosel::estimators::mutual_information::MutualInformation;
use infosel::estimators::{ColumnStore, DatasetShape, InfoTheory};
use infosel::substrate::Broadcast;
use rstest::rstest;

use crate::test_helpers::{assert_abs_diff_eq, generate_codes, layouts};

#[rstest]
#[case(1, 0.5)]
#[case(2, 0.9)]
#[case(3, 0.1)]
#[case(4, 0.0)]
fn sparse_and_dense_agree(#[case] seed: u64, #[case] zero_fraction: f64) {
    let (n_instances, n_features) = (257, 6);
    let fixed = n_features - 1;
    let rows = generate_codes(n_instances, n_features, 5, zero_fraction, seed);
    let (sparse, dense) = layouts(&rows, seed as usize);
    let shape = DatasetShape {
        n_instances,
        n_features,
    };

    let cards = Broadcast::new(sparse.cardinalities(shape).unwrap());
    assert_eq!(cards.as_slice(), dense.cardinalities(shape).unwrap().as_slice());
    assert_eq!(
        sparse.histograms(fixed, &cards, shape).unwrap(),
        dense.histograms(fixed, &cards, shape).unwrap()
    );

    let sparse = InfoTheory::initialize_with_config(
        sparse,
        fixed,
        n_instances,
        n_features,
        EngineConfig::default(),
    )
    .unwrap();
    let dense = MutualInformation::new_dense(dense, fixed, n_instances, n_features).unwrap();

    for (feature, relevance) in sparse.relevances() {
        assert_abs_diff_eq!(*relevance, dense.relevances()[feature], epsilon = 1e-12);
    }
    let from_sparse = sparse.get_redundancies(0..fixed, 0).unwrap();
    let from_dense = dense.get_redundancies(0..fixed, 0).unwrap();
    assert_eq!(from_sparse.len(), fixed);
    for (feature, r) in &from_sparse {
        assert_abs_diff_eq!(r.mi, from_dense[feature].mi, epsilon = 1e-12);
        assert_abs_diff_eq!(r.cmi, from_dense[feature].cmi, epsilon = 1e-12);
    }
}
