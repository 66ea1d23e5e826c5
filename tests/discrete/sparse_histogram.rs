// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infosel::InfoSelError;
use infosel::estimators::approaches::discrete::sparse::sparse_histogram;
use infosel::estimators::approaches::{SparseColumn, SparseColumns};
use infosel::estimators::{ColumnStore, DatasetShape};
use infosel::substrate::Broadcast;
use ndarray::array;
use rstest::rstest;

use crate::test_helpers::{column, generate_codes, layouts};

#[test]
fn implicit_zeros_are_flushed_into_row_zero() {
    // n = 5; x stored for instances 1 and 3, the conditioning column for 1 and 2.
    let x: SparseColumn = [(1u64, 2u8), (3, 1)].into_iter().collect();
    let cond: SparseColumn = [(1u64, 1u8), (2, 1)].into_iter().collect();
    // cond codes over all five instances: 0, 1, 1, 0, 0
    let cond_freq = [3u64, 2];

    let hist = sparse_histogram(&x, 3, &cond, &cond_freq).unwrap();
    assert_eq!(hist.counts(), array![[2u64, 1], [1, 0], [0, 1]]);
    assert_eq!(hist.total(), 5);
}

#[rstest]
#[case(50, 4, 3, 0.8, 11)]
#[case(200, 6, 5, 0.5, 12)]
#[case(97, 3, 2, 0.95, 13)]
fn histograms_conserve_instance_count(
    #[case] n_instances: usize,
    #[case] n_features: usize,
    #[case] alphabet: u8,
    #[case] zero_fraction: f64,
    #[case] seed: u64,
) {
    let rows = generate_codes(n_instances, n_features, alphabet, zero_fraction, seed);
    let (sparse, _) = layouts(&rows, 3);
    let shape = DatasetShape {
        n_instances,
        n_features,
    };
    let cards = Broadcast::new(sparse.cardinalities(shape).unwrap());

    for cond in 0..n_features {
        let histograms = sparse.histograms(cond, &cards, shape).unwrap();
        assert_eq!(histograms.len(), n_features);
        for (feature, hist) in &histograms {
            assert_eq!(hist.total(), n_instances as u64, "feature {feature} vs {cond}");
        }
    }
}

#[test]
fn histogram_matches_row_counts() {
    let rows = generate_codes(120, 3, 4, 0.6, 21);
    let (sparse, _) = layouts(&rows, 2);
    let shape = DatasetShape {
        n_instances: 120,
        n_features: 3,
    };
    let cards = Broadcast::new(sparse.cardinalities(shape).unwrap());
    let histograms = sparse.histograms(2, &cards, shape).unwrap();

    let xs = column(&rows, 0);
    let ys = column(&rows, 2);
    let hist = &histograms[&0];
    let (x_card, y_card) = hist.dim();
    for x in 0..x_card {
        for y in 0..y_card {
            let expected = xs
                .iter()
                .zip(&ys)
                .filter(|&(&a, &b)| a as usize == x && b as usize == y)
                .count() as u64;
            assert_eq!(hist.counts()[[x, y]], expected);
        }
    }
}

#[test]
fn missing_feature_column_is_all_zero() {
    let label: SparseColumn = [(0u64, 1u8), (3, 1)].into_iter().collect();
    let sparse = SparseColumns::new(vec![(1, label)], 2);
    let shape = DatasetShape {
        n_instances: 4,
        n_features: 2,
    };
    let cards = Broadcast::new(sparse.cardinalities(shape).unwrap());
    let histograms = sparse.histograms(1, &cards, shape).unwrap();
    assert_eq!(histograms[&0].counts(), array![[2u64, 2]]);
}

#[test]
fn instance_beyond_declared_count_fails_fast() {
    let col: SparseColumn = [(0u64, 1u8), (9, 2)].into_iter().collect();
    let sparse = SparseColumns::new(vec![(0, col)], 1);
    let err = sparse
        .validate(DatasetShape {
            n_instances: 5,
            n_features: 1,
        })
        .unwrap_err();
    assert!(matches!(err, InfoSelError::DataShape(_)));
}

#[test]
fn duplicate_feature_column_fails_fast() {
    let col: SparseColumn = [(0u64, 1u8)].into_iter().collect();
    let sparse = SparseColumns::new(vec![(0, col.clone()), (0, col)], 2);
    let err = sparse
        .validate(DatasetShape {
            n_instances: 2,
            n_features: 1,
        })
        .unwrap_err();
    assert!(matches!(err, InfoSelError::DataShape(_)));
}
