// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use infosel::InfoSelError;
use infosel::estimators::approaches::{CardinalityTable, SparseColumn, SparseColumns};
use infosel::estimators::{ColumnStore, DatasetShape};

use crate::test_helpers::{array, layouts};

#[test]
fn cardinality_is_max_code_plus_one() {
    let rows = array![[0u8, 3, 0], [2, 0, 0], [1, 1, 0], [0, 0, 0]];
    let shape = DatasetShape {
        n_instances: 4,
        n_features: 3,
    };
    let (sparse, dense) = layouts(&rows, 2);

    let sparse_cards = sparse.cardinalities(shape).unwrap();
    let dense_cards = dense.cardinalities(shape).unwrap();
    assert_eq!(sparse_cards.as_slice(), &[3, 4, 1]);
    assert_eq!(sparse_cards, dense_cards);
}

#[test]
fn feature_without_column_has_cardinality_one() {
    let column: SparseColumn = [(0u64, 5u8), (2, 1)].into_iter().collect();
    let sparse = SparseColumns::new(vec![(1, column)], 3);
    let cards = sparse
        .cardinalities(DatasetShape {
            n_instances: 3,
            n_features: 3,
        })
        .unwrap();
    assert_eq!(cards.as_slice(), &[1, 6, 1]);
}

#[test]
fn full_alphabet_fits() {
    let rows = array![[255u8], [0], [17]];
    let (sparse, dense) = layouts(&rows, 1);
    let shape = DatasetShape {
        n_instances: 3,
        n_features: 1,
    };
    assert_eq!(sparse.cardinalities(shape).unwrap().get(0).unwrap(), 256);
    assert_eq!(dense.cardinalities(shape).unwrap().get(0).unwrap(), 256);
}

#[test]
fn lookup_outside_table_is_rejected() {
    let cards = CardinalityTable::from_reduced(BTreeMap::from([(0, 2)]), 2).unwrap();
    assert_eq!(cards.get(1).unwrap(), 1);
    let err = cards.get(2).unwrap_err();
    assert!(matches!(
        err,
        InfoSelError::FeatureOutOfRange {
            index: 2,
            n_features: 2
        }
    ));
    assert!(err.is_invalid_argument());
}
