// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infosel::InfoSelError;
use infosel::estimators::approaches::{DenseBlock, DenseColumns};
use infosel::estimators::{ColumnStore, DatasetShape};
use infosel::substrate::Broadcast;
use ndarray::array;

use crate::test_helpers::{generate_codes, layouts};

fn block(block: usize, codes: &[u8]) -> DenseBlock {
    DenseBlock {
        block,
        codes: codes.to_vec(),
    }
}

#[test]
fn dense_histogram_counts_positional_pairs() {
    let dense = DenseColumns::new(
        vec![
            (0, block(0, &[0, 1, 1])),
            (1, block(0, &[1, 1, 0])),
            (0, block(1, &[2, 0])),
            (1, block(1, &[1, 0])),
        ],
        2,
    );
    let shape = DatasetShape {
        n_instances: 5,
        n_features: 2,
    };
    dense.validate(shape).unwrap();
    let cards = Broadcast::new(dense.cardinalities(shape).unwrap());
    let histograms = dense.histograms(1, &cards, shape).unwrap();

    // pairs (x, y): (0,1) (1,1) (1,0) (2,1) (0,0)
    assert_eq!(histograms[&0].counts(), array![[1u64, 1], [1, 1], [0, 1]]);
    assert_eq!(histograms[&1].counts(), array![[2u64, 0], [0, 3]]);
}

#[test]
fn partitioning_does_not_change_histograms() {
    let rows = generate_codes(300, 5, 6, 0.3, 31);
    let shape = DatasetShape {
        n_instances: 300,
        n_features: 5,
    };
    let (_, one) = layouts(&rows, 1);
    let (_, many) = layouts(&rows, 9);
    let cards = Broadcast::new(one.cardinalities(shape).unwrap());
    assert_eq!(
        one.histograms(4, &cards, shape).unwrap(),
        many.histograms(4, &cards, shape).unwrap()
    );
}

#[test]
fn ragged_blocks_fail_fast() {
    let dense = DenseColumns::new(
        vec![(0, block(0, &[0, 1, 1])), (1, block(0, &[1, 1]))],
        1,
    );
    let err = dense
        .validate(DatasetShape {
            n_instances: 3,
            n_features: 2,
        })
        .unwrap_err();
    assert!(matches!(err, InfoSelError::DataShape(_)));
}

#[test]
fn missing_block_fails_fast() {
    let dense = DenseColumns::new(
        vec![
            (0, block(0, &[0, 1])),
            (1, block(0, &[1, 1])),
            (0, block(1, &[1])),
        ],
        2,
    );
    let err = dense
        .validate(DatasetShape {
            n_instances: 3,
            n_features: 2,
        })
        .unwrap_err();
    assert!(matches!(err, InfoSelError::DataShape(_)));
}

#[test]
fn declared_instance_count_must_match_blocks() {
    let rows = generate_codes(40, 2, 3, 0.0, 32);
    let (_, dense) = layouts(&rows, 2);
    let err = dense
        .validate(DatasetShape {
            n_instances: 41,
            n_features: 2,
        })
        .unwrap_err();
    assert!(matches!(err, InfoSelError::DataShape(_)));
}
