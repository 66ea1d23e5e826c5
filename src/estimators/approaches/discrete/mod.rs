// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Discrete estimators module: histogram layouts, normalization and the
// mutual-information computations over them.

pub mod cardinality;
pub mod dense;
pub mod discrete_utils;
pub mod histogram;
pub mod probability;
pub mod sparse;

use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::estimators::approaches::discrete::histogram::ConditionalHistogram;
use crate::estimators::approaches::discrete::probability::normalize;

/// Redundancy of a candidate feature X with a target Y given the fixed feature Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Redundancy {
    /// I(X; Y) in bits.
    pub mi: f64,
    /// I(X; Y | Z) in bits.
    pub cmi: f64,
}

/// Mutual information I(X; Y) in bits from the joint `p(x, y)` and the marginal `p(y)`.
///
/// `p(x)` is the row sum of `joint`. Terms where `p(x, y)`, `p(x)` or `p(y)` is
/// exactly zero contribute nothing.
pub fn mutual_information(joint: ArrayView2<'_, f64>, marginal_y: ArrayView1<'_, f64>) -> f64 {
    let marginal_x = joint.sum_axis(Axis(1));
    let mut mi = 0.0_f64;
    for ((x, y), &pxy) in joint.indexed_iter() {
        let px = marginal_x[x];
        let py = marginal_y[y];
        if pxy != 0.0 && px != 0.0 && py != 0.0 {
            mi += pxy * (pxy / (px * py)).log2();
        }
    }
    mi
}

/// I(X; Y) and I(X; Y | Z) in bits from one `[z][x][y]` count tensor.
///
/// * `marginal_y` - cached `p(y)` of the target
/// * `joint_yz` - cached `p(y, z)` of the target against the fixed feature, `[y][z]`
/// * `marginal_z` - cached `p(z)`
///
/// Terms with any zero factor are skipped, as in [`mutual_information`].
pub fn redundancy(
    hist: &ConditionalHistogram,
    n_instances: usize,
    marginal_y: ArrayView1<'_, f64>,
    joint_yz: ArrayView2<'_, f64>,
    marginal_z: ArrayView1<'_, f64>,
) -> Redundancy {
    let (z_card, _, _) = hist.dim();
    let mut mi = 0.0_f64;
    let mut cmi = 0.0_f64;

    for z in 0..z_card {
        if z == 0 {
            // p(x, y) with z summed out; computed once.
            let pxy = normalize(hist.marginalize_condition().counts(), n_instances);
            mi = mutual_information(pxy.view(), marginal_y);
        }

        let pz = marginal_z[z];
        if pz == 0.0 {
            continue;
        }
        let pxyz = normalize(hist.plane(z), n_instances);
        let pxz = pxyz.sum_axis(Axis(1));
        for ((x, y), &p) in pxyz.indexed_iter() {
            let pyz = joint_yz[[y, z]];
            if p == 0.0 || pxz[x] == 0.0 || pyz == 0.0 {
                continue;
            }
            let pxy_given_z = p / pz;
            let px_given_z = pxz[x] / pz;
            let py_given_z = pyz / pz;
            cmi += pz * pxy_given_z * (pxy_given_z / (px_given_z * py_given_z)).log2();
        }
    }

    Redundancy { mi, cmi }
}
