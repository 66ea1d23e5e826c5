use ndarray::{Array2, ArrayView2};

use crate::error::{InfoSelError, Result};
use crate::estimators::approaches::discrete::sparse::SparseColumn;

/// Largest alphabet a feature may use: codes are 8-bit.
pub const MAX_CARDINALITY: usize = 256;

/// Global code-frequency table of a sparse column over all `n_instances`.
///
/// Instances without a stored entry hold code 0, so the zero bucket receives
/// whatever mass the stored entries do not account for.
pub fn count_frequencies(column: &SparseColumn, cardinality: usize, n_instances: usize) -> Vec<u64> {
    let mut frequencies = vec![0u64; cardinality.max(1)];
    let mut stored = 0u64;
    for &code in column.values() {
        frequencies[code as usize] += 1;
        stored += 1;
    }
    // Explicitly stored zeros are already in bucket 0.
    let stored_zeros = frequencies[0];
    frequencies[0] = (n_instances as u64).saturating_sub(stored - stored_zeros);
    frequencies
}

/// Narrow discretizer output to 8-bit codes.
///
/// A code above 255 would be silently truncated by the 256-symbol alphabet; it is
/// reported instead, naming the offending feature (column).
pub fn narrow_codes(rows: ArrayView2<'_, u32>) -> Result<Array2<u8>> {
    let mut out = Array2::zeros(rows.dim());
    for ((instance, feature), &code) in rows.indexed_iter() {
        out[[instance, feature]] =
            u8::try_from(code).map_err(|_| InfoSelError::CodeOutOfRange { feature, code })?;
    }
    Ok(out)
}
