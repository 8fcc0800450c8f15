//! conditional::reconcile — grouping and restoring period order.
//!
//! The vector solver works on a regrouped grid: conditioning periods first,
//! then free periods, each group keeping its original relative order. These
//! helpers build that grouping and undo it afterwards.
//!
//! Restoration uses the argsort of the grouped periods rather than the
//! grouping permutation itself. For strictly increasing input grids the two
//! coincide; validation guarantees that precondition before either helper
//! is reached.
use ndarray::Array1;

/// Original indices in grouped order: conditioning (`mask[i]`) first.
///
/// Examples
/// --------
/// ```rust
/// # use rust_gmm::conditional::reconcile::group_indices;
/// assert_eq!(group_indices(&[false, true, false, true]), vec![1, 3, 0, 2]);
/// ```
pub fn group_indices(mask: &[bool]) -> Vec<usize> {
    let conditioning = mask.iter().enumerate().filter(|(_, m)| **m).map(|(i, _)| i);
    let free = mask.iter().enumerate().filter(|(_, m)| !**m).map(|(i, _)| i);
    conditioning.chain(free).collect()
}

/// Gather `values` into the order given by `indices`.
pub fn gather(values: &[f64], indices: &[usize]) -> Array1<f64> {
    indices.iter().map(|&i| values[i]).collect()
}

/// Stable argsort of a grouped period grid.
///
/// `argsort_periods(grouped)[k]` is the position in `grouped` of the `k`-th
/// smallest period, i.e. of original index `k` when the input grid was
/// strictly increasing.
pub fn argsort_periods(periods_grouped: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..periods_grouped.len()).collect();
    indices.sort_by(|&a, &b| periods_grouped[a].total_cmp(&periods_grouped[b]));
    indices
}

/// Restore grouped values to ascending-period order.
///
/// Parameters
/// ----------
/// - `values_grouped`: `&Array1<f64>`
///   Values aligned with the grouped period grid.
/// - `indices`: `&[usize]`
///   Output of [`argsort_periods`] on that grid.
///
/// Returns
/// -------
/// `Array1<f64>`
///   `values_grouped[indices[k]]` for each `k`.
pub fn restore(values_grouped: &Array1<f64>, indices: &[usize]) -> Array1<f64> {
    indices.iter().map(|&i| values_grouped[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Stable grouping of conditioning and free indices.
    // - Restoration of the original order after grouping.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that grouping keeps relative order within each group.
    //
    // Given
    // -----
    // - mask = [F, T, F, F, T].
    //
    // Expect
    // ------
    // - Grouped indices [1, 4, 0, 2, 3].
    fn group_indices_is_stable_within_groups() {
        // Arrange
        let mask = [false, true, false, false, true];

        // Act
        let grouped = group_indices(&mask);

        // Assert
        assert_eq!(grouped, vec![1, 4, 0, 2, 3]);
    }

    #[test]
    // Purpose
    // -------
    // Check that gather followed by argsort-based restore is the identity
    // on a strictly increasing grid.
    //
    // Given
    // -----
    // - periods = [0.1, 0.2, 0.5, 1.0, 2.0], values tagged by index.
    // - mask = [F, F, T, F, T].
    //
    // Expect
    // ------
    // - Restored values equal the original values.
    fn restore_inverts_grouping_on_increasing_periods() {
        // Arrange
        let periods = [0.1, 0.2, 0.5, 1.0, 2.0];
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let mask = [false, false, true, false, true];
        let grouped = group_indices(&mask);
        let periods_grouped = gather(&periods, &grouped);
        let values_grouped = gather(&values, &grouped);

        // Act
        let order = argsort_periods(periods_grouped.as_slice().unwrap());
        let restored = restore(&values_grouped, &order);

        // Assert
        assert_eq!(values_grouped, array![12.0, 14.0, 10.0, 11.0, 13.0]);
        assert_eq!(restored, array![10.0, 11.0, 12.0, 13.0, 14.0]);
    }
}
