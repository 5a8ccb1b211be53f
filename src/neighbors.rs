/// Axis-aligned unit neighbors of an N-dimensional coordinate, used by the
/// downstream loop generator to address adjacent array cells.
///
/// For a coordinate of dimensionality N, `previous` holds the N coordinates
/// reached by subtracting each unit vector and `next` the N reached by adding
/// one, both in axis order.
pub fn neighbors(pt: &[i64]) -> (Vec<Vec<i64>>, Vec<Vec<i64>>) {
    let previous = (0..pt.len())
        .map(|axis| offset(pt, axis, -1))
        .collect();
    let next = (0..pt.len()).map(|axis| offset(pt, axis, 1)).collect();
    (previous, next)
}

fn offset(pt: &[i64], axis: usize, delta: i64) -> Vec<i64> {
    let mut out = pt.to_vec();
    out[axis] += delta;
    out
}

/// A coordinate with any negative component lies outside the array, so
/// boundary checks treat it as already visited.
pub fn has_negative(pt: &[i64]) -> bool {
    pt.iter().any(|&i| i < 0)
}
