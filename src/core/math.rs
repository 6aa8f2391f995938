// Math utilities and helper functions

/// Running totals of `values`: `out[i] = values[0] + ... + values[i]`
pub fn prefix_sums(values: &[f32]) -> Vec<f32> {
    values
        .iter()
        .scan(0.0, |total, value| {
            *total += *value;
            Some(*total)
        })
        .collect()
}

/// Index of the first element in a sorted slice that is `>= value`.
///
/// Returns `sorted.len()` when every element is smaller.
pub fn lower_bound(sorted: &[f32], value: f32) -> usize {
    sorted.partition_point(|&x| x < value)
}
