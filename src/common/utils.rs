//! This file provides some common functions on dense vectors.


/// Returns the squared euclidean norm of the given slice.
#[inline(always)]
pub fn squared_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>()
}


/// Returns `ln(sum(exp(x)))` computed without overflow.
/// Returns `-inf` for an empty slice.
#[inline(always)]
pub fn log_sum_exp(xs: &[f64]) -> f64 {
    let max = xs.iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    if !max.is_finite() {
        return max;
    }

    let sum = xs.iter()
        .map(|x| (x - max).exp())
        .sum::<f64>();
    max + sum.ln()
}


/// Derives the seed of `label` from the run-wide `seed`,
/// so each label owns its random stream
/// regardless of the thread it runs on.
#[inline(always)]
pub fn label_seed(seed: u64, label: usize) -> u64 {
    const STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;
    seed.wrapping_add((label as u64 + 1).wrapping_mul(STRIDE))
}
