//! Ideal entropy-coding cost of symbol counts
//!
//! A symbol seen `count` times out of `total` has empirical probability
//! `p = count / total` and costs `-log2(p)` bits under an optimal code.

/// Bits an optimal code spends on one occurrence of a symbol
///
/// Returns infinity for a zero `count`, which never occurs in a frequency
/// table.
pub fn ideal_code_length(count: usize, total: usize) -> f64 {
    -(count as f64 / total as f64).log2()
}

/// Bits an optimal code spends on every occurrence of every symbol
///
/// `counts` holds one occurrence count per distinct symbol.
pub fn total_bits<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
    I::IntoIter: Clone,
{
    let counts = counts.into_iter();
    let total: usize = counts.clone().sum();

    counts
        .filter(|&count| count > 0)
        .map(|count| count as f64 * ideal_code_length(count, total))
        .sum()
}

/// Shannon entropy in bits per symbol
pub fn shannon_entropy<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
    I::IntoIter: Clone,
{
    let counts = counts.into_iter();
    let total: usize = counts.clone().sum();
    if total == 0 {
        return 0.0;
    }
    total_bits(counts) / total as f64
}
