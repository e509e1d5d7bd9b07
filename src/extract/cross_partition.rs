//! Expected cross-partition percentage
//!
//! A new-order transaction touches between 5 and 15 items, each drawn
//! uniformly. If every item is remote with probability $p$, the probability
//! that a transaction with $n$ items crosses a partition is
//!
//! $$P_n(p) = 1 - (1 - p)^n$$
//!
//! and averaging over the 11 equally likely sizes gives
//!
//! $$E(p) = \frac{1}{11} \sum_{n=5}^{15} P_n(p)$$
//!
//! The sum is computed with [`fsum`] so the result is the correctly rounded
//! value of the 11 terms regardless of their order.

/// Smallest and largest number of items per transaction
const MIN_ITEMS: u32 = 5;
const MAX_ITEMS: u32 = 15;

/// Exactly rounded sum of floating point values
///
/// Keeps a list of non-overlapping partial sums (Shewchuk) and rounds them
/// once at the end, with the same half-even correction as Python's
/// `math.fsum`. Inputs are expected to be finite.
pub fn fsum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut partials: Vec<f64> = Vec::new();

    for value in values {
        let mut x = value;
        let mut i = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[i] = lo;
                i += 1;
            }
            x = hi;
        }
        partials.truncate(i);
        partials.push(x);
    }

    let Some(mut n) = partials.len().checked_sub(1) else {
        return 0.0;
    };
    let mut hi = partials[n];
    let mut lo = 0.0;
    while n > 0 {
        let x = hi;
        n -= 1;
        let y = partials[n];
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }

    // Round half-even when the remaining partials push past the halfway point
    if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
        let y = lo * 2.0;
        let x = hi + y;
        if y == x - hi {
            hi = x;
        }
    }
    hi
}

/// Probability that a transaction of `items` items crosses a partition
fn crossing_probability(items: u32, p: f64) -> f64 {
    1.0 - (1.0 - p).powf(items as f64)
}

/// Expected percentage of cross-partition transactions
///
/// `remote_item_pct` is the per-item remote percentage in `[0, 100]`; the
/// caller validates the range.
pub fn expected_cross_partition_pct(remote_item_pct: f64) -> f64 {
    let p = remote_item_pct / 100.0;
    let weight = 1.0 / (MAX_ITEMS - MIN_ITEMS + 1) as f64;
    let expected = fsum((MIN_ITEMS..=MAX_ITEMS).map(|n| weight * crossing_probability(n, p)));
    expected * 100.0
}
