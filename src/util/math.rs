//! Integer and cost helpers shared by the sizing code and the selector.

/// Ceiling division for non-negative integers.
#[inline]
pub(crate) fn ceil_div(a: usize, b: usize) -> usize {
    debug_assert!(b > 0);
    a.div_ceil(b)
}

/// Returns `n * log2(n)` as a float, or zero for `n <= 1`.
pub(crate) fn n_log2_n(n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f64;
    n * n.log2()
}

/// Returns true if `n` has no prime factors other than 2, 3, 5 and 7.
fn is_smooth(mut n: usize) -> bool {
    if n == 0 {
        return false;
    }
    for p in [2, 3, 5, 7] {
        while n % p == 0 {
            n /= p;
        }
    }
    n == 1
}

/// Smallest length `>= n` that factors into 2, 3, 5 and 7 only.
///
/// Such lengths hit the fast mixed-radix paths of `rustfft`.
pub(crate) fn fast_fft_len(n: usize) -> usize {
    let mut m = n.max(1);
    while !is_smooth(m) {
        m += 1;
    }
    m
}
