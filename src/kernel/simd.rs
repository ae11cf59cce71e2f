//! SIMD dot products for the direct kernel using the `wide` crate.
//!
//! The direct kernel reduces every placement to dot products of contiguous
//! rows; this module vectorizes them four `f64` lanes at a time.

use wide::f64x4;

const LANES: usize = 4;

#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

/// Horizontal sum of f64x4.
#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    (arr[0] + arr[1]) + (arr[2] + arr[3])
}

/// Dot product of two equally long slices.
#[inline]
pub(crate) fn dot_f64x4(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let chunks = a.len() / LANES;
    let mut acc = f64x4::splat(0.0);
    for c in 0..chunks {
        let i = c * LANES;
        acc = acc + load_f64x4(&a[i..]) * load_f64x4(&b[i..]);
    }
    let mut total = hsum(acc);
    for i in chunks * LANES..a.len() {
        total += a[i] * b[i];
    }
    total
}

#[cfg(test)]
mod tests {
    use super::dot_f64x4;

    #[test]
    fn dot_handles_tails() {
        for len in 0..11 {
            let a: Vec<f64> = (0..len).map(|i| i as f64 + 1.0).collect();
            let b: Vec<f64> = (0..len).map(|i| 2.0 - i as f64).collect();
            let want: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
            assert!((dot_f64x4(&a, &b) - want).abs() < 1e-9);
        }
    }
}
