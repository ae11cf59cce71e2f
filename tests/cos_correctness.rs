use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slidecorr::{Algo, Correlator, Image, MultiImage};

const EPS: f64 = 1e-9;

fn sqr(x: f64) -> f64 {
    x * x
}

#[test]
fn cos_corr_matches_hand_computed_values() {
    let f = Image::from_rows(&[
        [1.0, 2.0, 3.0, 4.0, 5.0],
        [2.0, 5.0, 4.0, 1.0, 3.0],
        [5.0, 4.0, 3.0, 2.0, 1.0],
    ])
    .unwrap();
    let g = Image::from_rows(&[[3.0, 1.0, 5.0], [2.0, 4.0, 1.0]]).unwrap();
    let gnorm = (sqr(3.0) + sqr(1.0) + sqr(5.0) + sqr(2.0) + sqr(4.0) + sqr(1.0)).sqrt();
    let patch = |a: [f64; 6]| -> f64 {
        let dot = 3.0 * a[0] + a[1] + 5.0 * a[2] + 2.0 * a[3] + 4.0 * a[4] + a[5];
        dot / a.iter().map(|v| v * v).sum::<f64>().sqrt() / gnorm
    };
    let cases = [
        (0, 0, patch([1.0, 2.0, 3.0, 2.0, 5.0, 4.0])),
        (1, 0, patch([2.0, 3.0, 4.0, 5.0, 4.0, 1.0])),
        (2, 0, patch([3.0, 4.0, 5.0, 4.0, 1.0, 3.0])),
        (0, 1, patch([2.0, 5.0, 4.0, 5.0, 4.0, 3.0])),
        (1, 1, patch([5.0, 4.0, 1.0, 4.0, 3.0, 2.0])),
        (2, 1, patch([4.0, 1.0, 3.0, 3.0, 2.0, 1.0])),
    ];

    for algo in [Algo::Auto, Algo::Direct, Algo::Fourier, Algo::MatMul] {
        let h = Correlator::new().with_algo(algo).cos_corr(&f, &g).unwrap();
        assert_eq!((h.width(), h.height()), (3, 2));
        for (i, j, want) in cases {
            let got = h.at(i, j);
            assert!(
                (got - want).abs() <= EPS,
                "{algo}: (i, j) = ({i}, {j}): want {want:.5}, got {got:.5}"
            );
        }
    }
}

/// Explicitly forms both vectors and takes their normalized dot product.
fn cos_corr_multi_naive(f: &MultiImage, g: &MultiImage) -> Image {
    let mut h = Image::new(f.width() - g.width() + 1, f.height() - g.height() + 1);
    for j in 0..h.height() {
        for i in 0..h.width() {
            let mut a = Vec::new();
            let mut b = Vec::new();
            for v in 0..g.height() {
                for u in 0..g.width() {
                    for k in 0..g.channels() {
                        a.push(f.at(i + u, j + v, k));
                        b.push(g.at(u, v, k));
                    }
                }
            }
            let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
            let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
            let dot: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
            h.set(i, j, dot / (na * nb));
        }
    }
    h
}

#[test]
fn cos_corr_multi_matches_naive() {
    let mut rng = StdRng::seed_from_u64(42);
    let (w, h, c) = (20, 16, 3);
    let f_data = (0..w * h * c).map(|_| rng.random_range(0.0..1.0)).collect();
    let f = MultiImage::from_vec(f_data, w, h, c).unwrap();
    let g_data = (0..4 * 3 * c).map(|_| rng.random_range(0.0..1.0)).collect();
    let g = MultiImage::from_vec(g_data, 4, 3, c).unwrap();

    let want = cos_corr_multi_naive(&f, &g);
    for algo in [Algo::Auto, Algo::Fourier, Algo::MatMul] {
        let got = Correlator::new()
            .with_algo(algo)
            .cos_corr_multi(&f, &g)
            .unwrap();
        assert_eq!(want.size(), got.size());
        for (a, b) in want.data().iter().zip(got.data()) {
            assert!((a - b).abs() <= EPS, "{algo}: want {a}, got {b}");
        }
    }
}

#[test]
fn strided_cos_corr_subsamples_unstrided() {
    let mut rng = StdRng::seed_from_u64(9);
    let data = (0..21 * 17).map(|_| rng.random_range(0.1..1.0)).collect();
    let f = Image::from_vec(data, 21, 17).unwrap();
    let g = Image::from_rows(&[[1.0, 0.5, 0.2], [0.3, 0.9, 0.4]]).unwrap();
    let full = Correlator::new().cos_corr(&f, &g).unwrap();
    let strided = Correlator::new().with_stride(3).cos_corr(&f, &g).unwrap();
    for j in 0..strided.height() {
        for i in 0..strided.width() {
            assert!((strided.at(i, j) - full.at(3 * i, 3 * j)).abs() <= EPS);
        }
    }
}
