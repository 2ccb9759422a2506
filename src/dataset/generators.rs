use std::f64::consts::PI;

use crate::dataset::point::{dist, Point};
use crate::dataset::scale::LinearScale;
use crate::random::SeedRandom;

/// Signed Gaussian centres `(cx, cy, sign)` used by `regress_gaussian`.
const GAUSSIANS: [(f64, f64, f64); 6] = [
    (-4.0, 2.5, 1.0),
    (0.0, 2.5, -1.0),
    (4.0, 2.5, 1.0),
    (-4.0, -2.5, -1.0),
    (0.0, -2.5, 1.0),
    (4.0, -2.5, -1.0),
];

/// Number of iterations of a `i < num_samples / 2` loop over reals.
fn half(num_samples: usize) -> usize {
    (num_samples + 1) / 2
}

/// Two Gaussian blobs centred on (2, 2) (label +1) and (-2, -2) (label -1).
///
/// `noise` in [0, 0.5] widens the variance from 0.5 to 4; values outside
/// that domain extrapolate.
pub fn classify_two_gauss_data(rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
    let variance = LinearScale::new((0.0, 0.5), (0.5, 4.0)).apply(noise);
    let mut points = Vec::with_capacity(num_samples);

    for &(cx, cy, label) in &[(2.0, 2.0, 1.0), (-2.0, -2.0, -1.0)] {
        for _ in 0..half(num_samples) {
            let x = rng.normal(cx, variance);
            let y = rng.normal(cy, variance);
            points.push(Point::new(x, y, label));
        }
    }
    points
}

/// Regression target that grows linearly along the `x + y` diagonal.
pub fn regress_plane(rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
    let radius = 6.0;
    let label_scale = LinearScale::new((-10.0, 10.0), (-1.0, 1.0));

    (0..num_samples)
        .map(|_| {
            let x = rng.uniform_range(-radius, radius);
            let y = rng.uniform_range(-radius, radius);
            let noise_x = rng.uniform_range(-radius, radius) * noise;
            let noise_y = rng.uniform_range(-radius, radius) * noise;
            let label = label_scale.apply((x + noise_x) + (y + noise_y));
            Point::new(x, y, label)
        })
        .collect()
}

/// Regression target made of six signed bumps; each point takes the value of
/// the bump with the largest magnitude at its (noised) position.
pub fn regress_gaussian(rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
    let radius = 6.0;
    let label_scale = LinearScale::new((0.0, 2.0), (1.0, 0.0)).clamped();

    let label_at = |x: f64, y: f64| {
        let mut label = 0.0_f64;
        for &(cx, cy, sign) in &GAUSSIANS {
            let candidate = sign * label_scale.apply(dist(x, y, cx, cy));
            if candidate.abs() > label.abs() {
                label = candidate;
            }
        }
        label
    };

    (0..num_samples)
        .map(|_| {
            let x = rng.uniform_range(-radius, radius);
            let y = rng.uniform_range(-radius, radius);
            let noise_x = rng.uniform_range(-radius, radius) * noise;
            let noise_y = rng.uniform_range(-radius, radius) * noise;
            let label = label_at(x + noise_x, y + noise_y);
            Point::new(x, y, label)
        })
        .collect()
}

/// Two interleaved spiral arms, the second rotated by π.
pub fn classify_spiral_data(rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
    let n = num_samples as f64 / 2.0;
    let mut points = Vec::with_capacity(num_samples);

    for &(delta_t, label) in &[(0.0, 1.0), (PI, -1.0)] {
        for i in 0..half(num_samples) {
            let i = i as f64;
            let r = i / n * 5.0;
            let t = 1.75 * i / n * 2.0 * PI + delta_t;
            let x = r * t.sin() + rng.uniform_range(-1.0, 1.0) * noise;
            let y = r * t.cos() + rng.uniform_range(-1.0, 1.0) * noise;
            points.push(Point::new(x, y, label));
        }
    }
    points
}

/// A disc of positives (radius < 2.5) inside a ring of negatives
/// (radius in [3.5, 5)). Labels are decided after noise is applied, so noisy
/// points may land on the other side of the boundary.
pub fn classify_circle_data(rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
    let radius = 5.0;
    let circle_label = |x: f64, y: f64| if dist(x, y, 0.0, 0.0) < radius * 0.5 { 1.0 } else { -1.0 };
    let mut points = Vec::with_capacity(num_samples);

    for &(r_min, r_max) in &[(0.0, radius * 0.5), (radius * 0.7, radius)] {
        for _ in 0..half(num_samples) {
            let r = rng.uniform_range(r_min, r_max);
            let angle = rng.uniform_range(0.0, 2.0 * PI);
            let x = r * angle.sin();
            let y = r * angle.cos();
            let noise_x = rng.uniform_range(-radius, radius) * noise;
            let noise_y = rng.uniform_range(-radius, radius) * noise;
            let label = circle_label(x + noise_x, y + noise_y);
            points.push(Point::new(x, y, label));
        }
    }
    points
}

/// Four quadrants labelled by the sign of `x * y`, with a small gap along
/// both axes.
pub fn classify_xor_data(rng: &mut SeedRandom, num_samples: usize, noise: f64) -> Vec<Point> {
    let padding = 0.3;
    let pad = |v: f64| if v > 0.0 { v + padding } else { v - padding };

    (0..num_samples)
        .map(|_| {
            let x = pad(rng.uniform_range(-5.0, 5.0));
            let y = pad(rng.uniform_range(-5.0, 5.0));
            let noise_x = rng.uniform_range(-5.0, 5.0) * noise;
            let noise_y = rng.uniform_range(-5.0, 5.0) * noise;
            let label = if (x + noise_x) * (y + noise_y) >= 0.0 { 1.0 } else { -1.0 };
            Point::new(x, y, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_sample_counts_round_up_per_class() {
        let mut rng = SeedRandom::new("odd");
        assert_eq!(classify_two_gauss_data(&mut rng, 5, 0.0).len(), 6);
        assert_eq!(classify_circle_data(&mut rng, 5, 0.0).len(), 6);
        assert_eq!(classify_spiral_data(&mut rng, 5, 0.0).len(), 6);
        assert_eq!(classify_xor_data(&mut rng, 5, 0.0).len(), 5);
        assert_eq!(regress_plane(&mut rng, 5, 0.0).len(), 5);
    }

    #[test]
    fn noiseless_circle_labels_follow_radius() {
        let mut rng = SeedRandom::new("circle");
        for p in classify_circle_data(&mut rng, 200, 0.0) {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            if p.label > 0.0 {
                assert!(r < 2.5);
            } else {
                assert!((3.5 - 1e-9..=5.0 + 1e-9).contains(&r));
            }
        }
    }

    #[test]
    fn noiseless_xor_keeps_the_padding_gap() {
        let mut rng = SeedRandom::new("xor");
        for p in classify_xor_data(&mut rng, 200, 0.0) {
            assert!(p.x.abs() >= 0.3 && p.y.abs() >= 0.3);
            let expected = if p.x * p.y >= 0.0 { 1.0 } else { -1.0 };
            assert_eq!(p.label, expected);
        }
    }

    #[test]
    fn regression_labels_stay_in_unit_range_without_noise() {
        let mut rng = SeedRandom::new("reg");
        for p in regress_plane(&mut rng, 200, 0.0) {
            assert!((-1.2..=1.2).contains(&p.label));
        }
        for p in regress_gaussian(&mut rng, 200, 0.0) {
            assert!((-1.0..=1.0).contains(&p.label));
        }
    }

    #[test]
    fn spiral_arms_start_at_origin() {
        let mut rng = SeedRandom::new("spiral");
        let points = classify_spiral_data(&mut rng, 10, 0.0);
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
        assert_eq!(points[0].label, 1.0);
        assert_eq!(points[5].label, -1.0);
    }
}
