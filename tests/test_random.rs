use approx::assert_relative_eq;

use playground_nn::SeedRandom;

#[test]
fn shuffle_follows_the_seeded_stream() {
    let mut rng = SeedRandom::new("nn-viz");
    let mut items = vec![1, 2, 3];
    rng.shuffle(&mut items);
    assert_eq!(items, vec![2, 1, 3]);
}

#[test]
fn clones_continue_identically() {
    let mut a = SeedRandom::new("fork");
    a.uniform();
    let mut b = a.clone();
    for _ in 0..32 {
        assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
    }
    assert_eq!(b.seed(), "fork");
}

#[test]
fn non_ascii_seeds_are_accepted() {
    let mut a = SeedRandom::new("réseau ✓");
    let mut b = SeedRandom::new("reseau");
    let same = (0..16).filter(|_| a.uniform() == b.uniform()).count();
    assert!(same < 16);
}

#[test]
fn normal_draws_have_requested_moments() {
    let mut rng = SeedRandom::new("moments");
    let n = 20_000;
    let draws: Vec<f64> = (0..n).map(|_| rng.normal(3.0, 4.0)).collect();
    let mean = draws.iter().sum::<f64>() / n as f64;
    let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
    assert_relative_eq!(mean, 3.0, epsilon = 0.1);
    assert_relative_eq!(var, 4.0, epsilon = 0.2);
}

#[test]
fn uniform_mean_is_one_half() {
    let mut rng = SeedRandom::new("mean");
    let n = 20_000;
    let mean = (0..n).map(|_| rng.uniform()).sum::<f64>() / n as f64;
    assert_relative_eq!(mean, 0.5, epsilon = 0.01);
}
