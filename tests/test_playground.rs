use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use playground_nn::dataset::{ClassifyDataset, RegressDataset};
use playground_nn::train::{Feature, FeatureMask};
use playground_nn::{play_loop, PlayConfig, Playground, PlaygroundConfig, Problem, RegularizationFunction};

#[test]
fn gauss_classification_learns() {
    let config = PlaygroundConfig { dataset: ClassifyDataset::Gauss, ..Default::default() };
    let mut playground = Playground::with_weight_seed(config, 1).unwrap();
    let initial = playground.state().loss_train;

    for _ in 0..50 {
        playground.step().unwrap();
    }
    let state = playground.state();
    assert_eq!(state.iter, 50);
    assert!(state.loss_train < initial * 0.5, "train loss {} from {initial}", state.loss_train);
    assert!(state.loss_test < 0.1, "test loss {}", state.loss_test);
}

#[test]
fn plane_regression_learns() {
    let config = PlaygroundConfig {
        problem: Problem::Regression,
        reg_dataset: RegressDataset::Plane,
        network_shape: vec![3],
        learning_rate: 0.01,
        ..Default::default()
    };
    let mut playground = Playground::with_weight_seed(config, 2).unwrap();
    let initial = playground.state().loss_train;
    for _ in 0..30 {
        playground.step().unwrap();
    }
    assert!(playground.state().loss_train < initial);
    assert_eq!(playground.network().shape(), vec![2, 3, 1]);
}

#[test]
fn same_weight_seed_trains_identically() {
    let run = || {
        let mut playground = Playground::with_weight_seed(PlaygroundConfig::default(), 9).unwrap();
        (0..5).map(|_| playground.step().unwrap().train_loss).collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn history_keeps_the_latest_fifty_steps() {
    let mut playground = Playground::with_weight_seed(PlaygroundConfig::default(), 3).unwrap();
    for _ in 0..60 {
        playground.step().unwrap();
    }
    let history = playground.history();
    assert_eq!(history.len(), 50);
    assert_eq!(history.iter().next().unwrap().iter, 11);
    assert_eq!(history.latest().unwrap().iter, 60);
}

#[test]
fn extra_features_widen_the_input_layer() {
    let features = FeatureMask::none().with(Feature::XSquared).with(Feature::YSquared).with(Feature::XTimesY);
    let config = PlaygroundConfig { features, regularization: RegularizationFunction::L2, ..Default::default() };
    let mut playground = Playground::with_weight_seed(config, 4).unwrap();
    assert_eq!(playground.network().shape(), vec![3, 4, 2, 1]);
    assert!(playground.network().find_node("xSquared").is_some());
    let out = playground.predict(1.0, -1.0).unwrap();
    assert!((-1.0..=1.0).contains(&out));
}

#[test]
fn regenerate_draws_new_points() {
    let mut playground = Playground::with_weight_seed(PlaygroundConfig::default(), 6).unwrap();
    let before = playground.data().clone();
    playground.step().unwrap();
    playground.regenerate().unwrap();
    assert_ne!(playground.data(), &before);
    assert_eq!(playground.iter(), 0);
}

#[test]
fn play_loop_reports_every_step() {
    let mut playground = Playground::with_weight_seed(PlaygroundConfig::default(), 7).unwrap();
    let (tx, rx) = mpsc::channel();
    let config = PlayConfig { progress_tx: Some(tx), ..PlayConfig::new(5) };
    let last = play_loop(|| playground.step(), &config).unwrap().unwrap();
    drop(config);

    let iters: Vec<usize> = rx.iter().map(|s| s.iter).collect();
    assert_eq!(iters, vec![1, 2, 3, 4, 5]);
    assert_eq!(last.iter, 5);
}

#[test]
fn shared_playground_can_be_paused_from_another_thread() {
    let shared = Arc::new(Mutex::new(Playground::with_weight_seed(PlaygroundConfig::default(), 8).unwrap()));
    let stop = Arc::new(AtomicBool::new(false));

    let player = {
        let shared = Arc::clone(&shared);
        let config = PlayConfig {
            iterations: None,
            interval: Duration::from_millis(1),
            progress_tx: None,
            stop_flag: Some(Arc::clone(&stop)),
        };
        thread::spawn(move || play_loop(|| shared.lock().unwrap().step(), &config))
    };

    while shared.lock().unwrap().iter() < 3 {
        thread::sleep(Duration::from_millis(1));
    }
    stop.store(true, Ordering::Relaxed);
    let last = player.join().unwrap().unwrap().unwrap();
    assert_eq!(last.iter, shared.lock().unwrap().iter());
}
