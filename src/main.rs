// Headless playground run: trains the default (or a JSON-configured) network
// and prints the losses.
//
//   cargo run -- [iterations] [config.json]
//
// The interactive driver is the `studio` binary.
use playground_nn::{play_loop, PlayConfig, Playground, PlaygroundConfig};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let iterations = args.next().and_then(|s| s.parse().ok()).unwrap_or(100);
    let config = match args.next() {
        Some(path) => match PlaygroundConfig::load_json(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => PlaygroundConfig::default(),
    };

    let mut playground = match Playground::new(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let state = playground.state();
    println!(
        "dataset {} · shape {:?} · iter 0  train {:.6}  test {:.6}",
        playground.config().dataset_name(),
        state.network.shape(),
        state.loss_train,
        state.loss_test
    );

    let report_every = (iterations / 10).max(1);
    let result = play_loop(
        || {
            let stats = playground.step()?;
            if stats.iter % report_every == 0 {
                println!(
                    "iter {:>5}  train {:.6}  test {:.6}",
                    stats.iter, stats.train_loss, stats.test_loss
                );
            }
            Ok(stats)
        },
        &PlayConfig::new(iterations),
    );

    if let Err(e) = result {
        eprintln!("training failed: {e}");
        std::process::exit(1);
    }
}
