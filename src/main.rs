//! Ocean Run entry point
//!
//! Native builds run a headless attract-mode session with the autopilot and
//! log each run. The browser build is driven from `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ocean_run::sim::{RunController, RunEvent, TickInput};
    use ocean_run::MemoryHighScores;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x0CEA_4);
    let ticks: u64 = 60 * 60 * 5;

    log::info!("Ocean Run (native) attract mode, seed {}", seed);

    let store = MemoryHighScores::new();
    let mut run = RunController::new(seed).with_store(Box::new(store));
    let demo = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut runs = 0;
    let mut coins = 0;
    for _ in 0..ticks {
        let snap = run.tick(&demo);
        for event in &snap.events {
            match event {
                RunEvent::RunStarted => runs += 1,
                RunEvent::CoinCollected { .. } => coins += 1,
                RunEvent::Died { obstacle_id } => {
                    log::info!(
                        "Run {} hit obstacle #{} after {:.1}s, score {}",
                        runs,
                        obstacle_id,
                        snap.elapsed,
                        snap.score
                    );
                }
                _ => {}
            }
        }
    }

    println!(
        "{} ticks, {} runs, {} coins, best score {}",
        ticks,
        runs,
        coins,
        run.high_score().unwrap_or(0)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
