//! Away Team entry point
//!
//! Native: runs a headless session driven by the autopilot, logging media
//! requests instead of playing them. Pass a settings JSON path as the first
//! argument to override tuning. The browser build is driven from JS through
//! `away_team::wasm`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use away_team::Session;
    use away_team::autopilot::Autopilot;
    use away_team::consts::*;
    use away_team::media::LogMedia;
    use away_team::sim::Phase;

    /// Give up after this much simulated time
    const MAX_RUN_SECS: f32 = 600.0;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Away Team (native, headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => away_team::Settings::load_or_default(path),
        None => away_team::Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);

    let mut session = Session::with_settings(seed, &settings, LogMedia::new());
    let mut pilot = Autopilot::new();

    let mut elapsed = 0.0;
    while elapsed < MAX_RUN_SECS {
        session.present(&mut pilot);
        session.advance(SIM_DT, &mut pilot);
        session.media_mut().advance(SIM_DT);
        elapsed += SIM_DT;

        if session.state().sequencer.finale {
            break;
        }
    }

    let state = session.state();
    log::info!(
        "Finished after {} ticks: phase {:?}, {} enemies left, {} shots fired, seed {}",
        state.time_ticks,
        state.sequencer.phase,
        state.enemies.len(),
        pilot.shots(),
        seed
    );
    if state.sequencer.phase != Phase::EndingVideo {
        log::warn!("Autopilot did not reach the ending");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is away_team::wasm::start, this is just to satisfy the compiler
}
