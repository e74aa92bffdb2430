//! Cannon Defense headless runner
//!
//! Plays a demo game with the autopilot, stores the high score table, then
//! replays the recording and checks it reproduces the live game.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use cannon_defense::args::CliArgs;
use cannon_defense::autopilot::Autopilot;
use cannon_defense::persistence::HighScoreStore;
use cannon_defense::replay::{InputSource, LiveInput, StepOutcome};
use cannon_defense::sim::{EntityKind, GameEvent, GamePhase, GameState};
use cannon_defense::{Session, SimConfig};

/// What a finished run looked like, for live/replay comparison
#[derive(Debug, Default, PartialEq)]
struct RunSummary {
    ticks: u64,
    kills: Vec<(EntityKind, u32)>,
    score: i64,
    wave: u32,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    if args.show_help {
        CliArgs::print_help();
        return ExitCode::SUCCESS;
    }

    let config = match &args.config_path {
        Some(path) => SimConfig::load(path),
        None => SimConfig::default(),
    };
    let store = HighScoreStore::new(&args.scores_path, config.high_score_slots);
    let high_scores = store.load();
    log::info!(
        "Loaded {} high scores from {}",
        high_scores.len(),
        store.path().display()
    );

    let delay = args.slow_mo_ms.map(Duration::from_millis);
    let mut session = Session::new(GameState::new(config, high_scores));
    let mut pilot = Autopilot::default();

    let live = play(&mut session, args.max_ticks, delay, |state: &GameState| {
        pilot.next_input(state)
    });
    println!(
        "Live game: wave {}, score {}, {} kills in {} ticks",
        live.wave,
        live.score,
        live.kills.len(),
        live.ticks
    );

    if let Err(e) = store.save(&session.state.high_scores) {
        log::error!("Failed to save high scores: {}", e);
    }
    for (i, score) in session.state.high_scores.scores().iter().enumerate() {
        let marker = if session.state.high_scores.highlight_index(live.score) == Some(i) {
            " <"
        } else {
            ""
        };
        println!("{:>2}. {:>8}{}", i + 1, score, marker);
    }

    if args.no_replay {
        return ExitCode::SUCCESS;
    }
    if session.state.phase != GamePhase::Over {
        log::warn!("Live game did not finish within {} ticks; skipping replay", args.max_ticks);
        return ExitCode::SUCCESS;
    }

    let mut replay_signal = true;
    let replayed = play(&mut session, args.max_ticks, delay, |_: &GameState| {
        let input = LiveInput {
            replay: replay_signal,
            ..Default::default()
        };
        replay_signal = false;
        input
    });

    if replayed == live {
        println!("Replay matched: {} kills, score {}", replayed.kills.len(), replayed.score);
        ExitCode::SUCCESS
    } else {
        log::error!("Replay diverged: live {:?}, replay {:?}", live, replayed);
        println!("Replay diverged");
        ExitCode::FAILURE
    }
}

/// Step until the game reaches Over, quits, or runs out of ticks
fn play<S: InputSource>(
    session: &mut Session,
    max_ticks: u64,
    delay: Option<Duration>,
    mut source: S,
) -> RunSummary {
    let mut summary = RunSummary::default();

    while summary.ticks < max_ticks {
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
        let input = source.next_input(&session.state);
        if session.step(&input) == StepOutcome::Quit {
            break;
        }
        summary.ticks += 1;

        for event in session.state.drain_events() {
            if let Some(cue) = event.sound() {
                log::trace!("cue {:?}", cue);
            }
            match event {
                GameEvent::Killed { kind, id } => summary.kills.push((kind, id)),
                GameEvent::WaveStarted { wave } => log::debug!("wave {} begins", wave),
                GameEvent::GameOver { score, rank } => {
                    log::info!("Final score {} (rank {:?})", score, rank);
                }
                _ => {}
            }
        }
        if session.state.phase == GamePhase::Over {
            break;
        }
    }

    summary.score = session.state.scoreboard.target();
    summary.wave = session.state.wave_number;
    summary
}
