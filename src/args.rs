//! Command-line argument parsing for the headless runner.

use std::env;
use std::path::PathBuf;

/// Default number of ticks before the runner gives up on a game
pub const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 30;

/// Parsed command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Simulation config file (JSON)
    pub config_path: Option<PathBuf>,
    /// High score table file (JSON)
    pub scores_path: PathBuf,
    /// Upper bound on ticks for the live game
    pub max_ticks: u64,
    /// Wall-clock delay between ticks, in milliseconds
    pub slow_mo_ms: Option<u64>,
    /// Skip the verification replay
    pub no_replay: bool,
    /// Whether help was requested
    pub show_help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config_path: None,
            scores_path: PathBuf::from("highscores.json"),
            max_ticks: DEFAULT_MAX_TICKS,
            slow_mo_ms: None,
            no_replay: false,
            show_help: false,
        }
    }
}

impl CliArgs {
    /// Parse arguments from command line.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse an argument list (without the program name).
    pub fn parse_from<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = Self::default();
        let mut iter = iter.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => {
                    args.show_help = true;
                }
                "--no-replay" => {
                    args.no_replay = true;
                }
                "--config" => match iter.next() {
                    Some(value) => args.config_path = Some(PathBuf::from(value)),
                    None => {
                        eprintln!("--config requires a path");
                        args.show_help = true;
                    }
                },
                "--scores" => match iter.next() {
                    Some(value) => args.scores_path = PathBuf::from(value),
                    None => {
                        eprintln!("--scores requires a path");
                        args.show_help = true;
                    }
                },
                "--max-ticks" => match iter.next().map(|v| v.parse::<u64>()) {
                    Some(Ok(n)) => args.max_ticks = n,
                    _ => {
                        eprintln!("--max-ticks requires a tick count");
                        args.show_help = true;
                    }
                },
                "--slow-mo" => match iter.next().map(|v| v.parse::<u64>()) {
                    Some(Ok(ms)) => args.slow_mo_ms = Some(ms),
                    _ => {
                        eprintln!("--slow-mo requires a delay in milliseconds");
                        args.show_help = true;
                    }
                },
                _ => {
                    eprintln!("Unknown argument: {}", arg);
                    args.show_help = true;
                }
            }
        }

        args
    }

    /// Print help text to stderr.
    pub fn print_help() {
        eprintln!(
            "Usage:\n  cannon-defense [--config <file>] [--scores <file>] [--max-ticks <n>] [--slow-mo <ms>] [--no-replay]\n\n\
             Plays one demo game with the autopilot, records it, stores the high\n\
             score table and replays the recording to check it reproduces.\n\n\
             Flags:\n\
             \x20 --config <file>      Simulation config (JSON, defaults if missing)\n\
             \x20 --scores <file>      High score table (default highscores.json)\n\
             \x20 --max-ticks <n>      Stop the live game after n ticks\n\
             \x20 --slow-mo <ms>       Sleep between ticks\n\
             \x20 --no-replay          Skip the verification replay\n\
             \x20 -h, --help           Show this help\n\n\
             Logging is controlled by RUST_LOG (e.g. RUST_LOG=debug).\n"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]), CliArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "--config",
            "sim.json",
            "--scores",
            "top.json",
            "--max-ticks",
            "500",
            "--slow-mo",
            "16",
            "--no-replay",
        ]);
        assert_eq!(args.config_path, Some(PathBuf::from("sim.json")));
        assert_eq!(args.scores_path, PathBuf::from("top.json"));
        assert_eq!(args.max_ticks, 500);
        assert_eq!(args.slow_mo_ms, Some(16));
        assert!(args.no_replay);
        assert!(!args.show_help);
    }

    #[test]
    fn test_bad_input_requests_help() {
        assert!(parse(&["--max-ticks", "lots"]).show_help);
        assert!(parse(&["--config"]).show_help);
        assert!(parse(&["--fullscreen"]).show_help);
        assert!(parse(&["-h"]).show_help);
    }
}
