use std::str::FromStr;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::weights::LearnMode;

#[derive(Parser, Debug)]
#[command(name = "hoops-blend", author, version, about = "Adaptive form/class points blending")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Tune blend weights from game results
    Learn {
        /// replay (whole history) or daily (latest game only)
        #[arg(short, long, value_parser = parse_mode)]
        mode: LearnMode,
    },
    /// Predict points for today's roster
    Predict,
    /// Pick the learning mode from prediction history, learn, then predict
    Pipeline,
    /// Print projected scores for today's games
    Matchups,
    /// Print the persisted weight table
    Weights,
    /// Start the read-only API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_mode(raw: &str) -> Result<LearnMode, String> {
    LearnMode::from_str(raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_learn_mode() {
        let cli = Cli::try_parse_from(["hoops-blend", "learn", "--mode", "Replay"]).unwrap();
        assert_eq!(cli.command, Command::Learn { mode: LearnMode::Replay });
    }

    #[test]
    fn test_unknown_mode_rejected_by_parser() {
        assert!(Cli::try_parse_from(["hoops-blend", "learn", "--mode", "weekly"]).is_err());
        assert!(Cli::try_parse_from(["hoops-blend", "learn"]).is_err());
    }

    #[test]
    fn test_serve_default_port() {
        let cli = Cli::try_parse_from(["hoops-blend", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: 3000 });
    }
}
