use anyhow::Result;
use colored::Colorize;

use hoops_blend::cli::Command;
use hoops_blend::{
    handle_completions, handle_learn, handle_matchups, handle_pipeline, handle_predict, handle_serve,
    handle_weights, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)?;
    if reports_status(&command) {
        eprintln!("{}", "OK".green().bold());
    }
    Ok(())
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Learn { mode } => handle_learn(*mode),
        Command::Predict => handle_predict(),
        Command::Pipeline => handle_pipeline(),
        Command::Matchups => handle_matchups(),
        Command::Weights => handle_weights(),
        Command::Serve { port } => handle_serve(*port),
        Command::Completions { shell } => handle_completions(*shell),
    }
}

fn reports_status(command: &Command) -> bool {
    matches!(command, Command::Learn { .. } | Command::Predict | Command::Pipeline)
}
