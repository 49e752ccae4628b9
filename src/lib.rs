pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod persist;
pub mod records;
pub mod report;
pub mod services;
pub mod sources;
pub mod weights;

use std::io;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::records::load_predictions;
use crate::services::{LearningService, PipelineService, PredictionService, ServerService};
use crate::weights::{LearnMode, WeightStore};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn handle_learn(mode: LearnMode) -> Result<()> {
    let service = LearningService::new(AppConfig::from_env());
    service.run(mode).map(|_| ())
}

pub fn handle_predict() -> Result<()> {
    let service = PredictionService::new(AppConfig::from_env());
    service.run(today()).map(|_| ())
}

pub fn handle_pipeline() -> Result<()> {
    let service = PipelineService::new(AppConfig::from_env());
    service.run(today()).map(|_| ())
}

pub fn handle_matchups() -> Result<()> {
    let config = AppConfig::from_env();
    let schedule = sources::load_schedule(&config.paths.schedule_csv)?;
    let predictions = load_predictions(&config.paths.latest_predictions)?;

    for matchup in report::project_matchups(&schedule, &predictions) {
        println!(
            "{:>12} {:>6.1} @ {:<6.1} {:<12}  winner {} by {:.1}",
            matchup.visitor_team_id,
            matchup.visitor_score,
            matchup.home_score,
            matchup.home_team_id,
            matchup.winner_team_id,
            matchup.spread
        );
    }
    Ok(())
}

pub fn handle_weights() -> Result<()> {
    let config = AppConfig::from_env();
    let store = WeightStore::load(&config.paths.weights_file, config.learning.layout())?;

    for (key, entry) in store.iter() {
        println!("{:<28} L3 {:.4}  L10 {:.4}", key.to_string(), entry.form_weight, entry.class_weight);
    }
    Ok(())
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, AppConfig::from_env());
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
