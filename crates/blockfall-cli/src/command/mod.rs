use clap::{Parser, Subcommand};

use self::{play::PlayArg, rules::RulesArg};

mod play;
mod rules;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print the default rules as JSON, a starting point for `play --rules`
    Rules(#[clap(flatten)] RulesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Rules(arg) => rules::run(&arg)?,
    }
    Ok(())
}
