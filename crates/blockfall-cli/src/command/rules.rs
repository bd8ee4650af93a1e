use std::path::PathBuf;

use blockfall_engine::Rules;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RulesArg {
    /// Write to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RulesArg) -> anyhow::Result<()> {
    let RulesArg { output } = arg;
    Output::save_json(&Rules::default(), output.clone())
}
