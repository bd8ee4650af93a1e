mod command;
mod input;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
