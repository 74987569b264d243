use clap::Parser;

mod commands;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    commands::run(commands::Cli::parse())
}
