use clap::Parser;

mod platform;

fn main() -> anyhow::Result<()> {
    platform::run(platform::cli::Cli::parse())
}
