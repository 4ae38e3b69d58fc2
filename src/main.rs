use clap::Parser;
use pipjournal::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
