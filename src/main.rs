use std::process::ExitCode;

use clap::Parser;
use mimalloc::MiMalloc;

mod cli;
mod logging;
mod shell;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    logging::init();
    let cli = cli::Cli::parse();

    // A menu that fails to load is rendered in-page; only shell-level errors exit non-zero.
    match shell::run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("navshell error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
