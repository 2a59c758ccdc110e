use std::process::ExitCode;

use clap::Parser;

use passforge::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    passforge::logging::init(cli.verbose, cli.quiet);

    match passforge::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
