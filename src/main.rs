mod args;
mod builtin;
mod config;
mod launcher;
mod logging;
mod repl;
mod terminal;

use std::process::ExitCode;

use config::Config;
use launcher::ProcessLauncher;
use repl::Shell;

fn main() -> ExitCode {
    logging::init_logging();

    let config = Config::default();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    let mut shell = Shell::new(&config, ProcessLauncher);

    match shell.run(&mut stdin.lock(), &mut stdout, &mut stderr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "fatal");
            eprintln!("{}: {}", config.name, err);
            ExitCode::FAILURE
        }
    }
}
