use std::process::ExitCode;
use verbump_cli::{cli, logging, run, EXIT_USAGE};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_flag("quiet"));

    let mut stdout = std::io::stdout().lock();
    match run(&matches, &mut stdout) {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}
