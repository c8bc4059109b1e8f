use std::io::Write;

use clap::Parser;
use pstat_common::Error;
use pstat_core::app;
use pstat_core::cli::Cli;
use pstat_core::exit_codes::ExitCode;
use pstat_core::logging::init_logging;
use pstat_core::output::{render_error, ErrorEnvelope};
use tracing::{debug, warn};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose, cli.global.quiet, cli.global.format);

    let mut stdout = std::io::stdout().lock();
    let outcome = app::load_config(&cli)
        .and_then(|config| app::run(&cli, &config, std::io::stdin().lock(), &mut stdout));

    let code = match outcome {
        Ok(code) => code,
        Err(err) => report(&cli, &err),
    };
    if !code.is_success() && !code.is_error() {
        warn!(code = code.as_i32(), "finished with failed requests");
    }
    let _ = stdout.flush();
    std::process::exit(code.as_i32());
}

fn report(cli: &Cli, err: &Error) -> ExitCode {
    let code = ExitCode::for_error(err);
    debug!(kind = err.kind(), code = code.as_i32(), "run failed");
    let rendered = render_error(cli.global.format, &ErrorEnvelope::new(err));
    if cli.global.format.is_json() {
        println!("{rendered}");
    } else {
        eprintln!("{rendered}");
    }
    code
}
