//! Command dispatch.
//!
//! `main` parses arguments and sets up logging; everything after that lives
//! here so it can be driven from tests with in-memory streams.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use pstat_common::{Error, OutputFormat, Result};
use pstat_config::{resolve_config, ResolvedConfig};
use tracing::{debug, info};

use crate::batch::run_batch;
use crate::chart::ChartRegistry;
use crate::cli::{Cli, Command, ConfigCommand};
use crate::exit_codes::ExitCode;
use crate::output::render_evaluation;
use crate::request::evaluate;

/// Resolve settings for this invocation.
pub fn load_config(cli: &Cli) -> Result<ResolvedConfig> {
    let resolved = resolve_config(cli.global.config.as_deref())?;
    if resolved.using_defaults() {
        debug!("no settings file found, using built-in defaults");
    } else {
        debug!(source = ?resolved.source, path = ?resolved.path, "settings resolved");
    }
    Ok(resolved)
}

/// Execute `cli` against resolved settings.
pub fn run<R: Read, W: Write>(
    cli: &Cli,
    config: &ResolvedConfig,
    stdin: R,
    out: &mut W,
) -> Result<ExitCode> {
    let format = cli.global.format;
    let settings = &config.settings;

    match &cli.command {
        Command::Batch { input } => {
            let mut registry = ChartRegistry::new();
            let summary = match input.as_deref().filter(|p| *p != Path::new("-")) {
                Some(path) => {
                    info!(path = %path.display(), "reading batch file");
                    let file = File::open(path)?;
                    run_batch(BufReader::new(file), out, format, settings, &mut registry)?
                }
                None => run_batch(BufReader::new(stdin), out, format, settings, &mut registry)?,
            };
            let released = registry.clear();
            debug!(released, "batch charts released");
            Ok(if summary.all_ok() {
                ExitCode::Clean
            } else {
                ExitCode::PartialFail
            })
        }
        Command::Config {
            command: ConfigCommand::Show,
        } => {
            write_config(config, format, out)?;
            Ok(ExitCode::Clean)
        }
        command => {
            let request = command
                .to_request()?
                .ok_or_else(|| Error::domain("command does not describe a calculation"))?;
            let evaluation = evaluate(&request, &settings.series_options())?;
            info!(section = %request.section(), value = evaluation.result.value, "evaluated");
            let rendered = render_evaluation(format, &request, &evaluation, settings)?;
            writeln!(out, "{rendered}")?;
            Ok(ExitCode::Clean)
        }
    }
}

fn write_config<W: Write>(config: &ResolvedConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(config)?)?,
        OutputFormat::Text => {
            let source = serde_json::to_value(config.source)?;
            writeln!(out, "source: {}", source.as_str().unwrap_or("unknown"))?;
            match &config.path {
                _ if config.using_defaults() => writeln!(out, "path:   (built-in defaults)")?,
                Some(path) => writeln!(out, "path:   {}", path.display())?,
                None => writeln!(out, "path:   (none)")?,
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&config.settings)?)?;
        }
    }
    Ok(())
}
