//! Drawaloud CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use drawaloud_cli::commands::{run_export, run_inspect, run_prompts, run_timeline};
use drawaloud_cli::logging::{LogConfig, LogFormat, init_logging};
use drawaloud_cli::settings::{Settings, load_settings};
use drawaloud_fhir::ExportOptions;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, ExportArgs, LogFormatArg, LogLevelArg, SourceArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let mut settings = load_settings(cli.config.as_deref());
    apply_source_overrides(&mut settings, &cli.sources);

    let result = match &cli.command {
        Command::Prompts => run_prompts(&settings),
        Command::Timeline(args) => run_timeline(&settings, args.current),
        Command::Inspect => run_inspect(&settings).map(|_| ()),
        Command::Export(args) => {
            let options = export_options(&settings, args);
            run_export(&settings, &options, args.output.as_deref()).map(|_| ())
        }
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn apply_source_overrides(settings: &mut Settings, sources: &SourceArgs) {
    if let Some(path) = &sources.catalog {
        settings.catalog.path = Some(path.clone());
    }
    if let Some(path) = &sources.descriptions {
        settings.catalog.descriptions = Some(path.clone());
    }
    if let Some(dir) = &sources.store_dir {
        settings.store.dir = Some(dir.clone());
    }
    if let Some(key) = &sources.store_key {
        settings.store.key.clone_from(key);
    }
}

/// Flags win over the settings file.
fn export_options(settings: &Settings, args: &ExportArgs) -> ExportOptions {
    ExportOptions {
        reflection: args
            .reflection
            .map_or(settings.export.reflection, Into::into),
        include_canvas: args.include_canvas || settings.export.include_canvas,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
