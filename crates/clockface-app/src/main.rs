mod app;

use std::backtrace::Backtrace;
use std::panic;
use std::path::PathBuf;

use clap::Parser;
use clockface_core::config::get_config;
use flexi_logger::{
    Age, Cleanup, Criterion, Duplicate, FileSpec, LogSpecBuilder, LogSpecification, Logger,
    LoggerHandle, Naming,
};
use log::{debug, error};
use masterror::AppError;

use crate::app::App;

const LOG_DIRECTORY: &str = "/tmp/clockface";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,

    /// Print the current date and time once and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let logger = start_logger()?;
    debug!("args: {args:?}");

    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    let (config, config_path) = get_config(args.config_path).inspect_err(|err| {
        error!("Failed to read config: {err}");
    })?;
    debug!("Config loaded from {config_path:?}");

    logger.set_new_spec(get_log_spec(&config.log_level)?);

    if args.once {
        return App::print_once(&config.clock);
    }

    App::stdout(config.clock).run().await
}

fn start_logger() -> Result<LoggerHandle, AppError> {
    Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory(LOG_DIRECTORY))
    // stdout belongs to the clock line
    .duplicate_to_stderr(Duplicate::Warn)
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    )
    .start()
    .map_err(|err| AppError::internal(format!("failed to start logger: {err}")))
}

fn get_log_spec(log_level: &str) -> Result<LogSpecification, AppError> {
    LogSpecification::env_or_parse(log_level)
        .map_err(|err| AppError::validation(format!("invalid log level '{log_level}': {err}")))
}
