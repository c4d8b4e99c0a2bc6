use clap::Parser;
use flexi_logger::{
    Age, Cleanup, Criterion, Duplicate, FileSpec, LogSpecBuilder, Logger, LoggerHandle, Naming,
};
use log::{debug, error};
use masterror::{AppError, AppResult};
use std::backtrace::Backtrace;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use wallclock_core::config::get_config;
use wallclock_term::{App, TerminalSurface, get_log_spec};

const LOG_DIRECTORY: &str = "/tmp/wallclock";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,

    /// Print a single snapshot and exit
    #[arg(long)]
    once: bool,
}

fn start_logger() -> AppResult<LoggerHandle> {
    // stdout belongs to the clock surface, so only warnings reach the terminal.
    Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory(LOG_DIRECTORY))
    .duplicate_to_stderr(Duplicate::Warn)
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    )
    .start()
    .map_err(|err| AppError::internal(format!("failed to start logger: {err}")))
}

async fn run(args: Args, logger: &LoggerHandle) -> AppResult<()> {
    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    let (config, config_path) = get_config(args.config_path)?;
    debug!("Using config {config_path:?}");

    logger.set_new_spec(get_log_spec(&config.log_level));

    let in_place = config.terminal.in_place && !args.once;
    let surface = Arc::new(TerminalSurface::stdout(in_place));
    let mut app = App::new(config, surface);

    if args.once {
        return Ok(());
    }

    app.run_until(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {err}");
        }
    })
    .await;

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Before the logger runs there is nowhere else to report to.
    let logger = match start_logger() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("wallclock: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args, &logger).await {
        error!("{err}");
        drop(logger);
        std::process::exit(1);
    }
}
