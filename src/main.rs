mod app;
mod cli;
mod config;
mod gpu;
mod headless;
mod scene;
mod ui;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pi_engine::{Controller, Error, RunConfig, Sampler, parse_sample_count};

use crate::cli::Cli;
use crate::config::Settings;
use crate::headless::TerminalRenderer;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go through a background writer so a slow terminal never stalls a tick.
    let (log_writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_writer)
        .init();

    match run(cli) {
        Err(e) => match exit_message(&e) {
            Some(message) => {
                println!("{message}");
                Ok(())
            }
            None => Err(e),
        },
        Ok(()) => Ok(()),
    }
}

/// Message printed for errors that end the program with a zero exit status.
/// Anything else is returned from `main`.
fn exit_message(e: &anyhow::Error) -> Option<String> {
    match e.downcast_ref::<Error>()? {
        Error::InvalidSampleCount { input } => {
            tracing::debug!(input = %input, "rejected sample count");
            Some(e.to_string())
        }
        Error::UserInterrupt => Some(format!("\n{e}")),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let target = parse_sample_count(&cli.samples)?;
    let settings = Settings::load(cli.config.as_deref())?;

    let (interrupt_tx, interrupts) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.try_send(());
    })
    .context("installing interrupt handler")?;

    let config = RunConfig::new(target, cli.batch);
    let sampler = match cli.seed {
        Some(seed) => Sampler::seeded(seed),
        None => Sampler::from_entropy(),
    }
    .with_preview_points(settings.animation.preview_points);
    tracing::info!(
        target = config.target_samples,
        batch = config.batch_size,
        seed = cli.seed,
        headless = cli.headless,
        "starting"
    );
    let controller = Controller::new(config, sampler, settings.animation.pacing());

    if cli.headless {
        let mut renderer = TerminalRenderer::default();
        headless::run(controller, &mut renderer, &interrupts)?;
        println!("{}", renderer.pi_estimate);
        println!("{}", renderer.progress);
        Ok(())
    } else {
        app::run(controller, settings, interrupts)
    }
}
