use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maskaug_cv::BatchRunner;

mod cli;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("maskaug={log_level},maskaug_cv={log_level},maskaug_core={log_level}")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &cli::Args) -> Result<()> {
    let config = args.to_config()?;

    if let Some(path) = &args.write_config {
        config.to_json_file(path)?;
        info!("Configuration written to {}", path.display());
        return Ok(());
    }

    let runner = BatchRunner::new(config);
    let report = runner.run().context("Augmentation run could not start")?;

    if report.failed() > 0 {
        warn!(
            "{} of {} samples were skipped, see warnings above",
            report.failed(),
            report.processed
        );
    }
    info!(
        "Augmented images in {}, labels in {}",
        runner.config().output_image_dir.display(),
        runner.config().output_label_dir.display()
    );

    Ok(())
}
