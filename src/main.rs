mod args;

use anyhow::{Context, Result};
use clap::Parser;
use codeclip::error::RunError;
use codeclip::logging::initialize_logger;
use codeclip::output::{self, Delivery, Sink};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() -> Result<()> {
    // A missing .env is fine; it only supplies CODECLIP_* defaults.
    dotenvy::dotenv().ok();
    let args = args::Args::parse();
    initialize_logger().context("Failed to set global logger")?;

    // The clipboard handle has to outlive the pause on Linux, so the sink lives here.
    let mut sink = output::select_sink(args.stdout, args.out.clone());
    let result = run(&args, sink.as_mut());
    if args.pause {
        pause();
    }
    result
}

fn run(args: &args::Args, sink: &mut dyn Sink) -> Result<()> {
    let config = args.filter_config();
    info!("Processing {} item(s)...", args.paths.len());

    let aggregate = match codeclip::collect(args.paths.iter().cloned(), &config) {
        Ok(aggregate) => aggregate,
        Err(RunError::EmptyResult) => {
            warn!("{}", RunError::EmptyResult);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let delivery = output::deliver_or_preview(sink, &aggregate.text, &mut io::stdout())
        .with_context(|| format!("Failed to deliver output to {}", sink.describe()))?;

    let summary = aggregate.summary;
    match delivery {
        Delivery::Delivered => info!(
            "Successfully processed {} file(s), total content size {:.2} KiB",
            summary.files_processed,
            summary.total_kib()
        ),
        Delivery::Previewed => warn!(
            "Processed {} file(s) ({:.2} KiB) but failed to copy to clipboard",
            summary.files_processed,
            summary.total_kib()
        ),
    }
    Ok(())
}

fn pause() {
    print!("Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
