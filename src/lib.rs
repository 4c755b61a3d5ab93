//! Collect text files from files and folders into one clipboard-ready string.
//!
//! The pipeline is linear: [`walker`] enumerates files, [`filter`] drops
//! noise, [`loader`] reads and formats each file, [`aggregate`] joins the
//! blocks, and an [`output::Sink`] delivers the result.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod output;
pub mod walker;

use aggregate::{Aggregate, Aggregator};
use config::FilterConfig;
use error::{LoadError, RunError};
use filter::FilterChain;
use loader::Loader;
use std::path::PathBuf;
use tracing::{debug, info, warn};

const MIB: f64 = 1024.0 * 1024.0;

/// Runs every stage except delivery. Per-file problems are logged and skipped.
pub fn collect<I, P>(roots: I, config: &FilterConfig) -> Result<Aggregate, RunError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let chain = FilterChain::new(config)?;
    let loader = Loader::new(config);
    let mut aggregator = Aggregator::new();

    for entry in walker::enumerate(roots, config) {
        if let Some(reason) = chain.exclusion(&entry) {
            debug!("Skipping {}: {reason}", entry.display_path);
            continue;
        }

        match loader.load(&entry) {
            Ok(block) => {
                info!("Added: {}", block.display_path);
                aggregator.push(block);
            }
            Err(LoadError::TooLarge { size, limit }) => info!(
                "Skipping large file: {} ({:.2} MB > {:.2} MB)",
                entry.display_path,
                size as f64 / MIB,
                limit as f64 / MIB
            ),
            Err(LoadError::DecodeFailure(_)) => warn!(
                "Could not decode '{}' as UTF-8. Skipping (likely binary).",
                entry.display_path
            ),
            Err(err) => warn!(
                "Error reading file '{}': {err}. Skipping.",
                entry.absolute_path.display()
            ),
        }
    }

    aggregator.finish()
}
