use clap::Parser;
use codeclip::config::{Decoding, FilterConfig, DEFAULT_MAX_FILE_SIZE_BYTES};
use std::path::PathBuf;

/// Collect text files from files and folders and copy them to the clipboard,
/// each preceded by a `//path` header.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Files or directories to collect.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Glob patterns to exclude, matched against the displayed path.
    #[arg(short = 'x', long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Additional directory name to ignore anywhere in a path.
    #[arg(long, value_name = "NAME")]
    pub ignore_dir: Vec<String>,

    /// Additional file name to ignore.
    #[arg(long, value_name = "NAME")]
    pub ignore_file: Vec<String>,

    /// Start from empty ignore lists instead of the built-in ones.
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Skip files larger than this many bytes; use 0 to disable.
    #[arg(long, value_name = "BYTES", env = "CODECLIP_MAX_FILE_BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE_BYTES)]
    pub max_file_bytes: u64,

    /// Skip files that are not valid UTF-8 instead of dropping the invalid bytes.
    #[arg(long)]
    pub strict: bool,

    /// Respect .gitignore and .ignore files.
    #[arg(long)]
    pub gitignore: bool,

    /// Print to standard output instead of the clipboard.
    #[arg(long)]
    pub stdout: bool,

    /// Output to a file instead of the clipboard.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Wait for Enter before exiting.
    #[arg(long, env = "CODECLIP_PAUSE")]
    pub pause: bool,
}

impl Args {
    pub fn filter_config(&self) -> FilterConfig {
        let base = if self.no_default_ignores {
            FilterConfig::without_default_ignores()
        } else {
            FilterConfig::default()
        };

        FilterConfig {
            max_file_size_bytes: (self.max_file_bytes > 0).then_some(self.max_file_bytes),
            exclude_globs: self.exclude.clone(),
            respect_gitignore: self.gitignore,
            decoding: if self.strict {
                Decoding::Strict
            } else {
                Decoding::Lossy
            },
            ..base
        }
        .ignore_dirs(&self.ignore_dir)
        .ignore_files(&self.ignore_file)
    }
}
