use crate::error::SinkError;
use arboard::Clipboard;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};

pub const PREVIEW_CHARS: usize = 1000;

/// Where the final text goes.
pub trait Sink {
    fn deliver(&mut self, text: &str) -> Result<(), SinkError>;

    /// Human-readable destination for the summary line.
    fn describe(&self) -> String;
}

/// The system clipboard.
#[derive(Default)]
pub struct ClipboardSink {
    // On Linux the selection is owned by this handle, so it is kept until the sink drops.
    clipboard: Option<Clipboard>,
}

impl ClipboardSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for ClipboardSink {
    fn deliver(&mut self, text: &str) -> Result<(), SinkError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new()?,
        };
        self.clipboard.insert(clipboard).set_text(text)?;
        Ok(())
    }

    fn describe(&self) -> String {
        "your clipboard".to_string()
    }
}

pub struct StdoutSink;

impl Sink for StdoutSink {
    fn deliver(&mut self, text: &str) -> Result<(), SinkError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "standard output".to_string()
    }
}

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for FileSink {
    fn deliver(&mut self, text: &str) -> Result<(), SinkError> {
        fs::write(&self.path, text)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Stdout wins over a file, a file wins over the clipboard.
pub fn select_sink(to_stdout: bool, out_file: Option<PathBuf>) -> Box<dyn Sink> {
    if to_stdout {
        Box::new(StdoutSink)
    } else if let Some(path) = out_file {
        Box::new(FileSink::new(path))
    } else {
        Box::new(ClipboardSink::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The clipboard failed and a preview was written instead.
    Previewed,
}

/// Clipboard failures fall back to a preview on `console`; I/O failures propagate.
pub fn deliver_or_preview<W: Write>(
    sink: &mut dyn Sink,
    text: &str,
    console: &mut W,
) -> Result<Delivery, SinkError> {
    match sink.deliver(text) {
        Ok(()) => {
            info!("Content has been copied to {}.", sink.describe());
            Ok(Delivery::Delivered)
        }
        Err(SinkError::Clipboard(message)) => {
            error!("Failed to copy to clipboard: {message}");
            writeln!(
                console,
                "You may need to install a copy/paste mechanism for your system \
                 (on Linux: xclip, xsel or wl-clipboard)."
            )?;
            writeln!(console, "\nContent preview (first {PREVIEW_CHARS} chars):\n")?;
            writeln!(console, "{}", preview(text, PREVIEW_CHARS))?;
            Ok(Delivery::Previewed)
        }
        Err(err) => Err(err),
    }
}

/// The first `limit` characters, with `...` appended when anything was cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
