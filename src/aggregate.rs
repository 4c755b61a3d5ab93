use crate::error::RunError;
use crate::loader::FormattedBlock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    /// UTF-8 length of the trimmed content, headers excluded.
    pub total_content_bytes: usize,
}

impl RunSummary {
    pub fn total_kib(&self) -> f64 {
        self.total_content_bytes as f64 / 1024.0
    }
}

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub text: String,
    pub summary: RunSummary,
}

/// Collects blocks in arrival order.
#[derive(Debug, Default)]
pub struct Aggregator {
    rendered: Vec<String>,
    summary: RunSummary,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: FormattedBlock) {
        self.summary.files_processed += 1;
        self.summary.total_content_bytes += block.content.len();
        self.rendered.push(block.render());
    }

    /// Every rendered block ends in `\n`, so joining on `\n` leaves one blank line between blocks.
    pub fn finish(self) -> Result<Aggregate, RunError> {
        if self.rendered.is_empty() {
            return Err(RunError::EmptyResult);
        }
        Ok(Aggregate {
            text: self.rendered.join("\n"),
            summary: self.summary,
        })
    }
}

pub fn aggregate<I>(blocks: I) -> Result<Aggregate, RunError>
where
    I: IntoIterator<Item = FormattedBlock>,
{
    let mut aggregator = Aggregator::new();
    for block in blocks {
        aggregator.push(block);
    }
    aggregator.finish()
}
