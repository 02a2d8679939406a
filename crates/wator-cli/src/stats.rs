//! CSV population statistics.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use wator_core::PopulationCounts;

/// Buffered `step,fish,sharks` log
pub struct StatsLog<W: Write> {
    writer: BufWriter<W>,
}

impl StatsLog<File> {
    pub fn create(path: &Path) -> io::Result<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> StatsLog<W> {
    /// Wrap a writer and emit the header row
    pub fn new(inner: W) -> io::Result<Self> {
        let mut writer = BufWriter::new(inner);
        writeln!(writer, "step,fish,sharks")?;
        Ok(Self { writer })
    }

    pub fn record(&mut self, step: u64, counts: PopulationCounts) -> io::Result<()> {
        writeln!(self.writer, "{},{},{}", step, counts.fish, counts.sharks)
    }

    /// Flush buffered rows and return the underlying writer
    pub fn finish(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}
