use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Destination for the run's text report.
pub trait ReportSink: Send {
    /// One `<iteration>\t<fitness>` record per elite
    fn on_elite(&mut self, iteration: u64, fitness: u64) -> io::Result<()>;
    /// Final wall-clock duration of the run
    fn on_run_complete(&mut self, elapsed: Duration) -> io::Result<()>;
}

/// Writes report lines to any writer (stdout by default).
pub struct WriterReport<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterReport<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ReportSink for WriterReport<W> {
    fn on_elite(&mut self, iteration: u64, fitness: u64) -> io::Result<()> {
        writeln!(self.writer, "{}\t{}", iteration, fitness)?;
        self.writer.flush()
    }

    fn on_run_complete(&mut self, elapsed: Duration) -> io::Result<()> {
        writeln!(self.writer, "{:?}", elapsed)?;
        self.writer.flush()
    }
}

// For handing reports to another thread (UI, log shipper)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportMessage {
    Elite { iteration: u64, fitness: u64 },
    RunComplete { elapsed: Duration },
}

pub struct ChannelReport {
    sender: Sender<ReportMessage>,
}

impl ChannelReport {
    pub fn new(sender: Sender<ReportMessage>) -> Self {
        Self { sender }
    }

    fn send(&self, message: ReportMessage) -> io::Result<()> {
        self.sender
            .send(message)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "report receiver dropped"))
    }
}

impl ReportSink for ChannelReport {
    fn on_elite(&mut self, iteration: u64, fitness: u64) -> io::Result<()> {
        self.send(ReportMessage::Elite { iteration, fitness })
    }

    fn on_run_complete(&mut self, elapsed: Duration) -> io::Result<()> {
        self.send(ReportMessage::RunComplete { elapsed })
    }
}
