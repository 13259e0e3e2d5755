pub mod report;
pub mod snapshot;
pub mod writer;

pub use report::{ChannelReport, ReportMessage, ReportSink, WriterReport};
pub use snapshot::EliteSnapshot;
pub use writer::{EliteConsumer, EliteOutcome, EliteWriter};
