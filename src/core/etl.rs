use crate::core::reader::Reader;
use crate::core::writer::Writer;
use crate::domain::descriptor::{SinkDescriptor, SourceDescriptor};
use crate::domain::ports::{CredentialsProvider, HttpClient, ObjectStore, Transform};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_stored: usize,
    pub columns: usize,
    pub elapsed: Duration,
}

/// 依序執行 load -> transform -> store，讀取完成後才會開始寫入
pub struct EtlEngine<H, S, C, T>
where
    H: HttpClient,
    S: ObjectStore,
    C: CredentialsProvider,
    T: Transform,
{
    reader: Reader<H>,
    writer: Writer<S, C>,
    transform: T,
    monitor_enabled: bool,
}

impl<H, S, C, T> EtlEngine<H, S, C, T>
where
    H: HttpClient,
    S: ObjectStore,
    C: CredentialsProvider,
    T: Transform,
{
    pub fn new(reader: Reader<H>, writer: Writer<S, C>, transform: T) -> Self {
        Self::new_with_monitoring(reader, writer, transform, false)
    }

    pub fn new_with_monitoring(
        reader: Reader<H>,
        writer: Writer<S, C>,
        transform: T,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            reader,
            writer,
            transform,
            monitor_enabled,
        }
    }

    pub async fn run(&self, source: &SourceDescriptor, sink: &SinkDescriptor) -> Result<RunSummary> {
        let mut monitor = RunMonitor::new(self.monitor_enabled);
        tracing::info!("🚀 Starting ETL process");

        let raw = self.reader.load(source).await?;
        let rows_loaded = raw.num_rows();
        monitor.finish_phase("load");

        let cleaned = self.transform.apply(raw)?;
        tracing::info!("Transformed {} -> {} rows", rows_loaded, cleaned.num_rows());
        monitor.finish_phase("transform");

        self.writer.store(sink, &cleaned).await?;
        monitor.finish_phase("store");

        monitor.log_final_stats();
        Ok(RunSummary {
            rows_loaded,
            rows_stored: cleaned.num_rows(),
            columns: cleaned.num_columns(),
            elapsed: monitor.total_elapsed(),
        })
    }
}
