use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;

pub struct FilterEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FilterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting filter run");

        // Extract
        let raw_data = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", raw_data.len());

        // Transform
        let transformed = self.pipeline.transform(raw_data)?;
        let stats = transformed.outcome.primary_stats();
        tracing::info!(
            "Matched {} of {} records ({} missing dates, {} invalid dates)",
            stats.matched,
            stats.total_input,
            stats.skipped_missing,
            stats.skipped_invalid
        );

        // Load
        let outputs = self.pipeline.load(&transformed)?;
        for path in &outputs {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(RunReport {
            outputs,
            outcome: transformed.outcome,
        })
    }

    /// Extract and transform only; nothing is written.
    pub fn preview(&self) -> Result<RunReport> {
        let raw_data = self.pipeline.extract()?;
        let transformed = self.pipeline.transform(raw_data)?;
        Ok(RunReport {
            outputs: Vec::new(),
            outcome: transformed.outcome,
        })
    }
}
