use crate::core::orchestrator::FilterOrchestrator;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::domain::model::FilterOutcome;
use crate::utils::error::{FilterError, Result};
use serde_json::Value;
use std::path::Path;

/// Reads a JSON array of housing records, filters it by date and writes the
/// selections back as JSON arrays.
pub struct JsonFilterPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> JsonFilterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }

    fn render(records: Vec<&Record>) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(&records)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Every output serialized up front, in write order.
    fn plan_outputs(&self, result: &TransformResult) -> Result<Vec<(String, Vec<u8>)>> {
        let names = self.config.filenames();
        let source = &result.source;
        let mut planned = Vec::new();

        match &result.outcome {
            FilterOutcome::Conjunctive { primary, fallback } => {
                planned.push((names.primary, Self::render(primary.records(source))?));
                if let Some(fallback) = fallback.as_ref().filter(|f| !f.is_empty()) {
                    planned.push((names.alternative, Self::render(fallback.records(source))?));
                }
            }
            FilterOutcome::Disjunctive(selection) => {
                planned.push((names.primary, Self::render(selection.records(source))?));
            }
            FilterOutcome::Tiered(tiered) => {
                planned.push((names.primary, Self::render(tiered.combined_records(source))?));
                if !tiered.tier_a.is_empty() {
                    planned.push((names.tier_a, Self::render(tiered.tier_a_records(source))?));
                }
                if !tiered.tier_b.is_empty() {
                    planned.push((names.tier_b, Self::render(tiered.tier_b_records(source))?));
                }
            }
        }

        Ok(planned)
    }
}

/// Parses the raw input into records; anything other than an array of
/// objects makes the source unusable.
pub fn parse_records(path: &str, bytes: &[u8]) -> Result<Vec<Record>> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| FilterError::source_unavailable(path, e))?;

    let Value::Array(items) = value else {
        return Err(FilterError::source_unavailable(
            path,
            "expected a JSON array of records",
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(data) => Ok(Record::new(data)),
            other => Err(FilterError::source_unavailable(
                path,
                format!("element {} is not an object: {}", i, other),
            )),
        })
        .collect()
}

impl<S: Storage, C: ConfigProvider> Pipeline for JsonFilterPipeline<S, C> {
    fn extract(&self) -> Result<Vec<Record>> {
        let path = self.config.input_path();
        tracing::debug!("Reading records from: {}", path);

        let bytes = self
            .storage
            .read_file(path)
            .map_err(|e| FilterError::source_unavailable(path, e))?;

        parse_records(path, &bytes)
    }

    fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let orchestrator =
            FilterOrchestrator::new(self.config.cutoff()).with_fallback(self.config.fallback_enabled());

        tracing::info!(
            "Filtering {} records with policy '{}' and cutoff {}",
            data.len(),
            self.config.policy(),
            orchestrator.cutoff()
        );

        let outcome = orchestrator.run(self.config.policy(), &data);
        Ok(TransformResult {
            source: data,
            outcome,
        })
    }

    fn load(&self, result: &TransformResult) -> Result<Vec<String>> {
        let planned = self.plan_outputs(result)?;
        tracing::debug!("Writing {} output files", planned.len());

        let files: Vec<(String, Vec<u8>)> = planned
            .into_iter()
            .map(|(filename, bytes)| (self.output_file(&filename), bytes))
            .collect();
        self.storage.write_files(&files)?;

        Ok(files.into_iter().map(|(path, _)| path).collect())
    }
}
