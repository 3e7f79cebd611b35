pub mod json_pipeline;

pub use json_pipeline::JsonFilterPipeline;
