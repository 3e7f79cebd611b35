pub mod date_parser;
pub mod etl;
pub mod orchestrator;
pub mod predicate;
pub mod selector;
pub mod survey;

pub use crate::domain::model::{Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
