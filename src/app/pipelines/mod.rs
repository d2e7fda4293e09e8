pub mod batch_pipeline;

pub use batch_pipeline::CsvBatchPipeline;
