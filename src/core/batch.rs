use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub output_path: String,
    pub total: usize,
    pub determined: usize,
    pub undetermined: usize,
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<BatchSummary> {
        tracing::info!("Starting batch lookup");

        // Extract
        let readings = self.pipeline.extract()?;
        tracing::info!("Read {} model/serial pairs", readings.len());

        // Transform
        let result = self.pipeline.transform(readings)?;
        let determined = result.lookups.iter().filter(|l| l.determined).count();
        tracing::info!(
            "Decoded {} of {} serial numbers",
            determined,
            result.lookups.len()
        );

        // Load
        let output_path = self.pipeline.load(&result)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(BatchSummary {
            output_path,
            total: result.lookups.len(),
            determined,
            undetermined: result.lookups.len() - determined,
        })
    }
}
