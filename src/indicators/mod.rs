pub mod momentum;
pub mod pipeline;
pub mod trend;

pub use pipeline::IndicatorPipeline;
